use serde::{Deserialize, Serialize};

use super::job::{JobId, JobState};
use super::{null_as_default, string_or_number};

/// A dashboard project: one résumé and the latest compile job behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub latest_job_id: Option<JobId>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub latest_job_status: Option<JobState>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl Project {
    /// Status marker shown next to the project name.
    pub fn status_marker(&self) -> &'static str {
        match self.latest_job_status {
            Some(JobState::Success) => "✓",
            Some(JobState::Failed) => "✗",
            Some(_) => "...",
            None => "",
        }
    }
}

/// GET projects/ answers with either a bare list or a paginated page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProjectList {
    Plain(Vec<Project>),
    Paginated { results: Vec<Project> },
}

impl ProjectList {
    pub fn into_vec(self) -> Vec<Project> {
        match self {
            ProjectList::Plain(projects) => projects,
            ProjectList::Paginated { results } => results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_list_accepts_both_shapes() {
        let plain: ProjectList =
            serde_json::from_str(r#"[{ "id": "p1", "name": "CV" }]"#).unwrap();
        assert_eq!(plain.into_vec().len(), 1);

        let paged: ProjectList = serde_json::from_str(
            r#"{ "count": 2, "results": [{ "id": "p1" }, { "id": "p2", "latest_job_status": "FAILED" }] }"#,
        )
        .unwrap();
        let projects = paged.into_vec();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].status_marker(), "✗");
    }
}
