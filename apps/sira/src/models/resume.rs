//! The editing shape of a résumé.
//!
//! This is what the editor mutates and what `sira export` writes. It is
//! denormalized compared to the backend record: skills live in fixed buckets
//! and volunteering has its own list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entries::EntryList;
use super::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub experience: EntryList<ExperienceItem>,
    #[serde(default)]
    pub education: EntryList<EducationItem>,
    #[serde(default)]
    pub projects: EntryList<ProjectItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: SkillsSummary,
    #[serde(default)]
    pub volunteer_experience: EntryList<VolunteerItem>,

    // Accepted into the document, not yet persisted by the backend.
    #[serde(default, deserialize_with = "null_as_default")]
    pub research: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publications: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub awards: Vec<Value>,
    /// Extra spoken-language entries. Kept apart from `skills.spoken_languages`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages_list: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub field: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub graduation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Fixed skill buckets shown by the skills tab.
///
/// Spoken languages travel under the `frameworks` key for compatibility with
/// documents saved by the web editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(rename = "frameworks", default, deserialize_with = "null_as_default")]
    pub spoken_languages: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Vec<String>,
    /// Certifications and platforms.
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub soft_skills: Vec<String>,
}

impl SkillsSummary {
    pub fn total(&self) -> usize {
        self.languages.len()
            + self.spoken_languages.len()
            + self.tools.len()
            + self.platforms.len()
            + self.soft_skills.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolunteerItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_tolerates_nulls_and_missing_fields() {
        let json = r#"{
            "full_name": "سارة أحمد",
            "contact": null,
            "experience": null,
            "skills": { "languages": ["Rust"], "frameworks": null }
        }"#;
        let doc: ResumeDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.full_name, "سارة أحمد");
        assert_eq!(doc.contact, Contact::default());
        assert!(doc.experience.is_empty());
        assert!(doc.volunteer_experience.is_empty());
        assert_eq!(doc.skills.languages, vec!["Rust"]);
        assert!(doc.skills.spoken_languages.is_empty());
    }

    #[test]
    fn test_spoken_languages_use_frameworks_key() {
        let skills = SkillsSummary {
            spoken_languages: vec!["العربية".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(&skills).unwrap();
        assert_eq!(value["frameworks"][0], "العربية");
        assert!(value.get("spoken_languages").is_none());
    }

    #[test]
    fn test_skills_total_counts_every_bucket() {
        let skills = SkillsSummary {
            languages: vec!["Rust".into(), "Go".into()],
            spoken_languages: vec!["English".into()],
            tools: vec!["Git".into()],
            platforms: vec![],
            soft_skills: vec!["Mentoring".into()],
        };
        assert_eq!(skills.total(), 5);
    }
}
