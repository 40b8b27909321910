//! The résumé record as the backend persists it.
//!
//! Records produced by AI generation follow the template schema exactly.
//! Records saved by older web editors carry editing-shape keys instead
//! (`position`, `achievements`, `graduation_date`, ...), so the aliases and
//! read-only fields below accept both.

use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::resume::Contact;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendResumeRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<BackendEducation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<BackendExperience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<BackendProject>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<BackendSkillCategory>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responsibilities: Vec<BackendResponsibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSkillCategory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
}

/// Generic "responsibility" record. Volunteering is stored this way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendResponsibility {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendProject {
    #[serde(alias = "title", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    /// The first element doubles as the project date when one was entered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Vec<String>,
    #[serde(default, skip_serializing)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendExperience {
    #[serde(alias = "position", default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(alias = "achievements", default, deserialize_with = "null_as_default")]
    pub responsibilities: Vec<String>,
    #[serde(default, skip_serializing)]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendEducation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    /// The first element carries the field of study.
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Vec<String>,
    #[serde(default, skip_serializing)]
    pub field: Option<String>,
    #[serde(default, skip_serializing)]
    pub graduation_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_record_parses() {
        let json = r#"{
            "full_name": "محمد يحيى",
            "contact": { "email": "mohamed@example.com", "location": "الرياض" },
            "professional_summary": "مهندس ذكاء اصطناعي",
            "education": [{
                "degree": "بكالوريوس هندسة حاسبات",
                "institution": "جامعة الملك سعود",
                "date_range": "2018 - 2022",
                "gpa": "4.5/5.0"
            }],
            "skills": [{ "category_name": "لغات البرمجة", "skills": ["Python", "C++"] }],
            "responsibilities": null
        }"#;
        let record: BackendResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.contact.email.as_deref(), Some("mohamed@example.com"));
        assert_eq!(record.education[0].date_range.as_deref(), Some("2018 - 2022"));
        assert_eq!(record.skills[0].skills.len(), 2);
        assert!(record.responsibilities.is_empty());
        assert!(record.projects.is_empty());
    }

    #[test]
    fn test_editor_shaped_experience_is_accepted() {
        let json = r#"{
            "company": "Acme",
            "position": "Engineer",
            "start_date": "يناير 2020",
            "end_date": "حالياً",
            "achievements": ["Shipped v2"]
        }"#;
        let exp: BackendExperience = serde_json::from_str(json).unwrap();
        assert_eq!(exp.role, "Engineer");
        assert_eq!(exp.responsibilities, vec!["Shipped v2"]);
        assert_eq!(exp.start_date.as_deref(), Some("يناير 2020"));
    }

    #[test]
    fn test_read_only_fields_are_not_written_back() {
        let exp = BackendExperience {
            role: "Engineer".into(),
            start_date: Some("2020".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&exp).unwrap();
        assert!(value.get("start_date").is_none());
        assert_eq!(value["role"], "Engineer");
    }

    #[test]
    fn test_project_title_alias() {
        let project: BackendProject =
            serde_json::from_str(r#"{ "title": "Sira", "technologies": null }"#).unwrap();
        assert_eq!(project.name, "Sira");
        assert!(project.technologies.is_empty());
    }
}
