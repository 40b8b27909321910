//! Whole-record conversion between the backend record and the editing document.

use crate::models::{
    BackendEducation, BackendExperience, BackendProject, BackendResumeRecord, EducationItem,
    ExperienceItem, ProjectItem, ResumeDocument,
};

use super::date_range::{join_date_range, split_date_range};
use super::responsibilities::{map_volunteer_from_backend, map_volunteer_to_backend};
use super::skills::{map_skills_from_backend, map_skills_to_backend};

pub fn document_from_record(record: &BackendResumeRecord) -> ResumeDocument {
    ResumeDocument {
        full_name: record.full_name.clone(),
        contact: record.contact.clone(),
        professional_summary: record.professional_summary.clone(),
        experience: record.experience.iter().map(experience_from_backend).collect(),
        education: record.education.iter().map(education_from_backend).collect(),
        projects: record.projects.iter().map(project_from_backend).collect(),
        skills: map_skills_from_backend(&record.skills),
        volunteer_experience: map_volunteer_from_backend(&record.responsibilities).into(),
        ..Default::default()
    }
}

/// Research, publications, awards, extra languages and courses are not part
/// of the backend schema and are left out.
pub fn record_from_document(doc: &ResumeDocument) -> BackendResumeRecord {
    BackendResumeRecord {
        full_name: doc.full_name.clone(),
        contact: doc.contact.clone(),
        professional_summary: doc.professional_summary.clone(),
        education: doc.education.values().map(education_to_backend).collect(),
        experience: doc.experience.values().map(experience_to_backend).collect(),
        projects: doc.projects.values().map(project_to_backend).collect(),
        skills: map_skills_to_backend(&doc.skills),
        responsibilities: map_volunteer_to_backend(doc.volunteer_experience.values()),
        template_id: None,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn experience_from_backend(exp: &BackendExperience) -> ExperienceItem {
    // Records saved from the editor carry explicit dates, generated ones a range.
    let (start_date, end_date) = match &exp.start_date {
        Some(start) => (start.clone(), exp.end_date.clone().unwrap_or_default()),
        None => split_date_range(exp.date_range.as_deref()),
    };
    ExperienceItem {
        company: exp.company.clone(),
        position: exp.role.clone(),
        location: exp.location.clone(),
        start_date,
        end_date: non_empty(&end_date),
        achievements: exp.responsibilities.clone(),
    }
}

fn experience_to_backend(item: &ExperienceItem) -> BackendExperience {
    let end = item.end_date.as_deref().unwrap_or_default();
    let date_range = if item.start_date.is_empty() && end.is_empty() {
        None
    } else {
        Some(join_date_range(&item.start_date, end))
    };
    BackendExperience {
        role: item.position.clone(),
        company: item.company.clone(),
        date_range,
        location: item.location.clone(),
        responsibilities: item.achievements.clone(),
        ..Default::default()
    }
}

fn education_from_backend(edu: &BackendEducation) -> EducationItem {
    EducationItem {
        institution: edu.institution.clone(),
        degree: edu.degree.clone(),
        field: edu
            .field
            .clone()
            .or_else(|| edu.details.first().cloned())
            .unwrap_or_default(),
        graduation_date: edu
            .graduation_date
            .clone()
            .or_else(|| edu.date_range.clone())
            .unwrap_or_default(),
        gpa: edu.gpa.clone(),
        location: edu.location.clone(),
    }
}

fn education_to_backend(item: &EducationItem) -> BackendEducation {
    BackendEducation {
        degree: item.degree.clone(),
        institution: item.institution.clone(),
        date_range: non_empty(&item.graduation_date),
        location: item.location.clone(),
        gpa: item.gpa.clone(),
        details: non_empty(&item.field).into_iter().collect(),
        ..Default::default()
    }
}

fn project_from_backend(project: &BackendProject) -> ProjectItem {
    ProjectItem {
        title: project.name.clone(),
        description: project.description.clone(),
        technologies: project.technologies.clone(),
        // The date rides in the first detail line.
        date: project
            .date
            .clone()
            .or_else(|| project.details.first().cloned()),
    }
}

fn project_to_backend(item: &ProjectItem) -> BackendProject {
    BackendProject {
        name: item.title.clone(),
        description: item.description.clone(),
        technologies: item.technologies.clone(),
        details: item
            .date
            .as_deref()
            .and_then(non_empty)
            .into_iter()
            .collect(),
        date: None,
    }
}
