//! Add/update/remove over the list sections of a document.
//!
//! Records are addressed by their [`EntryKey`]. The `*_at` variants take a
//! position and resolve it to a key first; they exist for callers that only
//! know what is on screen.

use crate::mapper::SkillBucket;
use crate::models::{
    Contact, EducationItem, EntryKey, EntryList, ExperienceItem, ProjectItem, ResumeDocument,
    SkillsSummary, VolunteerItem,
};

/// A record type that lives in a list section.
pub trait SectionRecord: Default {
    type Field;

    /// Replaces one field of the record.
    fn apply(&mut self, field: Self::Field);
}

/// Borrowed editor over one list section.
pub struct ListEditor<'a, T> {
    list: &'a mut EntryList<T>,
}

impl<'a, T: SectionRecord> ListEditor<'a, T> {
    pub fn new(list: &'a mut EntryList<T>) -> Self {
        Self { list }
    }

    /// Appends a blank record.
    pub fn add(&mut self) -> EntryKey {
        self.list.push(T::default())
    }

    /// Returns `false` when `key` no longer exists.
    pub fn update(&mut self, key: EntryKey, field: T::Field) -> bool {
        match self.list.get_mut(key) {
            Some(record) => {
                record.apply(field);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: EntryKey) -> bool {
        self.list.remove(key)
    }

    pub fn update_at(&mut self, index: usize, field: T::Field) -> bool {
        match self.list.key_at(index) {
            Some(key) => self.update(key, field),
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        match self.list.key_at(index) {
            Some(key) => self.remove(key),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExperienceField {
    Company(String),
    Position(String),
    Location(Option<String>),
    StartDate(String),
    EndDate(Option<String>),
    Achievements(Vec<String>),
}

impl SectionRecord for ExperienceItem {
    type Field = ExperienceField;

    fn apply(&mut self, field: ExperienceField) {
        match field {
            ExperienceField::Company(v) => self.company = v,
            ExperienceField::Position(v) => self.position = v,
            ExperienceField::Location(v) => self.location = v,
            ExperienceField::StartDate(v) => self.start_date = v,
            ExperienceField::EndDate(v) => self.end_date = v,
            ExperienceField::Achievements(v) => self.achievements = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EducationField {
    Institution(String),
    Degree(String),
    Field(String),
    GraduationDate(String),
    Gpa(Option<String>),
    Location(Option<String>),
}

impl SectionRecord for EducationItem {
    type Field = EducationField;

    fn apply(&mut self, field: EducationField) {
        match field {
            EducationField::Institution(v) => self.institution = v,
            EducationField::Degree(v) => self.degree = v,
            EducationField::Field(v) => self.field = v,
            EducationField::GraduationDate(v) => self.graduation_date = v,
            EducationField::Gpa(v) => self.gpa = v,
            EducationField::Location(v) => self.location = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectField {
    Title(String),
    Description(Option<String>),
    Technologies(Vec<String>),
    Date(Option<String>),
}

impl SectionRecord for ProjectItem {
    type Field = ProjectField;

    fn apply(&mut self, field: ProjectField) {
        match field {
            ProjectField::Title(v) => self.title = v,
            ProjectField::Description(v) => self.description = v,
            ProjectField::Technologies(v) => self.technologies = v,
            ProjectField::Date(v) => self.date = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VolunteerField {
    Organization(String),
    Role(String),
    StartDate(String),
    EndDate(String),
    Description(String),
}

impl SectionRecord for VolunteerItem {
    type Field = VolunteerField;

    fn apply(&mut self, field: VolunteerField) {
        match field {
            VolunteerField::Organization(v) => self.organization = v,
            VolunteerField::Role(v) => self.role = v,
            VolunteerField::StartDate(v) => self.start_date = v,
            VolunteerField::EndDate(v) => self.end_date = v,
            VolunteerField::Description(v) => self.description = v,
        }
    }
}

/// Fields of the personal-info tab. An empty string clears an optional field.
#[derive(Debug, Clone, PartialEq)]
pub enum PersonalField {
    FullName(String),
    Email(String),
    Phone(String),
    Linkedin(String),
    Github(String),
    Portfolio(String),
    Location(String),
    Summary(String),
}

pub fn apply_personal(doc: &mut ResumeDocument, field: PersonalField) {
    let contact: &mut Contact = &mut doc.contact;
    match field {
        PersonalField::FullName(v) => doc.full_name = v,
        PersonalField::Email(v) => contact.email = optional(v),
        PersonalField::Phone(v) => contact.phone = optional(v),
        PersonalField::Linkedin(v) => contact.linkedin = optional(v),
        PersonalField::Github(v) => contact.github = optional(v),
        PersonalField::Portfolio(v) => contact.portfolio = optional(v),
        PersonalField::Location(v) => contact.location = optional(v),
        PersonalField::Summary(v) => doc.professional_summary = optional(v),
    }
}

/// Replaces one skill bucket from a comma-separated input line.
pub fn set_skills(summary: &mut SkillsSummary, bucket: SkillBucket, input: &str) {
    *bucket.slot(summary) = parse_comma_list(input);
}

/// Splits on commas (ASCII and Arabic), trimming and dropping empties.
pub fn parse_comma_list(input: &str) -> Vec<String> {
    input
        .split([',', '،'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One entry per non-blank line.
pub fn parse_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
