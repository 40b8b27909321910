use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ResumeDocument;

/// One editor tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Personal,
    Experience,
    Education,
    Skills,
    Projects,
    Volunteer,
    Research,
    Publications,
    Awards,
    Languages,
    Courses,
}

/// Always-visible tabs.
pub const BASE_SECTIONS: [SectionId; 5] = [
    SectionId::Personal,
    SectionId::Experience,
    SectionId::Education,
    SectionId::Skills,
    SectionId::Projects,
];

/// Tabs the user toggles from the "add section" menu.
pub const ADDITIONAL_SECTIONS: [SectionId; 6] = [
    SectionId::Volunteer,
    SectionId::Research,
    SectionId::Publications,
    SectionId::Awards,
    SectionId::Languages,
    SectionId::Courses,
];

impl SectionId {
    pub fn is_base(self) -> bool {
        BASE_SECTIONS.contains(&self)
    }

    pub fn slug(self) -> &'static str {
        match self {
            SectionId::Personal => "personal",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Volunteer => "volunteer",
            SectionId::Research => "research",
            SectionId::Publications => "publications",
            SectionId::Awards => "awards",
            SectionId::Languages => "languages",
            SectionId::Courses => "courses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionId::Personal => "المعلومات الشخصية",
            SectionId::Experience => "الخبرات العملية",
            SectionId::Education => "التعليم",
            SectionId::Skills => "المهارات",
            SectionId::Projects => "المشاريع",
            SectionId::Volunteer => "العمل التطوعي",
            SectionId::Research => "الأبحاث",
            SectionId::Publications => "المنشورات",
            SectionId::Awards => "الجوائز والإنجازات",
            SectionId::Languages => "اللغات",
            SectionId::Courses => "الدورات التدريبية",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            SectionId::Personal => "Personal",
            SectionId::Experience => "Experience",
            SectionId::Education => "Education",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Volunteer => "Volunteering",
            SectionId::Research => "Research",
            SectionId::Publications => "Publications",
            SectionId::Awards => "Awards",
            SectionId::Languages => "Languages",
            SectionId::Courses => "Courses",
        }
    }

    /// Menu blurb for additional sections.
    pub fn description(self) -> Option<&'static str> {
        match self {
            SectionId::Volunteer => Some("أضف خبراتك التطوعية وخدمة المجتمع"),
            SectionId::Research => Some("أضف أبحاثك العلمية والأكاديمية"),
            SectionId::Publications => Some("أضف مقالاتك ومنشوراتك"),
            SectionId::Awards => Some("أضف جوائزك وإنجازاتك البارزة"),
            SectionId::Languages => Some("أضف اللغات التي تتحدثها ومستواك فيها"),
            SectionId::Courses => Some("أضف الدورات والتدريبات التي حصلت عليها"),
            _ => None,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BASE_SECTIONS
            .iter()
            .chain(ADDITIONAL_SECTIONS.iter())
            .copied()
            .find(|section| section.slug() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown section '{s}'"))
    }
}

/// Sections with content in a freshly loaded document. Skills always count.
pub fn sections_with_content(doc: &ResumeDocument) -> BTreeSet<SectionId> {
    let candidates = [
        (SectionId::Experience, !doc.experience.is_empty()),
        (SectionId::Education, !doc.education.is_empty()),
        (SectionId::Projects, !doc.projects.is_empty()),
        (SectionId::Volunteer, !doc.volunteer_experience.is_empty()),
        (SectionId::Research, !doc.research.is_empty()),
        (SectionId::Publications, !doc.publications.is_empty()),
        (SectionId::Awards, !doc.awards.is_empty()),
        (SectionId::Languages, !doc.languages_list.is_empty()),
        (SectionId::Courses, !doc.courses.is_empty()),
        (SectionId::Skills, true),
    ];
    candidates
        .into_iter()
        .filter_map(|(section, present)| present.then_some(section))
        .collect()
}

/// Enabled sections as an explicit merge of two sources.
///
/// `loaded` is recomputed from the document on every load; `session` holds
/// what the user added since the page opened. Both survive until removed.
#[derive(Debug, Clone, Default)]
pub struct EnabledSections {
    loaded: BTreeSet<SectionId>,
    session: BTreeSet<SectionId>,
}

impl EnabledSections {
    pub fn reload(&mut self, doc: &ResumeDocument) {
        self.loaded = sections_with_content(doc);
    }

    pub fn contains(&self, section: SectionId) -> bool {
        self.loaded.contains(&section) || self.session.contains(&section)
    }

    /// Returns `false` if the section was already enabled.
    pub fn add(&mut self, section: SectionId) -> bool {
        if self.contains(section) {
            return false;
        }
        self.session.insert(section)
    }

    /// Returns `false` if the section was not enabled.
    pub fn remove(&mut self, section: SectionId) -> bool {
        let from_loaded = self.loaded.remove(&section);
        let from_session = self.session.remove(&section);
        from_loaded || from_session
    }

    pub fn merged(&self) -> BTreeSet<SectionId> {
        self.loaded.union(&self.session).copied().collect()
    }

    /// Tabs in display order: every base section, then enabled additional ones.
    pub fn visible(&self) -> Vec<SectionId> {
        BASE_SECTIONS
            .iter()
            .copied()
            .chain(
                ADDITIONAL_SECTIONS
                    .iter()
                    .copied()
                    .filter(|s| self.contains(*s)),
            )
            .collect()
    }
}
