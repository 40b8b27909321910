//! Skill categories ⇄ fixed skill buckets.
//!
//! The backend stores skills as free-named categories. The editor has five
//! fixed buckets. Import classifies each category by substring match on its
//! lower-cased name; export writes one category per non-empty bucket under a
//! fixed Arabic name. The round trip keeps every skill but not the original
//! category names.

use crate::models::{BackendSkillCategory, SkillsSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillBucket {
    TechnicalLanguages,
    SpokenLanguages,
    Tools,
    Certifications,
    SoftSkills,
}

impl SkillBucket {
    /// Category name written to the backend for this bucket.
    pub fn category_name(self) -> &'static str {
        match self {
            SkillBucket::TechnicalLanguages => "المهارات التقنية",
            SkillBucket::Tools => "الأدوات والبرامج",
            SkillBucket::SoftSkills => "المهارات الشخصية",
            SkillBucket::Certifications => "الشهادات",
            SkillBucket::SpokenLanguages => "اللغات",
        }
    }

    pub(crate) fn slot(self, summary: &mut SkillsSummary) -> &mut Vec<String> {
        match self {
            SkillBucket::TechnicalLanguages => &mut summary.languages,
            SkillBucket::SpokenLanguages => &mut summary.spoken_languages,
            SkillBucket::Tools => &mut summary.tools,
            SkillBucket::Certifications => &mut summary.platforms,
            SkillBucket::SoftSkills => &mut summary.soft_skills,
        }
    }
}

/// Export order of the buckets.
const EXPORT_ORDER: [SkillBucket; 5] = [
    SkillBucket::TechnicalLanguages,
    SkillBucket::Tools,
    SkillBucket::SoftSkills,
    SkillBucket::Certifications,
    SkillBucket::SpokenLanguages,
];

/// Keyword groups checked in order, first match wins.
///
/// The "languages" markers land in the technical bucket: generated records
/// name programming-language categories "لغات البرمجة".
const KEYWORD_GROUPS: &[(SkillBucket, &[&str])] = &[
    (
        SkillBucket::TechnicalLanguages,
        &["لغات", "languages", "technologies"],
    ),
    (SkillBucket::Tools, &["أدوات", "tools"]),
    (SkillBucket::SoftSkills, &["شخصية", "soft"]),
    (SkillBucket::Certifications, &["شهادات", "cert"]),
];

/// Bucket the mapper falls back to for unclassified categories.
pub const FALLBACK_BUCKET: SkillBucket = SkillBucket::TechnicalLanguages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Matched(SkillBucket),
    Unclassified,
}

impl Classification {
    pub fn bucket(self) -> SkillBucket {
        match self {
            Classification::Matched(bucket) => bucket,
            Classification::Unclassified => FALLBACK_BUCKET,
        }
    }
}

pub fn classify_category(category_name: &str) -> Classification {
    let name = category_name.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(bucket, _)| Classification::Matched(*bucket))
        .unwrap_or(Classification::Unclassified)
}

/// Folds backend categories into buckets, in input order, without deduplication.
pub fn map_skills_from_backend(categories: &[BackendSkillCategory]) -> SkillsSummary {
    let mut summary = SkillsSummary::default();
    for category in categories {
        let classification = classify_category(&category.category_name);
        if classification == Classification::Unclassified {
            tracing::debug!(
                category = %category.category_name,
                "unclassified skill category, using fallback bucket"
            );
        }
        classification
            .bucket()
            .slot(&mut summary)
            .extend(category.skills.iter().cloned());
    }
    summary
}

pub fn map_skills_to_backend(summary: &SkillsSummary) -> Vec<BackendSkillCategory> {
    let mut summary = summary.clone();
    EXPORT_ORDER
        .iter()
        .filter_map(|bucket| {
            let skills = std::mem::take(bucket.slot(&mut summary));
            (!skills.is_empty()).then(|| BackendSkillCategory {
                category_name: bucket.category_name().to_string(),
                skills,
            })
        })
        .collect()
}
