//! Volunteering ⇄ generic backend "responsibility" records.

use crate::models::{BackendResponsibility, VolunteerItem};

use super::date_range::{join_date_range, split_date_range};

/// Only the first detail line becomes the description; further lines are dropped.
pub fn map_volunteer_from_backend(records: &[BackendResponsibility]) -> Vec<VolunteerItem> {
    records
        .iter()
        .map(|r| {
            let (start_date, end_date) = split_date_range(r.date_range.as_deref());
            VolunteerItem {
                organization: r.organization.clone(),
                role: r.title.clone(),
                start_date,
                end_date,
                description: r.details.first().cloned().unwrap_or_default(),
            }
        })
        .collect()
}

pub fn map_volunteer_to_backend<'a, I>(items: I) -> Vec<BackendResponsibility>
where
    I: IntoIterator<Item = &'a VolunteerItem>,
{
    items
        .into_iter()
        .map(|v| BackendResponsibility {
            title: v.role.clone(),
            organization: v.organization.clone(),
            date_range: Some(join_date_range(&v.start_date, &v.end_date)),
            location: None,
            details: if v.description.is_empty() {
                vec![]
            } else {
                vec![v.description.clone()]
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_takes_first_detail_only() {
        let records = vec![BackendResponsibility {
            title: "منسق".into(),
            organization: "الهلال الأحمر".into(),
            date_range: Some("مارس 2019 - حالياً".into()),
            location: Some("جدة".into()),
            details: vec!["تنظيم حملات التبرع".into(), "تدريب المتطوعين".into()],
        }];
        let items = map_volunteer_from_backend(&records);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].role, "منسق");
        assert_eq!(items[0].start_date, "مارس 2019");
        assert_eq!(items[0].end_date, "حالياً");
        assert_eq!(items[0].description, "تنظيم حملات التبرع");
    }

    #[test]
    fn test_import_defaults_missing_parts() {
        let records = vec![BackendResponsibility {
            title: "Mentor".into(),
            organization: "Code Club".into(),
            date_range: Some("2019".into()),
            ..Default::default()
        }];
        let items = map_volunteer_from_backend(&records);
        assert_eq!(items[0].start_date, "");
        assert_eq!(items[0].end_date, "");
        assert_eq!(items[0].description, "");
    }

    #[test]
    fn test_export_joins_dates_and_wraps_description() {
        let items = vec![
            VolunteerItem {
                organization: "Code Club".into(),
                role: "Mentor".into(),
                start_date: "يناير 2021".into(),
                end_date: "مايو 2022".into(),
                description: "Taught Python".into(),
            },
            VolunteerItem {
                organization: "Library".into(),
                role: "Helper".into(),
                ..Default::default()
            },
        ];
        let records = map_volunteer_to_backend(&items);
        assert_eq!(records[0].date_range.as_deref(), Some("يناير 2021 - مايو 2022"));
        assert_eq!(records[0].details, vec!["Taught Python"]);
        assert_eq!(records[1].date_range.as_deref(), Some(" - "));
        assert!(records[1].details.is_empty());
    }
}
