//! Month/year picker for résumé dates.
//!
//! Values are `"<Month> <Year>"` with Arabic month names, or the "present"
//! sentinel for an open-ended end date. The picker only owns transient
//! selection state; the value itself belongs to the caller.

use chrono::Datelike;

pub const ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

pub const PRESENT: &str = "حالياً";

pub const MIN_DECADE: i32 = 1970;

pub fn format_month_year(month: usize, year: i32) -> Option<String> {
    ARABIC_MONTHS
        .get(month)
        .map(|name| format!("{name} {year}"))
}

/// Parses `"<Month> <Year>"`. Either half may be unrecognized.
pub fn parse_month_year(value: &str) -> (Option<usize>, Option<i32>) {
    let parts: Vec<&str> = value.split(' ').collect();
    let [month, year] = parts.as_slice() else {
        return (None, None);
    };
    (
        ARABIC_MONTHS.iter().position(|m| m == month),
        year.parse().ok(),
    )
}

fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

#[derive(Debug, Clone)]
pub struct MonthYearPicker {
    allow_present: bool,
    current_year: i32,
    open: bool,
    decade_start: i32,
    month: Option<usize>,
    year: Option<i32>,
    present: bool,
}

impl MonthYearPicker {
    pub fn new(allow_present: bool) -> Self {
        Self::with_current_year(allow_present, chrono::Local::now().year())
    }

    pub fn with_current_year(allow_present: bool, current_year: i32) -> Self {
        Self {
            allow_present,
            current_year,
            open: false,
            decade_start: decade_of(current_year),
            month: None,
            year: None,
            present: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn allows_present(&self) -> bool {
        self.allow_present
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn selected_month(&self) -> Option<usize> {
        self.month
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.year
    }

    /// Opens the picker, seeding the selection from `value`.
    pub fn open(&mut self, value: &str) {
        self.month = None;
        self.year = None;
        self.present = false;
        self.decade_start = decade_of(self.current_year);

        if value == PRESENT {
            self.present = true;
        } else {
            let (month, year) = parse_month_year(value);
            self.month = month;
            if let Some(year) = year {
                self.year = Some(year);
                self.decade_start = self.clamp_decade(decade_of(year));
            }
        }
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self, value: &str) {
        if self.open {
            self.close();
        } else {
            self.open(value);
        }
    }

    /// A pointer-down outside the picker closes it without emitting.
    pub fn pointer_down(&mut self, inside: bool) {
        if !inside {
            self.close();
        }
    }

    pub fn decade_start(&self) -> i32 {
        self.decade_start
    }

    pub fn decade_label(&self) -> String {
        format!("{} - {}", self.decade_start, self.decade_start + 9)
    }

    /// The ten years of the window, latest first.
    pub fn decade_years(&self) -> Vec<i32> {
        (0..10).map(|i| self.decade_start + 9 - i).collect()
    }

    pub fn is_year_disabled(&self, year: i32) -> bool {
        year > self.current_year
    }

    pub fn can_go_previous(&self) -> bool {
        self.decade_start > MIN_DECADE
    }

    pub fn can_go_next(&self) -> bool {
        self.decade_start < decade_of(self.current_year)
    }

    pub fn previous_decade(&mut self) {
        if self.can_go_previous() {
            self.decade_start -= 10;
        }
    }

    pub fn next_decade(&mut self) {
        if self.can_go_next() {
            self.decade_start += 10;
        }
    }

    /// Does not confirm. Returns `false` for future years or when closed.
    pub fn select_year(&mut self, year: i32) -> bool {
        if !self.open || self.is_year_disabled(year) {
            return false;
        }
        self.year = Some(year);
        true
    }

    pub fn select_month(&mut self, month: usize) -> bool {
        if !self.open || month >= ARABIC_MONTHS.len() {
            return false;
        }
        self.month = Some(month);
        true
    }

    pub fn can_confirm(&self) -> bool {
        self.open && self.month.is_some() && self.year.is_some()
    }

    /// Emits the formatted value and closes, once both month and year are set.
    pub fn confirm(&mut self) -> Option<String> {
        if !self.can_confirm() {
            return None;
        }
        let value = format_month_year(self.month?, self.year?)?;
        self.present = false;
        self.open = false;
        Some(value)
    }

    /// Emits the sentinel and closes. Only offered for open-ended fields.
    pub fn choose_present(&mut self) -> Option<String> {
        if !self.open || !self.allow_present {
            return None;
        }
        self.present = true;
        self.month = None;
        self.year = None;
        self.open = false;
        Some(PRESENT.to_string())
    }

    fn clamp_decade(&self, decade: i32) -> i32 {
        decade.clamp(MIN_DECADE, decade_of(self.current_year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> MonthYearPicker {
        MonthYearPicker::with_current_year(true, 2026)
    }

    #[test]
    fn test_confirm_emits_month_and_year() {
        for (month, name) in ARABIC_MONTHS.iter().enumerate() {
            for year in [1975, 2001, 2026] {
                let mut p = picker();
                p.open("");
                assert!(p.select_month(month));
                assert!(p.select_year(year));
                assert_eq!(p.confirm(), Some(format!("{name} {year}")));
                assert!(!p.is_open());
            }
        }
    }

    #[test]
    fn test_year_alone_does_not_confirm() {
        let mut p = picker();
        p.open("");
        p.select_year(2020);
        assert!(p.is_open());
        assert!(!p.can_confirm());
        assert_eq!(p.confirm(), None);
    }

    #[test]
    fn test_present_overrides_selection() {
        let mut p = picker();
        p.open("مارس 2019");
        assert_eq!(p.selected_month(), Some(2));
        assert_eq!(p.choose_present().as_deref(), Some(PRESENT));
        assert!(p.is_present());
        assert_eq!(p.selected_year(), None);
    }

    #[test]
    fn test_present_requires_open_ended_field() {
        let mut p = MonthYearPicker::with_current_year(false, 2026);
        p.open("");
        assert_eq!(p.choose_present(), None);
        assert!(p.is_open());
    }

    #[test]
    fn test_open_parses_existing_value() {
        let mut p = picker();
        p.open("أكتوبر 2013");
        assert_eq!(p.selected_month(), Some(9));
        assert_eq!(p.selected_year(), Some(2013));
        assert_eq!(p.decade_start(), 2010);
        assert_eq!(p.decade_label(), "2010 - 2019");

        p.close();
        p.open(PRESENT);
        assert!(p.is_present());
        assert_eq!(p.selected_month(), None);

        p.close();
        p.open("Spring 2013");
        assert_eq!(p.selected_month(), None);
        assert_eq!(p.selected_year(), Some(2013));

        p.close();
        p.open("garbage");
        assert_eq!(p.selected_year(), None);
        assert_eq!(p.decade_start(), 2020);
    }

    #[test]
    fn test_decade_window_is_clamped() {
        let mut p = picker();
        p.open("يناير 1950");
        assert_eq!(p.decade_start(), MIN_DECADE);
        assert!(!p.can_go_previous());
        p.previous_decade();
        assert_eq!(p.decade_start(), MIN_DECADE);

        for _ in 0..10 {
            p.next_decade();
        }
        assert_eq!(p.decade_start(), 2020);
        assert!(!p.can_go_next());
    }

    #[test]
    fn test_decade_years_descend_and_future_disabled() {
        let mut p = picker();
        p.open("");
        let years = p.decade_years();
        assert_eq!(years.first(), Some(&2029));
        assert_eq!(years.last(), Some(&2020));
        assert!(p.is_year_disabled(2027));
        assert!(!p.select_year(2027));
        assert!(p.select_year(2026));
    }

    #[test]
    fn test_outside_click_closes_without_emitting() {
        let mut p = picker();
        p.open("");
        p.select_month(4);
        p.select_year(2022);
        p.pointer_down(true);
        assert!(p.is_open());
        p.pointer_down(false);
        assert!(!p.is_open());
        assert_eq!(p.confirm(), None);
    }

    #[test]
    fn test_closed_picker_ignores_selection() {
        let mut p = picker();
        assert!(!p.select_month(1));
        assert!(!p.select_year(2001));
        p.toggle("");
        assert!(p.is_open());
        p.toggle("");
        assert!(!p.is_open());
    }

    #[test]
    fn test_parse_and_format_helpers() {
        assert_eq!(parse_month_year("مايو 2018"), (Some(4), Some(2018)));
        assert_eq!(parse_month_year("مايو"), (None, None));
        assert_eq!(format_month_year(11, 2000).as_deref(), Some("ديسمبر 2000"));
        assert_eq!(format_month_year(12, 2000), None);
    }
}
