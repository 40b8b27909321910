use super::sections::{SectionId, ADDITIONAL_SECTIONS};

/// Open/closed flag of the "add section" dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddSectionMenu {
    open: bool,
}

impl AddSectionMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// A pointer-down outside the menu closes it.
    pub fn pointer_down(&mut self, inside: bool) {
        if !inside {
            self.close();
        }
    }

    /// Entries offered while open: every additional section with its
    /// enabled flag.
    pub fn items(&self, is_enabled: impl Fn(SectionId) -> bool) -> Vec<(SectionId, bool)> {
        if !self.open {
            return Vec::new();
        }
        ADDITIONAL_SECTIONS
            .iter()
            .map(|section| (*section, is_enabled(*section)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_pointer_down_closes() {
        let mut menu = AddSectionMenu::default();
        menu.toggle();
        menu.pointer_down(true);
        assert!(menu.is_open());
        menu.pointer_down(false);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_items_only_when_open() {
        let mut menu = AddSectionMenu::default();
        assert!(menu.items(|_| false).is_empty());
        menu.toggle();
        let items = menu.items(|s| s == SectionId::Awards);
        assert_eq!(items.len(), ADDITIONAL_SECTIONS.len());
        assert!(items.contains(&(SectionId::Awards, true)));
        assert!(items.contains(&(SectionId::Courses, false)));
    }
}
