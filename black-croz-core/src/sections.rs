/// A navigable page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Anchor id of the section element.
    pub id: &'static str,
    /// Label shown in the navigation bar.
    pub label: &'static str,
}

/// Section that is active before any scrolling has been observed.
pub const DEFAULT_ACTIVE_SECTION: &str = "home";

/// Page sections in document order.
pub const SECTIONS: &[Section] = &[
    Section { id: "home", label: "Home" },
    Section { id: "about", label: "About" },
    Section { id: "collections", label: "Collections" },
    Section { id: "lookbook", label: "Lookbook" },
    Section { id: "contact", label: "Contact" },
];

/// Section ids in document order, ready to hand to the viewport tracker.
pub fn section_ids() -> Vec<&'static str> {
    SECTIONS.iter().map(|s| s.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_section_is_first() {
        assert_eq!(SECTIONS[0].id, DEFAULT_ACTIVE_SECTION);
    }

    #[test]
    fn section_ids_keep_document_order() {
        assert_eq!(
            section_ids(),
            vec!["home", "about", "collections", "lookbook", "contact"]
        );
    }
}
