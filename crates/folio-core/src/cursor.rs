//! Hover feedback for the custom cursor, as one lookup table.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementCategory {
    Link,
    Button,
    NavItem,
    ViewButton,
    ModalClose,
    ProjectCard,
    Magnetic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hover {
    pub label: &'static str,
    /// Scale applied to the cursor dot through `--cursor-scale`; the ring
    /// only carries the label.
    pub scale: f32,
}

/// Category, matching CSS selector and feedback. Checked top to bottom, so
/// more specific selectors come first.
pub const HOVER_TABLE: &[(ElementCategory, &str, Hover)] = &[
    (ElementCategory::ProjectCard, ".project-card", Hover { label: "VIEW", scale: 2.0 }),
    (ElementCategory::ViewButton, ".view-btn", Hover { label: "OPEN", scale: 2.0 }),
    (ElementCategory::ModalClose, ".modal-close", Hover { label: "CLOSE", scale: 2.0 }),
    (ElementCategory::NavItem, ".nav-item", Hover { label: "GO", scale: 2.0 }),
    (ElementCategory::Magnetic, ".magnetic", Hover { label: "", scale: 1.5 }),
    (ElementCategory::Button, "button", Hover { label: "CLICK", scale: 2.0 }),
    (ElementCategory::Link, "a", Hover { label: "LINK", scale: 2.0 }),
];

pub fn hover_for(category: ElementCategory) -> Hover {
    HOVER_TABLE
        .iter()
        .find(|(c, _, _)| *c == category)
        .map(|(_, _, h)| *h)
        .unwrap_or(Hover { label: "", scale: 1.0 })
}

/// First table row whose selector `matches` accepts.
pub fn classify(mut matches: impl FnMut(&str) -> bool) -> Option<ElementCategory> {
    HOVER_TABLE
        .iter()
        .find(|(_, selector, _)| matches(selector))
        .map(|(c, _, _)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_row() {
        for (c, _, _) in HOVER_TABLE {
            assert_eq!(hover_for(*c), HOVER_TABLE.iter().find(|r| r.0 == *c).unwrap().2);
        }
    }

    #[test]
    fn dot_doubles_over_interactive_elements() {
        for c in [ElementCategory::Link, ElementCategory::Button, ElementCategory::NavItem] {
            assert_eq!(hover_for(c).scale, 2.0);
        }
        assert_eq!(hover_for(ElementCategory::Magnetic).scale, 1.5);
        assert_eq!(hover_for(ElementCategory::Magnetic).label, "");
    }

    #[test]
    fn classify_prefers_specific_rows() {
        // a project card rendered as a <button> reports as a card
        let cat = classify(|sel| sel == ".project-card" || sel == "button");
        assert_eq!(cat, Some(ElementCategory::ProjectCard));
        assert_eq!(classify(|_| false), None);
    }
}
