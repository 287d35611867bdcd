/// Geometry snapshot of a page section, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open: the bottom edge belongs to the next section.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// First section in document order whose bounds contain `probe`.
pub fn find_active(sections: &[SectionBounds], probe: f64) -> Option<&SectionBounds> {
    sections.iter().find(|s| s.contains(probe))
}

/// Section id a navigation link points at: `#about` -> `about`.
pub fn link_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 0.0, 600.0),
            SectionBounds::new("about", 600.0, 400.0),
            SectionBounds::new("projects", 1000.0, 800.0),
        ]
    }

    #[test]
    fn test_find_active_inside_section() {
        let sections = page();
        assert_eq!(find_active(&sections, 650.0).map(|s| s.id.as_str()), Some("about"));
        assert_eq!(find_active(&sections, 0.0).map(|s| s.id.as_str()), Some("home"));
    }

    #[test]
    fn test_boundary_belongs_to_next_section() {
        let sections = page();
        assert_eq!(find_active(&sections, 1000.0).map(|s| s.id.as_str()), Some("projects"));
    }

    #[test]
    fn test_outside_all_sections() {
        let sections = page();
        assert!(find_active(&sections, -1.0).is_none());
        assert!(find_active(&sections, 1800.0).is_none());
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let sections = vec![
            SectionBounds::new("a", 0.0, 500.0),
            SectionBounds::new("b", 400.0, 500.0),
        ];
        assert_eq!(find_active(&sections, 450.0).map(|s| s.id.as_str()), Some("a"));
    }

    #[test]
    fn test_link_target() {
        assert_eq!(link_target("#about"), Some("about"));
        assert_eq!(link_target("#"), None);
        assert_eq!(link_target("https://github.com"), None);
    }
}
