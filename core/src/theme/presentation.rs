use std::collections::{BTreeMap, BTreeSet};

use super::preference::ThemePreference;

/// Root-level presentation state the renderer reads the theme from.
///
/// Mirrors what a document root carries: a `data-theme` attribute, a
/// `light`/`dark` class and a `color-scheme` value. The
/// [`super::ThemeController`] owning it is its only writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationRoot {
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    applied: Option<ThemePreference>,
}

impl PresentationRoot {
    pub const THEME_ATTRIBUTE: &'static str = "data-theme";
    pub const COLOR_SCHEME: &'static str = "color-scheme";

    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn apply(&mut self, theme: ThemePreference) {
        self.classes.remove(theme.toggled().as_str());
        self.classes.insert(theme.as_str().to_string());
        self.attributes
            .insert(Self::THEME_ATTRIBUTE.to_string(), theme.as_str().to_string());
        self.attributes
            .insert(Self::COLOR_SCHEME.to_string(), theme.as_str().to_string());
        self.applied = Some(theme);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// The theme last applied, `None` until the controller initializes.
    pub fn applied_theme(&self) -> Option<ThemePreference> {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_attribute_and_single_class() {
        let mut root = PresentationRoot::new();
        root.apply(ThemePreference::Dark);
        root.apply(ThemePreference::Light);

        assert_eq!(root.attribute(PresentationRoot::THEME_ATTRIBUTE), Some("light"));
        assert_eq!(root.attribute(PresentationRoot::COLOR_SCHEME), Some("light"));
        assert!(root.has_class("light"));
        assert!(!root.has_class("dark"));
        assert_eq!(root.classes().count(), 1);
        assert_eq!(root.applied_theme(), Some(ThemePreference::Light));
    }

    #[test]
    fn test_fresh_root_is_empty() {
        let root = PresentationRoot::new();
        assert_eq!(root.attribute(PresentationRoot::THEME_ATTRIBUTE), None);
        assert_eq!(root.applied_theme(), None);
    }
}
