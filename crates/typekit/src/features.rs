//! Stylistic alternates and the `font-feature-settings` value they produce.

use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Alternate {
    #[strum(to_string = "case")]
    #[serde(rename = "case")]
    Case,
    #[strum(to_string = "i")]
    #[serde(rename = "i")]
    I,
    #[strum(to_string = "a")]
    #[serde(rename = "a")]
    A,
    #[strum(to_string = "g")]
    #[serde(rename = "g")]
    G,
    #[strum(to_string = "yj-smile", serialize = "smile")]
    #[serde(rename = "yj-smile")]
    Smile,
}

impl Alternate {
    /// OpenType feature tag enabled by this alternate.
    pub fn feature_tag(&self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::I => "ss01",
            Self::A => "ss02",
            Self::G => "ss03",
            Self::Smile => "ss04",
        }
    }
}

/// Active alternates of one text element, kept in the order they were
/// switched on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternateSet(Vec<Alternate>);

impl AlternateSet {
    pub fn insert(&mut self, alt: Alternate) -> bool {
        if self.contains(alt) {
            return false;
        }
        self.0.push(alt);
        true
    }

    pub fn remove(&mut self, alt: Alternate) -> bool {
        let before = self.0.len();
        self.0.retain(|a| *a != alt);
        before != self.0.len()
    }

    pub fn set(&mut self, alt: Alternate, active: bool) {
        if active {
            self.insert(alt);
        } else {
            self.remove(alt);
        }
    }

    pub fn contains(&self, alt: Alternate) -> bool {
        self.0.contains(&alt)
    }

    pub fn iter(&self) -> impl Iterator<Item = Alternate> + '_ {
        self.0.iter().copied()
    }

    /// Kerning is always on; each active alternate adds its feature tag.
    pub fn feature_settings(&self) -> String {
        std::iter::once("\"kern\" 1".to_string())
            .chain(self.iter().map(|a| format!("\"{}\" 1", a.feature_tag())))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ElementId(String);

crate::impl_string_newtype!(ElementId);

/// Alternate sets per element. Entries are created on the first toggle.
#[derive(Debug, Clone, Default)]
pub struct AlternateRegistry {
    sets: HashMap<ElementId, AlternateSet>,
}

impl AlternateRegistry {
    /// Switches `alt` on or off for `element` and returns the element's new
    /// feature settings.
    pub fn toggle(&mut self, element: &ElementId, alt: Alternate, active: bool) -> String {
        let set = self.sets.entry(element.clone()).or_default();
        set.set(alt, active);
        set.feature_settings()
    }

    pub fn get(&self, element: &ElementId) -> Option<&AlternateSet> {
        self.sets.get(element)
    }

    pub fn feature_settings(&self, element: &ElementId) -> String {
        self.get(element)
            .map(AlternateSet::feature_settings)
            .unwrap_or_else(|| AlternateSet::default().feature_settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternate_parsing() {
        assert_eq!("i".parse::<Alternate>().unwrap(), Alternate::I);
        assert_eq!("CASE".parse::<Alternate>().unwrap(), Alternate::Case);
        assert_eq!("yj-smile".parse::<Alternate>().unwrap(), Alternate::Smile);
        assert!("ss01".parse::<Alternate>().is_err());

        let alt: Alternate = serde_json::from_str("\"yj-smile\"").unwrap();
        assert_eq!(alt, Alternate::Smile);
        assert_eq!(Alternate::Smile.to_string(), "yj-smile");
    }

    #[test]
    fn test_empty_set_is_kerning_only() {
        assert_eq!(AlternateSet::default().feature_settings(), "\"kern\" 1");
    }

    #[test]
    fn test_toggle_order_is_preserved() {
        let mut registry = AlternateRegistry::default();
        let line = ElementId::new("line1");

        registry.toggle(&line, Alternate::I, true);
        let settings = registry.toggle(&line, Alternate::A, true);
        assert_eq!(settings, "\"kern\" 1, \"ss01\" 1, \"ss02\" 1");

        let settings = registry.toggle(&line, Alternate::I, false);
        assert_eq!(settings, "\"kern\" 1, \"ss02\" 1");
    }

    #[test]
    fn test_sets_are_per_element() {
        let mut registry = AlternateRegistry::default();
        let a = ElementId::new("tester1");
        let b = ElementId::new("tester2");

        registry.toggle(&a, Alternate::G, true);
        assert!(registry.get(&a).is_some_and(|s| s.contains(Alternate::G)));
        assert!(registry.get(&b).is_none());
        assert_eq!(registry.feature_settings(&b), "\"kern\" 1");
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut set = AlternateSet::default();
        assert!(set.insert(Alternate::Case));
        assert!(!set.insert(Alternate::Case));
        assert_eq!(set.feature_settings(), "\"kern\" 1, \"case\" 1");
        assert!(!set.remove(Alternate::G));
    }
}
