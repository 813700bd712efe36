use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct TesterId(String);

crate::impl_string_newtype!(TesterId);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct LanguageCode(String);

crate::impl_string_newtype!(LanguageCode);

/// Display strings per tester and language. Line breaks are stored as the
/// two-character escape `\n`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable(HashMap<TesterId, HashMap<LanguageCode, String>>);

impl TranslationTable {
    pub fn insert(&mut self, tester: TesterId, lang: LanguageCode, text: impl Into<String>) {
        self.0.entry(tester).or_default().insert(lang, text.into());
    }

    /// Text for `tester` in `lang` with line breaks expanded.
    pub fn lookup(&self, tester: &TesterId, lang: &LanguageCode) -> Option<String> {
        self.0
            .get(tester)
            .and_then(|langs| langs.get(lang))
            .map(|s| expand_line_breaks(s))
    }

    pub fn languages(&self, tester: &TesterId) -> Vec<&LanguageCode> {
        let mut langs: Vec<_> = self
            .0
            .get(tester)
            .map(|l| l.keys().collect())
            .unwrap_or_default();
        langs.sort();
        langs
    }
}

pub fn expand_line_breaks(s: &str) -> String {
    s.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_expands_escapes() {
        let mut table = TranslationTable::default();
        table.insert(TesterId::new("tester1"), LanguageCode::new("fr"), "Bonjour\\nle monde");

        let text = table
            .lookup(&TesterId::new("tester1"), &LanguageCode::new("fr"))
            .unwrap();
        assert_eq!(text, "Bonjour\nle monde");
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_missing_entries() {
        let mut table = TranslationTable::default();
        table.insert(TesterId::new("tester1"), LanguageCode::new("en"), "Hello");

        assert!(table.lookup(&TesterId::new("tester1"), &LanguageCode::new("de")).is_none());
        assert!(table.lookup(&TesterId::new("tester9"), &LanguageCode::new("en")).is_none());
    }

    #[test]
    fn test_table_deserialization() {
        let json = r#"{"tester2": {"en": "One\\nTwo", "es": "Uno\\nDos"}}"#;
        let table: TranslationTable = serde_json::from_str(json).unwrap();

        let id = TesterId::new("tester2");
        assert_eq!(
            table.lookup(&id, &LanguageCode::new("es")).as_deref(),
            Some("Uno\nDos")
        );
        let langs: Vec<String> = table.languages(&id).iter().map(|l| l.to_string()).collect();
        assert_eq!(langs, vec!["en", "es"]);
    }
}
