use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// All messages of one locale, in file order.
///
/// Keys are unique. Tables are never rewritten piecemeal by the rule engine:
/// [`crate::RuleCatalog::apply`] always hands back a fresh table with the same
/// key set in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleTable {
    /// Locale identifier, usually the file stem (e.g. `de_de`).
    pub locale: String,

    /// Ordered list of all entries in this table.
    pub entries: Vec<Entry>,
}

impl LocaleTable {
    pub fn new(locale: impl Into<String>) -> Self {
        LocaleTable {
            locale: locale.into(),
            entries: Vec::new(),
        }
    }

    /// Builds a table from `(key, value)` pairs.
    ///
    /// A repeated key keeps its first position and takes the last value,
    /// the same way a JSON object is read.
    pub fn from_pairs<I, K, V>(locale: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = LocaleTable::new(locale);
        for (key, value) in pairs {
            table.insert(key, value);
        }
        table
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.find_entry_mut(&key) {
            Some(entry) => Some(std::mem::replace(&mut entry.value, value)),
            None => {
                self.entries.push(Entry { key, value });
                None
            }
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.find_entry(key).map(|e| e.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_entry(key).is_some()
    }

    pub fn find_entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub(crate) fn find_entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a LocaleTable {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A single message of a locale table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Stable message identifier, e.g. `catchrate.ball.quick.effective`.
    pub key: String,

    /// Human-facing text, possibly containing placeholders such as `%.1fx`.
    pub value: String,
}

/// One value rewritten by the rule catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChangeRecord {
    pub key: String,
    pub before: String,
    pub after: String,
}

impl Display for ChangeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?} -> {:?}", self.key, self.before, self.after)
    }
}

/// Result of running the rule catalog over one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten table. Same keys, same order as the input.
    pub table: LocaleTable,

    /// Changed entries, in catalog order.
    pub changes: Vec<ChangeRecord>,
}

impl FixOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_keeps_order() {
        let table = LocaleTable::from_pairs("fr_fr", [("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(table.locale, "fr_fr");
    }

    #[test]
    fn test_duplicate_key_last_value_first_position() {
        let table = LocaleTable::from_pairs("fr_fr", [("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.get("a"), Some("3"));
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut table = LocaleTable::new("de_de");
        assert_eq!(table.insert("k", "old"), None);
        assert_eq!(table.insert("k", "new"), Some("old".to_string()));
        assert_eq!(table.get("k"), Some("new"));
        assert!(table.contains_key("k"));
        assert!(!table.contains_key("missing"));
    }

    #[test]
    fn test_empty_table() {
        let table = LocaleTable::new("ja_jp");
        assert!(table.is_empty());
        assert_eq!(table.get("anything"), None);
    }

    #[test]
    fn test_change_record_serializes_for_reports() {
        let change = ChangeRecord {
            key: "catchrate.ball.lure.effective".to_string(),
            before: "4x beim Angeln!".to_string(),
            after: "Beim Angeln".to_string(),
        };
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "key": "catchrate.ball.lure.effective",
                "before": "4x beim Angeln!",
                "after": "Beim Angeln",
            })
        );
    }

    #[test]
    fn test_change_record_display() {
        let change = ChangeRecord {
            key: "catchrate.ball.guaranteed_catch".to_string(),
            before: "Guaranteed catch!".to_string(),
            after: "Guaranteed catch".to_string(),
        };
        assert_eq!(
            change.to_string(),
            r#"catchrate.ball.guaranteed_catch: "Guaranteed catch!" -> "Guaranteed catch""#
        );
    }
}
