//! Codelists and suppression markers.
//!
//! A codelist enumerates the codes a categorical column may contain. The
//! suppression markers are a single table-wide list of codes that may
//! appear in suppression ("null/dot-marker") columns.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A codelist: valid code -> human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codelist {
    /// Codelist identifier as referenced by categorical variables.
    pub id: String,

    /// Code used for the "all" aggregate, when the codelist has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_code: Option<String>,

    /// Valid codes and their labels. An empty map is a valid, zero-code list.
    pub codes: BTreeMap<String, String>,
}

impl Codelist {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            total_code: None,
            codes: BTreeMap::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>, label: impl Into<String>) -> Self {
        self.codes.insert(code.into(), label.into());
        self
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// Codes of this list that do not appear among `present`.
    pub fn unused_codes(&self, present: &BTreeSet<String>) -> Vec<String> {
        self.codes
            .keys()
            .filter(|code| !present.contains(*code))
            .cloned()
            .collect()
    }
}

/// One valid suppression marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionMarker {
    /// The code written in the data.
    pub code: String,
    /// How the published table renders the marker (e.g. `..`).
    pub shown_as: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_codes_lists_missing_in_order() {
        let list = Codelist::new("Region")
            .with_code("01", "Oslo")
            .with_code("02", "Bergen")
            .with_code("999", "I alt");
        let present: BTreeSet<String> = ["02".to_string()].into_iter().collect();
        assert_eq!(list.unused_codes(&present), vec!["01", "999"]);
    }

    #[test]
    fn empty_codelist_contains_nothing() {
        let list = Codelist::new("Empty");
        assert!(list.is_empty());
        assert!(!list.contains(""));
    }
}
