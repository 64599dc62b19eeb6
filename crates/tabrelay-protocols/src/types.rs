//! Shared data types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A 1-based ordinal assigned to a detected form field.
pub type FieldNumber = u32;

/// Field values keyed by field number.
///
/// Serialises as a JSON object with stringified keys, which is what the
/// page script sends and expects.
pub type FieldSet = BTreeMap<FieldNumber, String>;

/// An open browser tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    /// Opaque tab identifier (a CDP target id for the CDP backend).
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl TabInfo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: String::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Which side of a transfer a tab plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabRole {
    Source,
    Destination,
}

impl fmt::Display for TabRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabRole::Source => write!(f, "source"),
            TabRole::Destination => write!(f, "destination"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set_json_keys_are_strings() {
        let mut fields = FieldSet::new();
        fields.insert(2, "b".to_string());
        fields.insert(10, String::new());
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"2":"b","10":""}"#);

        let back: FieldSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fields);
    }

    #[test]
    fn test_tab_info_builder() {
        let tab = TabInfo::new("abc", "Submission Form").with_url("https://example.com");
        assert_eq!(tab.id, "abc");
        assert_eq!(tab.title, "Submission Form");
        assert_eq!(tab.url, "https://example.com");
    }

    #[test]
    fn test_tab_role_display() {
        assert_eq!(TabRole::Source.to_string(), "source");
        assert_eq!(TabRole::Destination.to_string(), "destination");
    }
}
