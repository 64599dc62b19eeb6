//! Built-in mapping presets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of the preset loaded when nothing has been saved yet.
pub const DEFAULT_PRESET: &str = "outlier";

/// Mapping text stored on first run.
pub const DEFAULT_FIELD_MAPPING: &str = "SOURCE_TAB_NAME: Blank Slate
DESTINATION_TAB_NAME: Greenfield – Submission Form

SOURCE -> DESTINATION
1 -> 1
2 -> 3
3 -> 2
4 -> 4";

/// A named mapping text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub config: String,
}

impl Preset {
    pub fn new(name: impl Into<String>, config: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: config.into(),
        }
    }
}

/// Presets shipped with tabrelay, keyed by preset key.
///
/// `custom` deliberately leaves both tab names blank, so it does not parse
/// until the user fills them in.
pub fn builtin_presets() -> BTreeMap<String, Preset> {
    let mut presets = BTreeMap::new();
    presets.insert(
        "outlier".to_string(),
        Preset::new(
            "Outlier to Form",
            "SOURCE_TAB_NAME: Outlier
DESTINATION_TAB_NAME: Submission Form

SOURCE -> DESTINATION
1 -> 1
2 -> 3
3 -> 2
4 -> 4",
        ),
    );
    presets.insert(
        "scale".to_string(),
        Preset::new(
            "Scale to Form",
            "SOURCE_TAB_NAME: Scale
DESTINATION_TAB_NAME: Submission Form

SOURCE -> DESTINATION
1 -> 1
2 -> 2
3 -> 3
4 -> 4",
        ),
    );
    presets.insert(
        "custom".to_string(),
        Preset::new(
            "Custom Configuration",
            "SOURCE_TAB_NAME: 
DESTINATION_TAB_NAME: 

SOURCE -> DESTINATION
1 -> 1
2 -> 2
3 -> 3
4 -> 4",
        ),
    );
    presets
}
