//! # tabrelay Store
//!
//! Durable storage for the raw mapping text and named presets.
//!
//! ## Keys
//!
//! - `fieldMapping` - last saved mapping text
//! - `presets` - JSON object of user presets, `{ key: { name, config } }`
//! - `lastUsedPreset` - key of the preset loaded most recently
//! - `initialized` - set once the first-run default mapping has been written

pub mod settings;
pub mod store;

pub use settings::{
    Settings, FIELD_MAPPING_KEY, INITIALIZED_KEY, LAST_USED_PRESET_KEY, PRESETS_KEY,
};
pub use store::{FileSettingsStore, MemorySettingsStore};
