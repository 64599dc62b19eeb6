//! # tabrelay Config
//!
//! The field mapping text format and the application settings file.
//!
//! A mapping names the source and destination tabs by title substring and
//! lists which numbered source field goes to which numbered destination
//! field:
//!
//! ```text
//! SOURCE_TAB_NAME: Outlier
//! DESTINATION_TAB_NAME: Submission Form
//!
//! SOURCE -> DESTINATION
//! 1 -> 1
//! 2 -> 3
//! ```

mod error;
mod loader;
mod mapping;
mod presets;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use mapping::{Correspondence, MappingConfig, MappingParser};
pub use presets::{builtin_presets, Preset, DEFAULT_FIELD_MAPPING, DEFAULT_PRESET};
pub use schema::*;
pub use validator::{
    ConfigValidator, MappingValidator, ValidationError, ValidationResult, ValidationWarning,
};
