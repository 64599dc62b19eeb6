//! Typed access to the persisted mapping text and presets.

use std::collections::BTreeMap;

use tracing::{debug, info};

use tabrelay_config::{
    builtin_presets, MappingConfig, MappingParser, Preset, DEFAULT_FIELD_MAPPING,
};
use tabrelay_protocols::{SettingsStore, StoreError};

/// Key holding the last saved mapping text.
pub const FIELD_MAPPING_KEY: &str = "fieldMapping";
/// Key holding user presets as a JSON object.
pub const PRESETS_KEY: &str = "presets";
/// Key holding the key of the most recently loaded preset.
pub const LAST_USED_PRESET_KEY: &str = "lastUsedPreset";
/// Key marking that first-run defaults have been written.
pub const INITIALIZED_KEY: &str = "initialized";

/// Settings facade over any [`SettingsStore`].
pub struct Settings<S> {
    store: S,
}

impl<S: SettingsStore> Settings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn field_mapping(&self) -> Result<Option<String>, StoreError> {
        self.store.get(FIELD_MAPPING_KEY).await
    }

    /// Store `text` as the active mapping. Text that does not parse is refused.
    pub async fn save_field_mapping(&self, text: &str) -> Result<MappingConfig, StoreError> {
        let config = parse_checked(text)?;
        self.store.set(FIELD_MAPPING_KEY, text).await?;
        info!(
            source = config.source_tab_filter(),
            dest = config.dest_tab_filter(),
            "Mapping saved"
        );
        Ok(config)
    }

    pub async fn clear_field_mapping(&self) -> Result<(), StoreError> {
        self.store.remove(FIELD_MAPPING_KEY).await
    }

    /// Store the default mapping on first run. Returns true if it was written.
    ///
    /// Runs once per store: a mapping cleared later stays cleared.
    pub async fn ensure_defaults(&self) -> Result<bool, StoreError> {
        if self.store.get(INITIALIZED_KEY).await?.is_some() {
            return Ok(false);
        }
        let seeded = self.field_mapping().await?.is_none();
        if seeded {
            self.store.set(FIELD_MAPPING_KEY, DEFAULT_FIELD_MAPPING).await?;
            debug!("Stored default field mapping");
        }
        self.store.set(INITIALIZED_KEY, "true").await?;
        Ok(seeded)
    }

    /// Built-in presets overlaid with the user's own.
    pub async fn presets(&self) -> Result<BTreeMap<String, Preset>, StoreError> {
        let mut presets = builtin_presets();
        presets.extend(self.user_presets().await?);
        Ok(presets)
    }

    pub async fn save_preset(&self, key: &str, name: &str, text: &str) -> Result<(), StoreError> {
        if key.trim().is_empty() {
            return Err(StoreError::InvalidConfig("preset key is empty".to_string()));
        }
        parse_checked(text)?;

        let mut user = self.user_presets().await?;
        user.insert(key.to_string(), Preset::new(name, text));
        self.write_user_presets(&user).await?;
        info!(key, name, "Preset saved");
        Ok(())
    }

    /// Remove a user preset. Built-in keys are refused unless the user
    /// overrode them, in which case the override is removed.
    pub async fn delete_preset(&self, key: &str) -> Result<(), StoreError> {
        let mut user = self.user_presets().await?;
        if user.remove(key).is_none() {
            return Err(if builtin_presets().contains_key(key) {
                StoreError::BuiltinPreset(key.to_string())
            } else {
                StoreError::PresetNotFound(key.to_string())
            });
        }
        self.write_user_presets(&user).await?;
        info!(key, "Preset deleted");
        Ok(())
    }

    /// Look up a preset and remember it as the last one used.
    pub async fn load_preset(&self, key: &str) -> Result<Preset, StoreError> {
        let preset = self
            .presets()
            .await?
            .remove(key)
            .ok_or_else(|| StoreError::PresetNotFound(key.to_string()))?;
        self.store.set(LAST_USED_PRESET_KEY, key).await?;
        debug!(key, "Preset loaded");
        Ok(preset)
    }

    pub async fn last_used_preset(&self) -> Result<Option<String>, StoreError> {
        self.store.get(LAST_USED_PRESET_KEY).await
    }

    async fn user_presets(&self) -> Result<BTreeMap<String, Preset>, StoreError> {
        match self.store.get(PRESETS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(BTreeMap::new()),
        }
    }

    async fn write_user_presets(&self, presets: &BTreeMap<String, Preset>) -> Result<(), StoreError> {
        let json = serde_json::to_string(presets)?;
        self.store.set(PRESETS_KEY, &json).await
    }
}

fn parse_checked(text: &str) -> Result<MappingConfig, StoreError> {
    MappingParser::parse(text).map_err(|e| StoreError::InvalidConfig(e.to_string()))
}
