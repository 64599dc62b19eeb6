//! `preset` subcommand handlers.

use std::collections::BTreeMap;

use tracing::warn;

use tabrelay_config::{MappingParser, Preset};
use tabrelay_protocols::StoreError;

use crate::app::{App, CliResult};
use crate::cli::{OutputFormat, PresetAction};

pub(crate) async fn handle_preset_command(app: &App, action: PresetAction) -> CliResult {
    match action {
        PresetAction::List { format } => preset_list(app, format).await,
        PresetAction::Load { key } => preset_load(app, &key).await,
        PresetAction::Save { key, name, file } => {
            let text = app.mapping_from(file.as_deref()).await?;
            app.settings.save_preset(&key, &name, &text).await?;
            println!("Saved preset '{}' ({})", key, name);
            Ok(())
        }
        PresetAction::Delete { key } => {
            app.settings.delete_preset(&key).await?;
            println!("Deleted preset '{}'", key);
            Ok(())
        }
    }
}

async fn preset_list(app: &App, format: OutputFormat) -> CliResult {
    let presets = app.settings.presets().await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&presets)?),
        OutputFormat::Table => {
            let last_used = app.settings.last_used_preset().await?;
            print!("{}", render_table(&presets, last_used.as_deref()));
        }
    }
    Ok(())
}

/// Loading records the preset as last used and makes it the active mapping.
/// A preset that does not parse yet (like `custom`) is printed for editing.
async fn preset_load(app: &App, key: &str) -> CliResult {
    let preset = app.settings.load_preset(key).await?;
    match app.settings.save_field_mapping(&preset.config).await {
        Ok(_) => {
            println!("Loaded {} configuration", preset.name);
            Ok(())
        }
        Err(StoreError::InvalidConfig(reason)) => {
            warn!(key, "Preset is incomplete: {}", reason);
            println!("Loaded {} configuration (not saved: {})", preset.name, reason);
            println!();
            println!("{}", preset.config.trim_end());
            println!();
            println!("Fill it in and save it with `tabrelay config save --file <path>`.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn render_table(presets: &BTreeMap<String, Preset>, last_used: Option<&str>) -> String {
    let mut out = format!("  {:<12} {:<28} {:<20} {}\n", "KEY", "NAME", "SOURCE", "DESTINATION");
    out.push_str(&format!("{}\n", "-".repeat(80)));
    for (key, preset) in presets {
        let marker = if Some(key.as_str()) == last_used { "*" } else { " " };
        let (source, dest) = match MappingParser::parse(&preset.config) {
            Ok(config) => (
                config.source_tab_filter().to_string(),
                config.dest_tab_filter().to_string(),
            ),
            Err(_) => ("-".to_string(), "-".to_string()),
        };
        out.push_str(&format!(
            "{} {:<12} {:<28} {:<20} {}\n",
            marker, key, preset.name, source, dest
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabrelay_config::builtin_presets;

    #[test]
    fn test_render_table_marks_last_used() {
        let out = render_table(&builtin_presets(), Some("scale"));
        let scale_line = out.lines().find(|l| l.contains("Scale to Form")).unwrap();
        assert!(scale_line.starts_with('*'));
        let outlier_line = out.lines().find(|l| l.contains("Outlier to Form")).unwrap();
        assert!(outlier_line.starts_with(' '));
    }

    #[test]
    fn test_render_table_incomplete_preset() {
        let out = render_table(&builtin_presets(), None);
        let custom_line = out.lines().find(|l| l.contains("Custom Configuration")).unwrap();
        assert!(custom_line.trim_end().ends_with('-'));
    }
}
