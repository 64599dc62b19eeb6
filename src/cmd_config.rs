//! `config` subcommand handlers.

use tracing::info;

use tabrelay_config::{MappingConfig, MappingParser, MappingValidator, ValidationResult};

use crate::app::{read_mapping_file, read_stdin, App, CliResult};
use crate::cli::ConfigAction;

pub(crate) async fn handle_config_command(app: &App, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Show => config_show(app).await,
        ConfigAction::Check { file } => {
            let text = app.mapping_from(file.as_deref()).await?;
            config_check(&text)
        }
        ConfigAction::Save { file } => {
            let text = match file {
                Some(path) => read_mapping_file(&path).await?,
                None => read_stdin()?,
            };
            config_save(app, &text).await
        }
        ConfigAction::Clear => {
            app.settings.clear_field_mapping().await?;
            info!("Mapping cleared");
            println!("Configuration cleared");
            Ok(())
        }
    }
}

async fn config_show(app: &App) -> CliResult {
    let text = app.saved_mapping().await?;
    println!("{}", text.trim_end());
    Ok(())
}

fn config_check(text: &str) -> CliResult {
    let config = MappingParser::parse(text)?;
    let validation = MappingValidator::validate(&config);
    print!("{}", render_summary(&config, &validation));
    Ok(())
}

async fn config_save(app: &App, text: &str) -> CliResult {
    let config = app.settings.save_field_mapping(text).await?;
    let validation = MappingValidator::validate(&config);
    print!("{}", render_summary(&config, &validation));
    println!("Configuration saved!");
    Ok(())
}

/// Human-readable description of a parsed mapping and its warnings.
pub(crate) fn render_summary(config: &MappingConfig, validation: &ValidationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source tab:      \"{}\"\n", config.source_tab_filter()));
    out.push_str(&format!("Destination tab: \"{}\"\n", config.dest_tab_filter()));
    out.push_str(&format!("Mappings ({}):\n", config.correspondences().len()));
    for c in config.correspondences() {
        out.push_str(&format!("  {}\n", c));
    }
    for warning in &validation.warnings {
        out.push_str(&format!("warning: {}\n", warning.message));
    }
    out
}
