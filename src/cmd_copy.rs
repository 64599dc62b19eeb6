//! `tabs` and `copy` subcommand handlers.

use std::path::Path;

use tracing::info;

use tabrelay_core::{Session, TabResolution, TransferResult};
use tabrelay_protocols::TabRole;

use crate::app::{App, CliResult};

/// Print which tab each side of the saved mapping resolves to.
pub(crate) async fn handle_tabs_command(app: &App) -> CliResult {
    let text = app.saved_mapping().await?;
    let mut session = app.session()?;
    session.set_config_text(&text)?;

    let resolution = session.refresh_tabs().await?;
    print!("{}", render_resolution(resolution));
    Ok(())
}

pub(crate) async fn handle_copy_command(
    app: &App,
    preset: Option<&str>,
    file: Option<&Path>,
) -> CliResult {
    let text = match preset {
        Some(key) => {
            let preset = app.settings.load_preset(key).await?;
            info!(key, "Using preset {}", preset.name);
            preset.config
        }
        None => app.mapping_from(file).await?,
    };

    let mut session = app.session()?;
    session.set_config_text(&text)?;
    copy(&mut session).await
}

async fn copy(session: &mut Session) -> CliResult {
    println!("Copying...");
    let result = session.copy_fields().await?;
    print!("{}", render_result(&result));
    Ok(())
}

pub(crate) fn render_resolution(resolution: &TabResolution) -> String {
    let mut out = String::new();
    for (label, role) in [("Source", TabRole::Source), ("Destination", TabRole::Destination)] {
        out.push_str(&format!("{:<12} {}\n", format!("{}:", label), resolution.get(role).status_message()));
    }
    if resolution.can_copy() {
        out.push_str("Ready to copy\n");
    } else {
        out.push_str("Copy disabled: need exactly one matching tab on each side\n");
    }
    out
}

pub(crate) fn render_result(result: &TransferResult) -> String {
    let mut out = format!("Successfully copied {} fields!\n", result.filled_count);
    if result.filled_count < result.mapped_count {
        out.push_str(&format!(
            "Filled {} of {} mapped destination fields.\n",
            result.filled_count, result.mapped_count
        ));
    }
    if !result.skipped_dest_fields.is_empty() {
        let skipped: Vec<String> = result
            .skipped_dest_fields
            .iter()
            .map(u32::to_string)
            .collect();
        out.push_str(&format!(
            "Skipped destination fields with no source value: {}\n",
            skipped.join(", ")
        ));
    }
    out
}
