//! Standalone component generation (`sitecraft component`).

use anyhow::Result;
use console::style;

use super::OutputMode;
use super::progress::with_spinner;
use super::report::session_failure;
use crate::state::AppState;

pub async fn generate_component(state: &AppState, request: &str, mode: OutputMode) -> Result<()> {
    let controller = state.controller()?;

    let component = with_spinner(
        mode,
        "Generating component...",
        controller.generate_component(request),
    )
    .await
    .map_err(session_failure)?;

    if mode.styled() {
        println!();
        println!(
            "  {} {}",
            style("✓").green().bold(),
            style(&component.name).cyan()
        );
        println!();
    }
    println!("{}", serde_json::to_string_pretty(&component)?);

    Ok(())
}
