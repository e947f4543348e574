//! One-shot website generation (`sitecraft generate`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use sitecraft_infra::export::{write_artifact_json, write_document};
use sitecraft_types::artifact::WebsiteArtifact;

use super::OutputMode;
use super::progress::{Interrupt, with_spinner};
use super::report::{print_generation, print_saved, session_failure};
use crate::state::AppState;

pub async fn generate_site(
    state: &AppState,
    description: &str,
    out: Option<PathBuf>,
    mode: OutputMode,
) -> Result<()> {
    let controller = state.controller()?;
    let interrupt = Interrupt::listen();

    let outcome = with_spinner(
        mode,
        "Generating website...",
        controller.generate_with_cancel(description, interrupt.token()),
    )
    .await
    .map_err(session_failure)?;

    let (document, snapshot) = save(&state.output_dir(out), &outcome.artifact).await?;

    if mode.json {
        let output = serde_json::json!({
            "session_id": controller.id(),
            "outcome": outcome,
            "document": document,
            "snapshot": snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !mode.quiet {
        print_generation(&outcome);
        print_saved(&document, &snapshot);
        println!();
    }

    Ok(())
}

/// Write both the document and the artifact snapshot into `dir`.
pub async fn save(dir: &Path, artifact: &WebsiteArtifact) -> Result<(PathBuf, PathBuf)> {
    let document = write_document(dir, artifact)
        .await
        .context("Failed to write website document")?;
    let snapshot = write_artifact_json(dir, artifact)
        .await
        .context("Failed to write artifact snapshot")?;
    Ok((document, snapshot))
}
