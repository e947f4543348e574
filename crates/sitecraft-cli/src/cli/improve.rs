//! One-shot improvement of a saved website (`sitecraft improve`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use sitecraft_infra::export::{read_artifact_json, write_artifact_json_to, write_document_to};

use super::OutputMode;
use super::progress::{Interrupt, with_spinner};
use super::report::{print_improvement, print_saved, session_failure};
use crate::state::AppState;

pub async fn improve_site(
    state: &AppState,
    artifact_path: &Path,
    request: &str,
    out: Option<PathBuf>,
    mode: OutputMode,
) -> Result<()> {
    let prior = read_artifact_json(artifact_path)
        .await
        .with_context(|| format!("Failed to load {}", artifact_path.display()))?;

    let controller = state.controller()?;
    controller
        .resume(prior.clone())
        .context("Saved artifact has no markup to improve")?;

    let interrupt = Interrupt::listen();
    let outcome = with_spinner(
        mode,
        "Improving website...",
        controller.improve_with_cancel(request, interrupt.token()),
    )
    .await
    .map_err(session_failure)?;

    // Rewrite the loaded files in place, even if the model renamed the site.
    let dir = out.unwrap_or_else(|| snapshot_dir(artifact_path));
    let (document, snapshot) = output_paths(&dir, artifact_path);
    write_document_to(&document, &outcome.artifact)
        .await
        .context("Failed to write website document")?;
    write_artifact_json_to(&snapshot, &outcome.artifact)
        .await
        .context("Failed to write artifact snapshot")?;

    if mode.json {
        let output = serde_json::json!({
            "session_id": controller.id(),
            "outcome": outcome,
            "changed_fields": prior.changed_fields(&outcome.artifact),
            "document": document,
            "snapshot": snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !mode.quiet {
        print_improvement(&outcome, Some(&prior));
        print_saved(&document, &snapshot);
        println!();
    }

    Ok(())
}

/// Document and snapshot paths in `dir` sharing the input snapshot's stem.
fn output_paths(dir: &Path, artifact_path: &Path) -> (PathBuf, PathBuf) {
    let name = artifact_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name
        .strip_suffix(".artifact.json")
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(&name);
    let stem = if stem.is_empty() { "website" } else { stem };
    (
        dir.join(format!("{stem}.html")),
        dir.join(format!("{stem}.artifact.json")),
    )
}

/// Directory holding the snapshot; `.` for a bare file name.
fn snapshot_dir(artifact_path: &Path) -> PathBuf {
    match artifact_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
