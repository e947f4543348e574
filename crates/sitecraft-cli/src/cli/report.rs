//! Styled and JSON rendering of session outcomes.

use std::path::Path;

use console::style;

use sitecraft_types::artifact::{ArtifactField, WebsiteArtifact};
use sitecraft_types::error::SessionError;
use sitecraft_types::session::{GenerationOutcome, ImprovementOutcome, Resolution};

/// Human-readable account of how a reply was turned into an artifact.
pub fn resolution_label(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Extracted { tier } => format!("parsed model reply ({tier})"),
        Resolution::Synthesized => "unstructured reply wrapped in a page shell".to_string(),
        Resolution::Heuristic { groups } if groups.is_empty() => {
            "unstructured reply, no built-in styling matched".to_string()
        }
        Resolution::Heuristic { groups } => {
            let names: Vec<String> = groups.iter().map(ToString::to_string).collect();
            format!("unstructured reply, applied built-in {} styling", names.join(" + "))
        }
    }
}

/// Map a session failure to the error surfaced by the binary.
pub fn session_failure(err: SessionError) -> anyhow::Error {
    match &err {
        SessionError::Transport(transport) => {
            anyhow::anyhow!("{} ({transport})", transport.user_message())
        }
        _ => anyhow::Error::new(err),
    }
}

pub fn print_error(err: &SessionError) {
    let message = match err {
        SessionError::Transport(transport) => transport.user_message().to_string(),
        other => other.to_string(),
    };
    eprintln!();
    eprintln!("  {} {}", style("✗").red().bold(), message);
}

pub fn print_generation(outcome: &GenerationOutcome) {
    println!();
    println!(
        "  {} Generated {}",
        style("✓").green().bold(),
        style(display_title(&outcome.artifact)).cyan()
    );
    println!(
        "    {}",
        style(resolution_label(&outcome.resolution)).dim()
    );
    print_sizes(&outcome.artifact);
}

pub fn print_improvement(outcome: &ImprovementOutcome, prior: Option<&WebsiteArtifact>) {
    println!();
    if outcome.changed {
        println!("  {} Website improved", style("✓").green().bold());
        if let Some(prior) = prior {
            let fields: Vec<String> = prior
                .changed_fields(&outcome.artifact)
                .iter()
                .map(ArtifactField::to_string)
                .collect();
            println!("    {} {}", style("Changed:").bold(), fields.join(", "));
        }
    } else {
        println!(
            "  {} The model reply did not change the website",
            style("!").yellow().bold()
        );
    }
    println!(
        "    {}",
        style(resolution_label(&outcome.resolution)).dim()
    );
}

pub fn print_saved(document: &Path, snapshot: &Path) {
    println!();
    println!(
        "  {} Saved {}",
        style("✓").green().bold(),
        style(document.display()).cyan()
    );
    println!(
        "    {} {}",
        style("Snapshot:").dim(),
        style(snapshot.display()).dim()
    );
}

fn print_sizes(artifact: &WebsiteArtifact) {
    for field in ArtifactField::CODE {
        let len = artifact.field(field).len();
        println!(
            "    {} {}",
            style(format!("{field}:")).bold(),
            style(format!("{len} bytes")).dim()
        );
    }
}

fn display_title(artifact: &WebsiteArtifact) -> &str {
    if artifact.title.trim().is_empty() {
        "website"
    } else {
        &artifact.title
    }
}
