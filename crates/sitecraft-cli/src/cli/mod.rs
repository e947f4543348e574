//! CLI command definitions for the `sitecraft` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod build;
pub mod component;
pub mod generate;
pub mod improve;
pub mod progress;
pub mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Generate and refine websites from plain-language descriptions.
#[derive(Parser)]
#[command(name = "sitecraft", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, conflicts_with = "json")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive session: generate a website, then improve it step by step.
    Build {
        /// What the website should be. Prompted for when omitted.
        description: Option<String>,

        /// Directory to save the website to.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate a website in one shot and save it.
    #[command(alias = "gen")]
    Generate {
        /// What the website should be.
        description: String,

        /// Directory to save the website to.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Apply one improvement to a saved website.
    Improve {
        /// Artifact snapshot written by `generate` or `build`.
        #[arg(short, long)]
        artifact: PathBuf,

        /// The change to make.
        request: String,

        /// Directory to save to (defaults to the snapshot's directory).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate a standalone component.
    Component {
        /// What the component should be.
        request: String,
    },

    /// List the quick improvement suggestions.
    Suggestions,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// How command output should be presented.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
}

impl OutputMode {
    /// Spinners and styled text are only shown to a human reader.
    pub fn styled(&self) -> bool {
        !self.json && !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_improve() {
        let cli = Cli::try_parse_from([
            "sitecraft",
            "improve",
            "--artifact",
            "site.artifact.json",
            "Add hover effects",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Improve {
                artifact, request, out,
            } => {
                assert_eq!(artifact, PathBuf::from("site.artifact.json"));
                assert_eq!(request, "Add hover effects");
                assert!(out.is_none());
            }
            _ => panic!("expected improve"),
        }
    }

    #[test]
    fn test_build_description_is_optional() {
        let cli = Cli::try_parse_from(["sitecraft", "build", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Build { description: None, .. }));
    }

    #[test]
    fn test_otel_conflicts_with_json() {
        let err = Cli::try_parse_from(["sitecraft", "suggestions", "--json", "--otel"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert!(Cli::try_parse_from(["sitecraft", "suggestions", "--otel"]).is_ok());
    }

    #[test]
    fn test_output_mode_styled() {
        assert!(OutputMode { json: false, quiet: false }.styled());
        assert!(!OutputMode { json: true, quiet: false }.styled());
        assert!(!OutputMode { json: false, quiet: true }.styled());
    }
}
