//! Interactive website builder (`sitecraft build`).
//!
//! Generates a website from a description, then loops offering the quick
//! improvements, a free-form request, saving, and starting over. An
//! authentication failure prompts for a new API key and swaps the provider
//! into the live session without losing the current website.

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Password, Select};
use secrecy::SecretString;

use sitecraft_core::builder::suggestions::QUICK_IMPROVEMENTS;
use sitecraft_core::session::controller::SessionController;
use sitecraft_infra::secret::{resolve_api_key, sanitize_key};
use sitecraft_types::error::SessionError;
use sitecraft_types::session::{GenerationOutcome, ImprovementOutcome};

use super::OutputMode;
use super::generate::save;
use super::progress::{Interrupt, with_spinner};
use super::report::{print_error, print_generation, print_improvement, print_saved};
use crate::state::AppState;

const CUSTOM_REQUEST: &str = "Custom improvement...";
const SAVE: &str = "Save to disk";
const NEW_WEBSITE: &str = "Create new website";
const QUIT: &str = "Quit";

/// Next step chosen from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Improve(String),
    Custom,
    Save,
    NewWebsite,
    Quit,
}

fn menu_items() -> Vec<&'static str> {
    QUICK_IMPROVEMENTS
        .iter()
        .copied()
        .chain([CUSTOM_REQUEST, SAVE, NEW_WEBSITE, QUIT])
        .collect()
}

fn action_for(selection: usize) -> Action {
    match selection.checked_sub(QUICK_IMPROVEMENTS.len()) {
        None => Action::Improve(QUICK_IMPROVEMENTS[selection].to_string()),
        Some(0) => Action::Custom,
        Some(1) => Action::Save,
        Some(2) => Action::NewWebsite,
        Some(_) => Action::Quit,
    }
}

/// Run the interactive builder until the user quits.
pub async fn run_build(
    state: &AppState,
    description: Option<String>,
    out: Option<PathBuf>,
    mode: OutputMode,
) -> Result<()> {
    let key = match resolve_api_key(&state.config.provider) {
        Some(key) => key,
        None => {
            println!();
            println!(
                "  {} No API key found in {}",
                style("!").yellow().bold(),
                style(state.api_key_env()).cyan()
            );
            prompt_for_key(state)?
        }
    };
    let controller = state.controller_with_key(&key)?;
    let out_dir = state.output_dir(out);
    let mut pending = description;

    'session: loop {
        let description = match pending.take() {
            Some(d) => d,
            None => Input::<String>::new()
                .with_prompt("Describe the website you want")
                .interact_text()?,
        };

        if generate(state, &controller, &description, mode).await?.is_none() {
            continue 'session;
        }
        let mut unsaved = true;

        loop {
            println!();
            let items = menu_items();
            let selection = Select::new()
                .with_prompt("What next?")
                .items(&items)
                .default(0)
                .interact()?;

            let request = match action_for(selection) {
                Action::Improve(request) => request,
                Action::Custom => Input::<String>::new()
                    .with_prompt("Describe the improvement")
                    .interact_text()?,
                Action::Save => {
                    save_current(&controller, &out_dir).await?;
                    unsaved = false;
                    continue;
                }
                Action::NewWebsite => {
                    controller.reset()?;
                    continue 'session;
                }
                Action::Quit => {
                    if unsaved
                        && Confirm::new()
                            .with_prompt("Save before quitting?")
                            .default(true)
                            .interact()?
                    {
                        save_current(&controller, &out_dir).await?;
                    }
                    break 'session;
                }
            };

            if let Some(outcome) = improve(state, &controller, &request, mode).await? {
                unsaved |= outcome.changed;
            }
        }
    }

    Ok(())
}

/// Generate, re-collecting credentials on auth failure. `None` when the call failed.
async fn generate(
    state: &AppState,
    controller: &SessionController,
    description: &str,
    mode: OutputMode,
) -> Result<Option<GenerationOutcome>> {
    loop {
        let interrupt = Interrupt::listen();
        let result = with_spinner(
            mode,
            "Generating website...",
            controller.generate_with_cancel(description, interrupt.token()),
        )
        .await;

        match result {
            Ok(outcome) => {
                print_generation(&outcome);
                return Ok(Some(outcome));
            }
            Err(err) if err.requires_credentials() => {
                print_error(&err);
                reauthenticate(state, controller)?;
            }
            Err(err) => {
                print_error(&err);
                return Ok(None);
            }
        }
    }
}

/// Improve, re-collecting credentials on auth failure. `None` when the call failed.
async fn improve(
    state: &AppState,
    controller: &SessionController,
    request: &str,
    mode: OutputMode,
) -> Result<Option<ImprovementOutcome>> {
    loop {
        let prior = controller.current_artifact();
        let interrupt = Interrupt::listen();
        let result = with_spinner(
            mode,
            "Improving website...",
            controller.improve_with_cancel(request, interrupt.token()),
        )
        .await;

        match result {
            Ok(outcome) => {
                print_improvement(&outcome, prior.as_ref());
                return Ok(Some(outcome));
            }
            Err(err) if err.requires_credentials() => {
                print_error(&err);
                reauthenticate(state, controller)?;
            }
            Err(err) => {
                print_error(&err);
                return Ok(None);
            }
        }
    }
}

async fn save_current(controller: &SessionController, out_dir: &Path) -> Result<()> {
    let Some(artifact) = controller.current_artifact() else {
        print_error(&SessionError::NoArtifact);
        return Ok(());
    };
    let (document, snapshot) = save(out_dir, &artifact).await?;
    print_saved(&document, &snapshot);
    Ok(())
}

/// Ask for a new key and swap a freshly built provider into the session.
fn reauthenticate(state: &AppState, controller: &SessionController) -> Result<()> {
    let key = prompt_for_key(state)?;
    controller.replace_provider(state.provider(&key)?);
    Ok(())
}

fn prompt_for_key(state: &AppState) -> Result<SecretString> {
    loop {
        let entered = Password::new()
            .with_prompt(format!("Enter your API key ({})", state.api_key_env()))
            .interact()?;
        match sanitize_key(&entered) {
            Some(key) => return Ok(SecretString::from(key.to_string())),
            None => println!("  {}", style("That does not look like an API key.").yellow()),
        }
    }
}
