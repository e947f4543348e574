//! Infrastructure layer for Sitecraft.
//!
//! Contains the adapters behind the ports defined in `sitecraft-core`:
//! Gemini and Anthropic HTTP providers, environment API key resolution, the
//! `config.toml` loader, and document export.

pub mod config;
pub mod export;
pub mod llm;
pub mod secret;
