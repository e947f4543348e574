//! Shared domain types for Sitecraft.
//!
//! This crate contains the core domain types used across the Sitecraft workspace:
//! the website artifact and its extraction candidates, session state, LLM
//! request/response shapes, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod artifact;
pub mod config;
pub mod error;
pub mod llm;
pub mod session;
