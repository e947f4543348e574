//! Generation pipeline and session controller for Sitecraft.
//!
//! This crate turns a natural-language website description into a
//! [`WebsiteArtifact`](sitecraft_types::artifact::WebsiteArtifact) by way of a
//! generative model, and keeps that artifact intact across improvement
//! requests no matter how malformed the model's replies are.
//!
//! It defines the `LlmProvider` port that the infrastructure layer implements
//! and depends only on `sitecraft-types` -- never on `sitecraft-infra` or any
//! network/filesystem crate.

pub mod builder;
pub mod llm;
pub mod render;
pub mod session;
