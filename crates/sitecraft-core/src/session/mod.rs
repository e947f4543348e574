//! Session controller: owns `SessionState` and sequences the pipeline.

pub mod controller;
mod guard;
