//! Parley Agent Service Library Crate
//!
//! Process-level concerns for the voice-agent tool servers: configuration,
//! prompt loading, persona selection and serving over stdio. The binaries
//! in `bin/` are thin wrappers around this library.

pub mod cli;
pub mod config;
pub mod prompts;
pub mod runtime;
