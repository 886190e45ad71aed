//! # Use Cases
//!
//! Application-level orchestration of the comment-block pipeline.
//!
//! - [`registry`]: discovery, loading and classification of installed languages
//! - [`configurator`]: the aggregate that owns the registry and every installation
//! - [`commands`]: the comment continuation and Blade toggle commands
//! - [`triggers`]: mapping host events to rebuilds, reload prompts and re-applies
//!
//! Use cases depend on both domain and ports, but not on infrastructure.

#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod configurator;
pub mod registry;
pub mod triggers;

#[cfg(test)]
mod stubs;

pub use commands::{BladeToggle, single_line_block};
pub use configurator::{BuildReport, Configurator, HostPorts, InstalledLanguage};
pub use registry::LanguageRegistry;
pub use triggers::{Reaction, Trigger, dispatch};
