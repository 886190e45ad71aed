//! # Ports
//!
//! Interface definitions for the host editor collaborators.
//!
//! - [`catalog`]: installed extensions and their language contributions
//! - [`json`]: permissive JSON file reading
//! - [`host`]: language-configuration installation, notices, host commands
//! - [`editor`]: the active text editor
//! - [`settings`]: the namespaced settings store
//! - [`artifacts`]: generated classification records
//!
//! The use cases only see these traits, so the whole pipeline runs against
//! stubs in tests and against the filesystem in the CLI.

// crates/ports/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod artifacts;
pub mod catalog;
pub mod editor;
pub mod host;
pub mod json;
pub mod settings;
