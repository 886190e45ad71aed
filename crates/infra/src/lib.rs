// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod artifacts;
pub mod catalog;
pub mod manifest;
pub mod metadata;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod watch;
