// crates/shared-kernel/src/value_objects/mod.rs
pub mod language_id;

pub use language_id::LanguageId;
