//! # Domain
//!
//! Pure comment-block logic: rule tables, pattern repair, the language
//! configuration model and its normalizer, style classification, the merge
//! engine, configuration composition and line continuation.
//!
//! Nothing in this crate talks to the host editor; every function takes the
//! data and [`Settings`] snapshot it needs as parameters.

#![allow(clippy::multiple_crate_versions)]

pub mod blade;
pub mod classification;
pub mod comment_style;
pub mod compose;
pub mod continuation;
pub mod language;
pub mod merge;
pub mod pattern;
pub mod rules;
pub mod settings;

pub use blade::{BLADE, BladeOverride, ToggleOutcome};
pub use classification::{
    Classification, MultiLineLanguageDefinitions, MultiLineRegistry, SingleLineLanguageDefinitions,
    SingleLineRegistry, classify,
};
pub use comment_style::{CommentToken, SingleLineStyle};
pub use compose::{Installation, compose};
pub use continuation::{ContinuationEngine, Insertion, Invocation};
pub use language::{LanguageConfiguration, RawLanguageConfig};
pub use pattern::{Pattern, PatternField};
pub use rules::DefaultRules;
pub use settings::{RegistryPrecedence, SettingKey, Settings};
