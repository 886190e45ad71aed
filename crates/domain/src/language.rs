//! Language configuration model.
//!
//! [`RawLanguageConfig`] is what a `language-configuration.json` file
//! deserializes into, with every ambiguous shape kept as a tagged union.
//! [`normalize`] turns it into a [`LanguageConfiguration`], the only shape the
//! rest of the pipeline works with.

pub mod model;
pub mod normalize;
pub mod raw;

pub use model::{
    AutoClosingPair, CharacterPair, CommentRule, EnterAction, FoldingMarkers, FoldingRules, IndentAction,
    IndentationRules, LanguageConfiguration, LineComment, OnEnterRule,
};
pub use normalize::normalize;
pub use raw::{PairEntry, RawLanguageConfig};
