use std::collections::BTreeMap;

use serde::Deserialize;

use super::model::{AutoClosingPair, CharacterPair, CommentRule, EnterAction};
use crate::pattern::PatternField;

/// A pair entry: either the `["(", ")"]` shorthand or an explicit record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PairEntry {
    Shorthand(CharacterPair),
    Record(AutoClosingPair),
}

impl PairEntry {
    pub fn into_record(self) -> AutoClosingPair {
        match self {
            Self::Shorthand((open, close)) => AutoClosingPair { open, close, not_in: None },
            Self::Record(pair) => pair,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOnEnterRule {
    pub before_text: PatternField,
    #[serde(default)]
    pub after_text: Option<PatternField>,
    #[serde(default)]
    pub previous_line_text: Option<PatternField>,
    #[serde(default)]
    pub action: EnterAction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFoldingMarkers {
    pub start: PatternField,
    pub end: PatternField,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFolding {
    #[serde(default)]
    pub off_side: Option<bool>,
    #[serde(default)]
    pub markers: Option<RawFoldingMarkers>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIndentationRules {
    pub increase_indent_pattern: PatternField,
    pub decrease_indent_pattern: PatternField,
    #[serde(default)]
    pub indent_next_line_pattern: Option<PatternField>,
    #[serde(default)]
    pub un_indented_line_pattern: Option<PatternField>,
}

/// A language configuration exactly as loaded from its file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLanguageConfig {
    #[serde(default)]
    pub comments: Option<CommentRule>,
    #[serde(default)]
    pub brackets: Option<Vec<CharacterPair>>,
    #[serde(default)]
    pub auto_closing_pairs: Option<Vec<PairEntry>>,
    #[serde(default)]
    pub surrounding_pairs: Option<Vec<PairEntry>>,
    #[serde(default)]
    pub on_enter_rules: Option<Vec<RawOnEnterRule>>,
    #[serde(default)]
    pub word_pattern: Option<PatternField>,
    #[serde(default)]
    pub folding: Option<RawFolding>,
    #[serde(default)]
    pub indentation_rules: Option<RawIndentationRules>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl RawLanguageConfig {
    /// Languages whose file parses to `{}` carry nothing worth installing.
    pub fn is_empty(&self) -> bool {
        self.comments.is_none()
            && self.brackets.is_none()
            && self.auto_closing_pairs.is_none()
            && self.surrounding_pairs.is_none()
            && self.on_enter_rules.is_none()
            && self.word_pattern.is_none()
            && self.folding.is_none()
            && self.indentation_rules.is_none()
            && self.other.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_shorthand_and_record_both_parse() {
        let pairs: Vec<PairEntry> =
            serde_json::from_str(r#"[["(", ")"], {"open": "\"", "close": "\"", "notIn": ["string"]}]"#)
                .expect("parses");
        assert_eq!(pairs[0], PairEntry::Shorthand(("(".into(), ")".into())));
        let record = pairs[1].clone().into_record();
        assert_eq!(record.open, "\"");
        assert_eq!(record.not_in, Some(vec!["string".to_string()]));
    }

    #[test]
    fn empty_object_is_empty() {
        let raw: RawLanguageConfig = serde_json::from_str("{}").expect("parses");
        assert!(raw.is_empty());
    }

    #[test]
    fn unknown_keys_are_kept() {
        let raw: RawLanguageConfig = serde_json::from_str(r#"{"autoCloseBefore": ";:.,=}])> \n\t"}"#).expect("parses");
        assert!(!raw.is_empty());
        assert!(raw.other.contains_key("autoCloseBefore"));
    }

    #[test]
    fn null_line_comment_is_absent() {
        let raw: RawLanguageConfig =
            serde_json::from_str(r#"{"comments": {"lineComment": null, "blockComment": ["<!--", "-->"]}}"#)
                .expect("parses");
        let comments = raw.comments.expect("comments");
        assert!(comments.line_comment.is_none());
        assert_eq!(comments.block_comment, Some(("<!--".into(), "-->".into())));
    }
}
