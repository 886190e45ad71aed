use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;

/// An `(open, close)` delimiter pair, serialized as a two element array.
pub type CharacterPair = (String, String);

/// The line comment token, either bare or with its placement options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineComment {
    Token(String),
    Config {
        comment: String,
        #[serde(rename = "noIndent", default, skip_serializing_if = "Option::is_none")]
        no_indent: Option<bool>,
    },
}

impl LineComment {
    pub fn token(&self) -> &str {
        match self {
            Self::Token(token) => token,
            Self::Config { comment, .. } => comment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_comment: Option<LineComment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_comment: Option<CharacterPair>,
}

impl CommentRule {
    pub fn block(open: &str, close: &str) -> Self {
        Self { line_comment: None, block_comment: Some((open.to_string(), close.to_string())) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoClosingPair {
    pub open: String,
    pub close: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_in: Option<Vec<String>>,
}

impl AutoClosingPair {
    pub fn new(open: &str, close: &str) -> Self {
        Self { open: open.to_string(), close: close.to_string(), not_in: None }
    }

    pub fn not_in(mut self, scopes: &[&str]) -> Self {
        self.not_in = Some(scopes.iter().map(|s| (*s).to_string()).collect());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndentAction {
    #[default]
    None,
    Indent,
    IndentOutdent,
    Outdent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterAction {
    /// `indent` in configuration files, `indentAction` in the host API.
    #[serde(alias = "indent", default)]
    pub indent_action: IndentAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_text: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnEnterRule {
    pub before_text: Pattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_text: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_line_text: Option<Pattern>,
    pub action: EnterAction,
}

impl OnEnterRule {
    /// Merge key: the trigger pattern's source text.
    pub fn trigger(&self) -> &str {
        self.before_text.source()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoldingMarkers {
    pub start: Pattern,
    pub end: Pattern,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldingRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_side: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<FoldingMarkers>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndentationRules {
    pub increase_indent_pattern: Pattern,
    pub decrease_indent_pattern: Pattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_next_line_pattern: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub un_indented_line_pattern: Option<Pattern>,
}

/// A normalized language configuration: every pattern is live and every pair
/// is an `{open, close}` record. This is the object handed to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<CommentRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brackets: Option<Vec<CharacterPair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_closing_pairs: Option<Vec<AutoClosingPair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surrounding_pairs: Option<Vec<AutoClosingPair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_enter_rules: Option<Vec<OnEnterRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_pattern: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folding: Option<FoldingRules>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indentation_rules: Option<IndentationRules>,
    /// Keys this system does not interpret, carried through untouched.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl LanguageConfiguration {
    pub fn line_comment(&self) -> Option<&str> {
        self.comments.as_ref()?.line_comment.as_ref().map(LineComment::token)
    }

    pub fn block_comment(&self) -> Option<&CharacterPair> {
        self.comments.as_ref()?.block_comment.as_ref()
    }

    /// A configuration carrying nothing but a block-comment pair.
    pub fn with_block_comment(pair: CharacterPair) -> Self {
        Self {
            comments: Some(CommentRule { line_comment: None, block_comment: Some(pair) }),
            ..Self::default()
        }
    }
}
