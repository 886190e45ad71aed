//! Declarative enter-rule tables and the generic multi-line defaults.

use comment_blocks_shared_kernel::DomainResult;

use crate::{
    comment_style::SingleLineStyle,
    language::{AutoClosingPair, CommentRule, EnterAction, IndentAction, OnEnterRule},
    pattern::Pattern,
};

/// One row of a rule table, compiled into an [`OnEnterRule`] by [`compile`].
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub before: &'static str,
    pub after: Option<&'static str>,
    pub indent: IndentAction,
    pub append: Option<&'static str>,
    pub remove: Option<usize>,
}

const fn append(before: &'static str, after: Option<&'static str>, indent: IndentAction, text: &'static str) -> RuleSpec {
    RuleSpec { before, after, indent, append: Some(text), remove: None }
}

const fn remove(before: &'static str, count: usize) -> RuleSpec {
    RuleSpec { before, after: None, indent: IndentAction::None, append: None, remove: Some(count) }
}

const CLOSE_STAR: Option<&str> = Some(r"^\s*\*/$");
const CLOSE_BLADE: Option<&str> = Some(r"^\s*--\}\}$");

/// Doc-comment style blocks: `/* */`, `/** */`, `/*! */` and Blade `{{-- --}}`.
pub const MULTI_LINE_ENTER_RULES: &[RuleSpec] = &[
    // /* | */
    append(r"^\s*/\*(?!/)([^\*!]|\*(?!/))*$", CLOSE_STAR, IndentAction::IndentOutdent, " * "),
    // /** | */
    append(r"^\s*/\*\*(?!/)([^\*!]|\*(?!/))*$", CLOSE_STAR, IndentAction::IndentOutdent, " * "),
    // /**  |
    append(r"^\s*/\*\*(?!/)([^\*]|\*(?!/))*$", None, IndentAction::None, " * "),
    //  *  |
    append(r"^(\t|( ))* \*( ([^\*]|\*(?!/))*)?$", None, IndentAction::None, "* "),
    //  */|
    remove(r"^(\t|( ))* \*/\s*$", 1),
    //  *   */|
    remove(r"^(\t|( ))* \*[^/]*\*/\s*$", 1),
    // /*! | */
    append(r"^\s*/\*!(?!/)([^\*]|\*(?!/))*$", CLOSE_STAR, IndentAction::IndentOutdent, " *! "),
    // /*!  |
    append(r"^\s*/\*!(?!/)([^\*]|\*(?!/))*$", None, IndentAction::None, " *! "),
    //  *!  |
    append(r"^(\t|( ))* \*!( ([^\*]|\*(?!/))*)?$", None, IndentAction::None, "*! "),
    // /*  |
    append(r"^\s*/\*(?!/)([^\*]|\*(?!/))*$", None, IndentAction::None, " * "),
    // {{-- | --}}
    append(r"^\s*\{\{--(?!/)([^\-\}]|\*(?!\}))*$", CLOSE_BLADE, IndentAction::IndentOutdent, "  - "),
    // {{--  |
    append(r"^\s*\{\{--(?!/)([^\-\}]|\*(?!/))*$", None, IndentAction::None, "  - "),
    //  -  |
    append(r"^(\t|( ))* -( ([^\-]|-(?!-))*)?$", None, IndentAction::None, "- "),
];

pub const SLASH_ENTER_RULES: &[RuleSpec] = &[
    append(r"^\s*//(?!/|!)", None, IndentAction::None, "// "),
    append(r"^\s*///", None, IndentAction::None, "/// "),
    append(r"^\s*//!", None, IndentAction::None, "//! "),
];

pub const HASH_ENTER_RULES: &[RuleSpec] = &[
    append(r"^\s*#(?!#)", None, IndentAction::None, "# "),
    append(r"^\s*##", None, IndentAction::None, "## "),
];

pub const SEMICOLON_ENTER_RULES: &[RuleSpec] = &[
    append(r"^\s*;(?!;)", None, IndentAction::None, "; "),
    append(r"^\s*;;", None, IndentAction::None, ";; "),
];

pub fn compile(specs: &[RuleSpec]) -> DomainResult<Vec<OnEnterRule>> {
    specs
        .iter()
        .map(|spec| {
            Ok(OnEnterRule {
                before_text: Pattern::new(spec.before)?,
                after_text: spec.after.map(Pattern::new).transpose()?,
                previous_line_text: None,
                action: EnterAction {
                    indent_action: spec.indent,
                    append_text: spec.append.map(str::to_string),
                    remove_text: spec.remove,
                },
            })
        })
        .collect()
}

/// The generic multi-line configuration languages fall back to.
pub fn default_multi_line_pairs() -> Vec<AutoClosingPair> {
    vec![
        AutoClosingPair::new("/**", " */").not_in(&["string"]),
        AutoClosingPair::new("{", "}"),
        AutoClosingPair::new("[", "]"),
        AutoClosingPair::new("(", ")"),
        AutoClosingPair::new("'", "'").not_in(&["string", "comment"]),
        AutoClosingPair::new("\"", "\"").not_in(&["string"]),
        AutoClosingPair::new("`", "`").not_in(&["string", "comment"]),
    ]
}

pub fn default_multi_line_comments() -> CommentRule {
    CommentRule::block("/*", "*/")
}

/// Every table compiled once per configuration build.
#[derive(Debug, Clone)]
pub struct DefaultRules {
    pub multi_line: Vec<OnEnterRule>,
    pub slash: Vec<OnEnterRule>,
    pub hash: Vec<OnEnterRule>,
    pub semicolon: Vec<OnEnterRule>,
    pub pairs: Vec<AutoClosingPair>,
    pub comments: CommentRule,
}

impl DefaultRules {
    pub fn compile() -> DomainResult<Self> {
        Ok(Self {
            multi_line: compile(MULTI_LINE_ENTER_RULES)?,
            slash: compile(SLASH_ENTER_RULES)?,
            hash: compile(HASH_ENTER_RULES)?,
            semicolon: compile(SEMICOLON_ENTER_RULES)?,
            pairs: default_multi_line_pairs(),
            comments: default_multi_line_comments(),
        })
    }

    pub fn style_rules(&self, style: SingleLineStyle) -> &[OnEnterRule] {
        match style {
            SingleLineStyle::Slash => &self.slash,
            SingleLineStyle::Hash => &self.hash,
            SingleLineStyle::Semicolon => &self.semicolon,
        }
    }
}
