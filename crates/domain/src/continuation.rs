//! Single-line comment continuation.
//!
//! Given the current line and its resolved style, decide what to insert at
//! the cursor. The engine only reads; style resolution happens against the
//! registries before it is called.

use comment_blocks_shared_kernel::DomainResult;

use crate::{
    comment_style::{CommentToken, SingleLineStyle},
    pattern::Pattern,
};

/// How the continuation command was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Bound to Enter itself.
    EnterKey,
    /// The dedicated keybinding.
    Keybinding,
}

/// Text to insert at the cursor and the token it continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    pub token: CommentToken,
}

#[derive(Debug, Clone)]
struct StylePatterns {
    base: Pattern,
    refinements: Vec<(Pattern, CommentToken)>,
}

impl StylePatterns {
    fn compile(base: &str, refinements: &[(&str, CommentToken)]) -> DomainResult<Self> {
        Ok(Self {
            base: Pattern::new(base)?,
            refinements: refinements
                .iter()
                .map(|(source, token)| Ok((Pattern::new(source)?, *token)))
                .collect::<DomainResult<_>>()?,
        })
    }

    fn token_for(&self, style: SingleLineStyle, line: &str) -> Option<CommentToken> {
        if !self.base.is_match(line) {
            return None;
        }
        let refined = self.refinements.iter().find(|(pattern, _)| pattern.is_match(line)).map(|(_, token)| *token);
        Some(refined.unwrap_or_else(|| CommentToken::from(style)))
    }
}

#[derive(Debug, Clone)]
pub struct ContinuationEngine {
    slash: StylePatterns,
    hash: StylePatterns,
    semicolon: StylePatterns,
}

impl ContinuationEngine {
    pub fn new() -> DomainResult<Self> {
        Ok(Self {
            slash: StylePatterns::compile(
                r"^\s*//",
                &[(r"^\s*///", CommentToken::TripleSlash), (r"^\s*//!", CommentToken::SlashBang)],
            )?,
            hash: StylePatterns::compile(r"^\s*#", &[(r"^\s*##", CommentToken::DoubleHash)])?,
            // `;;` lines must reach the refinement, so the base stays open.
            semicolon: StylePatterns::compile(r"^\s*;", &[(r"^\s*;;", CommentToken::DoubleSemicolon)])?,
        })
    }

    fn patterns(&self, style: SingleLineStyle) -> &StylePatterns {
        match style {
            SingleLineStyle::Slash => &self.slash,
            SingleLineStyle::Hash => &self.hash,
            SingleLineStyle::Semicolon => &self.semicolon,
        }
    }

    /// The token a comment line continues with, or `None` for a non-comment line.
    pub fn token_for(&self, style: SingleLineStyle, line: &str) -> Option<CommentToken> {
        self.patterns(style).token_for(style, line)
    }

    /// Decide the insertion for `line`.
    ///
    /// With `on_enter` set the installed enter-rules supply the token, so an
    /// Enter invocation inserts nothing and the keybinding only breaks the
    /// line and keeps the indentation.
    pub fn continue_line(
        &self,
        style: SingleLineStyle,
        line: &str,
        on_enter: bool,
        invocation: Invocation,
    ) -> Option<Insertion> {
        let token = self.token_for(style, line)?;
        if on_enter && invocation == Invocation::EnterKey {
            return None;
        }

        let mut text = String::from("\n");
        text.push_str(indentation(line, style.delimiter()));
        if !on_enter {
            text.push_str(token.as_str());
            text.push(' ');
        }
        Some(Insertion { text, token })
    }
}

/// Everything before the first occurrence of `delimiter`.
fn indentation(line: &str, delimiter: char) -> &str {
    line.find(delimiter).map_or("", |index| &line[..index])
}
