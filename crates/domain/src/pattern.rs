use std::{borrow::Cow, fmt};

use comment_blocks_shared_kernel::{DomainError, DomainResult};
use fancy_regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

/// A compiled, live pattern.
///
/// Equality compares the source text, which is also what the merge engine
/// keys enter-rules on.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source`, first dropping JavaScript-only escapes.
    pub fn new(source: &str) -> DomainResult<Self> {
        let source = strip_superfluous_escapes(source).into_owned();
        let regex = Regex::new(&source).map_err(|err| DomainError::InvalidPattern {
            pattern: source.clone(),
            details: err.to_string(),
            source: Some(Box::new(err)),
        })?;
        Ok(Self { source, regex })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Backtracking limits count as a non-match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text).unwrap_or(false)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern(/{}/)", self.source)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// A pattern-bearing field as it may appear in declarative sources.
///
/// JSON can only carry the first two shapes; `Live` is what the rule tables
/// and already-normalized configurations hold.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatternField {
    Source(String),
    Wrapped {
        pattern: String,
        #[serde(default)]
        flags: Option<String>,
    },
    #[serde(skip_deserializing)]
    Live(Pattern),
}

impl PatternField {
    /// Collapse any shape into a live [`Pattern`].
    pub fn repair(self) -> DomainResult<Pattern> {
        match self {
            Self::Source(source) => Pattern::new(&source),
            Self::Wrapped { pattern, flags } => {
                if let Some(flags) = flags.filter(|f| !f.is_empty()) {
                    debug!(pattern = %pattern, flags = %flags, "ignoring pattern flags");
                }
                Pattern::new(&pattern)
            }
            Self::Live(pattern) => Ok(pattern),
        }
    }
}

impl From<Pattern> for PatternField {
    fn from(pattern: Pattern) -> Self {
        Self::Live(pattern)
    }
}

/// Characters a JavaScript source may escape that the Rust engine either
/// rejects as an escape or reads differently (`\<` is a word boundary there).
fn is_superfluous_escape(c: char) -> bool {
    matches!(c, '/' | '!' | ' ' | '\'' | '"' | '@' | '%' | ',' | ':' | ';' | '=' | '`' | '<' | '>')
}

fn strip_superfluous_escapes(source: &str) -> Cow<'_, str> {
    if !source.contains('\\') {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if is_superfluous_escape(next) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
