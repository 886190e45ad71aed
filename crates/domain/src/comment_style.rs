//! Single-line comment styles and their refinements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three single-line comment conventions this system continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SingleLineStyle {
    #[serde(rename = "//")]
    Slash,
    #[serde(rename = "#")]
    Hash,
    #[serde(rename = ";")]
    Semicolon,
}

impl SingleLineStyle {
    pub const ALL: [Self; 3] = [Self::Slash, Self::Hash, Self::Semicolon];

    pub fn token(self) -> &'static str {
        match self {
            Self::Slash => "//",
            Self::Hash => "#",
            Self::Semicolon => ";",
        }
    }

    /// Classify a native `lineComment` token.
    ///
    /// `//` and `#` must match exactly; anything containing `;` covers both the
    /// `; ` and `;;` conventions. Everything else (`--`, `@rem`, `%`) is
    /// unsupported.
    pub fn from_line_comment(token: &str) -> Option<Self> {
        match token {
            "//" => Some(Self::Slash),
            "#" => Some(Self::Hash),
            t if t.contains(';') => Some(Self::Semicolon),
            _ => None,
        }
    }

    /// The character whose first occurrence ends the indentation prefix.
    pub fn delimiter(self) -> char {
        match self {
            Self::Slash => '/',
            Self::Hash => '#',
            Self::Semicolon => ';',
        }
    }
}

impl fmt::Display for SingleLineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The concrete token written at the start of a continued line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentToken {
    Slash,
    TripleSlash,
    SlashBang,
    Hash,
    DoubleHash,
    Semicolon,
    DoubleSemicolon,
}

impl CommentToken {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slash => "//",
            Self::TripleSlash => "///",
            Self::SlashBang => "//!",
            Self::Hash => "#",
            Self::DoubleHash => "##",
            Self::Semicolon => ";",
            Self::DoubleSemicolon => ";;",
        }
    }
}

impl From<SingleLineStyle> for CommentToken {
    fn from(style: SingleLineStyle) -> Self {
        match style {
            SingleLineStyle::Slash => Self::Slash,
            SingleLineStyle::Hash => Self::Hash,
            SingleLineStyle::Semicolon => Self::Semicolon,
        }
    }
}

impl fmt::Display for CommentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
