// crates/ports/src/editor.rs
use comment_blocks_shared_kernel::{LanguageId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn cursor(at: Position) -> Self {
        Self { anchor: at, active: at }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }
}

/// Port for the active text editor.
pub trait TextEditor {
    fn language_id(&self) -> LanguageId;
    fn selections(&self) -> Vec<Selection>;
    fn line_text(&self, line: usize) -> Option<String>;
    fn insert(&mut self, at: Position, text: &str) -> Result<()>;

    /// The cursor position when there is exactly one collapsed selection.
    fn collapsed_cursor(&self) -> Option<Position> {
        match self.selections().as_slice() {
            [only] if only.is_empty() => Some(only.active),
            _ => None,
        }
    }
}
