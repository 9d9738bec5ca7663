//! Source files and offset/position conversion.

use crate::syntax::Node;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Zero-based line and character within a source text.
///
/// `character` counts Unicode scalar values from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: usize,
    /// Character within the line (0-indexed).
    pub character: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    /// Human form, 1-indexed: `(line,character)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.line + 1, self.character + 1)
    }
}

/// A tree and its source text disagree.
///
/// Raised while converting between offsets and positions. It always
/// indicates an upstream contract violation and is never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTreeError {
    /// Offset lies past the end of the text.
    #[error("offset {offset} is out of bounds for source text of length {len}")]
    OffsetOutOfBounds {
        /// Offending offset.
        offset: usize,
        /// Length of the text in bytes.
        len: usize,
    },

    /// Offset falls inside a multi-byte character.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary {
        /// Offending offset.
        offset: usize,
    },

    /// Position does not exist in the text.
    #[error("position {line}:{character} is out of bounds")]
    PositionOutOfBounds {
        /// Line (0-indexed).
        line: usize,
        /// Character (0-indexed).
        character: usize,
    },
}

/// Line-start table over a source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Builds the index. Recognized line breaks are `\n`, `\r\n`, a lone
    /// `\r`, U+2028 and U+2029.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = text.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\r' => {
                    if let Some(&(j, '\n')) = chars.peek() {
                        chars.next();
                        line_starts.push(j + 1);
                    } else {
                        line_starts.push(i + 1);
                    }
                }
                '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(i + ch.len_utf8()),
                _ => {}
            }
        }
        Self { text, line_starts }
    }

    /// The indexed text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of lines (always at least one).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into a line/character position.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError`] if the offset is past the end of the
    /// text or splits a character.
    pub fn position_of(&self, offset: usize) -> Result<Position, MalformedTreeError> {
        if offset > self.text.len() {
            return Err(MalformedTreeError::OffsetOutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(MalformedTreeError::NotCharBoundary { offset });
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let character = self.text[self.line_starts[line]..offset].chars().count();
        Ok(Position { line, character })
    }

    /// Converts a line/character position back into a byte offset.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError::PositionOutOfBounds`] if the line does
    /// not exist or the character runs past the end of that line.
    pub fn offset_of(&self, position: Position) -> Result<usize, MalformedTreeError> {
        let out_of_bounds = MalformedTreeError::PositionOutOfBounds {
            line: position.line,
            character: position.character,
        };
        let Some(&start) = self.line_starts.get(position.line) else {
            return Err(out_of_bounds);
        };
        let end = self
            .line_starts
            .get(position.line + 1)
            .copied()
            .unwrap_or(self.text.len());
        let line_text = &self.text[start..end];
        if position.character == 0 {
            return Ok(start);
        }
        match line_text.char_indices().nth(position.character) {
            Some((i, _)) => Ok(start + i),
            None if line_text.chars().count() == position.character => Ok(end),
            None => Err(out_of_bounds),
        }
    }
}

/// A parsed source file: name, text, and the tree built from it.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name used when rendering diagnostics.
    pub name: String,
    /// Original source text.
    pub text: String,
    /// Root of the syntax tree.
    pub root: Node,
}

impl SourceFile {
    /// Creates a new source file.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>, root: Node) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            root,
        }
    }

    /// Builds a line index over this file's text.
    #[must_use]
    pub fn line_index(&self) -> LineIndex<'_> {
        LineIndex::new(&self.text)
    }
}
