mod node;

use node::Node;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;
use thiserror::Error;

/// An editable text buffer backed by an unbalanced binary split tree.
///
/// All offsets are 0-based character offsets into the current text and all
/// ranges are half-open (`start..end`, `end` exclusive). Structural
/// operations are purely functional over subtrees: split and concat build
/// new internal nodes while reusing untouched subtrees, and every mutating
/// entry point replaces the root atomically. Validation happens before any
/// rebuild, so a failed operation leaves the buffer unchanged.
///
/// The tree is never rebalanced; `split` is O(depth), and pathological edit
/// patterns can degrade depth toward the number of edits.
#[derive(Debug)]
pub struct Rope {
    root: Rc<Node>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RopeError {
    #[error("index {index} out of bounds for rope of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("invalid range {start}..{end} for rope of length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}

impl Rope {
    /// An empty buffer.
    pub fn new() -> Self {
        Rope { root: Node::empty() }
    }

    /// Total character count.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Character at `index`. Unlike insertion points, `index == len` is not
    /// a valid character position.
    pub fn char_at(&self, index: usize) -> Result<char, RopeError> {
        let len = self.len();
        if index >= len {
            return Err(RopeError::IndexOutOfBounds { index, len });
        }
        Ok(self.root.char_at(index))
    }

    /// Insert `text` at character offset `index` (0 ≤ index ≤ len).
    /// Inserting the empty string is a no-op.
    pub fn insert(&mut self, index: usize, text: &str) -> Result<(), RopeError> {
        let len = self.len();
        if index > len {
            return Err(RopeError::IndexOutOfBounds { index, len });
        }
        if text.is_empty() {
            return Ok(());
        }
        let (left, right) = Node::split(&self.root, index);
        self.root = Node::concat(left, Node::concat(Node::leaf(text), right));
        Ok(())
    }

    /// Delete the half-open character range. A zero-length range is a no-op.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), RopeError> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }
        let (left, remainder) = Node::split(&self.root, range.start);
        let (_, right) = Node::split(&remainder, range.end - range.start);
        self.root = Node::concat(left, right);
        Ok(())
    }

    /// A new, independently owned rope holding exactly the characters in the
    /// half-open range. The source is not mutated; immutable subtrees may be
    /// shared between the two ropes.
    pub fn substring(&self, range: Range<usize>) -> Result<Rope, RopeError> {
        self.check_range(&range)?;
        let (_, remainder) = Node::split(&self.root, range.start);
        let (middle, _) = Node::split(&remainder, range.end - range.start);
        Ok(Rope { root: middle })
    }

    /// Split into two ropes at character offset `index`; concatenating the
    /// results reproduces the original text. The source is not mutated.
    pub fn split(&self, index: usize) -> Result<(Rope, Rope), RopeError> {
        let len = self.len();
        if index > len {
            return Err(RopeError::IndexOutOfBounds { index, len });
        }
        let (left, right) = Node::split(&self.root, index);
        Ok((Rope { root: left }, Rope { root: right }))
    }

    /// Append `other` to the end of this rope. O(1): one new internal node.
    pub fn concat(&mut self, other: Rope) {
        self.root = Node::concat(Rc::clone(&self.root), other.root);
    }

    /// Append `text` to the end of the buffer. Empty text is a no-op.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.is_empty() {
            self.root = Node::leaf(text);
        } else {
            self.root = Node::concat(Rc::clone(&self.root), Node::leaf(text));
        }
    }

    /// Remove the last character. No-op on an empty buffer.
    pub fn backspace(&mut self) {
        let len = self.len();
        if len > 0 {
            let (left, _) = Node::split(&self.root, len - 1);
            self.root = left;
        }
    }

    /// Remove the character immediately before `cursor`. No-op when the
    /// buffer is empty or the cursor sits at the start.
    pub fn backspace_at(&mut self, cursor: usize) -> Result<(), RopeError> {
        let len = self.len();
        if cursor > len {
            return Err(RopeError::IndexOutOfBounds { index: cursor, len });
        }
        if cursor == 0 || len == 0 {
            return Ok(());
        }
        self.delete(cursor - 1..cursor)
    }

    /// Last character of the buffer, if any. Never mutates.
    pub fn peek_last_char(&self) -> Option<char> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        Some(self.root.char_at(len - 1))
    }

    /// Character immediately before `cursor`, `None` at the buffer start.
    pub fn peek_char_before(&self, cursor: usize) -> Result<Option<char>, RopeError> {
        let len = self.len();
        if cursor > len {
            return Err(RopeError::IndexOutOfBounds { index: cursor, len });
        }
        if cursor == 0 {
            return Ok(None);
        }
        Ok(Some(self.root.char_at(cursor - 1)))
    }

    /// Walk backward from the end of the buffer, accumulating characters
    /// until a space, a newline, or the buffer start. Never mutates.
    pub fn peek_last_word(&self) -> String {
        self.scan_word_back(self.len())
    }

    /// Same backward walk, starting just before `cursor`.
    pub fn peek_word_before(&self, cursor: usize) -> Result<String, RopeError> {
        let len = self.len();
        if cursor > len {
            return Err(RopeError::IndexOutOfBounds { index: cursor, len });
        }
        Ok(self.scan_word_back(cursor))
    }

    fn scan_word_back(&self, end: usize) -> String {
        let mut chars: Vec<char> = Vec::new();
        for index in (0..end).rev() {
            let c = self.root.char_at(index);
            if c == ' ' || c == '\n' {
                break;
            }
            chars.push(c);
        }
        chars.iter().rev().collect()
    }

    /// Materialize the full text by concatenating all leaves in order.
    pub fn collect_leaves(&self) -> String {
        let mut buf = String::with_capacity(self.len());
        self.root.write_to(&mut buf);
        buf
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), RopeError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(RopeError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(())
    }
}

impl Default for Rope {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Rope {
    fn from(text: &str) -> Self {
        Rope { root: Node::leaf(text) }
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.collect_leaves())
    }
}
