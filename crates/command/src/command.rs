mod manager;

pub use manager::CommandManager;

use rope::{Rope, RopeError};
use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;
use thiserror::Error;

/// The rope as shared by commands and their caller. Single-threaded by
/// design; a session owns the buffer exclusively.
pub type SharedRope = Rc<RefCell<Rope>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Rope(#[from] RopeError),
    #[error("command has not been executed yet")]
    NotExecuted,
}

/// A reversible edit against a shared rope. Each command performs exactly
/// one edit and knows how to reverse it; sequencing is the
/// [`CommandManager`]'s job, not the command's.
pub trait Command {
    fn execute(&mut self) -> Result<(), CommandError>;
    fn undo(&mut self) -> Result<(), CommandError>;
}

/// Inserts `text` at a character offset; undo deletes the inserted range.
pub struct InsertCommand {
    rope: SharedRope,
    text: String,
    position: usize,
}

impl InsertCommand {
    pub fn new(rope: SharedRope, text: impl Into<String>, position: usize) -> Self {
        InsertCommand {
            rope,
            text: text.into(),
            position,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Command for InsertCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        self.rope.borrow_mut().insert(self.position, &self.text)?;
        Ok(())
    }

    fn undo(&mut self) -> Result<(), CommandError> {
        let end = self.position + self.text.chars().count();
        self.rope.borrow_mut().delete(self.position..end)?;
        Ok(())
    }
}

/// Deletes a half-open character range; the removed text is captured on
/// execute so undo can re-insert it at the original position.
pub struct DeleteCommand {
    rope: SharedRope,
    range: Range<usize>,
    /// `None` until the first execute: the Created → Executed state flag.
    deleted: Option<String>,
}

impl DeleteCommand {
    pub fn new(rope: SharedRope, range: Range<usize>) -> Self {
        DeleteCommand {
            rope,
            range,
            deleted: None,
        }
    }

    /// The text removed by the last execute, if any.
    pub fn deleted_text(&self) -> Option<&str> {
        self.deleted.as_deref()
    }
}

impl Command for DeleteCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        let mut rope = self.rope.borrow_mut();
        // Capture before deleting so a failed delete leaves no stale state.
        let deleted = rope.substring(self.range.clone())?.to_string();
        rope.delete(self.range.clone())?;
        self.deleted = Some(deleted);
        Ok(())
    }

    fn undo(&mut self) -> Result<(), CommandError> {
        let deleted = self.deleted.as_ref().ok_or(CommandError::NotExecuted)?;
        self.rope.borrow_mut().insert(self.range.start, deleted)?;
        Ok(())
    }
}
