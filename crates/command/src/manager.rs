use crate::{Command, CommandError};

/// Sequences reversible edits and keeps the undo/redo history.
///
/// Two LIFO stacks: executing pushes onto the undo stack and clears the redo
/// stack (a new edit invalidates any undone future — no branching timeline).
/// Undo moves a command to the redo stack, redo moves it back. When a
/// command fails, both stacks are left exactly as they were before the call.
#[derive(Default)]
pub struct CommandManager {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Execute `command` and record it for undo. On failure the command is
    /// dropped without being recorded.
    pub fn execute(&mut self, mut command: Box<dyn Command>) -> Result<(), CommandError> {
        command.execute()?;
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the most recent edit. `Ok(false)` means there was nothing to
    /// undo. A failing undo puts the command back on the undo stack.
    pub fn undo(&mut self) -> Result<bool, CommandError> {
        let Some(mut command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        match command.undo() {
            Ok(()) => {
                self.redo_stack.push(command);
                Ok(true)
            }
            Err(err) => {
                self.undo_stack.push(command);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone edit. `Ok(false)` means there was
    /// nothing to redo. A failing redo puts the command back on the redo
    /// stack.
    pub fn redo(&mut self) -> Result<bool, CommandError> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        match command.execute() {
            Ok(()) => {
                self.undo_stack.push(command);
                Ok(true)
            }
            Err(err) => {
                self.redo_stack.push(command);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeleteCommand, InsertCommand, SharedRope};
    use rope::Rope;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn shared(text: &str) -> SharedRope {
        Rc::new(RefCell::new(Rope::from(text)))
    }

    #[test]
    fn execute_then_undo_restores_text() {
        let rope = shared("Hello");
        let mut manager = CommandManager::new();

        manager
            .execute(Box::new(InsertCommand::new(Rc::clone(&rope), "X", 0)))
            .unwrap();
        assert_eq!(rope.borrow().to_string(), "XHello");

        assert_eq!(manager.undo(), Ok(true));
        assert_eq!(rope.borrow().to_string(), "Hello");
    }

    #[test]
    fn undo_redo_symmetry_over_a_sequence() {
        let rope = shared("Hello");
        let mut manager = CommandManager::new();

        manager
            .execute(Box::new(InsertCommand::new(Rc::clone(&rope), " World", 5)))
            .unwrap();
        manager
            .execute(Box::new(DeleteCommand::new(Rc::clone(&rope), 0..5)))
            .unwrap();
        manager
            .execute(Box::new(InsertCommand::new(Rc::clone(&rope), "!", 6)))
            .unwrap();
        let after = rope.borrow().to_string();
        assert_eq!(after, " World!");

        for _ in 0..3 {
            assert_eq!(manager.undo(), Ok(true));
        }
        assert_eq!(rope.borrow().to_string(), "Hello");
        // Nothing left to undo: sentinel, not an error.
        assert_eq!(manager.undo(), Ok(false));

        for _ in 0..3 {
            assert_eq!(manager.redo(), Ok(true));
        }
        assert_eq!(rope.borrow().to_string(), after);
        assert_eq!(manager.redo(), Ok(false));
    }

    #[test]
    fn new_edit_invalidates_redo() {
        let rope = shared("abc");
        let mut manager = CommandManager::new();

        manager
            .execute(Box::new(InsertCommand::new(Rc::clone(&rope), "1", 3)))
            .unwrap();
        assert_eq!(manager.undo(), Ok(true));
        assert!(manager.can_redo());

        manager
            .execute(Box::new(InsertCommand::new(Rc::clone(&rope), "2", 3)))
            .unwrap();
        assert!(!manager.can_redo());
        assert_eq!(manager.redo(), Ok(false));
        assert_eq!(rope.borrow().to_string(), "abc2");
    }

    #[test]
    fn failed_execute_leaves_stacks_untouched() {
        let rope = shared("Hi");
        let mut manager = CommandManager::new();

        manager
            .execute(Box::new(InsertCommand::new(Rc::clone(&rope), "a", 0)))
            .unwrap();
        assert_eq!(manager.undo(), Ok(true));
        assert!(manager.can_redo());

        // Out of bounds: must fail without recording and without clearing
        // the redo stack.
        assert!(
            manager
                .execute(Box::new(InsertCommand::new(Rc::clone(&rope), "x", 99)))
                .is_err()
        );
        assert!(!manager.can_undo());
        assert!(manager.can_redo());
        assert_eq!(rope.borrow().to_string(), "Hi");
    }

    #[test]
    fn interleaved_undo_redo() {
        let rope = shared("");
        let mut manager = CommandManager::new();

        manager
            .execute(Box::new(InsertCommand::new(Rc::clone(&rope), "abc", 0)))
            .unwrap();
        manager
            .execute(Box::new(DeleteCommand::new(Rc::clone(&rope), 1..2)))
            .unwrap();
        assert_eq!(rope.borrow().to_string(), "ac");

        assert_eq!(manager.undo(), Ok(true));
        assert_eq!(rope.borrow().to_string(), "abc");
        assert_eq!(manager.redo(), Ok(true));
        assert_eq!(rope.borrow().to_string(), "ac");
        assert_eq!(manager.undo(), Ok(true));
        assert_eq!(manager.undo(), Ok(true));
        assert_eq!(rope.borrow().to_string(), "");
    }
}
