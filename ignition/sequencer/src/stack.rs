//! Bounded LIFO of pending commands

use heapless::Vec;
use ignition_core::{Command, IgnitionError, IgnitionResult};

/// Default number of pending commands
pub const STACK_CAPACITY: usize = 8;

/// Fixed-capacity command stack
///
/// The most recently pushed command is serviced first. An empty stack
/// reports [`Command::None`] as its current command.
#[derive(Debug, Clone)]
pub struct CommandStack<const N: usize = STACK_CAPACITY> {
    entries: Vec<Command, N>,
}

impl<const N: usize> CommandStack<N> {
    /// Create an empty stack
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Place `command` on top; it becomes the current command
    ///
    /// Fails with [`IgnitionError::CommandDropped`] when full, leaving the
    /// stack untouched.
    pub fn push(&mut self, command: Command) -> IgnitionResult<()> {
        self.entries
            .push(command)
            .map_err(|_| IgnitionError::CommandDropped)
    }

    /// Remove and return the top command
    pub fn pop(&mut self) -> Option<Command> {
        self.entries.pop()
    }

    /// Top of the stack, or [`Command::None`] when empty
    pub fn current(&self) -> Command {
        self.entries.last().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop every pending command
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<const N: usize> Default for CommandStack<N> {
    fn default() -> Self {
        Self::new()
    }
}
