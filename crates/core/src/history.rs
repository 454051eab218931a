//! Append-only action history.

use crate::models::{GameAction, Money};

/// Number of entries shown by [`EventLog::recent`] unless configured otherwise.
pub const DEFAULT_WINDOW: usize = 10;

/// Ordered record of every mutating action of a run.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: Vec<GameAction>,
    window: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl EventLog {
    /// Empty log whose recent view shows `window` entries.
    pub fn new(window: usize) -> Self {
        Self {
            entries: Vec::new(),
            window,
        }
    }

    /// Append an action stamped now.
    pub fn record(&mut self, description: impl Into<String>, amount: Money) {
        self.entries.push(GameAction::now(description, amount));
    }

    /// Every entry in insertion order.
    pub fn entries(&self) -> &[GameAction] {
        &self.entries
    }

    /// The latest entries, oldest first.
    pub fn recent(&self) -> &[GameAction] {
        let start = self.entries.len().saturating_sub(self.window);
        &self.entries[start..]
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
