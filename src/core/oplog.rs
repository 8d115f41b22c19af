use std::collections::VecDeque;

use thiserror::Error;
use tracing::trace;

use crate::op::LogEntry;

/// Failure raised by an operation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LogError {
    /// Nothing has been recorded.
    #[error("operation log is empty")]
    Empty,
}

/// Last-in-first-out history of recorded entries.
///
/// The back of the deque is the top of the stack. A bounded log drops from
/// the front so recording stays O(1).
#[derive(Debug, Clone)]
pub struct OperationLog<E> {
    entries: VecDeque<E>,
    max_depth: Option<usize>,
}

impl<E> Default for OperationLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> OperationLog<E> {
    /// Creates an unbounded log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            max_depth: None,
        }
    }

    /// Creates a log keeping at most `depth` entries.
    ///
    /// A depth of zero retains nothing: every `record` is discarded.
    pub fn with_max_depth(depth: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(depth.min(1024)),
            max_depth: Some(depth),
        }
    }

    /// Pushes `entry` on top, evicting the oldest entry when full.
    pub fn record(&mut self, entry: E) {
        if let Some(max) = self.max_depth {
            if max == 0 {
                trace!("operation log has zero depth, entry discarded");
                return;
            }
            if self.entries.len() == max {
                self.entries.pop_front();
                trace!(max, "operation log full, dropped oldest entry");
            }
        }
        self.entries.push_back(entry);
    }

    /// Removes and returns the most recent entry.
    pub fn take_last(&mut self) -> Result<E, LogError> {
        self.entries.pop_back().ok_or(LogError::Empty)
    }

    /// Most recent entry without removing it.
    pub fn peek_last(&self) -> Option<&E> {
        self.entries.back()
    }

    /// Returns true when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Configured depth bound, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Entries from most recent to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &E> + Clone + '_ {
        self.entries.iter().rev()
    }

    /// Forgets every recorded entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Undo history a [`Catalog`](super::catalog::Catalog) records into.
pub trait UndoLog {
    /// Records a compensating entry.
    fn record(&mut self, entry: LogEntry);
    /// Pops the most recent entry.
    fn take_last(&mut self) -> Result<LogEntry, LogError>;
    /// Returns true when there is nothing to undo.
    fn is_empty(&self) -> bool;
    /// Number of undoable entries.
    fn len(&self) -> usize;
}

impl UndoLog for OperationLog<LogEntry> {
    fn record(&mut self, entry: LogEntry) {
        OperationLog::record(self, entry);
    }

    fn take_last(&mut self) -> Result<LogEntry, LogError> {
        OperationLog::take_last(self)
    }

    fn is_empty(&self) -> bool {
        OperationLog::is_empty(self)
    }

    fn len(&self) -> usize {
        OperationLog::len(self)
    }
}
