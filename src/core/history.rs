//! In-memory history of completed transitions.
//!
//! The history is bounded: once `limit` records are held, the oldest
//! record is dropped for each new one. Sequence numbers keep counting,
//! so gaps at the front show how much was evicted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<I> {
    /// The state being transitioned from
    pub from: I,
    /// The state being transitioned to
    pub to: I,
    /// When the new state became current
    pub timestamp: DateTime<Utc>,
    /// Position of this transition in the driver's lifetime, starting at 0
    pub sequence: u64,
}

/// Bounded, ordered history of transitions.
///
/// # Example
///
/// ```rust
/// use keelhaul::core::StateHistory;
///
/// let mut history = StateHistory::with_limit(8);
/// history.record("start", "middle");
/// history.record("middle", "end");
///
/// assert_eq!(history.path(), vec![&"start", &"middle", &"end"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<I> {
    records: VecDeque<TransitionRecord<I>>,
    limit: usize,
    next_sequence: u64,
}

impl<I: Clone> StateHistory<I> {
    /// Empty history keeping at most `limit` records. A limit of 0 keeps
    /// nothing but still advances the sequence counter.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit.min(64)),
            limit,
            next_sequence: 0,
        }
    }

    /// Record a transition that completed now.
    pub fn record(&mut self, from: I, to: I) {
        self.push(TransitionRecord {
            from,
            to,
            timestamp: Utc::now(),
            sequence: self.next_sequence,
        });
    }

    fn push(&mut self, record: TransitionRecord<I>) {
        self.next_sequence = record.sequence + 1;
        if self.limit == 0 {
            return;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// States traversed: the `from` of the oldest retained record, then
    /// the `to` of each record.
    pub fn path(&self) -> Vec<&I> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|r| &r.to));
        path
    }

    /// Time between the oldest and newest retained record.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord<I>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of transitions ever recorded, including evicted ones.
    pub fn total(&self) -> u64 {
        self.next_sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<&str> = StateHistory::with_limit(4);
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.total(), 0);
    }

    #[test]
    fn path_returns_state_sequence() {
        let mut history = StateHistory::with_limit(4);
        history.record("foo", "bar");
        history.record("bar", "fooBar");

        assert_eq!(history.path(), vec![&"foo", &"bar", &"fooBar"]);
    }

    #[test]
    fn oldest_records_are_evicted() {
        let mut history = StateHistory::with_limit(2);
        history.record(1, 2);
        history.record(2, 3);
        history.record(3, 4);

        assert_eq!(history.len(), 2);
        assert_eq!(history.total(), 3);
        let sequences: Vec<u64> = history.transitions().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert_eq!(history.path(), vec![&2, &3, &4]);
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.record("a", "b");

        assert!(history.is_empty());
        assert_eq!(history.total(), 1);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::with_limit(4);
        history.record("a", "b");
        std::thread::sleep(Duration::from_millis(10));
        history.record("b", "c");

        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_millis(10));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_limit(4);
        history.record("a".to_string(), "b".to_string());

        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.total(), 1);
        assert_eq!(restored.path(), history.path());
    }
}
