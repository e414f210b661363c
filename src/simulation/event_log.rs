//! Bounded history of notable population events for the UI.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A birth, death or extinction at a point in simulation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Simulation time when the event occurred
    pub time: f32,
    /// Human-readable description of the event
    pub description: String,
    /// Event category (drives the UI color)
    pub kind: EventKind,
}

/// Categories of logged events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A pair of fish produced offspring
    Birth,
    /// A fish ran out of lifetime
    Death,
    /// The last fish died
    Extinction,
}

/// Ring of the most recent events, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    events: VecDeque<LoggedEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl EventLog {
    /// Creates an empty log keeping at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records an event; the oldest one falls off once the log is full.
    pub fn log(&mut self, time: f32, description: impl Into<String>, kind: EventKind) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_back();
        }
        self.events.push_front(LoggedEvent {
            time,
            description: description.into(),
            kind,
        });
    }

    /// Returns all retained events, newest first
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }

    /// Number of retained events of the given kind.
    pub fn count_of(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Drops every retained event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
