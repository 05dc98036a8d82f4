//! Session history
//!
//! In-memory model of the browser history stack the router drives.
//! `push` drops any forward entries, `replace` overwrites the current one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::location::Location;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub location: Location,
    pub visited_at: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(location: Location) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            location,
            visited_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial)],
            cursor: 0,
        }
    }

    /// Add a new entry after the current one
    pub fn push(&mut self, location: Location) -> &HistoryEntry {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry::new(location));
        self.cursor = self.entries.len() - 1;
        &self.entries[self.cursor]
    }

    /// Overwrite the current entry
    pub fn replace(&mut self, location: Location) -> &HistoryEntry {
        self.entries[self.cursor] = HistoryEntry::new(location);
        &self.entries[self.cursor]
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::root())
    }
}
