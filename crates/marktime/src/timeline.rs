//! In-memory user-timing store.
//!
//! Marks are named points in time; measures are named spans between two
//! marks. Entries are kept in insertion order, so "first entry by name"
//! means the oldest one recorded under that name.

use serde::{Deserialize, Serialize};

/// Kind of timing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A named point in time
    Mark,
    /// A named span between two marks
    Measure,
    /// Document navigation timing
    Navigation,
    /// Paint timing
    Paint,
    /// Resource fetch timing
    Resource,
}

impl EntryType {
    /// The lowercase name of this entry type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Mark => "mark",
            EntryType::Measure => "measure",
            EntryType::Navigation => "navigation",
            EntryType::Paint => "paint",
            EntryType::Resource => "resource",
        }
    }
}

/// A single entry in the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    /// Entry name
    pub name: String,
    /// Entry type
    pub entry_type: EntryType,
    /// Start timestamp in clock units
    pub start_time: f64,
    /// Duration in clock units (0 for marks)
    pub duration: f64,
}

impl PerformanceEntry {
    /// Create a new entry.
    pub fn new(name: &str, entry_type: EntryType, start_time: f64, duration: f64) -> Self {
        Self {
            name: name.to_string(),
            entry_type,
            start_time,
            duration,
        }
    }

    /// Create a mark entry.
    pub fn mark(name: &str, at: f64) -> Self {
        Self::new(name, EntryType::Mark, at, 0.0)
    }
}

/// Ordered store of marks, measures and foreign entries.
///
/// Unbounded by default. With [`Timeline::with_max_entries`] the oldest
/// entry is evicted once the limit is reached.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<PerformanceEntry>,
    /// Maximum entries to keep (to prevent unbounded growth)
    max_entries: Option<usize>,
}

impl Timeline {
    /// Create an empty, unbounded timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty timeline holding at most `max` entries (at least one).
    pub fn with_max_entries(max: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: Some(max.max(1)),
        }
    }

    /// The entry limit, if any.
    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Record a mark at the given timestamp.
    pub fn mark(&mut self, label: &str, at: f64) {
        self.push(PerformanceEntry::mark(label, at));
    }

    /// Record a measure spanning the most recent marks with the given labels.
    ///
    /// Returns `None` and records nothing if either mark is missing.
    pub fn measure(
        &mut self,
        name: &str,
        start_label: &str,
        end_label: &str,
    ) -> Option<&PerformanceEntry> {
        let start = self.latest_mark(start_label)?;
        let end = self.latest_mark(end_label)?;

        self.push(PerformanceEntry::new(
            name,
            EntryType::Measure,
            start,
            end - start,
        ));
        self.entries.last()
    }

    /// Insert an arbitrary entry, e.g. one produced outside the tracker.
    pub fn insert(&mut self, entry: PerformanceEntry) {
        self.push(entry);
    }

    /// All entries with the given name, oldest first.
    pub fn entries_by_name(&self, name: &str) -> Vec<&PerformanceEntry> {
        self.entries.iter().filter(|e| e.name == name).collect()
    }

    /// The oldest entry with the given name.
    pub fn first_by_name(&self, name: &str) -> Option<&PerformanceEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// All entries of the given type, oldest first.
    pub fn entries_by_type(&self, entry_type: EntryType) -> Vec<&PerformanceEntry> {
        self.entries
            .iter()
            .filter(|e| e.entry_type == entry_type)
            .collect()
    }

    /// Remove marks, either all of them or only those with `label`.
    pub fn clear_marks(&mut self, label: Option<&str>) {
        self.clear(EntryType::Mark, label);
    }

    /// Remove measures, either all of them or only those named `name`.
    pub fn clear_measures(&mut self, name: Option<&str>) {
        self.clear(EntryType::Measure, name);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: PerformanceEntry) {
        if let Some(max) = self.max_entries {
            if self.entries.len() >= max {
                self.entries.remove(0);
            }
        }
        self.entries.push(entry);
    }

    fn latest_mark(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.entry_type == EntryType::Mark && e.name == label)
            .map(|e| e.start_time)
    }

    fn clear(&mut self, entry_type: EntryType, name: Option<&str>) {
        self.entries.retain(|e| {
            e.entry_type != entry_type || name.is_some_and(|n| n != e.name)
        });
    }
}
