use chrono::Utc;
use tracing::debug;

use crate::shared::settings::DEFAULT_HISTORY_CAPACITY;
use crate::shared::types::ConversionHistoryEntry;

/// Storage for history entries, most recent first.
///
/// The engine only ships the in-memory store; a host that wants history to
/// survive restarts can plug in its own.
pub trait HistoryStore: std::fmt::Debug {
    /// Insert at the front and drop entries beyond `capacity`
    fn push_front(&mut self, entry: ConversionHistoryEntry, capacity: usize);
    fn items(&self) -> &[ConversionHistoryEntry];
    fn clear_all(&mut self);
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: Vec<ConversionHistoryEntry>,
}

impl HistoryStore for InMemoryStore {
    fn push_front(&mut self, entry: ConversionHistoryEntry, capacity: usize) {
        self.items.insert(0, entry);
        if self.items.len() > capacity {
            self.items.truncate(capacity);
        }
    }

    fn items(&self) -> &[ConversionHistoryEntry] {
        &self.items
    }

    fn clear_all(&mut self) {
        self.items.clear();
    }
}

/// Fields of a successful conversion, before it gets an id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub input_value: String,
    pub input_unit: String,
    pub result_value: String,
    pub output_unit: String,
    pub category_label: String,
}

/// Bounded list of recent successful conversions
#[derive(Debug)]
pub struct ConversionHistory {
    store: Box<dyn HistoryStore>,
    capacity: usize,
    next_id: u64,
    /// Last record accepted; re-recording it is a no-op even after `clear`.
    /// Reset by `forget_last` when a recompute produced nothing to record.
    last_recorded: Option<HistoryRecord>,
}

impl ConversionHistory {
    pub fn new(capacity: usize) -> Self {
        Self::with_store(Box::new(InMemoryStore::default()), capacity)
    }

    pub fn with_store(store: Box<dyn HistoryStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
            next_id: 1,
            last_recorded: None,
        }
    }

    /// Add a conversion unless it repeats the last one recorded.
    /// Returns the new entry, or `None` when skipped.
    pub fn record(&mut self, record: HistoryRecord) -> Option<&ConversionHistoryEntry> {
        if self.last_recorded.as_ref() == Some(&record) {
            debug!("[ConversionHistory] Skipping repeat of last conversion");
            return None;
        }

        let entry = ConversionHistoryEntry {
            id: self.next_id,
            timestamp: Utc::now(),
            input_value: record.input_value.clone(),
            input_unit: record.input_unit.clone(),
            result_value: record.result_value.clone(),
            output_unit: record.output_unit.clone(),
            category_label: record.category_label.clone(),
        };
        self.next_id += 1;
        self.last_recorded = Some(record);

        debug!("[ConversionHistory] Added entry {}", entry.id);
        self.store.push_front(entry, self.capacity);
        self.store.items().first()
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[ConversionHistoryEntry] {
        self.store.items()
    }

    pub fn get_by_id(&self, id: u64) -> Option<&ConversionHistoryEntry> {
        self.entries().iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop the repeat guard so the next record is accepted even if it
    /// matches the last one (the state went through a blank or error in between)
    pub fn forget_last(&mut self) {
        self.last_recorded = None;
    }

    pub fn clear(&mut self) {
        self.store.clear_all();
        debug!("[ConversionHistory] Cleared all entries");
    }
}

impl Default for ConversionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
