use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{
    trip::{TripDraft, TripRecord},
    types::{Km, MonthKey},
};

/// Errors returned by [`TripLog`] mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// A delete targeted a position outside the current record sequence.
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Record count at the time of the call.
        len: usize,
    },
}

/// Wholesale serialized state: the vehicle identifier plus every record in
/// stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogSnapshotV1 {
    /// Free-text registration identifier.
    pub vehicle_id: String,
    /// Records, newest-first by insertion.
    pub records: Vec<TripRecord>,
}

/// Authoritative driving log: one vehicle identifier and an ordered sequence
/// of trip records, newest-first by insertion (not by date).
#[derive(Debug, Default)]
pub struct TripLog {
    vehicle_id: String,
    records: Vec<TripRecord>,
}

impl TripLog {
    /// Empty log: no identifier, no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from persisted state, preserving record order exactly.
    pub fn from_snapshot(snapshot: LogSnapshotV1) -> Self {
        Self {
            vehicle_id: snapshot.vehicle_id,
            records: snapshot.records,
        }
    }

    /// Exports the full state for persistence.
    pub fn snapshot(&self) -> LogSnapshotV1 {
        LogSnapshotV1 {
            vehicle_id: self.vehicle_id.clone(),
            records: self.records.clone(),
        }
    }

    /// Current registration identifier.
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// Replaces the registration identifier. Any string is accepted,
    /// including the empty string.
    pub fn set_vehicle_id(&mut self, id: impl Into<String>) {
        self.vehicle_id = id.into();
    }

    /// Validates `draft` and prepends the resulting record at position 0.
    ///
    /// Returns `None` without touching state when the draft is missing any
    /// field. Duplicate and out-of-order dates are permitted.
    pub fn add_trip(&mut self, draft: TripDraft) -> Option<&TripRecord> {
        let record = draft.validate()?;
        self.records.insert(0, record);
        self.records.first()
    }

    /// Removes and returns the record at `index`, preserving the relative
    /// order of the remaining records.
    pub fn delete_trip(&mut self, index: usize) -> Result<TripRecord, LogError> {
        if index >= self.records.len() {
            return Err(LogError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// Records in stored (newest-first) order.
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total distance per calendar month, keyed by the `YYYY-MM` prefix of
    /// each record's date.
    ///
    /// Distances are summed signed; negative per-record distances are
    /// included without correction. Keys appear in first-occurrence order of
    /// the stored (newest-first) scan, not chronological order.
    pub fn monthly_summary(&self) -> Vec<(MonthKey, Km)> {
        let mut totals: Vec<(MonthKey, Km)> = Vec::new();
        let mut slot: HashMap<String, usize> = HashMap::new();

        for record in &self.records {
            let key = record.month_key();
            match slot.get(key) {
                Some(&i) => totals[i].1 += record.distance,
                None => {
                    slot.insert(key.to_string(), totals.len());
                    totals.push((key.to_string(), record.distance));
                }
            }
        }

        totals
    }
}
