//! Trip domain record and draft input.

use serde::{Deserialize, Serialize};

use crate::types::Km;

/// Length of the `YYYY-MM` prefix used as the aggregation key.
const MONTH_KEY_LEN: usize = 7;

/// Fully materialized trip record. Immutable once created; edits are
/// delete-and-re-add at the caller's level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Calendar date as an ISO `YYYY-MM-DD` string.
    pub date: String,
    /// Free-text origin label.
    pub origin: String,
    /// Free-text destination label.
    pub destination: String,
    /// Odometer reading at departure, in kilometers.
    pub start_odometer: Km,
    /// Odometer reading at arrival, in kilometers.
    pub end_odometer: Km,
    /// Trip distance, stored at creation as `end_odometer - start_odometer`.
    /// Not re-validated afterwards; may be negative.
    pub distance: Km,
}

impl TripRecord {
    /// Year-month aggregation key: the first 7 characters of `date`.
    ///
    /// A date shorter than 7 bytes keys on itself.
    pub fn month_key(&self) -> &str {
        self.date.get(..MONTH_KEY_LEN).unwrap_or(&self.date)
    }
}

/// Add-trip input exactly as a form layer supplies it. An odometer field left
/// blank arrives as `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripDraft {
    /// Calendar date as an ISO `YYYY-MM-DD` string; empty means missing.
    pub date: String,
    /// Free-text origin label; empty means missing.
    pub origin: String,
    /// Free-text destination label; empty means missing.
    pub destination: String,
    /// Odometer reading at departure, if supplied.
    pub start_odometer: Option<Km>,
    /// Odometer reading at arrival, if supplied.
    pub end_odometer: Option<Km>,
}

impl TripDraft {
    /// Materializes the draft into a [`TripRecord`], computing `distance`.
    ///
    /// Returns `None` when any of the five fields is missing. Presence is the
    /// entire validation policy: there is no range or ordering check, so an
    /// end reading below the start reading yields a negative distance.
    pub fn validate(self) -> Option<TripRecord> {
        if self.date.is_empty() || self.origin.is_empty() || self.destination.is_empty() {
            return None;
        }
        let start_odometer = self.start_odometer?;
        let end_odometer = self.end_odometer?;

        Some(TripRecord {
            date: self.date,
            origin: self.origin,
            destination: self.destination,
            start_odometer,
            end_odometer,
            distance: end_odometer - start_odometer,
        })
    }
}
