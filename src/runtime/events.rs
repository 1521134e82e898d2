//! Runtime event stream payloads.

/// Events emitted from the single-writer runtime loop. The presentation
/// layer subscribes to these to re-render on state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripEvent {
    /// A trip was prepended at position 0.
    Added,
    /// A trip was removed.
    Deleted {
        /// Position that was removed.
        index: usize,
    },
    /// The vehicle identifier was replaced.
    VehicleIdChanged,
    /// The full state was written to the store.
    Saved,
}
