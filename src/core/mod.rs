//! In-memory authoritative trip log.

/// Trip log state, mutations, and the monthly distance aggregation.
pub mod log;
