//! Shared primitive types.

/// Distance or odometer reading in kilometers. Signed; a trip whose end
/// reading is below its start reading has a negative distance.
pub type Km = f64;

/// Year-month aggregation key, the `YYYY-MM` prefix of a trip date.
pub type MonthKey = String;
