//! Authoritative in-memory driving log ("körjournal") with full-state SQLite
//! persistence, monthly distance summaries, and tabular report export.
//!
//! # Examples
//!
//! In-memory usage with [`core::log::TripLog`]:
//! ```
//! use triplog::{core::log::TripLog, trip::TripDraft};
//!
//! let mut log = TripLog::new();
//! log.set_vehicle_id("ABC123");
//! let added = log.add_trip(TripDraft {
//!     date: "2024-03-10".to_string(),
//!     origin: "Stockholm".to_string(),
//!     destination: "Uppsala".to_string(),
//!     start_odometer: Some(12_000.0),
//!     end_odometer: Some(12_071.0),
//! });
//! assert!(added.is_some());
//! assert_eq!(log.monthly_summary(), vec![("2024-03".to_string(), 71.0)]);
//! ```
//!
//! Runtime usage with the SQLite store:
//! ```no_run
//! use triplog::{
//!     core::log::TripLog,
//!     persist::sqlite::SqliteStateStore,
//!     runtime::handle::{RuntimeConfig, spawn_triplog},
//!     trip::TripDraft,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = SqliteStateStore::open("triplog.db").expect("open sqlite");
//! let handle = spawn_triplog(TripLog::new(), Some(Box::new(store)), RuntimeConfig::default());
//! let added = handle.add_trip(TripDraft {
//!     date: "2024-03-10".to_string(),
//!     origin: "Stockholm".to_string(),
//!     destination: "Uppsala".to_string(),
//!     start_odometer: Some(12_000.0),
//!     end_odometer: Some(12_071.0),
//! }).await.expect("add trip");
//! assert!(added);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Core in-memory trip log.
pub mod core;
/// Mail-compose collaborator and mailto URL builder.
pub mod mail;
/// Persistence abstraction and SQLite implementation.
pub mod persist;
/// Report rendering abstraction and Excel implementation.
pub mod report;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Trip domain record and draft input.
pub mod trip;
/// Shared primitive types.
pub mod types;
