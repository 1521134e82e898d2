use tempfile::TempDir;

use triplog::{
    core::log::TripLog,
    persist::{StateStore, sqlite::SqliteStateStore},
    trip::TripDraft,
};

fn draft(date: &str, start: f64, end: f64) -> TripDraft {
    TripDraft {
        date: date.to_string(),
        origin: "Stockholm".to_string(),
        destination: "Uppsala".to_string(),
        start_odometer: Some(start),
        end_odometer: Some(end),
    }
}

#[test]
fn save_then_load_round_trips_state_and_order() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("triplog.db");

    let mut log = TripLog::new();
    log.set_vehicle_id("ABC123");
    log.add_trip(draft("2024-03-10", 100.0, 171.0)).expect("add");
    log.add_trip(draft("2024-03-20", 171.0, 242.0)).expect("add");
    log.add_trip(draft("2024-04-01", 242.0, 249.0)).expect("add");

    let mut store = SqliteStateStore::open(&db_path).expect("open sqlite");
    store.save(&log.snapshot()).expect("save");
    drop(store);

    let mut reopened = SqliteStateStore::open(&db_path).expect("reopen");
    let restored = reopened.load_log().expect("load");

    assert_eq!(restored.vehicle_id(), "ABC123");
    assert_eq!(restored.records(), log.records());
}

#[test]
fn vehicle_id_change_survives_simulated_restart() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("triplog.db");

    let mut store = SqliteStateStore::open(&db_path).expect("open sqlite");
    let mut log = store.load_log().expect("initial load");
    assert_eq!(log.vehicle_id(), "");

    log.set_vehicle_id("NEW999");
    store.save(&log.snapshot()).expect("save");
    drop(store);

    let mut reopened = SqliteStateStore::open(&db_path).expect("reopen");
    let restored = reopened.load_log().expect("load");
    assert_eq!(restored.vehicle_id(), "NEW999");
}

#[test]
fn missing_state_loads_the_empty_log() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("fresh.db");

    let mut store = SqliteStateStore::open(&db_path).expect("open sqlite");
    let log = store.load_log().expect("load");

    assert_eq!(log.vehicle_id(), "");
    assert!(log.is_empty());
}

#[test]
fn corrupt_payload_loads_the_empty_log() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("corrupt.db");

    let mut store = SqliteStateStore::open(&db_path).expect("open sqlite");
    let mut log = TripLog::new();
    log.add_trip(draft("2024-03-10", 0.0, 10.0)).expect("add");
    store.save(&log.snapshot()).expect("save");
    drop(store);

    let conn = rusqlite::Connection::open(&db_path).expect("raw open");
    conn.execute("UPDATE state SET payload = X'00ff00ff'", [])
        .expect("corrupt payload");
    drop(conn);

    let mut reopened = SqliteStateStore::open(&db_path).expect("reopen");
    let restored = reopened.load_log().expect("load despite corruption");
    assert!(restored.is_empty());
}

#[test]
fn unknown_format_version_loads_the_empty_log() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("future.db");

    let store = SqliteStateStore::open(&db_path).expect("open sqlite");
    drop(store);

    let payload = br#"{"format_version":99,"snapshot":{"vehicle_id":"X","records":[]}}"#;
    let conn = rusqlite::Connection::open(&db_path).expect("raw open");
    conn.execute(
        "INSERT INTO state(id, ts_ms, payload) VALUES (1, 0, ?1)",
        rusqlite::params![payload.as_slice()],
    )
    .expect("plant future payload");
    drop(conn);

    let mut reopened = SqliteStateStore::open(&db_path).expect("reopen");
    let restored = reopened.load_log().expect("load despite version skew");
    assert!(restored.is_empty());
    assert_eq!(restored.vehicle_id(), "");
}

#[test]
fn save_overwrites_the_single_state_row() {
    let mut store = SqliteStateStore::open_in_memory().expect("open");

    let mut log = TripLog::new();
    log.set_vehicle_id("FIRST");
    store.save(&log.snapshot()).expect("save first");

    log.set_vehicle_id("SECOND");
    log.add_trip(draft("2024-05-01", 0.0, 12.0)).expect("add");
    store.save(&log.snapshot()).expect("save second");

    let restored = store.load_log().expect("load");
    assert_eq!(restored.vehicle_id(), "SECOND");
    assert_eq!(restored.len(), 1);
}
