use proptest::prelude::*;

use triplog::{
    core::log::{LogError, TripLog},
    trip::{TripDraft, TripRecord},
};

#[derive(Debug, Clone)]
enum Action {
    Add { month: u8, day: u8, start: i16, end: i16 },
    AddIncomplete { month: u8, drop_field: u8 },
    Delete { target: u8 },
    SetVehicleId { tag: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..12, 0u8..28, -500i16..500, -500i16..500)
            .prop_map(|(month, day, start, end)| Action::Add { month, day, start, end }),
        (0u8..12, 0u8..5).prop_map(|(month, drop_field)| Action::AddIncomplete { month, drop_field }),
        (0u8..40).prop_map(|target| Action::Delete { target }),
        (0u8..8).prop_map(|tag| Action::SetVehicleId { tag }),
    ]
}

fn date_for(month: u8, day: u8) -> String {
    format!("2024-{:02}-{:02}", month + 1, day + 1)
}

fn complete_draft(month: u8, day: u8, start: i16, end: i16) -> TripDraft {
    TripDraft {
        date: date_for(month, day),
        origin: "Origin".to_string(),
        destination: "Destination".to_string(),
        start_odometer: Some(f64::from(start)),
        end_odometer: Some(f64::from(end)),
    }
}

fn incomplete_draft(month: u8, drop_field: u8) -> TripDraft {
    let mut draft = complete_draft(month, 0, 0, 1);
    match drop_field % 5 {
        0 => draft.date = String::new(),
        1 => draft.origin = String::new(),
        2 => draft.destination = String::new(),
        3 => draft.start_odometer = None,
        _ => draft.end_odometer = None,
    }
    draft
}

fn naive_summary(records: &[TripRecord]) -> Vec<(String, f64)> {
    let mut out: Vec<(String, f64)> = Vec::new();
    for rec in records {
        let key = rec.month_key();
        match out.iter_mut().find(|(k, _)| k == key) {
            Some((_, total)) => *total += rec.distance,
            None => out.push((key.to_string(), rec.distance)),
        }
    }
    out
}

proptest! {
    #[test]
    fn random_sequences_preserve_order_and_summary(actions in prop::collection::vec(action_strategy(), 1..120)) {
        let mut log = TripLog::new();
        let mut model: Vec<TripRecord> = Vec::new();
        let mut model_vehicle = String::new();

        for action in actions {
            match action {
                Action::Add { month, day, start, end } => {
                    let added = log
                        .add_trip(complete_draft(month, day, start, end))
                        .expect("complete draft")
                        .clone();
                    prop_assert_eq!(added.distance, f64::from(end) - f64::from(start));
                    model.insert(0, added);
                }
                Action::AddIncomplete { month, drop_field } => {
                    prop_assert!(log.add_trip(incomplete_draft(month, drop_field)).is_none());
                }
                Action::Delete { target } => {
                    let index = usize::from(target);
                    if index < model.len() {
                        let removed = log.delete_trip(index).expect("in range");
                        let expected = model.remove(index);
                        prop_assert_eq!(removed, expected);
                    } else {
                        let err = log.delete_trip(index).expect_err("out of range");
                        prop_assert_eq!(err, LogError::IndexOutOfRange { index, len: model.len() });
                    }
                }
                Action::SetVehicleId { tag } => {
                    model_vehicle = format!("REG{tag}");
                    log.set_vehicle_id(model_vehicle.clone());
                }
            }

            prop_assert_eq!(log.records(), model.as_slice());
            prop_assert_eq!(log.vehicle_id(), model_vehicle.as_str());
            prop_assert_eq!(log.monthly_summary(), naive_summary(&model));
        }

        let restored = TripLog::from_snapshot(log.snapshot());
        prop_assert_eq!(restored.records(), log.records());
        prop_assert_eq!(restored.vehicle_id(), log.vehicle_id());
    }
}
