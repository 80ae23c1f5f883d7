use std::collections::HashSet;

use super::{event_table, running_example};
use crate::table::{Table, Value};
use crate::{EventLog, SimplifiedEventLog, Trace};

fn simplified(table: &Table) -> SimplifiedEventLog {
    SimplifiedEventLog::try_from(&EventLog::new(table).unwrap()).unwrap()
}

fn acts(trace: &Trace) -> Vec<&str> {
    trace.iter().map(String::as_str).collect()
}

#[test]
fn two_cases_with_different_traces() {
    let table = event_table(
        ["case_id", "activity", "timestamp"],
        &[
            ("a1", "a", "2024-01-01T00:00:01+00:00"),
            ("a2", "a", "2024-01-01T00:00:02+00:00"),
            ("a1", "b", "2024-01-01T00:00:03+00:00"),
            ("a2", "c", "2024-01-01T00:00:04+00:00"),
        ],
    );
    let log = simplified(&table);
    assert_eq!(log.len(), 2);
    assert_eq!(acts(log.get(&"a1".into()).unwrap()), ["a", "b"]);
    assert_eq!(acts(log.get(&"a2".into()).unwrap()), ["a", "c"]);

    let counts = log.trace_counts();
    assert_eq!(counts.len(), 2);
    assert!(counts.values().all(|c| *c == 1));
}

#[test]
fn identical_traces_are_counted_together() {
    let table = event_table(
        ["case_id", "activity", "timestamp"],
        &[
            ("a1", "a", "2024-01-01T00:00:01+00:00"),
            ("a2", "a", "2024-01-01T00:00:02+00:00"),
            ("a1", "b", "2024-01-01T00:00:03+00:00"),
            ("a2", "b", "2024-01-01T00:00:04+00:00"),
        ],
    );
    let log = simplified(&table);
    let counts = log.trace_counts();
    assert_eq!(counts.len(), 1);
    let (representative, count) = counts.into_iter().next().unwrap();
    assert_eq!(count, 2);
    // First case with this activity sequence
    assert_eq!(representative.case_id(), &Value::from("a1"));
}

#[test]
fn prefix_traces_are_separate_variants() {
    let table = event_table(
        ["case_id", "activity", "timestamp"],
        &[
            ("a1", "a", "2024-01-01T00:00:01+00:00"),
            ("a2", "a", "2024-01-01T00:00:02+00:00"),
            ("a1", "b", "2024-01-01T00:00:03+00:00"),
            ("a3", "a", "2024-01-01T00:00:04+00:00"),
            ("a3", "b", "2024-01-01T00:00:05+00:00"),
        ],
    );
    let log = simplified(&table);
    assert_eq!(
        log.variants(),
        vec![
            (vec!["a".to_string(), "b".to_string()], 2),
            (vec!["a".to_string()], 1)
        ]
    );
}

#[test]
fn test_running_example() {
    let table = running_example();
    let log = EventLog::with_columns(
        &table,
        Some("Case"),
        Some("Activity Name"),
        Some("Start Time"),
    )
    .unwrap();
    let simplified = SimplifiedEventLog::from_event_log(&log).unwrap();

    // One trace per distinct case identifier, in order of first occurrence
    let distinct: HashSet<Value> = log.case_ids().unwrap().into_iter().collect();
    assert_eq!(simplified.len(), distinct.len());
    assert_eq!(
        simplified.case_ids().cloned().collect::<Vec<_>>(),
        (1..=6_i64).map(Value::from).collect::<Vec<_>>()
    );

    assert_eq!(
        acts(simplified.get(&Value::Int(1)).unwrap()),
        [
            "register request",
            "examine thoroughly",
            "check ticket",
            "decide",
            "reject request"
        ]
    );
    assert_eq!(
        acts(simplified.get(&Value::Int(6)).unwrap()),
        [
            "register request",
            "examine casually",
            "check ticket",
            "decide",
            "pay compensation"
        ]
    );
    assert_eq!(simplified.get(&Value::Int(5)).unwrap().len(), 13);
    assert_eq!(simplified.get(&Value::Int(7)), None);

    // Every case contributes to exactly one count
    let counts = simplified.trace_counts();
    assert_eq!(counts.values().sum::<u64>(), 6);
    assert_eq!(counts.len(), 6);
    let total_events: usize = simplified.traces().iter().map(Trace::len).sum();
    assert_eq!(total_events, log.num_events());
}

#[test]
fn non_string_activities_use_their_display_form() {
    let table = Table::from_rows(
        ["case_id", "activity", "timestamp"],
        vec![
            vec![Value::from(1), Value::from(10), "2024-01-01".into()],
            vec![Value::from(1), Value::None(), "2024-01-02".into()],
        ],
    )
    .unwrap();
    let log = simplified(&table);
    assert_eq!(acts(&log.traces()[0]), ["10", "None"]);
}

#[test]
fn empty_log() {
    let log = simplified(&Table::new(["case_id", "activity", "timestamp"]).unwrap());
    assert!(log.is_empty());
    assert!(log.trace_counts().is_empty());
    assert!(log.variants().is_empty());
}

#[test]
fn serializes_traces_in_case_order() {
    let table = event_table(
        ["case_id", "activity", "timestamp"],
        &[("a1", "a", "2024-01-01T00:00:01+00:00")],
    );
    let json = serde_json::to_value(simplified(&table)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "traces": [{
                "case_id": {"type": "String", "content": "a1"},
                "activities": ["a"]
            }]
        })
    );
}

#[test]
fn csv_identifiers_differing_only_in_text_stay_distinct() {
    let csv = "case_id,activity,timestamp
01,1,2024-01-01T00:00:01
1,1.0,2024-01-01T00:00:02
1,2,2024-01-01T00:00:03
";
    let table = Table::from_csv_reader(csv.as_bytes(), &Default::default()).unwrap();
    let log = simplified(&table);

    assert_eq!(log.len(), 2);
    assert_eq!(acts(log.get(&Value::from("01")).unwrap()), ["1"]);
    assert_eq!(acts(log.get(&Value::from("1")).unwrap()), ["1.0", "2"]);
    assert_eq!(log.trace_counts().values().sum::<u64>(), 2);
    assert_eq!(
        log.variants(),
        vec![
            (vec!["1".to_string()], 1),
            (vec!["1.0".to_string(), "2".to_string()], 1)
        ]
    );
}
