use chrono::DateTime;

use crate::table::{Table, Value};

mod data_quality_tests;
mod simplified_event_log_tests;

/// Build a table with string cells; the third cell of each row is parsed as RFC3339 timestamp
pub(crate) fn event_table(columns: [&str; 3], rows: &[(&str, &str, &str)]) -> Table {
    Table::from_rows(
        columns,
        rows.iter()
            .map(|(c, a, t)| {
                vec![
                    Value::from(*c),
                    Value::from(*a),
                    DateTime::parse_from_rfc3339(t).unwrap().into(),
                ]
            })
            .collect(),
    )
    .unwrap()
}

pub(crate) fn running_example() -> Table {
    let csv = include_bytes!("test_data/running_example.csv");
    Table::from_csv_reader(&csv[..], &Default::default()).unwrap()
}
