use super::event_table;
use crate::data_quality::{DataQualityPattern, LogView};
use crate::event_log::constants::{ACTIVITY, CASE_ID, TIMESTAMP};
use crate::table::{Table, TabularData};
use crate::{EventLog, EventLogError, SimplifiedEventLog};

/// Cases consisting of a single event only
struct SingleEventCases;

impl DataQualityPattern for SingleEventCases {
    type Finding = usize;

    fn name(&self) -> &str {
        "Single Event Cases"
    }

    fn identify(&self, log: LogView<'_>) -> Option<usize> {
        let count = match log {
            LogView::Full(log) => {
                let simplified = SimplifiedEventLog::try_from(log).ok()?;
                return self.identify(LogView::Simplified(&simplified));
            }
            LogView::Simplified(log) => log.traces().iter().filter(|t| t.len() == 1).count(),
        };
        (count > 0).then_some(count)
    }

    fn remediate(&self, log: LogView<'_>) -> Result<EventLog, EventLogError> {
        let LogView::Full(log) = log else {
            unimplemented!("remediation needs the full event log")
        };
        let simplified = SimplifiedEventLog::try_from(log)?;
        let mut table = Table::new(log.column_names())?;
        for row in log.data().rows() {
            let keep = simplified.get(&row[0]).is_some_and(|t| t.len() > 1);
            if keep {
                table.push_row(row.clone())?;
            }
        }
        EventLog::new(&table)
    }
}

#[test]
fn pattern_interface() {
    let table = event_table(
        [CASE_ID, ACTIVITY, TIMESTAMP],
        &[
            ("a1", "a", "2024-01-01T00:00:01+00:00"),
            ("a2", "a", "2024-01-01T00:00:02+00:00"),
            ("a1", "b", "2024-01-01T00:00:03+00:00"),
        ],
    );
    let log = EventLog::new(&table).unwrap();
    let pattern = SingleEventCases;
    assert_eq!(pattern.name(), "Single Event Cases");
    assert_eq!(pattern.identify((&log).into()), Some(1));

    let cleaned = pattern.remediate(LogView::Full(&log)).unwrap();
    assert_eq!(cleaned.data().height(), 2);
    assert_eq!(pattern.identify(LogView::Full(&cleaned)), None);
}
