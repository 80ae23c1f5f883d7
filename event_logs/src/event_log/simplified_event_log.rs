use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use super::error::EventLogError;
use super::event_log_struct::EventLog;
use super::trace::Trace;
use crate::table::{TabularData, Value};

///
/// Projection of an [`EventLog`] on the activity sequences of its cases
///
/// Holds exactly one [`Trace`] per case identifier, in the order in which the cases first occur in the event log.
/// Each trace lists the activities of its case in the (chronological) order of the event log.
///
/// ```rust
/// use event_logs::{EventLog, SimplifiedEventLog, table::Table};
/// let csv = "case_id,activity,timestamp
/// a1,a,2024-01-01T00:00:01
/// a2,a,2024-01-01T00:00:02
/// a1,b,2024-01-01T00:00:03
/// a2,b,2024-01-01T00:00:04
/// ";
/// let table = Table::from_csv_reader(csv.as_bytes(), &Default::default()).unwrap();
/// let log = SimplifiedEventLog::try_from(&EventLog::new(&table).unwrap()).unwrap();
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.variants(), vec![(vec!["a".to_string(), "b".to_string()], 2)]);
/// ````
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimplifiedEventLog {
    traces: Vec<Trace>,
    #[serde(skip)]
    case_to_index: HashMap<Value, usize>,
}

impl SimplifiedEventLog {
    ///
    /// Aggregate the events of an [`EventLog`] into one [`Trace`] per case
    ///
    /// Fails only if the case identifier or activity column cannot be read from the underlying table.
    ///
    pub fn from_event_log<T: TabularData>(log: &EventLog<T>) -> Result<Self, EventLogError> {
        let mut simplified = SimplifiedEventLog::default();
        for (case_id, activity) in log.case_ids()?.into_iter().zip(log.activities()?) {
            simplified.add_event(case_id, activity_label(activity));
        }
        Ok(simplified)
    }

    fn add_event(&mut self, case_id: Value, activity: String) {
        if let Some(index) = self.case_to_index.get(&case_id) {
            self.traces[*index].push(activity);
        } else {
            self.case_to_index.insert(case_id.clone(), self.traces.len());
            self.traces
                .push(Trace::with_activities(case_id, vec![activity]));
        }
    }

    /// Trace of the given case
    pub fn get(&self, case_id: &Value) -> Option<&Trace> {
        self.case_to_index.get(case_id).map(|i| &self.traces[*i])
    }

    /// All traces, in order of the first occurrence of their case
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// All case identifiers, in order of their first occurrence
    pub fn case_ids(&self) -> impl Iterator<Item = &Value> + '_ {
        self.traces.iter().map(Trace::case_id)
    }

    /// Number of cases
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Whether the log contains no cases
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    ///
    /// Count how many cases share each distinct activity sequence
    ///
    /// Traces are compared by their activities only (see [`Trace`]).
    /// The key of each entry is the trace of the first case with that activity sequence.
    /// The counts sum up to the number of cases.
    ///
    pub fn trace_counts(&self) -> HashMap<&Trace, u64> {
        let mut counts: HashMap<&Trace, u64> = HashMap::new();
        for trace in &self.traces {
            *counts.entry(trace).or_insert(0) += 1;
        }
        counts
    }

    ///
    /// Distinct activity sequences (variants) with the number of cases following them
    ///
    /// Sorted by descending count; variants with equal counts are sorted by their activities.
    ///
    pub fn variants(&self) -> Vec<(Vec<String>, u64)> {
        self.trace_counts()
            .into_iter()
            .map(|(t, count)| (t.activities().to_vec(), count))
            .sorted_by(|(acts_a, count_a), (acts_b, count_b)| {
                count_b.cmp(count_a).then_with(|| acts_a.cmp(acts_b))
            })
            .collect()
    }
}

/// Activity label of an activity cell (strings are used as they are, other values by their [`Display`](std::fmt::Display) representation)
fn activity_label(activity: Value) -> String {
    match activity {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl<T: TabularData> TryFrom<&EventLog<T>> for SimplifiedEventLog {
    type Error = EventLogError;

    /// See [`SimplifiedEventLog::from_event_log`]
    fn try_from(log: &EventLog<T>) -> Result<Self, Self::Error> {
        Self::from_event_log(log)
    }
}
