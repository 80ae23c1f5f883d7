//! Data quality patterns
//!
//! Common interface for detecting and remediating data quality issues in event logs,
//! following the event log imperfection patterns of _Suriadi et al.: Event log imperfection patterns
//! for process mining: Towards a systematic approach to cleaning event logs (Information Systems 64, 2017)_.
//!
//! Concrete patterns implement [`DataQualityPattern`].
use crate::event_log::error::EventLogError;
use crate::table::{Table, TabularData};
use crate::{EventLog, SimplifiedEventLog};

///
/// Event log representation a [`DataQualityPattern`] operates on
///
#[derive(Debug)]
pub enum LogView<'a, T: TabularData = Table> {
    /// Full, event-level log
    Full(&'a EventLog<T>),
    /// Case-level activity sequences
    Simplified(&'a SimplifiedEventLog),
}

impl<T: TabularData> Clone for LogView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TabularData> Copy for LogView<'_, T> {}

impl<'a, T: TabularData> From<&'a EventLog<T>> for LogView<'a, T> {
    fn from(log: &'a EventLog<T>) -> Self {
        LogView::Full(log)
    }
}

impl<'a, T: TabularData> From<&'a SimplifiedEventLog> for LogView<'a, T> {
    fn from(log: &'a SimplifiedEventLog) -> Self {
        LogView::Simplified(log)
    }
}

///
/// A data quality pattern that can be identified in, and remediated from, an event log
///
pub trait DataQualityPattern<T: TabularData = Table> {
    /// Description of an identified occurrence of the pattern
    type Finding;

    /// Name of the pattern (e.g., `"Form-based Event Capture"`)
    fn name(&self) -> &str;

    /// Check whether the pattern is present, returning what was found
    fn identify(&self, log: LogView<'_, T>) -> Option<Self::Finding>;

    /// Produce a new event log in which the pattern is remediated
    fn remediate(&self, log: LogView<'_, T>) -> Result<EventLog<T>, EventLogError>;
}
