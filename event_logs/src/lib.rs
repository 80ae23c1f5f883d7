#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![doc = include_str!("../README.md")]

///
/// Event Logs ([`EventLog`]), their per-case activity sequences ([`Trace`]) and the aggregation into a [`SimplifiedEventLog`]
///
pub mod event_log {
    /// Validation and renaming of the mandatory event log columns
    pub mod column_normalizer;
    /// Constants (conventional column names)
    pub mod constants;
    /// [`EventLogError`](error::EventLogError)
    pub mod error;
    /// [`EventLog`] struct and construction options
    pub mod event_log_struct;
    /// [`SimplifiedEventLog`]: one [`Trace`] per case
    pub mod simplified_event_log;
    /// [`Trace`] struct
    pub mod trace;

    pub use column_normalizer::ColumnRole;
    pub use error::EventLogError;
    pub use event_log_struct::{EventLog, EventLogOptions};
    pub use simplified_event_log::SimplifiedEventLog;
    pub use trace::Trace;

    #[cfg(test)]
    mod tests;
}

/// Tabular input data of event logs
pub mod table;

/// Interface for data quality patterns operating on event logs
pub mod data_quality;

/// Util module with smaller helper functions
pub mod utils;

#[doc(inline)]
pub use event_log::event_log_struct::EventLog;

#[doc(inline)]
pub use event_log::event_log_struct::EventLogOptions;

#[doc(inline)]
pub use event_log::error::EventLogError;

#[doc(inline)]
pub use event_log::trace::Trace;

#[doc(inline)]
pub use event_log::simplified_event_log::SimplifiedEventLog;

#[doc(inline)]
pub use table::Table;

#[doc(inline)]
pub use table::TabularData;

#[doc(inline)]
pub use data_quality::DataQualityPattern;
