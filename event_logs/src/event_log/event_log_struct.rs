use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::column_normalizer::normalize_columns;
use super::constants::{ACTIVITY, CASE_ID, MANDATORY_COLUMNS, TIMESTAMP};
use super::error::EventLogError;
use crate::table::{Table, TabularData, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
///
/// Options for constructing an [`EventLog`]
///
pub struct EventLogOptions {
    /// Name of the case identifier column, if it is not called [`CASE_ID`]
    pub case_id: Option<String>,
    /// Name of the activity column, if it is not called [`ACTIVITY`]
    pub activity: Option<String>,
    /// Name of the timestamp column, if it is not called [`TIMESTAMP`]
    pub timestamp: Option<String>,
    /// Convert string timestamps to datetimes before validating the timestamp column
    ///
    /// Only has an effect for tables which support it (e.g., [`Table`]).
    pub parse_timestamps: bool,
    /// Optional date format to try first when parsing string timestamps
    ///
    /// See <https://docs.rs/chrono/latest/chrono/format/strftime/index.html> for all available Specifiers.
    ///
    /// Will fall back to default formats (e.g., rfc3339) if parsing fails using passed `date_format`
    pub date_format: Option<String>,
    /// Print progress information (renamed columns, timings)
    pub verbose: bool,
}

impl Default for EventLogOptions {
    fn default() -> Self {
        Self {
            case_id: None,
            activity: None,
            timestamp: None,
            parse_timestamps: true,
            date_format: None,
            verbose: false,
        }
    }
}

///
/// Event log: a table of events with (at least) a case identifier, an activity and a timestamp column
///
/// On construction, the input table is copied (the caller's table is never modified),
/// the mandatory columns are renamed to [`CASE_ID`], [`ACTIVITY`] and [`TIMESTAMP`] and moved to the front,
/// and all events are sorted by timestamp (keeping the original order of events with equal timestamps).
/// Further columns are kept as they are.
///
/// ```rust
/// use event_logs::{EventLog, table::{Table, Value}};
/// let csv = "c,a,t\n1,register,2024-01-01T10:00:00\n1,decide,2024-01-01T09:00:00\n";
/// let table = Table::from_csv_reader(csv.as_bytes(), &Default::default()).unwrap();
/// let log = EventLog::with_columns(&table, Some("c"), Some("a"), Some("t")).unwrap();
///
/// assert_eq!(log.column_names(), vec!["case_id", "activity", "timestamp"]);
/// assert_eq!(log.activities().unwrap(), vec![Value::from("decide"), Value::from("register")]);
/// ````
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog<T: TabularData = Table> {
    data: T,
}

impl<T: TabularData> EventLog<T> {
    /// Construct an event log from a table already following the column naming convention
    pub fn new(data: &T) -> Result<Self, EventLogError> {
        Self::with_options(data, EventLogOptions::default())
    }

    ///
    /// Construct an event log, optionally naming the columns to use as case identifier, activity and timestamp
    ///
    /// A given name is only used if the table does not already contain the conventional column.
    ///
    pub fn with_columns(
        data: &T,
        case_id: Option<&str>,
        activity: Option<&str>,
        timestamp: Option<&str>,
    ) -> Result<Self, EventLogError> {
        Self::with_options(
            data,
            EventLogOptions {
                case_id: case_id.map(String::from),
                activity: activity.map(String::from),
                timestamp: timestamp.map(String::from),
                ..Default::default()
            },
        )
    }

    /// Construct an event log using the given [`EventLogOptions`]
    pub fn with_options(data: &T, options: EventLogOptions) -> Result<Self, EventLogError> {
        let now = Instant::now();
        let columns = data.column_names();
        let renames = normalize_columns(
            &columns,
            options.case_id.as_deref(),
            options.activity.as_deref(),
            options.timestamp.as_deref(),
        )?;
        if options.verbose {
            if renames.is_empty() {
                println!("Event log columns already follow the naming convention");
            }
            for (from, to) in renames.as_slice() {
                println!("Renaming column '{from}' to '{to}'");
            }
        }

        let mut data = data.clone();
        data.rename_columns(renames.as_slice())?;
        let order: Vec<String> = MANDATORY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(
                data.column_names()
                    .into_iter()
                    .filter(|c| !MANDATORY_COLUMNS.contains(&c.as_str())),
            )
            .collect();
        data.reorder_columns(&order)?;

        if options.parse_timestamps {
            data.coerce_datetime_column(TIMESTAMP, options.date_format.as_deref())?;
        }
        if !data.is_datetime_column(TIMESTAMP)? {
            let found = data
                .column_values(TIMESTAMP)?
                .iter()
                .find(|v| v.try_as_date().is_none())
                .map(|v| format!("{} value '{v}'", v.type_name()))
                .unwrap_or_else(|| "a non-datetime column type".to_string());
            if options.verbose {
                eprintln!("Timestamp column is not chronologically comparable: {found}");
            }
            return Err(EventLogError::SchemaTypeError {
                column: TIMESTAMP.to_string(),
                found,
            });
        }

        data.sort_by_column(TIMESTAMP)?;
        if options.verbose {
            println!(
                "Constructed event log with {} events in {:.2?}",
                data.height(),
                now.elapsed()
            );
        }
        Ok(Self { data })
    }

    /// The underlying (normalized and sorted) table
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume the event log, returning the underlying table
    pub fn into_data(self) -> T {
        self.data
    }

    /// Column names of the underlying table
    pub fn column_names(&self) -> Vec<String> {
        self.data.column_names()
    }

    /// Number of events
    pub fn num_events(&self) -> usize {
        self.data.height()
    }

    /// Case identifiers of all events, in event order
    pub fn case_ids(&self) -> Result<Vec<Value>, EventLogError> {
        Ok(self.data.column_values(CASE_ID)?)
    }

    /// Activities of all events, in event order
    pub fn activities(&self) -> Result<Vec<Value>, EventLogError> {
        Ok(self.data.column_values(ACTIVITY)?)
    }

    /// Timestamps of all events, in event order
    pub fn timestamps(&self) -> Result<Vec<Value>, EventLogError> {
        Ok(self.data.column_values(TIMESTAMP)?)
    }
}
