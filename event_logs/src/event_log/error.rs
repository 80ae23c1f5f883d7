use std::fmt::Display;

use super::column_normalizer::ColumnRole;
use crate::table::TableError;

///
/// Error encountered while constructing an [`EventLog`](crate::EventLog)
///
#[derive(Debug, Clone, PartialEq)]
pub enum EventLogError {
    /// A mandatory column could not be resolved
    InvalidSchema {
        /// Role of the column that could not be resolved
        role: ColumnRole,
        /// What went wrong
        reason: String,
    },
    /// The timestamp column does not hold chronologically comparable values
    SchemaTypeError {
        /// Name of the offending column
        column: String,
        /// Description of the value type found instead
        found: String,
    },
    /// Error reported by the underlying table
    Table(TableError),
}

impl Display for EventLogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSchema { role, reason } => {
                write!(f, "Invalid schema for {role} column: {reason}")
            }
            Self::SchemaTypeError { column, found } => write!(
                f,
                "Column '{column}' must contain datetimes, found {found}"
            ),
            Self::Table(e) => write!(f, "Table error: {e}"),
        }
    }
}

impl std::error::Error for EventLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for EventLogError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}
