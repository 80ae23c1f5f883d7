//! Tabular event data
//!
//! An [`EventLog`](crate::EventLog) is built on top of any table implementing [`TabularData`].
//! The crate ships the in-memory [`Table`] and, with the `dataframes` feature, an implementation for polars `DataFrame`s.
use std::collections::HashSet;
use std::fmt::Display;

/// Loading [`Table`]s from CSV
pub mod csv_table;
/// [`TabularData`] implementation for polars `DataFrame`s
///
/// 🔐 Requires the `dataframes` feature to be enabled.
#[cfg(feature = "dataframes")]
pub mod dataframe;
/// Cell values
pub mod value;

#[doc(inline)]
pub use csv_table::CsvTableOptions;
#[doc(inline)]
pub use value::Value;

use crate::utils::timestamp_utils::parse_timestamp;

///
/// Error raised by a tabular backend
///
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// A column with the given name does not exist
    MissingColumn(String),
    /// A column name occurs more than once
    DuplicateColumn(String),
    /// A row does not have one cell per column
    RaggedRow {
        /// Index of the offending row
        row: usize,
        /// Number of columns of the table
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },
    /// CSV reading error
    Csv(String),
    /// Error reported by another tabular backend (e.g., polars)
    Backend(String),
}

impl Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn(c) => write!(f, "Column '{c}' does not exist"),
            Self::DuplicateColumn(c) => write!(f, "Column '{c}' occurs more than once"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "Row {row} has {found} cells, expected {expected}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::Backend(e) => write!(f, "Table backend error: {e}"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}

///
/// Operations an [`EventLog`](crate::EventLog) needs from its underlying table
///
/// Deep copies are made through [`Clone`]; everything else only reads or
/// mutates the table it is called on.
///
pub trait TabularData: Clone {
    /// Column names, in column order
    fn column_names(&self) -> Vec<String>;

    /// Whether a column with the given name exists
    fn has_column(&self, name: &str) -> bool {
        self.column_names().iter().any(|c| c == name)
    }

    /// Number of rows
    fn height(&self) -> usize;

    ///
    /// Rename columns in one batch
    ///
    /// Every `(from, to)` pair renames column `from` to `to`. All pairs are applied simultaneously.
    ///
    fn rename_columns(&mut self, renames: &[(String, String)]) -> Result<(), TableError>;

    ///
    /// Reorder columns to the given order
    ///
    /// `order` has to contain every column exactly once.
    ///
    fn reorder_columns(&mut self, order: &[String]) -> Result<(), TableError>;

    /// All values of a column, in row order
    fn column_values(&self, name: &str) -> Result<Vec<Value>, TableError>;

    /// Whether the values of a column are chronologically comparable
    fn is_datetime_column(&self, name: &str) -> Result<bool, TableError>;

    ///
    /// Try to convert the values of a column to datetimes
    ///
    /// Backends with a fixed schema may leave the column untouched.
    ///
    fn coerce_datetime_column(
        &mut self,
        _name: &str,
        _date_format: Option<&str>,
    ) -> Result<(), TableError> {
        Ok(())
    }

    /// Sort rows ascending by the given column, keeping the original order of ties
    fn sort_by_column(&mut self, name: &str) -> Result<(), TableError>;
}

///
/// Simple in-memory table: named columns over row-major [`Value`] cells
///
/// ```rust
/// use event_logs::table::{Table, TabularData, Value};
/// let mut table = Table::new(vec!["case_id", "activity"]).unwrap();
/// table.push_row(vec![Value::from("c1"), Value::from("register")]).unwrap();
///
/// assert_eq!(table.height(), 1);
/// assert_eq!(table.get(0, "activity"), Some(&Value::from("register")));
/// ````
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(columns, Vec::new())
    }

    ///
    /// Create a table from column names and rows
    ///
    /// Fails if a column name is duplicated or a row does not have exactly one cell per column
    ///
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(TableError::DuplicateColumn(dup.clone()));
        }
        let mut table = Table {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names, in column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in row order
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Get the cell in the given row and column
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[index])
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}

impl TabularData for Table {
    fn column_names(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn rename_columns(&mut self, renames: &[(String, String)]) -> Result<(), TableError> {
        let mut renamed = self.columns.clone();
        for (from, to) in renames {
            let index = self.require_column(from)?;
            renamed[index] = to.clone();
        }
        let mut seen = HashSet::new();
        if let Some(dup) = renamed.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(TableError::DuplicateColumn(dup.clone()));
        }
        self.columns = renamed;
        Ok(())
    }

    fn reorder_columns(&mut self, order: &[String]) -> Result<(), TableError> {
        let mut seen = HashSet::new();
        if let Some(dup) = order.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(TableError::DuplicateColumn(dup.clone()));
        }
        let indices = order
            .iter()
            .map(|c| self.require_column(c))
            .collect::<Result<Vec<usize>, TableError>>()?;
        if let Some(missing) = self.columns.iter().find(|c| !seen.contains(c.as_str())) {
            return Err(TableError::MissingColumn(missing.clone()));
        }
        self.rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|i| row[*i].clone()).collect())
            .collect();
        self.columns = order.to_vec();
        Ok(())
    }

    fn column_values(&self, name: &str) -> Result<Vec<Value>, TableError> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| r[index].clone()).collect())
    }

    fn is_datetime_column(&self, name: &str) -> Result<bool, TableError> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().all(|r| r[index].try_as_date().is_some()))
    }

    fn coerce_datetime_column(
        &mut self,
        name: &str,
        date_format: Option<&str>,
    ) -> Result<(), TableError> {
        let index = self.require_column(name)?;
        for row in &mut self.rows {
            if let Value::String(s) = &row[index] {
                if let Some(dt) = parse_timestamp(s, date_format, false) {
                    row[index] = Value::Date(dt);
                }
            }
        }
        Ok(())
    }

    fn sort_by_column(&mut self, name: &str) -> Result<(), TableError> {
        let index = self.require_column(name)?;
        // Vec::sort_by is stable
        self.rows.sort_by(|a, b| compare_values(&a[index], &b[index]));
        Ok(())
    }
}

///
/// Total order used for sorting cells
///
/// Values of the same type compare naturally (ints and floats compare numerically).
/// Values of different types are ordered by type: missing cells first, then bools, numbers, datetimes and strings.
///
fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use ordered_float::OrderedFloat;
    fn rank(v: &Value) -> u8 {
        match v {
            Value::None() => 0,
            Value::Boolean(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Date(_) => 3,
            Value::String(_) => 4,
        }
    }
    match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => OrderedFloat(*x).cmp(&OrderedFloat(*y)),
        (Value::Int(x), Value::Float(y)) => OrderedFloat(*x as f64).cmp(&OrderedFloat(*y)),
        (Value::Float(x), Value::Int(y)) => OrderedFloat(*x).cmp(&OrderedFloat(*y as f64)),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
