use std::{fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use super::{Table, TableError, Value};
use crate::utils::timestamp_utils::parse_timestamp;

/// Options for loading a [`Table`] from CSV
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CsvTableOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Optional date format tried first when recognizing timestamp cells
    ///
    /// See <https://docs.rs/chrono/latest/chrono/format/strftime/index.html> for all available Specifiers.
    pub date_format: Option<String>,
    /// Infer cell types (bool, int, float, timestamp). If `false`, all non-empty cells are kept as strings.
    ///
    /// A column is only typed as bool, int or float if every cell reads back as its original text
    /// (e.g., `01` or `1.0` keep the whole column as strings), so distinct identifiers never collapse into one value.
    pub infer_types: bool,
}

impl Default for CsvTableOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            date_format: None,
            infer_types: true,
        }
    }
}

/// Inferred type of a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellType {
    Null,
    Boolean,
    Int,
    Float,
    Date,
    String,
}

impl CellType {
    fn of(value: &Value) -> Self {
        match value {
            Value::None() => CellType::Null,
            Value::Boolean(_) => CellType::Boolean,
            Value::Int(_) => CellType::Int,
            Value::Float(_) => CellType::Float,
            Value::Date(_) => CellType::Date,
            Value::String(_) => CellType::String,
        }
    }

    /// Coalesce two types: same->same, null + x -> x, int + float -> float, other combination -> string
    fn coalesce(self, other: CellType) -> CellType {
        use CellType::*;
        if self == other {
            return self;
        }
        match (self, other) {
            (Null, t) | (t, Null) => t,
            (Int, Float) | (Float, Int) => Float,
            _ => String,
        }
    }
}

/// Parse a cell, trying bool > int > float > timestamp > string
fn parse_cell(raw: &str, date_format: Option<&str>) -> Value {
    let s = raw.trim();
    if s.is_empty() {
        return Value::None();
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if let Some(ts) = parse_timestamp(s, date_format, false) {
        return Value::Date(ts);
    }
    Value::String(s.to_string())
}

/// Whether a parsed bool/int/float cell displays as the text it was parsed from
fn is_lossless(value: &Value, raw: &str) -> bool {
    match value {
        Value::Boolean(_) | Value::Int(_) | Value::Float(_) => value.to_string() == raw.trim(),
        _ => true,
    }
}

/// Bring a parsed cell to the coalesced column type, keeping the raw text for string columns
fn convert_cell(value: Value, raw: &str, target: CellType) -> Value {
    match (value, target) {
        (Value::None(), _) => Value::None(),
        (Value::Int(i), CellType::Float) => Value::Float(i as f64),
        (v, t) if CellType::of(&v) == t => v,
        _ => Value::String(raw.trim().to_string()),
    }
}

impl Table {
    ///
    /// Load a [`Table`] from CSV data
    ///
    /// The first record is used as header (i.e., column names).
    /// Empty cells become [`Value::None`]. Cell types are inferred per column (see [`CsvTableOptions::infer_types`]):
    /// a column mixing ints and floats becomes a float column, any other mix falls back to strings.
    ///
    pub fn from_csv_reader(
        reader: impl Read,
        options: &CsvTableOptions,
    ) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let date_fmt = options.date_format.as_deref();

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        let mut parsed_rows: Vec<Vec<Value>> = Vec::new();
        let mut column_types = vec![CellType::Null; headers.len()];
        let mut lossless = vec![true; headers.len()];
        for (row_idx, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() != headers.len() {
                return Err(TableError::RaggedRow {
                    row: row_idx,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            let parsed: Vec<Value> = record
                .iter()
                .map(|cell| {
                    if options.infer_types {
                        parse_cell(cell, date_fmt)
                    } else if cell.trim().is_empty() {
                        Value::None()
                    } else {
                        Value::String(cell.trim().to_string())
                    }
                })
                .collect();
            for (i, v) in parsed.iter().enumerate() {
                column_types[i] = column_types[i].coalesce(CellType::of(v));
                lossless[i] &= is_lossless(v, &record[i]);
            }
            raw_rows.push(record.iter().map(str::to_string).collect());
            parsed_rows.push(parsed);
        }

        for (t, keeps_text) in column_types.iter_mut().zip(&lossless) {
            if !keeps_text {
                *t = CellType::String;
            }
        }

        let rows: Vec<Vec<Value>> = parsed_rows
            .into_iter()
            .zip(raw_rows)
            .map(|(parsed, raw)| {
                parsed
                    .into_iter()
                    .zip(raw.iter())
                    .zip(&column_types)
                    .map(|((v, r), t)| convert_cell(v, r, *t))
                    .collect()
            })
            .collect();
        Table::from_rows(headers, rows)
    }

    /// Load a [`Table`] from a CSV file at the given path
    ///
    /// See [`Table::from_csv_reader`].
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        options: &CsvTableOptions,
    ) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|e| TableError::Csv(e.to_string()))?;
        Self::from_csv_reader(file, options)
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvTableOptions, Table};
    use crate::table::{TabularData, Value};

    #[test]
    fn infers_column_types() {
        let csv = "id,amount,ts,flag,note\n1,2,2024-01-01T10:00:00,true,\n2,2.5,2024-01-02T10:00:00,false,x\n";
        let table = Table::from_csv_reader(csv.as_bytes(), &CsvTableOptions::default()).unwrap();
        assert_eq!(table.columns(), ["id", "amount", "ts", "flag", "note"]);
        assert_eq!(table.get(0, "id"), Some(&Value::Int(1)));
        // int + float coalesces to float
        assert_eq!(table.get(0, "amount"), Some(&Value::Float(2.0)));
        assert!(table.is_datetime_column("ts").unwrap());
        assert_eq!(table.get(1, "flag"), Some(&Value::Boolean(false)));
        assert_eq!(table.get(0, "note"), Some(&Value::None()));
        assert_eq!(table.get(1, "note"), Some(&Value::from("x")));
    }

    #[test]
    fn mixed_columns_fall_back_to_raw_strings() {
        let csv = "case\n007\nabc\n";
        let table = Table::from_csv_reader(csv.as_bytes(), &CsvTableOptions::default()).unwrap();
        assert_eq!(
            table.column_values("case").unwrap(),
            vec![Value::from("007"), Value::from("abc")]
        );
    }

    #[test]
    fn numeric_identifiers_keep_their_text() {
        let csv = "case,act,amount\n01,1,1.5\n1,1.0,2\n2,2,3\n";
        let table = Table::from_csv_reader(csv.as_bytes(), &CsvTableOptions::default()).unwrap();
        assert_eq!(
            table.column_values("case").unwrap(),
            vec![Value::from("01"), Value::from("1"), Value::from("2")]
        );
        assert_eq!(
            table.column_values("act").unwrap(),
            vec![Value::from("1"), Value::from("1.0"), Value::from("2")]
        );
        // ints read back as themselves inside a float column
        assert_eq!(
            table.column_values("amount").unwrap(),
            vec![Value::Float(1.5), Value::Float(2.0), Value::Float(3.0)]
        );
    }

    #[test]
    fn non_canonical_booleans_stay_strings() {
        let csv = "flag\nTRUE\nfalse\n";
        let table = Table::from_csv_reader(csv.as_bytes(), &CsvTableOptions::default()).unwrap();
        assert_eq!(table.get(0, "flag"), Some(&Value::from("TRUE")));
    }

    #[test]
    fn semicolon_delimited_without_inference() {
        let csv = "case;act\n1;a\n";
        let options = CsvTableOptions {
            delimiter: b';',
            infer_types: false,
            ..Default::default()
        };
        let table = Table::from_csv_reader(csv.as_bytes(), &options).unwrap();
        assert_eq!(table.get(0, "case"), Some(&Value::from("1")));
    }

    #[test]
    fn ragged_csv_is_rejected() {
        let csv = "a,b\n1\n";
        assert!(Table::from_csv_reader(csv.as_bytes(), &CsvTableOptions::default()).is_err());
    }
}
