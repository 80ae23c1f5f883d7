use chrono::DateTime;
use polars::prelude::*;

use super::{TableError, TabularData, Value};

impl From<PolarsError> for TableError {
    fn from(e: PolarsError) -> Self {
        Self::Backend(e.to_string())
    }
}

///
/// Convert a polars [`AnyValue`] to a [`Value`]
///
/// Datetimes are converted to UTC; values of other types (e.g., lists) are represented by their debug string.
/// Fails for dates and datetimes outside the range chrono can represent.
///
fn any_value_to_value(from: &AnyValue<'_>) -> Result<Value, TableError> {
    let out_of_range = || TableError::Backend(format!("Timestamp {from} is out of range"));
    Ok(match from {
        AnyValue::Null => Value::None(),
        AnyValue::Boolean(v) => Value::Boolean(*v),
        AnyValue::String(v) => Value::String(v.to_string()),
        AnyValue::StringOwned(v) => Value::String(v.to_string()),
        AnyValue::UInt8(v) => Value::Int((*v).into()),
        AnyValue::UInt16(v) => Value::Int((*v).into()),
        AnyValue::UInt32(v) => Value::Int((*v).into()),
        AnyValue::Int8(v) => Value::Int((*v).into()),
        AnyValue::Int16(v) => Value::Int((*v).into()),
        AnyValue::Int32(v) => Value::Int((*v).into()),
        AnyValue::Int64(v) => Value::Int(*v),
        AnyValue::Float32(v) => Value::Float((*v).into()),
        AnyValue::Float64(v) => Value::Float(*v),
        AnyValue::Date(days) => DateTime::from_timestamp(i64::from(*days) * 86_400, 0)
            .map(Value::from)
            .ok_or_else(out_of_range)?,
        AnyValue::Datetime(t, unit, _) => {
            let dt = match unit {
                TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(*t)),
                TimeUnit::Microseconds => DateTime::from_timestamp_micros(*t),
                TimeUnit::Milliseconds => DateTime::from_timestamp_millis(*t),
            };
            dt.map(Value::from).ok_or_else(out_of_range)?
        }
        x => Value::String(format!("{x:?}")),
    })
}

impl TabularData for DataFrame {
    fn column_names(&self) -> Vec<String> {
        self.get_column_names()
            .into_iter()
            .map(|c| c.to_string())
            .collect()
    }

    fn height(&self) -> usize {
        DataFrame::height(self)
    }

    fn rename_columns(&mut self, renames: &[(String, String)]) -> Result<(), TableError> {
        // Rename through temporary names first, so that swapping names works as a single batch
        for (i, (from, _)) in renames.iter().enumerate() {
            self.rename(from, format!("__event_logs_rename_{i}").into())?;
        }
        for (i, (_, to)) in renames.iter().enumerate() {
            self.rename(&format!("__event_logs_rename_{i}"), to.as_str().into())?;
        }
        Ok(())
    }

    fn reorder_columns(&mut self, order: &[String]) -> Result<(), TableError> {
        if order.len() != self.width() {
            return Err(TableError::Backend(format!(
                "Expected {} columns in new order, got {}",
                self.width(),
                order.len()
            )));
        }
        *self = self.select(order.iter().map(|c| c.as_str()))?;
        Ok(())
    }

    fn column_values(&self, name: &str) -> Result<Vec<Value>, TableError> {
        let column = self
            .column(name)
            .map_err(|_| TableError::MissingColumn(name.to_string()))?;
        (0..column.len())
            .map(|i| any_value_to_value(&column.get(i)?))
            .collect()
    }

    fn is_datetime_column(&self, name: &str) -> Result<bool, TableError> {
        let column = self
            .column(name)
            .map_err(|_| TableError::MissingColumn(name.to_string()))?;
        Ok(
            matches!(column.dtype(), DataType::Datetime(_, _) | DataType::Date)
                && column.null_count() == 0,
        )
    }

    fn sort_by_column(&mut self, name: &str) -> Result<(), TableError> {
        *self = self.sort(
            [name],
            SortMultipleOptions::default().with_maintain_order(true),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use crate::{EventLog, EventLogError, SimplifiedEventLog, TabularData};

    fn example_df() -> DataFrame {
        let ts = Series::new("t".into(), [3_000_i64, 1_000, 2_000])
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap();
        DataFrame::new(vec![
            Series::new("c".into(), ["x", "y", "x"]).into(),
            Series::new("a".into(), ["b", "a", "a"]).into(),
            ts.into(),
        ])
        .unwrap()
    }

    #[test]
    fn event_log_from_dataframe() {
        let df = example_df();
        let log = EventLog::with_columns(&df, Some("c"), Some("a"), Some("t")).unwrap();
        assert_eq!(
            log.column_names(),
            vec!["case_id", "activity", "timestamp"]
        );
        // Input DataFrame is untouched
        assert_eq!(df.column_names(), vec!["c", "a", "t"]);

        let simplified = SimplifiedEventLog::try_from(&log).unwrap();
        assert_eq!(simplified.len(), 2);
        let x = simplified.get(&"x".into()).unwrap();
        assert_eq!(x.activities(), ["a", "b"]);
    }

    #[test]
    fn string_timestamps_are_rejected() {
        let df = df!("case_id" => ["x"], "activity" => ["a"], "timestamp" => ["2024-01-01"])
            .unwrap();
        assert!(EventLog::new(&df).is_err());
    }

    #[test]
    fn missing_timestamps_are_rejected() {
        let ts = Series::new("timestamp".into(), [Some(2_000_i64), None, Some(1_000)])
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap();
        let df = DataFrame::new(vec![
            Series::new("case_id".into(), ["x", "x", "y"]).into(),
            Series::new("activity".into(), ["a", "b", "a"]).into(),
            ts.into(),
        ])
        .unwrap();
        assert!(!df.is_datetime_column("timestamp").unwrap());
        assert!(matches!(
            EventLog::new(&df),
            Err(EventLogError::SchemaTypeError { .. })
        ));
    }

    #[test]
    fn out_of_range_dates_are_reported() {
        let dates = Series::new("d".into(), [i32::MAX])
            .cast(&DataType::Date)
            .unwrap();
        let df = DataFrame::new(vec![dates.into()]).unwrap();
        assert!(df.column_values("d").is_err());
    }
}
