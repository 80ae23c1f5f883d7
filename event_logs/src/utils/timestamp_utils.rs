//! Timestamp parsing shared by table coercion and CSV loading

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Naive formats (interpreted as UTC), tried in order after all offset-aware formats failed
const NAIVE_FORMATS: [&str; 4] = ["%F %T%.f", "%FT%T%.f", "%FT%T", "%F %T UTC"];

/// Parse a timestamp string to `DateTime<FixedOffset>`, trying multiple formats.
///
/// # Supported Formats (in order of precedence)
/// 1. Custom format (if provided), first with timezone and then as naive (assumes UTC)
/// 2. RFC3339: `2023-10-06T09:30:21+00:00`
/// 3. ISO 8601 with offset (no colon): `2023-10-06T09:30:21+0000`
/// 4. RFC2822: `Fri, 06 Oct 2023 09:30:21 +0000`
/// 5. Naive datetimes `2023-10-06 09:30:21.890421`, `2023-10-06T09:30:21.348555`,
///    `2023-10-06T09:30:21` and `2023-10-06 09:30:21 UTC` (assumes UTC)
/// 6. Plain dates: `2023-10-06` (midnight, UTC)
///
/// Returns `None` if no format matched. With `verbose` set, failures are reported on stderr.
pub fn parse_timestamp(
    time: &str,
    custom_format: Option<&str>,
    verbose: bool,
) -> Option<DateTime<FixedOffset>> {
    let time = time.trim();
    if let Some(date_format) = custom_format {
        if let Ok(dt) = DateTime::parse_from_str(time, date_format) {
            return Some(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(time, date_format) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    let with_offset = DateTime::parse_from_rfc3339(time)
        .or_else(|_| DateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_rfc2822(time));
    if let Ok(dt) = with_offset {
        return Some(dt);
    }

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(time, fmt).ok())
    {
        return Some(dt.and_utc().fixed_offset());
    }

    if let Some(dt) = NaiveDate::parse_from_str(time, "%F")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(dt.and_utc().fixed_offset());
    }

    if verbose {
        eprintln!("Failed to parse timestamp: {time}");
    }
    None
}
