/// Conventional name of the case identifier column
pub const CASE_ID: &str = "case_id";
/// Conventional name of the activity column
pub const ACTIVITY: &str = "activity";
/// Conventional name of the timestamp column
pub const TIMESTAMP: &str = "timestamp";
/// The mandatory columns of every [`EventLog`](crate::EventLog), in canonical order
pub const MANDATORY_COLUMNS: [&str; 3] = [CASE_ID, ACTIVITY, TIMESTAMP];
