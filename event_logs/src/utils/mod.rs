/// Timestamp parsing helpers
pub mod timestamp_utils;
