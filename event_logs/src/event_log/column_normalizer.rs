use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::constants::{ACTIVITY, CASE_ID, MANDATORY_COLUMNS, TIMESTAMP};
use super::error::EventLogError;

///
/// The semantic roles every event log column set has to cover
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Case identifier
    CaseId,
    /// Activity name
    Activity,
    /// Event timestamp
    Timestamp,
}

impl ColumnRole {
    /// All roles, in canonical column order
    pub const ALL: [ColumnRole; 3] = [ColumnRole::CaseId, ColumnRole::Activity, ColumnRole::Timestamp];

    /// Conventional column name for this role (e.g., [`CASE_ID`])
    pub fn convention_name(self) -> &'static str {
        match self {
            ColumnRole::CaseId => CASE_ID,
            ColumnRole::Activity => ACTIVITY,
            ColumnRole::Timestamp => TIMESTAMP,
        }
    }
}

impl Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ColumnRole::CaseId => "case identifier",
            ColumnRole::Activity => "activity",
            ColumnRole::Timestamp => "timestamp",
        };
        write!(f, "{s}")
    }
}

///
/// Pending column renames (`from` -> `to`), accumulated by [`ensure_column_convention`]
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRenames {
    renames: Vec<(String, String)>,
}

impl ColumnRenames {
    /// Whether no rename is pending
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Number of pending renames
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    /// Pending renames as `(from, to)` pairs
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.renames
    }

    /// Record that column `from` is to be renamed to `to`
    pub fn push(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.renames.push((from.into(), to.into()));
    }

    /// Target name of a pending rename of column `from`, if any
    pub fn target_of(&self, from: &str) -> Option<&str> {
        self.renames
            .iter()
            .find(|(f, _)| f == from)
            .map(|(_, to)| to.as_str())
    }
}

///
/// Check that the column for `role` follows the naming convention, recording a rename if necessary
///
/// * If the convention name is already a column, nothing is recorded (even if `current_name` is given).
/// * Otherwise `current_name` has to name an existing column, which is then recorded to be renamed to the convention name.
///
/// Fails with [`EventLogError::InvalidSchema`] if no column can be resolved for the role,
/// or if `current_name` refers to a column that is already claimed by another role.
///
pub fn ensure_column_convention(
    columns: &[String],
    current_name: Option<&str>,
    role: ColumnRole,
    renames: &mut ColumnRenames,
) -> Result<(), EventLogError> {
    let convention_name = role.convention_name();
    if columns.iter().any(|c| c == convention_name) {
        return Ok(());
    }
    let current_name = current_name.ok_or_else(|| EventLogError::InvalidSchema {
        role,
        reason: format!("no '{convention_name}' column and no alternative column specified"),
    })?;
    if !columns.iter().any(|c| c == current_name) {
        return Err(EventLogError::InvalidSchema {
            role,
            reason: format!("specified column '{current_name}' does not exist"),
        });
    }
    if MANDATORY_COLUMNS.contains(&current_name) {
        return Err(EventLogError::InvalidSchema {
            role,
            reason: format!("column '{current_name}' is reserved for another role"),
        });
    }
    if let Some(claimed) = renames.target_of(current_name) {
        return Err(EventLogError::InvalidSchema {
            role,
            reason: format!("column '{current_name}' is already used as '{claimed}'"),
        });
    }
    renames.push(current_name, convention_name);
    Ok(())
}

///
/// Resolve all mandatory roles against the given columns
///
/// Applies [`ensure_column_convention`] to every [`ColumnRole`] and returns the accumulated renames.
///
/// ```rust
/// use event_logs::event_log::column_normalizer::normalize_columns;
/// let columns = vec!["c".to_string(), "activity".to_string(), "t".to_string()];
/// let renames = normalize_columns(&columns, Some("c"), None, Some("t")).unwrap();
///
/// assert_eq!(renames.target_of("c"), Some("case_id"));
/// assert_eq!(renames.len(), 2);
/// ````
pub fn normalize_columns(
    columns: &[String],
    case_id: Option<&str>,
    activity: Option<&str>,
    timestamp: Option<&str>,
) -> Result<ColumnRenames, EventLogError> {
    let mut renames = ColumnRenames::default();
    for (role, current_name) in ColumnRole::ALL.into_iter().zip([case_id, activity, timestamp]) {
        ensure_column_convention(columns, current_name, role, &mut renames)?;
    }
    Ok(renames)
}
