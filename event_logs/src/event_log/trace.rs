use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::table::Value;

///
/// The activity sequence of a single case
///
/// Equality and hashing only consider the activity sequence, __not__ the case identifier:
/// two cases with the same activities in the same order have equal traces.
/// This makes [`Trace`] usable as a key for counting trace variants (see [`SimplifiedEventLog::trace_counts`](crate::SimplifiedEventLog::trace_counts)).
///
/// ```rust
/// use event_logs::{Trace, table::Value};
/// let mut t1 = Trace::new(Value::from("c1"));
/// t1.push("register");
/// t1.push("decide");
/// let t2 = Trace::with_activities(Value::from("c2"), vec!["register".into(), "decide".into()]);
///
/// assert_eq!(t1, t2);
/// assert_eq!(t1.to_string(), "<register, decide>");
/// ````
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Trace {
    case_id: Value,
    activities: Vec<String>,
}

impl Trace {
    /// Create an empty trace for the given case
    pub fn new(case_id: Value) -> Self {
        Self::with_activities(case_id, Vec::new())
    }

    /// Create a trace for the given case with initial activities
    pub fn with_activities(case_id: Value, activities: Vec<String>) -> Self {
        Self {
            case_id,
            activities,
        }
    }

    /// Identifier of the case this trace belongs to
    pub fn case_id(&self) -> &Value {
        &self.case_id
    }

    /// Activities in chronological order
    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    /// Number of activities
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the trace contains no activities
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Activity at the given position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.activities.get(index).map(String::as_str)
    }

    ///
    /// Replace the activity at the given position
    ///
    /// Returns the replaced activity, or `None` (leaving the trace unchanged) if `index` is out of bounds
    ///
    pub fn set(&mut self, index: usize, activity: impl Into<String>) -> Option<String> {
        self.activities
            .get_mut(index)
            .map(|a| std::mem::replace(a, activity.into()))
    }

    /// Remove and return the activity at the given position, or `None` if `index` is out of bounds
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.activities.len()).then(|| self.activities.remove(index))
    }

    ///
    /// Insert an activity before the given position
    ///
    /// Positions past the end are clamped, i.e., the activity is appended.
    ///
    pub fn insert(&mut self, index: usize, activity: impl Into<String>) {
        let index = index.min(self.activities.len());
        self.activities.insert(index, activity.into());
    }

    /// Append an activity
    pub fn push(&mut self, activity: impl Into<String>) {
        self.insert(self.len(), activity);
    }

    /// Iterate over the activities in order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.activities.iter()
    }

    ///
    /// Whether all activities of this trace occur, in order, at the start of `other`
    ///
    /// Unlike `==`, this does not require equal lengths: `<a, b>` is a prefix of `<a, b, c>`.
    ///
    pub fn is_prefix_of(&self, other: &Trace) -> bool {
        other.activities.starts_with(&self.activities)
    }
}

impl PartialEq for Trace {
    fn eq(&self, other: &Self) -> bool {
        self.activities == other.activities
    }
}

impl Eq for Trace {}

impl Hash for Trace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.activities.hash(state);
    }
}

impl Index<usize> for Trace {
    type Output = String;

    fn index(&self, index: usize) -> &Self::Output {
        &self.activities[index]
    }
}

impl IndexMut<usize> for Trace {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.activities[index]
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> Extend<S> for Trace {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.activities.extend(iter.into_iter().map(Into::into));
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.activities.join(", "))
    }
}
