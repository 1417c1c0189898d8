//! Task records mirrored from the external document store.
//!
//! Records are read-only on this side: the store mints the identifiers and
//! owns every field. The dashboard only buckets them by category label and,
//! on a finished focus session, asks the gateway to append an annotation to
//! the source page.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a task page in the external document store.
///
/// The store mints these; the dashboard never parses or generates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps a store-issued identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The two buckets the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Daytime goals, labeled `工作` or `Work` in the store.
    Work,
    /// Evening goals, labeled `個人` or `Personal` in the store.
    Personal,
}

impl Category {
    /// Maps a raw store label onto a bucket.
    ///
    /// Only the two bilingual label pairs are recognized; any other label
    /// returns `None` and the task appears in neither bucket.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "工作" | "Work" => Some(Self::Work),
            "個人" | "Personal" => Some(Self::Personal),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "Work"),
            Self::Personal => write!(f, "Personal"),
        }
    }
}

/// A task mirrored from the external document store.
///
/// `category` keeps the raw store label rather than a parsed [`Category`]
/// so that bucketing stays a view-time decision and unrecognized labels
/// survive serialization unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Store-issued page identifier.
    pub id: TaskId,
    /// Link to the page in the store's own UI.
    pub url: String,
    /// Task title.
    pub name: String,
    /// Raw category label as stored (`工作`, `Work`, `個人`, `Personal`, or other).
    pub category: String,
    /// Whether the store's completion checkbox is set.
    pub completed: bool,
}
