//! The task-feed envelope exchanged between the gateway and the dashboard.
//!
//! One JSON shape on every path: the gateway's live responses, snapshot
//! files written by `--snapshot`, and the built-in fallback used when the
//! gateway cannot be reached.

use serde::{Deserialize, Serialize};

use crate::task::{TaskId, TaskRecord};

/// Error type for feed encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The feed JSON could not be produced or parsed.
    #[error("feed serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON envelope carrying today's tasks.
///
/// `last_updated` is an ISO-8601 timestamp stamped by the gateway at fetch
/// time; it is `None` for the fallback feed and renders as `Unknown` in the
/// dashboard footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFeed {
    /// When the gateway last pulled from the document store.
    pub last_updated: Option<String>,
    /// Today's task records.
    pub tasks: Vec<TaskRecord>,
}

impl TaskFeed {
    /// An empty feed with no sync timestamp.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            last_updated: None,
            tasks: Vec::new(),
        }
    }

    /// The built-in sample feed substituted when the live fetch fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            last_updated: None,
            tasks: fallback_tasks(),
        }
    }
}

/// Fixed sample records for offline use: two Work tasks (one done) and two
/// Personal tasks (none done), so both goal panels render something useful.
#[must_use]
pub fn fallback_tasks() -> Vec<TaskRecord> {
    let sample = |id: &str, name: &str, category: &str, completed: bool| TaskRecord {
        id: TaskId::new(id),
        url: format!("https://example.org/tasks/{id}"),
        name: name.to_string(),
        category: category.to_string(),
        completed,
    };
    vec![
        sample("sample-1", "整理收件匣", "工作", true),
        sample("sample-2", "撰寫週報", "工作", false),
        sample("sample-3", "閱讀三十分鐘", "個人", false),
        sample("sample-4", "傍晚散步", "個人", false),
    ]
}

/// Encodes a feed as compact JSON.
///
/// # Errors
///
/// Returns `FeedError::Serialization` if the feed cannot be serialized.
pub fn to_json(feed: &TaskFeed) -> Result<String, FeedError> {
    Ok(serde_json::to_string(feed)?)
}

/// Encodes a feed as pretty-printed JSON, the format of snapshot files.
///
/// # Errors
///
/// Returns `FeedError::Serialization` if the feed cannot be serialized.
pub fn to_json_pretty(feed: &TaskFeed) -> Result<String, FeedError> {
    Ok(serde_json::to_string_pretty(feed)?)
}

/// Decodes a feed from JSON.
///
/// # Errors
///
/// Returns `FeedError::Serialization` if the input is not a valid feed.
pub fn from_json(json: &str) -> Result<TaskFeed, FeedError> {
    Ok(serde_json::from_str(json)?)
}
