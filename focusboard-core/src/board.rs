//! Category bucketing and completion progress for the daily board.
//!
//! Aggregates are derived views: both buckets and every percentage are
//! recomputed from the current task list on each read, never stored.

use crate::task::{Category, TaskRecord};

/// Derived completion numbers for one category bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategorySummary {
    /// Tasks in the bucket.
    pub total: usize,
    /// Tasks in the bucket with the completion checkbox set.
    pub completed: usize,
    /// `round(100 * completed / total)`, 0 for an empty bucket.
    pub percent: u8,
}

impl CategorySummary {
    /// Computes the summary for one bucket.
    #[must_use]
    pub fn of(tasks: &[TaskRecord]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|t| t.completed).count(),
            percent: progress(tasks),
        }
    }
}

/// Today's tasks split into the two rendered buckets.
///
/// Tasks whose label matches neither bucket are absent from both; compare
/// bucket sizes against the source list to detect drops.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    /// Tasks labeled `工作` or `Work`.
    pub work: Vec<TaskRecord>,
    /// Tasks labeled `個人` or `Personal`.
    pub personal: Vec<TaskRecord>,
}

impl Board {
    /// Summary for the Work bucket.
    #[must_use]
    pub fn work_summary(&self) -> CategorySummary {
        CategorySummary::of(&self.work)
    }

    /// Summary for the Personal bucket.
    #[must_use]
    pub fn personal_summary(&self) -> CategorySummary {
        CategorySummary::of(&self.personal)
    }

    /// Number of tasks in either bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.work.len() + self.personal.len()
    }

    /// Whether both buckets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.work.is_empty() && self.personal.is_empty()
    }
}

/// Splits a task list into the Work and Personal buckets, preserving input
/// order within each bucket. Unrecognized labels are dropped.
#[must_use]
pub fn partition(tasks: &[TaskRecord]) -> Board {
    let mut board = Board::default();
    for task in tasks {
        match Category::from_label(&task.category) {
            Some(Category::Work) => board.work.push(task.clone()),
            Some(Category::Personal) => board.personal.push(task.clone()),
            None => {}
        }
    }
    board
}

/// Completion percentage for a bucket, rounded half-up; 0 when empty.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress(tasks: &[TaskRecord]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    // Safe: the ratio is in [0, 1], so the rounded value fits u8.
    ((completed as f64 / tasks.len() as f64) * 100.0).round() as u8
}
