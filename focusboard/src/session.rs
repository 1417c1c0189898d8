//! Focus-session bookkeeping.
//!
//! Defines the [`CompletionLedger`] port for the per-task session counter,
//! plus [`SessionTracker`] which applies timer completion events to any
//! ledger. Counter writes are best-effort: a failed save is logged and the
//! in-memory count keeps advancing, so the timer is never disrupted. The
//! matching annotation write to the gateway lives in the network layer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use focusboard_core::task::TaskId;
use focusboard_core::timer::CompletionEvent;

/// Errors from ledger storage operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The ledger file could not be read.
    #[error("failed to read ledger {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The ledger file could not be written.
    #[error("failed to write ledger {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The ledger file held something other than a JSON count map.
    #[error("ledger is not a valid count map: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Port for the per-task completion counter.
///
/// Mirrors the keyed get/set shape of the browser-local store the counts
/// originally lived in. Implementations: [`FileLedger`] for real runs,
/// [`MemoryLedger`] for tests and as a fallback when no data directory is
/// available.
pub trait CompletionLedger: Send {
    /// Completed-session count for a task. Unknown tasks count 0.
    fn get(&self, task: &TaskId) -> u32;

    /// Stores the count for a task.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the count could not be persisted.
    fn set(&mut self, task: &TaskId, count: u32) -> Result<(), LedgerError>;
}

/// In-memory ledger. Counts reset when the process exits.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    counts: HashMap<String, u32>,
}

impl CompletionLedger for MemoryLedger {
    fn get(&self, task: &TaskId) -> u32 {
        self.counts.get(task.as_str()).copied().unwrap_or(0)
    }

    fn set(&mut self, task: &TaskId, count: u32) -> Result<(), LedgerError> {
        self.counts.insert(task.as_str().to_string(), count);
        Ok(())
    }
}

/// File-backed ledger: a JSON object mapping task id to count.
///
/// The whole map is rewritten on every set; session completions are rare
/// enough that this never matters.
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    counts: HashMap<String, u32>,
}

impl FileLedger {
    /// Loads the ledger at `path`, starting empty if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the file exists but cannot be read or is
    /// not a JSON count map.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let counts = match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(LedgerError::Read {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            counts,
        })
    }

    fn persist(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LedgerError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.counts)?;
        std::fs::write(&self.path, json).map_err(|source| LedgerError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl CompletionLedger for FileLedger {
    fn get(&self, task: &TaskId) -> u32 {
        self.counts.get(task.as_str()).copied().unwrap_or(0)
    }

    fn set(&mut self, task: &TaskId, count: u32) -> Result<(), LedgerError> {
        self.counts.insert(task.as_str().to_string(), count);
        self.persist()
    }
}

/// Applies timer completion events to a ledger.
pub struct SessionTracker {
    ledger: Box<dyn CompletionLedger>,
}

impl SessionTracker {
    /// Wraps a ledger implementation.
    #[must_use]
    pub fn new(ledger: Box<dyn CompletionLedger>) -> Self {
        Self { ledger }
    }

    /// Completed-session count for a task.
    #[must_use]
    pub fn count_for(&self, task: &TaskId) -> u32 {
        self.ledger.get(task)
    }

    /// Records a completion event, returning the task's new count.
    ///
    /// Events without a focused task have nothing to count and return
    /// `None`. A ledger write failure is logged and the updated count is
    /// still returned; only persistence is lost.
    pub fn record(&mut self, event: &CompletionEvent) -> Option<u32> {
        let task = event.task.as_ref()?;
        let next = self.ledger.get(task) + 1;
        if let Err(err) = self.ledger.set(task, next) {
            tracing::warn!(task_id = %task, error = %err, "session count not persisted");
        }
        Some(next)
    }
}

impl std::fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTracker").finish_non_exhaustive()
    }
}
