//! Shared task-board model for Focusboard.
//!
//! Task records mirrored from the external document store, the category
//! aggregation behind the dashboard's two goal panels, the focus-timer
//! state machine, and the JSON feed envelope exchanged with the gateway.

pub mod board;
pub mod feed;
pub mod task;
pub mod timer;
