//! Focusboard gateway library.
//!
//! Exposes the HTTP server and document-store client for use in tests and
//! embedding. The gateway sits between the terminal dashboard and the
//! external document store: it serves today's task feed and appends
//! session annotations to task pages.

pub mod config;
pub mod server;
pub mod store;
