//! Focusboard — terminal daily-task dashboard library.

pub mod app;
pub mod clock;
pub mod config;
pub mod net;
pub mod session;
pub mod ui;
