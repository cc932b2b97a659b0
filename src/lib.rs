//! Terminal electronic checklist.
//!
//! Checklists are grouped into normal and non-normal categories. Every item
//! carries a status that moves through a fixed transition table, statuses are
//! persisted between runs, and a router decides which screen shows the
//! current view.

pub mod app;
pub mod checklist;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod store;
pub mod ui;
