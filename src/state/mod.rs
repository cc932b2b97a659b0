//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Item statuses and the transition table that moves them
//! - Navigation types (ViewMode, CurrentView)
//! - Messages sent by screen callbacks and the dispatcher that queues them
//! - Main `State` struct that applies those messages

mod items;
mod message;
mod navigation;
mod status;

pub use items::ItemStateMap;
pub use message::{Callback, CategoryCallback, Dispatcher, ItemCallback, Message};
pub use navigation::{CurrentView, ViewMode};
pub use status::{transition, Action, ItemStatus, TransitionTable};

// State struct and its message handling are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
