//! Event handling module.
//!
//! This module contains the terminal event handler: user input polled on a
//! separate thread and mapped to actions of the current screen.

pub mod terminal;
