//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Routing the current view to a screen and its inputs
//! - Terminal rendering and layout
//! - Theme management
//! - Widget styling helpers

type Frame<'a> = ratatui::Frame<'a>;

mod render;
pub mod router;
mod theme;
mod widgets;

pub use render::render;
pub use router::{
    AppContext, ChecklistInputs, HomeInputs, MenuInputs, Registry, Resolved, ResetsInputs, Router,
    ScreenInputs, ScreenKind, ViewKey,
};
pub use theme::{ColorSpec, Theme};
