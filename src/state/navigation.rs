//! Navigation-related state types.
//!
//! This module contains the view mode, the derived current view and the rule
//! that turns one into the other.

use crate::checklist::{ChecklistGroup, MenuGroup};

/// Specifying what kind of screen the user asked for.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ViewMode {
    #[default]
    Default,
    Menu,
    Checklist,
}

/// Specifying the screen currently shown.
///
/// A checklist view can only name a group that owns checklist bodies, so the
/// reset-only group never pairs with it.
///
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum CurrentView {
    #[default]
    Default,
    Menu(MenuGroup),
    Checklist(ChecklistGroup),
}

impl CurrentView {
    /// Derive the current view from the active menu and view mode.
    ///
    pub fn derive(active_menu: Option<MenuGroup>, mode: ViewMode) -> CurrentView {
        match (mode, active_menu) {
            (ViewMode::Default, _) => CurrentView::Default,
            (ViewMode::Menu, Some(group)) => CurrentView::Menu(group),
            (ViewMode::Checklist, Some(group)) => ChecklistGroup::try_from(group)
                .map(CurrentView::Checklist)
                .unwrap_or(CurrentView::Default),
            (ViewMode::Menu | ViewMode::Checklist, None) => CurrentView::Default,
        }
    }

    /// The menu group the view belongs to, if any.
    ///
    pub fn group(&self) -> Option<MenuGroup> {
        match self {
            CurrentView::Default => None,
            CurrentView::Menu(group) => Some(*group),
            CurrentView::Checklist(group) => Some((*group).into()),
        }
    }
}
