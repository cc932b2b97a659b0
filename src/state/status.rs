//! Item status vocabulary and the transition table driving it.
//!
//! Every change to an item's status goes through [`TransitionTable`]. The
//! standard table is total over all status/action pairs, so a lookup miss can
//! only come from a hand-built partial table.

use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Completion state of a single checklist item.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    #[default]
    Unchecked,
    Checked,
    Overridden,
    CheckedOverridden,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Unchecked,
        ItemStatus::Checked,
        ItemStatus::Overridden,
        ItemStatus::CheckedOverridden,
    ];

    /// Whether the item counts as done for navigation purposes.
    ///
    pub fn is_complete(self) -> bool {
        !matches!(self, ItemStatus::Unchecked)
    }

    /// Whether the item carries an override.
    ///
    pub fn is_overridden(self) -> bool {
        matches!(self, ItemStatus::Overridden | ItemStatus::CheckedOverridden)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemStatus::Unchecked => "unchecked",
            ItemStatus::Checked => "checked",
            ItemStatus::Overridden => "overridden",
            ItemStatus::CheckedOverridden => "checked-overridden",
        };
        f.write_str(name)
    }
}

/// User actions that can be applied to an item.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Toggle,
    Override,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Toggle, Action::Override];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Toggle => f.write_str("toggle"),
            Action::Override => f.write_str("override"),
        }
    }
}

const STANDARD_TRANSITIONS: [(ItemStatus, Action, ItemStatus); 8] = [
    (ItemStatus::Unchecked, Action::Toggle, ItemStatus::Checked),
    (ItemStatus::Unchecked, Action::Override, ItemStatus::Overridden),
    (ItemStatus::Checked, Action::Toggle, ItemStatus::Unchecked),
    (ItemStatus::Checked, Action::Override, ItemStatus::CheckedOverridden),
    (ItemStatus::Overridden, Action::Toggle, ItemStatus::Unchecked),
    (ItemStatus::Overridden, Action::Override, ItemStatus::Unchecked),
    (ItemStatus::CheckedOverridden, Action::Toggle, ItemStatus::Unchecked),
    (ItemStatus::CheckedOverridden, Action::Override, ItemStatus::Unchecked),
];

/// Immutable lookup from (status, action) to the next status.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    entries: HashMap<(ItemStatus, Action), ItemStatus>,
}

impl TransitionTable {
    /// Build a table from explicit entries. Later entries win on duplicates.
    ///
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ItemStatus, Action, ItemStatus)>,
    {
        TransitionTable {
            entries: entries
                .into_iter()
                .map(|(from, action, to)| ((from, action), to))
                .collect(),
        }
    }

    /// The table every checklist item follows.
    ///
    pub fn standard() -> &'static TransitionTable {
        static STANDARD: OnceLock<TransitionTable> = OnceLock::new();
        STANDARD.get_or_init(|| TransitionTable::from_entries(STANDARD_TRANSITIONS))
    }

    /// True when every status has an entry for every action.
    ///
    pub fn is_exhaustive(&self) -> bool {
        ItemStatus::ALL.iter().all(|status| {
            Action::ALL
                .iter()
                .all(|action| self.entries.contains_key(&(*status, *action)))
        })
    }

    /// Return the status that follows `status` under `action`.
    ///
    /// A missing entry panics in debug builds. Release builds report it and
    /// leave the status unchanged.
    ///
    pub fn transition(&self, status: ItemStatus, action: Action) -> ItemStatus {
        match self.entries.get(&(status, action)) {
            Some(next) => *next,
            None => {
                if cfg!(debug_assertions) {
                    panic!("no transition for status '{}' under '{}'", status, action);
                }
                error!(
                    "Transition table has no entry for status '{}' under '{}', leaving it unchanged",
                    status, action
                );
                status
            }
        }
    }
}

/// Apply `action` to `status` using the standard table.
///
pub fn transition(status: ItemStatus, action: Action) -> ItemStatus {
    TransitionTable::standard().transition(status, action)
}
