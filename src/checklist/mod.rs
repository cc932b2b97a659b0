//! Static checklist definitions.
//!
//! This module holds the immutable checklist tree the application works
//! through:
//! - Menu groups and the subset of groups that own checklist bodies
//! - Categories, checklists and items
//! - Loading and validating a tree from YAML
//! - Progress queries over the tree and the current item statuses

mod error;
pub mod progress;

pub use error::ChecklistError;
pub use progress::{first_incomplete_item_index, has_successor, next_incomplete_category};

use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

const DEFAULT_CHECKLISTS: &str = include_str!("../../data/checklists.yml");

/// Top-level menu groups.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuGroup {
    Normal,
    NonNormal,
    Resets,
}

impl MenuGroup {
    pub const ALL: [MenuGroup; 3] = [MenuGroup::Normal, MenuGroup::NonNormal, MenuGroup::Resets];

    /// Identifier used in view keys and config files.
    ///
    pub fn id(&self) -> &'static str {
        match self {
            MenuGroup::Normal => "normal",
            MenuGroup::NonNormal => "non-normal",
            MenuGroup::Resets => "resets",
        }
    }

    /// Human readable name for titles.
    ///
    pub fn title(&self) -> &'static str {
        match self {
            MenuGroup::Normal => "Normal",
            MenuGroup::NonNormal => "Non-Normal",
            MenuGroup::Resets => "Resets",
        }
    }
}

impl fmt::Display for MenuGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Menu groups whose categories have a checklist body. The reset-only group
/// has no counterpart here.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ChecklistGroup {
    Normal,
    NonNormal,
}

impl From<ChecklistGroup> for MenuGroup {
    fn from(group: ChecklistGroup) -> Self {
        match group {
            ChecklistGroup::Normal => MenuGroup::Normal,
            ChecklistGroup::NonNormal => MenuGroup::NonNormal,
        }
    }
}

impl TryFrom<MenuGroup> for ChecklistGroup {
    type Error = MenuGroup;

    fn try_from(group: MenuGroup) -> Result<Self, Self::Error> {
        match group {
            MenuGroup::Normal => Ok(ChecklistGroup::Normal),
            MenuGroup::NonNormal => Ok(ChecklistGroup::NonNormal),
            MenuGroup::Resets => Err(group),
        }
    }
}

impl fmt::Display for ChecklistGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        MenuGroup::from(*self).fmt(f)
    }
}

/// A single line of a checklist.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub challenge: String,
    #[serde(default)]
    pub response: String,
}

/// An ordered list of items.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A named entry in one of the menus, owning its checklists.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub group: MenuGroup,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
}

impl Category {
    /// The checklist shown when the category is opened.
    ///
    pub fn active_checklist(&self) -> Option<&Checklist> {
        self.checklists.first()
    }
}

/// The full, immutable checklist definition.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTree {
    categories: Vec<Category>,
}

impl ChecklistTree {
    /// Build a tree from categories, validating identifiers.
    ///
    pub fn new(categories: Vec<Category>) -> Result<Self, ChecklistError> {
        let tree = ChecklistTree { categories };
        tree.validate()?;
        Ok(tree)
    }

    /// Parse a tree from its YAML definition.
    ///
    pub fn from_yaml(contents: &str) -> Result<Self, ChecklistError> {
        let tree: ChecklistTree = serde_yaml::from_str(contents)
            .map_err(|e| ChecklistError::ParseFailed(e.to_string()))?;
        tree.validate()?;
        Ok(tree)
    }

    /// Load the tree from the given file, or the built-in definition when no
    /// path is provided.
    ///
    pub fn load(path: Option<&Path>) -> Result<Self, ChecklistError> {
        match path {
            Some(path) => {
                debug!("Loading checklists from {}...", path.display());
                let contents =
                    fs::read_to_string(path).map_err(|e| ChecklistError::ReadFailed {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
                ChecklistTree::from_yaml(&contents)
            }
            None => {
                debug!("Loading built-in checklists...");
                ChecklistTree::from_yaml(DEFAULT_CHECKLISTS)
            }
        }
    }

    /// Return all categories in definition order.
    ///
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Return the category with the given id.
    ///
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Return the categories of a group, preserving definition order.
    ///
    pub fn categories_in(&self, group: MenuGroup) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.group == group)
    }

    /// Return the ids of all categories in a group.
    ///
    pub fn category_ids_in(&self, group: MenuGroup) -> Vec<&str> {
        self.categories_in(group).map(|c| c.id.as_str()).collect()
    }

    fn validate(&self) -> Result<(), ChecklistError> {
        if self.categories.is_empty() {
            return Err(ChecklistError::NoCategories);
        }
        check_unique(self.categories.iter().map(|c| c.id.as_str()), "checklist tree")?;
        for category in &self.categories {
            if category.group == MenuGroup::Resets && !category.checklists.is_empty() {
                return Err(ChecklistError::UnreachableCategory {
                    id: category.id.clone(),
                });
            }
            let parent = format!("category '{}'", category.id);
            check_unique(category.checklists.iter().map(|c| c.id.as_str()), &parent)?;
            for checklist in &category.checklists {
                let parent = format!("checklist '{}/{}'", category.id, checklist.id);
                check_unique(checklist.items.iter().map(|i| i.id.as_str()), &parent)?;
            }
        }
        Ok(())
    }
}

fn check_unique<'a, I>(ids: I, parent: &str) -> Result<(), ChecklistError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(ChecklistError::EmptyId {
                parent: parent.to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(ChecklistError::DuplicateId {
                id: id.to_string(),
                parent: parent.to_string(),
            });
        }
    }
    Ok(())
}
