//! Per-item status map.
//!
//! Items the user never touched are absent and read back as
//! [`ItemStatus::Unchecked`].

use super::status::{Action, ItemStatus, TransitionTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type ChecklistStatuses = BTreeMap<String, ItemStatus>;
type CategoryStatuses = BTreeMap<String, ChecklistStatuses>;

/// Three-level mapping: category id -> checklist id -> item id -> status.
///
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemStateMap {
    categories: BTreeMap<String, CategoryStatuses>,
}

impl ItemStateMap {
    pub fn new() -> Self {
        ItemStateMap::default()
    }

    /// Return the recorded status, defaulting to unchecked.
    ///
    pub fn status(&self, category_id: &str, checklist_id: &str, item_id: &str) -> ItemStatus {
        self.categories
            .get(category_id)
            .and_then(|checklists| checklists.get(checklist_id))
            .and_then(|items| items.get(item_id))
            .copied()
            .unwrap_or_default()
    }

    /// Record a status for an item.
    ///
    pub fn set_status(
        &mut self,
        category_id: &str,
        checklist_id: &str,
        item_id: &str,
        status: ItemStatus,
    ) -> &mut Self {
        self.categories
            .entry(category_id.to_owned())
            .or_default()
            .entry(checklist_id.to_owned())
            .or_default()
            .insert(item_id.to_owned(), status);
        self
    }

    /// Apply an action to an item through the given table and return the
    /// resulting status.
    ///
    pub fn apply(
        &mut self,
        table: &TransitionTable,
        category_id: &str,
        checklist_id: &str,
        item_id: &str,
        action: Action,
    ) -> ItemStatus {
        let next = table.transition(self.status(category_id, checklist_id, item_id), action);
        self.set_status(category_id, checklist_id, item_id, next);
        next
    }

    /// Forget every status recorded for one checklist.
    ///
    pub fn reset_checklist(&mut self, category_id: &str, checklist_id: &str) -> &mut Self {
        if let Some(checklists) = self.categories.get_mut(category_id) {
            checklists.remove(checklist_id);
            if checklists.is_empty() {
                self.categories.remove(category_id);
            }
        }
        self
    }

    /// Forget every status recorded under the given categories.
    ///
    pub fn reset_categories<'a, I>(&mut self, category_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for category_id in category_ids {
            self.categories.remove(category_id);
        }
        self
    }

    /// Forget everything.
    ///
    pub fn clear(&mut self) -> &mut Self {
        self.categories.clear();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of item entries recorded, whatever their status.
    ///
    pub fn len(&self) -> usize {
        self.categories
            .values()
            .flat_map(|checklists| checklists.values())
            .map(|items| items.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn test_absent_item_is_unchecked() {
        let map = ItemStateMap::new();
        let id: String = Faker.fake();
        assert_eq!(map.status(&id, &id, &id), ItemStatus::Unchecked);
    }

    #[test]
    fn test_apply_uses_table() {
        let mut map = ItemStateMap::new();
        let table = TransitionTable::standard();
        assert_eq!(
            map.apply(table, "pre", "main", "brakes", Action::Toggle),
            ItemStatus::Checked
        );
        assert_eq!(map.status("pre", "main", "brakes"), ItemStatus::Checked);
        assert_eq!(
            map.apply(table, "pre", "main", "brakes", Action::Override),
            ItemStatus::CheckedOverridden
        );
    }

    #[test]
    fn test_reset_checklist() {
        let mut map = ItemStateMap::new();
        map.set_status("pre", "main", "a", ItemStatus::Checked)
            .set_status("pre", "alt", "a", ItemStatus::Checked)
            .set_status("taxi", "main", "a", ItemStatus::Overridden);

        map.reset_checklist("pre", "main");
        assert_eq!(map.status("pre", "main", "a"), ItemStatus::Unchecked);
        assert_eq!(map.status("pre", "alt", "a"), ItemStatus::Checked);
        assert_eq!(map.len(), 2);

        map.reset_checklist("pre", "alt");
        assert_eq!(map.len(), 1);
        map.reset_checklist("missing", "main");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_reset_categories_and_clear() {
        let mut map = ItemStateMap::new();
        map.set_status("pre", "main", "a", ItemStatus::Checked)
            .set_status("taxi", "main", "a", ItemStatus::Checked)
            .set_status("fire", "main", "a", ItemStatus::Overridden);

        map.reset_categories(["pre", "taxi"]);
        assert_eq!(map.status("pre", "main", "a"), ItemStatus::Unchecked);
        assert_eq!(map.status("fire", "main", "a"), ItemStatus::Overridden);

        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_serializes_as_nested_objects() {
        let mut map = ItemStateMap::new();
        map.set_status("pre", "main", "a", ItemStatus::CheckedOverridden);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["pre"]["main"]["a"], "checked-overridden");
        let back: ItemStateMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
