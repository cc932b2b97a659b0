//! Read-only progress queries over the checklist tree and item statuses.
//!
//! None of these treat a missing category, checklist or item as an error; the
//! caller gets `None` or `false` instead.

use super::{Category, ChecklistTree, MenuGroup};
use crate::state::{ItemStateMap, ItemStatus};

/// Statuses of the category's active checklist, in item order.
///
pub fn item_statuses(category: &Category, items: &ItemStateMap) -> Vec<ItemStatus> {
    match category.active_checklist() {
        Some(checklist) => checklist
            .items
            .iter()
            .map(|item| items.status(&category.id, &checklist.id, &item.id))
            .collect(),
        None => vec![],
    }
}

/// Whether every item of the category's active checklist is complete.
/// Returns `None` when the category has no checklist or it has no items.
///
pub fn is_category_complete(category: &Category, items: &ItemStateMap) -> Option<bool> {
    let checklist = category.active_checklist()?;
    if checklist.items.is_empty() {
        return None;
    }
    Some(
        checklist
            .items
            .iter()
            .all(|item| items.status(&category.id, &checklist.id, &item.id).is_complete()),
    )
}

/// Count of (complete, total) items in the category's active checklist.
///
pub fn completion(category: &Category, items: &ItemStateMap) -> (usize, usize) {
    let statuses = item_statuses(category, items);
    let complete = statuses.iter().filter(|s| s.is_complete()).count();
    (complete, statuses.len())
}

/// Index of the first item in the category's active checklist that is not
/// complete.
///
pub fn first_incomplete_item_index(
    category_id: &str,
    tree: &ChecklistTree,
    items: &ItemStateMap,
) -> Option<usize> {
    let category = tree.category(category_id)?;
    let checklist = category.active_checklist()?;
    checklist
        .items
        .iter()
        .position(|item| !items.status(&category.id, &checklist.id, &item.id).is_complete())
}

/// Id of the first category in the group whose checklist is not complete.
///
/// When every category is complete the last category of the group is
/// returned so a finished checklist can be reopened for review. Categories
/// without items are never returned, so a group holding none with items yields
/// `None`.
///
pub fn next_incomplete_category<'a>(
    group: MenuGroup,
    tree: &'a ChecklistTree,
    items: &ItemStateMap,
) -> Option<&'a str> {
    let mut last = None;
    for category in tree.categories_in(group) {
        match is_category_complete(category, items) {
            Some(false) => return Some(category.id.as_str()),
            Some(true) => last = Some(category.id.as_str()),
            None => {}
        }
    }
    last
}

/// Whether another category follows `category_id` within its group.
///
pub fn has_successor(category_id: &str, group: MenuGroup, tree: &ChecklistTree) -> bool {
    successor(category_id, group, tree).is_some()
}

/// The category that follows `category_id` within the group.
///
pub fn successor<'a>(
    category_id: &str,
    group: MenuGroup,
    tree: &'a ChecklistTree,
) -> Option<&'a Category> {
    let mut categories = tree.categories_in(group);
    categories.by_ref().find(|c| c.id == category_id)?;
    categories.next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::fixtures::{category, tree};
    use fake::{Fake, Faker};

    fn check(items: &mut ItemStateMap, category_id: &str, item_ids: &[&str]) {
        for item_id in item_ids {
            items.set_status(category_id, "main", item_id, ItemStatus::Checked);
        }
    }

    #[test]
    fn test_first_incomplete_item_index() {
        let tree = tree();
        let mut items = ItemStateMap::new();
        assert_eq!(first_incomplete_item_index("preflight", &tree, &items), Some(0));

        check(&mut items, "preflight", &["brakes"]);
        assert_eq!(first_incomplete_item_index("preflight", &tree, &items), Some(1));

        items.set_status("preflight", "main", "fuel", ItemStatus::Overridden);
        items.set_status("preflight", "main", "flaps", ItemStatus::CheckedOverridden);
        assert_eq!(first_incomplete_item_index("preflight", &tree, &items), None);
    }

    #[test]
    fn test_first_incomplete_item_index_skips_gaps() {
        let tree = tree();
        let mut items = ItemStateMap::new();
        check(&mut items, "preflight", &["brakes", "flaps"]);
        assert_eq!(first_incomplete_item_index("preflight", &tree, &items), Some(1));
    }

    #[test]
    fn test_first_incomplete_item_index_unknown_or_empty() {
        let tree = ChecklistTree::new(vec![
            category("preflight", MenuGroup::Normal, &["brakes"]),
            category("empty", MenuGroup::Normal, &[]),
            Category {
                id: "bare".to_string(),
                title: "Bare".to_string(),
                group: MenuGroup::NonNormal,
                checklists: vec![],
            },
        ])
        .unwrap();
        let items = ItemStateMap::new();
        let unknown: String = Faker.fake();
        assert_eq!(first_incomplete_item_index(&unknown, &tree, &items), None);
        assert_eq!(first_incomplete_item_index("empty", &tree, &items), None);
        assert_eq!(first_incomplete_item_index("bare", &tree, &items), None);
    }

    #[test]
    fn test_next_incomplete_category() {
        let tree = ChecklistTree::new(vec![
            category("a", MenuGroup::Normal, &["1", "2"]),
            category("fire", MenuGroup::NonNormal, &["1"]),
            category("b", MenuGroup::Normal, &["1"]),
            category("c", MenuGroup::Normal, &["1"]),
        ])
        .unwrap();
        let mut items = ItemStateMap::new();
        assert_eq!(next_incomplete_category(MenuGroup::Normal, &tree, &items), Some("a"));

        check(&mut items, "a", &["1", "2"]);
        assert_eq!(next_incomplete_category(MenuGroup::Normal, &tree, &items), Some("b"));

        check(&mut items, "b", &["1"]);
        check(&mut items, "c", &["1"]);
        assert_eq!(next_incomplete_category(MenuGroup::Normal, &tree, &items), Some("c"));
    }

    #[test]
    fn test_next_incomplete_category_empty_group() {
        let tree = tree();
        let items = ItemStateMap::new();
        assert_eq!(next_incomplete_category(MenuGroup::Resets, &tree, &items), None);
    }

    #[test]
    fn test_next_incomplete_category_skips_empty_checklists() {
        let tree = ChecklistTree::new(vec![
            category("a", MenuGroup::Normal, &["1"]),
            category("empty", MenuGroup::Normal, &[]),
            category("c", MenuGroup::Normal, &["1"]),
        ])
        .unwrap();
        let mut items = ItemStateMap::new();
        check(&mut items, "a", &["1"]);
        assert_eq!(next_incomplete_category(MenuGroup::Normal, &tree, &items), Some("c"));
    }

    #[test]
    fn test_next_incomplete_category_never_returns_bare_category() {
        let bare = Category {
            id: "bare".to_string(),
            title: "Bare".to_string(),
            group: MenuGroup::Normal,
            checklists: vec![],
        };
        let tree = ChecklistTree::new(vec![
            category("a", MenuGroup::Normal, &["1"]),
            bare,
            category("empty", MenuGroup::Normal, &[]),
        ])
        .unwrap();
        let mut items = ItemStateMap::new();
        check(&mut items, "a", &["1"]);
        assert_eq!(next_incomplete_category(MenuGroup::Normal, &tree, &items), Some("a"));

        let tree = ChecklistTree::new(vec![category("empty", MenuGroup::Normal, &[])]).unwrap();
        assert_eq!(next_incomplete_category(MenuGroup::Normal, &tree, &items), None);
    }

    #[test]
    fn test_has_successor() {
        let tree = tree();
        assert!(has_successor("preflight", MenuGroup::Normal, &tree));
        assert!(!has_successor("taxi", MenuGroup::Normal, &tree));
        assert!(!has_successor("engine-fire", MenuGroup::NonNormal, &tree));
        assert!(!has_successor("engine-fire", MenuGroup::Normal, &tree));
        assert!(!has_successor("missing", MenuGroup::Normal, &tree));
        assert_eq!(
            successor("preflight", MenuGroup::Normal, &tree).map(|c| c.id.as_str()),
            Some("taxi")
        );
    }

    #[test]
    fn test_completion() {
        let tree = tree();
        let mut items = ItemStateMap::new();
        let preflight = tree.category("preflight").unwrap();
        assert_eq!(completion(preflight, &items), (0, 3));
        assert_eq!(is_category_complete(preflight, &items), Some(false));

        check(&mut items, "preflight", &["brakes", "fuel", "flaps"]);
        assert_eq!(completion(preflight, &items), (3, 3));
        assert_eq!(is_category_complete(preflight, &items), Some(true));
    }

    #[test]
    fn test_fresh_start_toggle_advances_focus() {
        let tree = tree();
        let mut items = ItemStateMap::new();
        let first = next_incomplete_category(MenuGroup::Normal, &tree, &items).unwrap();
        assert_eq!(first, "preflight");
        assert_eq!(first_incomplete_item_index(first, &tree, &items), Some(0));

        let status = items.apply(
            crate::state::TransitionTable::standard(),
            "preflight",
            "main",
            "brakes",
            crate::state::Action::Toggle,
        );
        assert_eq!(status, ItemStatus::Checked);
        assert_eq!(first_incomplete_item_index("preflight", &tree, &items), Some(1));

        items.apply(
            crate::state::TransitionTable::standard(),
            "taxi",
            "main",
            "lights",
            crate::state::Action::Toggle,
        );
        assert_eq!(first_incomplete_item_index("taxi", &tree, &items), None);
    }
}
