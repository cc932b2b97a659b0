use crate::checklist::progress::{
    first_incomplete_item_index, next_incomplete_category, successor,
};
use crate::checklist::{Category, ChecklistTree, MenuGroup};
use crate::config::Hotkeys;
use crate::logger::LogBuffer;
use crate::store::ItemStore;
use crate::ui::{AppContext, Theme};
use log::*;
use std::sync::mpsc::Receiver;

use super::items::ItemStateMap;
use super::message::{Dispatcher, Message};
use super::navigation::{CurrentView, ViewMode};
use super::status::{Action, ItemStatus, TransitionTable};

/// Houses data representative of application state.
///
pub struct State {
    tree: ChecklistTree,
    items: ItemStateMap,
    table: TransitionTable,
    store: Box<dyn ItemStore>,
    dispatcher: Dispatcher,
    messages: Receiver<Message>,
    active_menu: Option<MenuGroup>,
    view_mode: ViewMode,
    current_view: CurrentView,
    active_category: Option<String>,
    focused_item: Option<usize>,
    menu_cursor: usize,
    resume_on_enter: bool,
    log_visible: bool,
    log: LogBuffer,
    theme: Theme,
    hotkeys: Hotkeys,
}

impl State {
    /// Return a new state for the given tree, seeded from the store.
    ///
    pub fn new(tree: ChecklistTree, store: Box<dyn ItemStore>) -> Self {
        let items = store.load().unwrap_or_default();
        let (dispatcher, messages) = Dispatcher::channel();
        State {
            tree,
            items,
            table: TransitionTable::standard().clone(),
            store,
            dispatcher,
            messages,
            active_menu: None,
            view_mode: ViewMode::Default,
            current_view: CurrentView::Default,
            active_category: None,
            focused_item: None,
            menu_cursor: 0,
            resume_on_enter: false,
            log_visible: false,
            log: LogBuffer::new(),
            theme: Theme::default(),
            hotkeys: Hotkeys::default(),
        }
    }

    /// Jump straight to the next incomplete checklist when the normal menu is
    /// opened.
    ///
    pub fn with_resume_on_enter(mut self, resume_on_enter: bool) -> Self {
        self.resume_on_enter = resume_on_enter;
        self
    }

    /// Share the buffer the logger writes into.
    ///
    pub fn with_log(mut self, log: LogBuffer) -> Self {
        self.log = log;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_hotkeys(mut self, hotkeys: Hotkeys) -> Self {
        self.hotkeys = hotkeys;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn hotkeys(&self) -> &Hotkeys {
        &self.hotkeys
    }

    pub fn tree(&self) -> &ChecklistTree {
        &self.tree
    }

    pub fn items(&self) -> &ItemStateMap {
        &self.items
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn active_menu(&self) -> Option<MenuGroup> {
        self.active_menu
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Return the view derived from the active menu and view mode.
    ///
    pub fn current_view(&self) -> CurrentView {
        self.current_view
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.tree.category(self.active_category.as_deref()?)
    }

    pub fn focused_item(&self) -> Option<usize> {
        self.focused_item
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }

    /// Borrow everything the router needs to build screen inputs.
    ///
    pub fn context(&self) -> AppContext<'_> {
        AppContext {
            tree: &self.tree,
            items: &self.items,
            active_category: self.active_category.as_deref(),
            focused_item: self.focused_item,
            menu_cursor: self.menu_cursor,
            dispatcher: &self.dispatcher,
        }
    }

    /// Set the active menu and view mode, re-deriving the current view.
    ///
    fn set_navigation(&mut self, active_menu: Option<MenuGroup>, view_mode: ViewMode) {
        self.active_menu = active_menu;
        self.view_mode = view_mode;
        self.current_view = CurrentView::derive(active_menu, view_mode);
        debug!("Current view is now {:?}", self.current_view);
    }

    /// Move the cursor of the current screen down, wrapping around.
    ///
    pub fn next_cursor(&mut self) -> &mut Self {
        match self.current_view {
            CurrentView::Menu(group) => {
                let count = self.tree.categories_in(group).count();
                if count > 0 {
                    self.menu_cursor = (self.menu_cursor + 1) % count;
                }
            }
            CurrentView::Checklist(_) => {
                let count = self.active_item_count();
                if count > 0 {
                    self.focused_item = Some(match self.focused_item {
                        Some(index) if index + 1 < count => index + 1,
                        Some(_) => 0,
                        None => 0,
                    });
                }
            }
            CurrentView::Default => {}
        }
        self
    }

    /// Move the cursor of the current screen up, wrapping around.
    ///
    pub fn previous_cursor(&mut self) -> &mut Self {
        match self.current_view {
            CurrentView::Menu(group) => {
                let count = self.tree.categories_in(group).count();
                if count > 0 {
                    self.menu_cursor = if self.menu_cursor == 0 {
                        count - 1
                    } else {
                        (self.menu_cursor - 1).min(count - 1)
                    };
                }
            }
            CurrentView::Checklist(_) => {
                let count = self.active_item_count();
                if count > 0 {
                    self.focused_item = Some(match self.focused_item {
                        Some(index) if index > 0 => (index - 1).min(count - 1),
                        _ => count - 1,
                    });
                }
            }
            CurrentView::Default => {}
        }
        self
    }

    fn active_item_count(&self) -> usize {
        self.active_category()
            .and_then(|c| c.active_checklist())
            .map_or(0, |l| l.items.len())
    }

    /// Apply every message queued by screen callbacks, in order. Returns the
    /// number of messages applied.
    ///
    pub fn process_messages(&mut self) -> usize {
        let messages: Vec<Message> = self.messages.try_iter().collect();
        let count = messages.len();
        for message in messages {
            self.apply(message);
        }
        count
    }

    /// Apply a single message.
    ///
    pub fn apply(&mut self, message: Message) -> &mut Self {
        debug!("Applying {:?}", message);
        match message {
            Message::OpenMenu(group) => self.open_menu(group),
            Message::OpenChecklist(category_id) => self.open_checklist(&category_id),
            Message::ResumeGroup(group) => self.resume_group(group),
            Message::ApplyAction { index, action } => {
                self.update_active_checklist(|table, items, category_id, checklist_id, item_ids| {
                    if let Some(item_id) = item_ids.get(index) {
                        let status = items.apply(table, category_id, checklist_id, item_id, action);
                        info!("{}/{} is now {}", category_id, item_id, status);
                    } else {
                        warn!("Ignoring {} on missing item index {}", action, index);
                    }
                });
            }
            Message::OverrideAll => {
                self.update_active_checklist(|table, items, category_id, checklist_id, item_ids| {
                    for item_id in item_ids {
                        let status = items.status(category_id, checklist_id, item_id);
                        if !status.is_overridden() {
                            items.apply(table, category_id, checklist_id, item_id, Action::Override);
                        }
                    }
                    info!("Overrode all items of {}", category_id);
                });
            }
            Message::ResetChecklist => {
                self.update_active_checklist(|_, items, category_id, checklist_id, _| {
                    items.reset_checklist(category_id, checklist_id);
                    info!("Reset checklist {}", category_id);
                });
            }
            Message::NextChecklist => self.next_checklist(),
            Message::ResetGroup(group) => {
                let ids: Vec<String> = self
                    .tree
                    .category_ids_in(group)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                self.items.reset_categories(ids.iter().map(String::as_str));
                info!("Reset all {} checklists", group);
                self.persist();
            }
            Message::ResetAll => {
                self.items.clear();
                info!("Reset all checklists");
                if !self.store.clear() {
                    warn!("Saved statuses could not be cleared");
                }
            }
            Message::Back => self.back(),
        }
        self
    }

    fn open_menu(&mut self, group: MenuGroup) {
        if group == MenuGroup::Normal && self.resume_on_enter {
            self.resume_group(group);
            return;
        }
        self.menu_cursor = 0;
        self.set_navigation(Some(group), ViewMode::Menu);
    }

    fn open_checklist(&mut self, category_id: &str) {
        let group = match self.tree.category(category_id) {
            Some(category) => category.group,
            None => {
                warn!("Cannot open unknown category '{}'", category_id);
                return;
            }
        };
        if let Some(index) = self
            .tree
            .categories_in(group)
            .position(|c| c.id == category_id)
        {
            self.menu_cursor = index;
        }
        self.active_category = Some(category_id.to_string());
        self.focused_item = first_incomplete_item_index(category_id, &self.tree, &self.items);
        self.set_navigation(Some(group), ViewMode::Checklist);
    }

    fn resume_group(&mut self, group: MenuGroup) {
        match next_incomplete_category(group, &self.tree, &self.items).map(str::to_string) {
            Some(category_id) => self.open_checklist(&category_id),
            None => {
                self.menu_cursor = 0;
                self.set_navigation(Some(group), ViewMode::Menu);
            }
        }
    }

    fn next_checklist(&mut self) {
        let next = self.active_category().and_then(|category| {
            successor(&category.id, category.group, &self.tree).map(|c| c.id.clone())
        });
        match next {
            Some(category_id) => self.open_checklist(&category_id),
            None => debug!("No checklist follows the current one"),
        }
    }

    fn back(&mut self) {
        match self.view_mode {
            ViewMode::Checklist => {
                self.active_category = None;
                self.focused_item = None;
                self.set_navigation(self.active_menu, ViewMode::Menu);
            }
            ViewMode::Menu | ViewMode::Default => {
                self.set_navigation(None, ViewMode::Default);
            }
        }
    }

    /// Run `update` against the open checklist's statuses, then refocus the
    /// first incomplete item and persist. The refocus sees the updated map.
    ///
    fn update_active_checklist<F>(&mut self, update: F)
    where
        F: FnOnce(&TransitionTable, &mut ItemStateMap, &str, &str, &[String]),
    {
        let Some(category) = self.active_category() else {
            warn!("No checklist is open");
            return;
        };
        let Some(checklist) = category.active_checklist() else {
            warn!("Category {} has no checklist", category.id);
            return;
        };
        let category_id = category.id.clone();
        let checklist_id = checklist.id.clone();
        let item_ids: Vec<String> = checklist.items.iter().map(|i| i.id.clone()).collect();

        update(
            &self.table,
            &mut self.items,
            &category_id,
            &checklist_id,
            &item_ids,
        );
        self.focused_item = first_incomplete_item_index(&category_id, &self.tree, &self.items);
        self.persist();
    }

    fn persist(&mut self) {
        if !self.store.save(&self.items) {
            warn!("Item statuses were not saved");
        }
    }

    /// Return the status of an item in the open checklist.
    ///
    pub fn active_item_status(&self, index: usize) -> Option<ItemStatus> {
        let category = self.active_category()?;
        let checklist = category.active_checklist()?;
        let item = checklist.items.get(index)?;
        Some(self.items.status(&category.id, &checklist.id, &item.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::fixtures::tree;
    use crate::checklist::ChecklistGroup;
    use crate::store::MemoryStore;

    fn state() -> (State, MemoryStore) {
        let store = MemoryStore::new();
        (State::new(tree(), Box::new(store.clone())), store)
    }

    fn act(state: &mut State, index: usize, action: Action) {
        state.apply(Message::ApplyAction { index, action });
    }

    #[test]
    fn test_new_state_is_default_view() {
        let (state, _) = state();
        assert_eq!(state.current_view(), CurrentView::Default);
        assert_eq!(state.active_menu(), None);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_new_state_loads_store() {
        let mut items = ItemStateMap::new();
        items.set_status("preflight", "main", "brakes", ItemStatus::Checked);
        let state = State::new(tree(), Box::new(MemoryStore::with_items(items.clone())));
        assert_eq!(state.items(), &items);
    }

    #[test]
    fn test_fresh_start_scenario() {
        let (mut state, store) = state();
        state.apply(Message::OpenMenu(MenuGroup::Normal));
        assert_eq!(state.current_view(), CurrentView::Menu(MenuGroup::Normal));

        state.apply(Message::OpenChecklist("preflight".to_string()));
        assert_eq!(
            state.current_view(),
            CurrentView::Checklist(ChecklistGroup::Normal)
        );
        assert_eq!(state.focused_item(), Some(0));

        act(&mut state, 0, Action::Toggle);
        assert_eq!(state.active_item_status(0), Some(ItemStatus::Checked));
        assert_eq!(state.focused_item(), Some(1));
        assert_eq!(
            store.saved().unwrap().status("preflight", "main", "brakes"),
            ItemStatus::Checked
        );
    }

    #[test]
    fn test_single_item_checklist_completes() {
        let (mut state, _) = state();
        state.apply(Message::OpenChecklist("taxi".to_string()));
        act(&mut state, 0, Action::Toggle);
        assert_eq!(state.focused_item(), None);
    }

    #[test]
    fn test_override_then_toggle_clears() {
        let (mut state, _) = state();
        state.apply(Message::OpenChecklist("preflight".to_string()));
        act(&mut state, 0, Action::Override);
        assert_eq!(state.active_item_status(0), Some(ItemStatus::Overridden));
        act(&mut state, 0, Action::Toggle);
        assert_eq!(state.active_item_status(0), Some(ItemStatus::Unchecked));
        assert_eq!(state.focused_item(), Some(0));
    }

    #[test]
    fn test_successor_scenario() {
        let (mut state, _) = state();
        state.apply(Message::OpenChecklist("preflight".to_string()));
        assert!(crate::checklist::has_successor(
            "preflight",
            MenuGroup::Normal,
            state.tree()
        ));
        state.apply(Message::NextChecklist);
        assert_eq!(state.active_category().map(|c| c.id.as_str()), Some("taxi"));
        assert!(!crate::checklist::has_successor(
            "taxi",
            MenuGroup::Normal,
            state.tree()
        ));
        state.apply(Message::NextChecklist);
        assert_eq!(state.active_category().map(|c| c.id.as_str()), Some("taxi"));
    }

    #[test]
    fn test_override_all_keeps_checks() {
        let (mut state, _) = state();
        state.apply(Message::OpenChecklist("preflight".to_string()));
        act(&mut state, 0, Action::Toggle);
        act(&mut state, 1, Action::Override);
        state.apply(Message::OverrideAll);
        assert_eq!(state.active_item_status(0), Some(ItemStatus::CheckedOverridden));
        assert_eq!(state.active_item_status(1), Some(ItemStatus::Overridden));
        assert_eq!(state.active_item_status(2), Some(ItemStatus::Overridden));
        assert_eq!(state.focused_item(), None);
    }

    #[test]
    fn test_reset_checklist_and_groups() {
        let (mut state, store) = state();
        state.apply(Message::OpenChecklist("engine-fire".to_string()));
        act(&mut state, 0, Action::Toggle);
        state.apply(Message::OpenChecklist("preflight".to_string()));
        act(&mut state, 0, Action::Toggle);
        act(&mut state, 1, Action::Toggle);

        state.apply(Message::ResetChecklist);
        assert_eq!(state.active_item_status(0), Some(ItemStatus::Unchecked));
        assert_eq!(state.focused_item(), Some(0));

        act(&mut state, 0, Action::Toggle);
        state.apply(Message::ResetGroup(MenuGroup::Normal));
        assert_eq!(
            state.items().status("preflight", "main", "brakes"),
            ItemStatus::Unchecked
        );
        assert_eq!(
            state.items().status("engine-fire", "main", "throttle"),
            ItemStatus::Checked
        );
        assert_eq!(store.saved().unwrap().len(), 1);

        state.apply(Message::ResetAll);
        assert!(state.items().is_empty());
        assert_eq!(store.saved(), None);
    }

    #[test]
    fn test_resume_opens_next_incomplete() {
        let (mut state, _) = state();
        state.apply(Message::OpenChecklist("preflight".to_string()));
        state.apply(Message::OverrideAll);
        state.apply(Message::Back);
        state.apply(Message::ResumeGroup(MenuGroup::Normal));
        assert_eq!(state.active_category().map(|c| c.id.as_str()), Some("taxi"));

        state.apply(Message::OverrideAll);
        state.apply(Message::ResumeGroup(MenuGroup::Normal));
        assert_eq!(state.active_category().map(|c| c.id.as_str()), Some("taxi"));
    }

    #[test]
    fn test_resume_on_enter() {
        let mut state = State::new(tree(), Box::new(MemoryStore::new())).with_resume_on_enter(true);
        state.apply(Message::OpenMenu(MenuGroup::Normal));
        assert_eq!(
            state.current_view(),
            CurrentView::Checklist(ChecklistGroup::Normal)
        );
        state.apply(Message::Back);
        state.apply(Message::Back);
        state.apply(Message::OpenMenu(MenuGroup::NonNormal));
        assert_eq!(state.current_view(), CurrentView::Menu(MenuGroup::NonNormal));
    }

    #[test]
    fn test_back_walks_up() {
        let (mut state, _) = state();
        state.apply(Message::OpenMenu(MenuGroup::NonNormal));
        state.apply(Message::OpenChecklist("engine-fire".to_string()));
        state.apply(Message::Back);
        assert_eq!(state.current_view(), CurrentView::Menu(MenuGroup::NonNormal));
        assert!(state.active_category().is_none());
        state.apply(Message::Back);
        assert_eq!(state.current_view(), CurrentView::Default);
        state.apply(Message::Back);
        assert_eq!(state.current_view(), CurrentView::Default);
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        let (mut state, _) = state();
        state.apply(Message::OpenChecklist("missing".to_string()));
        assert_eq!(state.current_view(), CurrentView::Default);
        act(&mut state, 0, Action::Toggle);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_cursor_wraps() {
        let (mut state, _) = state();
        state.apply(Message::OpenMenu(MenuGroup::Normal));
        state.next_cursor();
        assert_eq!(state.menu_cursor(), 1);
        state.next_cursor();
        assert_eq!(state.menu_cursor(), 0);
        state.previous_cursor();
        assert_eq!(state.menu_cursor(), 1);

        state.apply(Message::OpenChecklist("preflight".to_string()));
        state.previous_cursor();
        assert_eq!(state.focused_item(), Some(2));
        state.next_cursor();
        assert_eq!(state.focused_item(), Some(0));
    }

    #[test]
    fn test_process_messages_applies_callbacks_in_order() {
        let (mut state, _) = state();
        {
            let ctx = state.context();
            ctx.dispatcher.send(Message::OpenMenu(MenuGroup::Normal));
            ctx.dispatcher.send(Message::OpenChecklist("preflight".to_string()));
            ctx.dispatcher.item_callback(Action::Toggle)(0);
        }
        assert_eq!(state.process_messages(), 3);
        assert_eq!(state.active_item_status(0), Some(ItemStatus::Checked));
        assert_eq!(state.focused_item(), Some(1));
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let mut state = State::new(tree(), Box::new(MemoryStore::read_only()));
        state.apply(Message::OpenChecklist("taxi".to_string()));
        act(&mut state, 0, Action::Toggle);
        assert_eq!(state.active_item_status(0), Some(ItemStatus::Checked));
    }

    #[test]
    fn test_resume_skips_category_without_checklist() {
        let tree = ChecklistTree::new(vec![
            crate::checklist::fixtures::category("a", MenuGroup::Normal, &["1"]),
            Category {
                id: "bare".to_string(),
                title: "Bare".to_string(),
                group: MenuGroup::Normal,
                checklists: vec![],
            },
        ])
        .unwrap();
        let mut state = State::new(tree, Box::new(MemoryStore::new()));
        state.apply(Message::OpenChecklist("a".to_string()));
        act(&mut state, 0, Action::Toggle);
        state.apply(Message::Back);

        state.apply(Message::ResumeGroup(MenuGroup::Normal));
        assert_eq!(state.active_category().map(|c| c.id.as_str()), Some("a"));
        assert_eq!(
            state.current_view(),
            CurrentView::Checklist(ChecklistGroup::Normal)
        );
        let resolved = crate::ui::Router::default().resolve(state.current_view(), &state.context());
        assert_eq!(resolved.screen, crate::ui::ScreenKind::Checklist);
    }
}
