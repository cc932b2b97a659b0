//! Resolution of the current view into a screen and its inputs.
//!
//! The [`Router`] flattens a [`CurrentView`] into a [`ViewKey`], looks the key
//! up in an injected [`Registry`] and builds the inputs the chosen screen
//! needs from an [`AppContext`]. Anything that cannot be resolved falls back to
//! the home screen and is logged; routing never fails.

use crate::checklist::progress::{has_successor, item_statuses};
use crate::checklist::{Category, Checklist, ChecklistGroup, ChecklistTree, MenuGroup};
use crate::state::{
    Action, Callback, CategoryCallback, CurrentView, Dispatcher, ItemCallback, ItemStateMap,
    ItemStatus, Message,
};
use log::*;
use std::collections::HashMap;
use std::fmt;

/// Screen implementations. One screen may serve several view keys.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ScreenKind {
    Home,
    Menu,
    Checklist,
    Resets,
}

/// Flattened identity of a view, used as the registry key.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ViewKey {
    Default,
    Menu(MenuGroup),
    Checklist(ChecklistGroup),
}

impl From<CurrentView> for ViewKey {
    fn from(view: CurrentView) -> Self {
        match view {
            CurrentView::Default => ViewKey::Default,
            CurrentView::Menu(group) => ViewKey::Menu(group),
            CurrentView::Checklist(group) => ViewKey::Checklist(group),
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKey::Default => f.write_str("default"),
            ViewKey::Menu(group) => write!(f, "menu-{}", group),
            ViewKey::Checklist(group) => write!(f, "checklist-{}", group),
        }
    }
}

/// Immutable mapping from view keys to screens, built once at startup.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    screens: HashMap<ViewKey, ScreenKind>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::from_entries([
            (ViewKey::Default, ScreenKind::Home),
            (ViewKey::Menu(MenuGroup::Normal), ScreenKind::Menu),
            (ViewKey::Menu(MenuGroup::NonNormal), ScreenKind::Menu),
            (ViewKey::Menu(MenuGroup::Resets), ScreenKind::Resets),
            (ViewKey::Checklist(ChecklistGroup::Normal), ScreenKind::Checklist),
            (ViewKey::Checklist(ChecklistGroup::NonNormal), ScreenKind::Checklist),
        ])
    }
}

impl Registry {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ViewKey, ScreenKind)>,
    {
        Registry {
            screens: entries.into_iter().collect(),
        }
    }

    pub fn screen(&self, key: ViewKey) -> Option<ScreenKind> {
        self.screens.get(&key).copied()
    }
}

/// Everything a screen may need, borrowed from the application state.
///
pub struct AppContext<'a> {
    pub tree: &'a ChecklistTree,
    pub items: &'a ItemStateMap,
    pub active_category: Option<&'a str>,
    pub focused_item: Option<usize>,
    pub menu_cursor: usize,
    pub dispatcher: &'a Dispatcher,
}

/// Inputs of the home screen.
///
pub struct HomeInputs {
    pub on_normal: Callback,
    pub on_non_normal: Callback,
    pub on_resets: Callback,
}

/// Inputs of the category menu screen.
///
pub struct MenuInputs<'a> {
    pub group: MenuGroup,
    pub categories: Vec<&'a Category>,
    pub items: &'a ItemStateMap,
    pub cursor: usize,
    pub on_select: CategoryCallback,
    pub on_resume: Option<Callback>,
    pub on_exit: Callback,
}

/// Inputs of the checklist screen.
///
pub struct ChecklistInputs<'a> {
    pub group: ChecklistGroup,
    pub category: &'a Category,
    pub checklist: &'a Checklist,
    pub statuses: Vec<ItemStatus>,
    pub focused: Option<usize>,
    pub on_toggle: ItemCallback,
    pub on_override: ItemCallback,
    pub on_override_all: Callback,
    pub on_reset: Callback,
    pub on_next: Option<Callback>,
    pub show_next: bool,
    pub on_exit: Callback,
}

/// Inputs of the resets screen.
///
pub struct ResetsInputs {
    pub on_reset_normal: Callback,
    pub on_reset_non_normal: Callback,
    pub on_reset_all: Callback,
    pub on_exit: Callback,
}

/// Input bundle for one screen.
///
pub enum ScreenInputs<'a> {
    Home(HomeInputs),
    Menu(MenuInputs<'a>),
    Checklist(ChecklistInputs<'a>),
    Resets(ResetsInputs),
}

impl ScreenInputs<'_> {
    /// The screen able to render these inputs.
    ///
    pub fn screen(&self) -> ScreenKind {
        match self {
            ScreenInputs::Home(_) => ScreenKind::Home,
            ScreenInputs::Menu(_) => ScreenKind::Menu,
            ScreenInputs::Checklist(_) => ScreenKind::Checklist,
            ScreenInputs::Resets(_) => ScreenKind::Resets,
        }
    }
}

/// Result of routing: the key that was served, its screen and inputs.
///
pub struct Resolved<'a> {
    pub key: ViewKey,
    pub screen: ScreenKind,
    pub inputs: ScreenInputs<'a>,
}

/// Resolves views to screens through an injected registry.
///
#[derive(Debug, Clone, Default)]
pub struct Router {
    registry: Registry,
}

impl Router {
    pub fn new(registry: Registry) -> Self {
        Router { registry }
    }

    /// Resolve the view into the screen to render and its inputs.
    ///
    pub fn resolve<'a>(&self, view: CurrentView, ctx: &AppContext<'a>) -> Resolved<'a> {
        let key = ViewKey::from(view);
        let screen = match self.registry.screen(key) {
            Some(screen) => screen,
            None => {
                error!("No screen registered for view '{}', showing home", key);
                return fallback(ctx);
            }
        };
        let inputs = match build_inputs(key, ctx) {
            Some(inputs) => inputs,
            None => {
                error!("Cannot build inputs for view '{}', showing home", key);
                return fallback(ctx);
            }
        };
        if inputs.screen() != screen {
            error!(
                "Screen {:?} registered for view '{}' cannot render {:?} inputs, showing home",
                screen,
                key,
                inputs.screen()
            );
            return fallback(ctx);
        }
        Resolved {
            key,
            screen,
            inputs,
        }
    }
}

fn fallback<'a>(ctx: &AppContext<'a>) -> Resolved<'a> {
    Resolved {
        key: ViewKey::Default,
        screen: ScreenKind::Home,
        inputs: ScreenInputs::Home(home_inputs(ctx.dispatcher)),
    }
}

fn build_inputs<'a>(key: ViewKey, ctx: &AppContext<'a>) -> Option<ScreenInputs<'a>> {
    let dispatcher = ctx.dispatcher;
    let inputs = match key {
        ViewKey::Default => ScreenInputs::Home(home_inputs(dispatcher)),
        ViewKey::Menu(MenuGroup::Normal) => ScreenInputs::Menu(MenuInputs {
            on_resume: Some(dispatcher.callback(Message::ResumeGroup(MenuGroup::Normal))),
            ..menu_inputs(MenuGroup::Normal, ctx)
        }),
        ViewKey::Menu(MenuGroup::NonNormal) => {
            ScreenInputs::Menu(menu_inputs(MenuGroup::NonNormal, ctx))
        }
        ViewKey::Menu(MenuGroup::Resets) => ScreenInputs::Resets(ResetsInputs {
            on_reset_normal: dispatcher.callback(Message::ResetGroup(MenuGroup::Normal)),
            on_reset_non_normal: dispatcher.callback(Message::ResetGroup(MenuGroup::NonNormal)),
            on_reset_all: dispatcher.callback(Message::ResetAll),
            on_exit: dispatcher.callback(Message::Back),
        }),
        ViewKey::Checklist(ChecklistGroup::Normal) => {
            let inputs = checklist_inputs(ChecklistGroup::Normal, ctx)?;
            let show_next = has_successor(&inputs.category.id, MenuGroup::Normal, ctx.tree);
            ScreenInputs::Checklist(ChecklistInputs {
                on_next: Some(dispatcher.callback(Message::NextChecklist)),
                show_next,
                ..inputs
            })
        }
        ViewKey::Checklist(ChecklistGroup::NonNormal) => {
            ScreenInputs::Checklist(checklist_inputs(ChecklistGroup::NonNormal, ctx)?)
        }
    };
    Some(inputs)
}

fn home_inputs(dispatcher: &Dispatcher) -> HomeInputs {
    HomeInputs {
        on_normal: dispatcher.callback(Message::OpenMenu(MenuGroup::Normal)),
        on_non_normal: dispatcher.callback(Message::OpenMenu(MenuGroup::NonNormal)),
        on_resets: dispatcher.callback(Message::OpenMenu(MenuGroup::Resets)),
    }
}

fn menu_inputs<'a>(group: MenuGroup, ctx: &AppContext<'a>) -> MenuInputs<'a> {
    MenuInputs {
        group,
        categories: ctx.tree.categories_in(group).collect(),
        items: ctx.items,
        cursor: ctx.menu_cursor,
        on_select: ctx.dispatcher.category_callback(),
        on_resume: None,
        on_exit: ctx.dispatcher.callback(Message::Back),
    }
}

/// Inputs for the open checklist, without the next-checklist control. `None`
/// when no category is open or it does not belong to the group.
///
fn checklist_inputs<'a>(group: ChecklistGroup, ctx: &AppContext<'a>) -> Option<ChecklistInputs<'a>> {
    let category = ctx.tree.category(ctx.active_category?)?;
    if category.group != MenuGroup::from(group) {
        return None;
    }
    let checklist = category.active_checklist()?;
    let dispatcher = ctx.dispatcher;
    Some(ChecklistInputs {
        group,
        category,
        checklist,
        statuses: item_statuses(category, ctx.items),
        focused: ctx.focused_item,
        on_toggle: dispatcher.item_callback(Action::Toggle),
        on_override: dispatcher.item_callback(Action::Override),
        on_override_all: dispatcher.callback(Message::OverrideAll),
        on_reset: dispatcher.callback(Message::ResetChecklist),
        on_next: None,
        show_next: false,
        on_exit: dispatcher.callback(Message::Back),
    })
}
