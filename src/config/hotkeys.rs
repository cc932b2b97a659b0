//! Hotkey configuration management.
//!
//! This module defines the hotkey system for the application, including action
//! types, key bindings with their string form, and the actions each screen
//! offers.

use super::ConfigError;
use crate::ui::ScreenKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Global actions
    Quit,
    ToggleLog,
    Back,
    NavigateNext,
    NavigatePrev,

    // Home screen actions
    OpenNormal,
    OpenNonNormal,
    OpenResets,

    // Menu screen actions
    Select,
    Resume,

    // Checklist screen actions
    ToggleItem,
    OverrideItem,
    OverrideAll,
    ResetChecklist,
    NextChecklist,

    // Resets screen actions
    ResetNormal,
    ResetNonNormal,
    ResetAll,
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Hotkey { code, modifiers }
    }

    pub fn char(c: char) -> Self {
        Hotkey::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn key(code: KeyCode) -> Self {
        Hotkey::new(code, KeyModifiers::NONE)
    }

    /// Check whether a key event triggers this hotkey. Shift is already
    /// reflected in the case of character keys, so it is ignored for them.
    ///
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        self.code == event.code && self.modifiers == modifiers
    }
}

impl FromStr for Hotkey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidHotkey(s.to_string());
        let mut parts: Vec<&str> = s.split('+').collect();
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return Err(invalid()),
            }
        }

        let code = match key.to_ascii_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(invalid()),
                }
            }
        };
        Ok(Hotkey { code, modifiers })
    }
}

impl TryFrom<String> for Hotkey {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hotkey> for String {
    fn from(hotkey: Hotkey) -> Self {
        hotkey.to_string()
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        match self.code {
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Char(c) => write!(f, "{}", c),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Hotkey bindings for every action.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkeys {
    bindings: BTreeMap<HotkeyAction, Vec<Hotkey>>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        use HotkeyAction::*;
        let bindings = [
            (Quit, vec![Hotkey::char('q'), Hotkey::new(KeyCode::Char('c'), KeyModifiers::CONTROL)]),
            (ToggleLog, vec![Hotkey::char('d')]),
            (Back, vec![Hotkey::key(KeyCode::Esc), Hotkey::key(KeyCode::Backspace)]),
            (NavigateNext, vec![Hotkey::char('j'), Hotkey::key(KeyCode::Down)]),
            (NavigatePrev, vec![Hotkey::char('k'), Hotkey::key(KeyCode::Up)]),
            (OpenNormal, vec![Hotkey::char('n')]),
            (OpenNonNormal, vec![Hotkey::char('a')]),
            (OpenResets, vec![Hotkey::char('r')]),
            (Select, vec![Hotkey::key(KeyCode::Enter), Hotkey::char('l')]),
            (Resume, vec![Hotkey::char('c')]),
            (ToggleItem, vec![Hotkey::char(' '), Hotkey::key(KeyCode::Enter)]),
            (OverrideItem, vec![Hotkey::char('o')]),
            (OverrideAll, vec![Hotkey::char('O')]),
            (ResetChecklist, vec![Hotkey::char('r')]),
            (NextChecklist, vec![Hotkey::char('n')]),
            (ResetNormal, vec![Hotkey::char('n')]),
            (ResetNonNormal, vec![Hotkey::char('a')]),
            (ResetAll, vec![Hotkey::char('x')]),
        ];
        Hotkeys {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl Hotkeys {
    /// Return the defaults with the given actions rebound.
    ///
    pub fn with_overrides(overrides: &BTreeMap<HotkeyAction, Vec<Hotkey>>) -> Self {
        let mut hotkeys = Hotkeys::default();
        for (action, keys) in overrides {
            hotkeys.bindings.insert(*action, keys.clone());
        }
        hotkeys
    }

    /// Return the keys bound to an action.
    ///
    pub fn keys(&self, action: HotkeyAction) -> &[Hotkey] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve a key event to the first matching action available on the
    /// given screen, falling back to global actions.
    ///
    pub fn action_for(&self, screen: ScreenKind, event: &KeyEvent) -> Option<HotkeyAction> {
        screen_actions(screen)
            .iter()
            .map(|(action, _)| *action)
            .chain(GLOBAL_ACTIONS.iter().map(|(action, _)| *action))
            .find(|action| self.keys(*action).iter().any(|key| key.matches(event)))
    }

    /// Human readable key list for an action, e.g. `j/down`.
    ///
    pub fn display(&self, action: HotkeyAction) -> String {
        self.keys(action)
            .iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

const GLOBAL_ACTIONS: &[(HotkeyAction, &str)] = &[
    (HotkeyAction::ToggleLog, "log"),
    (HotkeyAction::Quit, "quit"),
];

/// Actions offered by a screen with their footer labels.
///
pub fn screen_actions(screen: ScreenKind) -> &'static [(HotkeyAction, &'static str)] {
    use HotkeyAction::*;
    match screen {
        ScreenKind::Home => &[
            (OpenNormal, "normal"),
            (OpenNonNormal, "non-normal"),
            (OpenResets, "resets"),
        ],
        ScreenKind::Menu => &[
            (NavigateNext, "down"),
            (NavigatePrev, "up"),
            (Select, "open"),
            (Resume, "continue"),
            (Back, "back"),
        ],
        ScreenKind::Checklist => &[
            (NavigateNext, "down"),
            (NavigatePrev, "up"),
            (ToggleItem, "check"),
            (OverrideItem, "override"),
            (OverrideAll, "override all"),
            (ResetChecklist, "reset"),
            (NextChecklist, "next"),
            (Back, "back"),
        ],
        ScreenKind::Resets => &[
            (ResetNormal, "reset normal"),
            (ResetNonNormal, "reset non-normal"),
            (ResetAll, "reset all"),
            (Back, "back"),
        ],
    }
}

/// Build footer text for the given actions.
///
pub fn build_footer_text(hotkeys: &Hotkeys, actions: &[(HotkeyAction, &str)]) -> String {
    actions
        .iter()
        .chain(GLOBAL_ACTIONS.iter())
        .filter(|(action, _)| !hotkeys.keys(*action).is_empty())
        .map(|(action, label)| format!("{}: {}", hotkeys.display(*action), label))
        .collect::<Vec<_>>()
        .join("  ")
}
