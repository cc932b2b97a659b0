use crate::config::HotkeyAction;
use crate::state::State;
use crate::ui::{Router, ScreenInputs};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyEvent, KeyEventKind},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => (),
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State, router: &Router) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(key, state, router)),
            Event::Tick => {
                state.process_messages();
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Map a key press to an action of the current screen and carry it out.
/// Returns false if exit was requested.
///
pub fn handle_key(key: KeyEvent, state: &mut State, router: &Router) -> bool {
    let action = {
        let resolved = router.resolve(state.current_view(), &state.context());
        state.hotkeys().action_for(resolved.screen, &key)
    };
    let Some(action) = action else {
        return true;
    };
    debug!("Processing {:?} for key '{:?}'...", action, key.code);

    match action {
        HotkeyAction::Quit => return false,
        HotkeyAction::ToggleLog => {
            state.toggle_log();
        }
        HotkeyAction::NavigateNext => {
            state.next_cursor();
        }
        HotkeyAction::NavigatePrev => {
            state.previous_cursor();
        }
        _ => {
            let resolved = router.resolve(state.current_view(), &state.context());
            if !trigger(&resolved.inputs, action) {
                debug!("{:?} is not available on {:?}", action, resolved.screen);
            }
        }
    }
    state.process_messages();
    true
}

/// Invoke the screen callback bound to an action. Returns false when the
/// screen offers no such control.
///
fn trigger(inputs: &ScreenInputs, action: HotkeyAction) -> bool {
    match (inputs, action) {
        (ScreenInputs::Home(inputs), HotkeyAction::OpenNormal) => (inputs.on_normal)(),
        (ScreenInputs::Home(inputs), HotkeyAction::OpenNonNormal) => (inputs.on_non_normal)(),
        (ScreenInputs::Home(inputs), HotkeyAction::OpenResets) => (inputs.on_resets)(),

        (ScreenInputs::Menu(inputs), HotkeyAction::Select) => match inputs.categories.get(inputs.cursor) {
            Some(category) => (inputs.on_select)(&category.id),
            None => return false,
        },
        (ScreenInputs::Menu(inputs), HotkeyAction::Resume) => match &inputs.on_resume {
            Some(on_resume) => on_resume(),
            None => return false,
        },
        (ScreenInputs::Menu(inputs), HotkeyAction::Back) => (inputs.on_exit)(),

        (ScreenInputs::Checklist(inputs), HotkeyAction::ToggleItem) => match inputs.focused {
            Some(index) => (inputs.on_toggle)(index),
            None => return false,
        },
        (ScreenInputs::Checklist(inputs), HotkeyAction::OverrideItem) => match inputs.focused {
            Some(index) => (inputs.on_override)(index),
            None => return false,
        },
        (ScreenInputs::Checklist(inputs), HotkeyAction::OverrideAll) => (inputs.on_override_all)(),
        (ScreenInputs::Checklist(inputs), HotkeyAction::ResetChecklist) => (inputs.on_reset)(),
        (ScreenInputs::Checklist(inputs), HotkeyAction::NextChecklist) => {
            match (&inputs.on_next, inputs.show_next) {
                (Some(on_next), true) => on_next(),
                _ => return false,
            }
        }
        (ScreenInputs::Checklist(inputs), HotkeyAction::Back) => (inputs.on_exit)(),

        (ScreenInputs::Resets(inputs), HotkeyAction::ResetNormal) => (inputs.on_reset_normal)(),
        (ScreenInputs::Resets(inputs), HotkeyAction::ResetNonNormal) => {
            (inputs.on_reset_non_normal)()
        }
        (ScreenInputs::Resets(inputs), HotkeyAction::ResetAll) => (inputs.on_reset_all)(),
        (ScreenInputs::Resets(inputs), HotkeyAction::Back) => (inputs.on_exit)(),

        _ => return false,
    }
    true
}
