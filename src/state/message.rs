//! Messages raised by screen callbacks.
//!
//! Screens never touch the state directly. Each callback they receive sends a
//! [`Message`] which the event loop applies before the next render.

use crate::checklist::MenuGroup;
use crate::state::Action;
use std::sync::mpsc::{self, Receiver, Sender};

/// Zero-argument screen callback.
pub type Callback = Box<dyn Fn()>;

/// Callback taking the index of an item in the open checklist.
pub type ItemCallback = Box<dyn Fn(usize)>;

/// Callback taking a category id.
pub type CategoryCallback = Box<dyn Fn(&str)>;

/// Specifying state changes requested by screens.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    OpenMenu(MenuGroup),
    OpenChecklist(String),
    ResumeGroup(MenuGroup),
    ApplyAction { index: usize, action: Action },
    OverrideAll,
    ResetChecklist,
    NextChecklist,
    ResetGroup(MenuGroup),
    ResetAll,
    Back,
}

/// Hands out callbacks that forward messages to the state.
///
#[derive(Clone)]
pub struct Dispatcher {
    tx: Sender<Message>,
}

impl Dispatcher {
    /// Return a dispatcher and the receiving end of its channel.
    ///
    pub fn channel() -> (Dispatcher, Receiver<Message>) {
        let (tx, rx) = mpsc::channel();
        (Dispatcher { tx }, rx)
    }

    /// Send a message immediately.
    ///
    pub fn send(&self, message: Message) {
        if self.tx.send(message).is_err() {
            log::warn!("Dropped message, state receiver is gone");
        }
    }

    /// Callback that sends the given message each time it is called.
    ///
    pub fn callback(&self, message: Message) -> Callback {
        let dispatcher = self.clone();
        Box::new(move || dispatcher.send(message.clone()))
    }

    /// Callback that applies `action` to the item at the given index.
    ///
    pub fn item_callback(&self, action: Action) -> ItemCallback {
        let dispatcher = self.clone();
        Box::new(move |index| dispatcher.send(Message::ApplyAction { index, action }))
    }

    /// Callback that opens the checklist of the given category.
    ///
    pub fn category_callback(&self) -> CategoryCallback {
        let dispatcher = self.clone();
        Box::new(move |category_id| {
            dispatcher.send(Message::OpenChecklist(category_id.to_string()))
        })
    }
}
