mod all;
mod checklist;
mod footer;
mod header;
mod home;
mod log;
mod menu;
mod resets;

use self::log::log;
use super::*;
use checklist::checklist;
use footer::footer;
use header::header;
use home::home;
use menu::menu;
use resets::resets;

pub use all::all as render;
