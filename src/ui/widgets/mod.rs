//! Reusable UI widget components.
//!
//! This module contains styling utilities shared by the screens.

pub mod styling;
