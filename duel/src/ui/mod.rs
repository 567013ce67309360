//! UI module for the duel TUI

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;

pub use theme::DuelTheme;
