//! UI screens.

mod alert_popup;
mod app;
mod roster_screen;

pub use alert_popup::AlertPopup;
pub use app::App;
pub use roster_screen::{
    RosterFocus, RosterKeyResult, RosterScreen, RosterScreenState, ScreenOptions,
};
