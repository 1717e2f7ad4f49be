use crossterm::event::KeyEvent;
use std::borrow::Cow;

use crate::domain::entities::SortKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Reload,

    // Focus
    FocusNext,
    FocusPrevious,
    FocusForm,
    FocusFilters,
    FocusTable,

    // Table
    NavigateUp,
    NavigateDown,
    SelectFirst,
    SelectLast,
    SortBy(SortKey),
    DeleteSelected,

    // Input
    Submit,
    ClearInput,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
        }
    }
}
