use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};
use tracing::debug;

use crate::application::dto::{FormField, StudentForm};
use crate::domain::entities::{Roster, SortKey, Student, StudentId};
use crate::domain::keybinding::{Action, Keybind};
use crate::domain::ports::Collation;
use crate::domain::{FilterField, Notification, RosterFilter};
use crate::presentation::commands::{CommandRegistry, HasCommands};
use crate::presentation::events::{is_text_input, left_click};
use crate::presentation::ui::alert_popup::AlertPopup;
use crate::presentation::widgets::{
    FilterBar, FilterBarState, FocusContext, FooterBar, StatusBar, StudentFormPanel,
    StudentFormState, StudentTable, StudentTableState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFocus {
    Form(FormField),
    Filter(FilterField),
    Table,
}

impl RosterFocus {
    const ORDER: [Self; 11] = [
        Self::Form(FormField::Name),
        Self::Form(FormField::Surname),
        Self::Form(FormField::Patronymic),
        Self::Form(FormField::BirthDate),
        Self::Form(FormField::StudyStart),
        Self::Form(FormField::Faculty),
        Self::Filter(FilterField::Name),
        Self::Filter(FilterField::Faculty),
        Self::Filter(FilterField::StartYear),
        Self::Filter(FilterField::EndYear),
        Self::Table,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    #[must_use]
    pub const fn to_focus_context(self) -> FocusContext {
        match self {
            Self::Form(_) => FocusContext::Form,
            Self::Filter(_) => FocusContext::Filters,
            Self::Table => FocusContext::Table,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterKeyResult {
    Consumed,
    Ignored,
    Quit,
    Reload,
    Submit(StudentForm),
    Delete(StudentId),
}

/// Display settings for the roster screen.
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    pub date_format: String,
    pub endpoint: String,
    pub status_duration: Duration,
}

/// Owned roster plus every piece of UI state around it.
///
/// Keys and mouse clicks are reduced to [`RosterKeyResult`] intents; network
/// work is left to the caller, which reports completions back through
/// [`Self::replace_students`], [`Self::append_student`] and
/// [`Self::remove_student`].
pub struct RosterScreenState {
    roster: Roster,
    collation: Arc<dyn Collation>,
    sort_key: Option<SortKey>,
    filter: RosterFilter,
    focus: RosterFocus,
    form: StudentFormState,
    filters: FilterBarState,
    table: StudentTableState,
    alert: Option<Notification>,
    status: Option<Notification>,
    pending: usize,
    today: NaiveDate,
    options: ScreenOptions,
    commands: CommandRegistry,
}

impl RosterScreenState {
    #[must_use]
    pub fn new(collation: Arc<dyn Collation>, options: ScreenOptions, today: NaiveDate) -> Self {
        let mut state = Self {
            roster: Roster::new(),
            collation,
            sort_key: None,
            filter: RosterFilter::default(),
            focus: RosterFocus::Form(FormField::Name),
            form: StudentFormState::new(),
            filters: FilterBarState::new(),
            table: StudentTableState::default(),
            alert: None,
            status: None,
            pending: 0,
            today,
            options,
            commands: CommandRegistry::new(),
        };
        state.set_focus(state.focus);
        state
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub const fn focus(&self) -> RosterFocus {
        self.focus
    }

    #[must_use]
    pub const fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    #[must_use]
    pub const fn filter(&self) -> &RosterFilter {
        &self.filter
    }

    #[must_use]
    pub const fn alert(&self) -> Option<&Notification> {
        self.alert.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> Option<&Notification> {
        self.status.as_ref()
    }

    #[must_use]
    pub const fn pending_requests(&self) -> usize {
        self.pending
    }

    /// Students passing the current filter, in roster order.
    #[must_use]
    pub fn visible_students(&self) -> Vec<&Student> {
        self.filter.apply(self.roster.students())
    }

    #[must_use]
    pub fn selected_student(&self) -> Option<&Student> {
        let index = self.table.selected()?;
        self.visible_students().get(index).copied()
    }

    #[must_use]
    pub fn form(&self) -> StudentForm {
        self.form.to_form()
    }

    pub fn set_focus(&mut self, focus: RosterFocus) {
        self.focus = focus;
        self.form.focus(match focus {
            RosterFocus::Form(field) => Some(field),
            _ => None,
        });
        self.filters.focus(match focus {
            RosterFocus::Filter(field) => Some(field),
            _ => None,
        });
        if focus == RosterFocus::Table && self.table.selected().is_none() {
            self.clamp_selection();
        }
    }

    /// Replaces the whole roster, keeping the active sort order.
    pub fn replace_students(&mut self, students: Vec<Student>) {
        self.roster.replace_all(students);
        if let Some(key) = self.sort_key {
            self.roster.sort_by(key, self.collation.as_ref());
        }
        self.clamp_selection();
    }

    pub fn append_student(&mut self, student: Student) {
        self.roster.append(student);
        self.clamp_selection();
    }

    pub fn remove_student(&mut self, id: &StudentId) -> bool {
        let removed = self.roster.remove_by_id(id).is_some();
        self.clamp_selection();
        removed
    }

    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    pub fn sort_by(&mut self, key: SortKey) {
        debug!(?key, "Sorting roster");
        self.sort_key = Some(key);
        self.roster.sort_by(key, self.collation.as_ref());
        self.clamp_selection();
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.alert = Some(Notification::error(title, message));
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn set_status(&mut self, notification: Notification) {
        let mut notification = notification.with_duration(self.options.status_duration);
        notification.mark_displayed();
        self.status = Some(notification);
    }

    pub fn begin_request(&mut self) {
        self.pending += 1;
    }

    pub fn end_request(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    /// Advances the clock. Returns true when something visible changed.
    pub fn tick(&mut self, today: NaiveDate) -> bool {
        let mut changed = false;
        if self.today != today {
            self.today = today;
            changed = true;
        }
        if self.status.as_ref().is_some_and(Notification::is_expired) {
            self.status = None;
            changed = true;
        }
        changed
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> RosterKeyResult {
        if self.alert.is_some() {
            self.dismiss_alert();
            return RosterKeyResult::Consumed;
        }

        let action = self.commands.find_action(key);
        if let Some(result) = self.handle_global_action(action) {
            return result;
        }

        match self.focus {
            RosterFocus::Table => self.handle_table_action(action),
            RosterFocus::Form(field) => self.handle_form_key(field, key, action),
            RosterFocus::Filter(field) => self.handle_filter_key(field, key, action),
        }
    }

    fn handle_global_action(&mut self, action: Option<Action>) -> Option<RosterKeyResult> {
        let focus = match action? {
            Action::Quit => return Some(RosterKeyResult::Quit),
            Action::Reload => return Some(RosterKeyResult::Reload),
            Action::FocusNext => self.focus.next(),
            Action::FocusPrevious => self.focus.previous(),
            Action::FocusForm => RosterFocus::Form(FormField::Name),
            Action::FocusFilters => RosterFocus::Filter(FilterField::Name),
            Action::FocusTable => RosterFocus::Table,
            _ => return None,
        };
        self.set_focus(focus);
        Some(RosterKeyResult::Consumed)
    }

    fn handle_form_key(
        &mut self,
        field: FormField,
        key: KeyEvent,
        action: Option<Action>,
    ) -> RosterKeyResult {
        let action = if is_text_input(&key) { None } else { action };
        match action {
            Some(Action::Submit) => return RosterKeyResult::Submit(self.form.to_form()),
            Some(Action::NavigateDown) => self.set_focus(self.focus.next()),
            Some(Action::NavigateUp) => self.set_focus(self.focus.previous()),
            Some(Action::Cancel) => self.set_focus(RosterFocus::Table),
            Some(Action::ClearInput) => {
                if let Some(input) = self.form.input_mut(field) {
                    input.clear();
                }
            }
            _ => {
                let Some(input) = self.form.input_mut(field) else {
                    return RosterKeyResult::Ignored;
                };
                if !input.handle_key(key) {
                    return RosterKeyResult::Ignored;
                }
            }
        }
        RosterKeyResult::Consumed
    }

    fn handle_filter_key(
        &mut self,
        field: FilterField,
        key: KeyEvent,
        action: Option<Action>,
    ) -> RosterKeyResult {
        let action = if is_text_input(&key) { None } else { action };
        match action {
            Some(Action::Submit | Action::Cancel) => self.set_focus(RosterFocus::Table),
            Some(Action::NavigateDown) => self.set_focus(self.focus.next()),
            Some(Action::NavigateUp) => self.set_focus(self.focus.previous()),
            Some(Action::ClearInput) => {
                if let Some(input) = self.filters.input_mut(field) {
                    input.clear();
                }
                self.sync_filter();
            }
            _ => {
                let changed = self
                    .filters
                    .input_mut(field)
                    .is_some_and(|input| input.handle_key(key));
                if !changed {
                    return RosterKeyResult::Ignored;
                }
                self.sync_filter();
            }
        }
        RosterKeyResult::Consumed
    }

    fn handle_table_action(&mut self, action: Option<Action>) -> RosterKeyResult {
        match action {
            Some(Action::NavigateUp) => self.select_previous(),
            Some(Action::NavigateDown) => self.select_next(),
            Some(Action::SelectFirst) => self.select_first(),
            Some(Action::SelectLast) => self.select_last(),
            Some(Action::SortBy(key)) => self.sort_by(key),
            Some(Action::DeleteSelected) => {
                if let Some(student) = self.selected_student() {
                    return RosterKeyResult::Delete(student.id().clone());
                }
            }
            Some(Action::Cancel | Action::Submit) => {}
            _ => return RosterKeyResult::Ignored,
        }
        RosterKeyResult::Consumed
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> RosterKeyResult {
        if self.alert.is_some() {
            if left_click(&mouse).is_some() {
                self.dismiss_alert();
            }
            return RosterKeyResult::Consumed;
        }

        let Some(position) = left_click(&mouse) else {
            return match mouse.kind {
                MouseEventKind::ScrollDown if self.focus == RosterFocus::Table => {
                    self.select_next();
                    RosterKeyResult::Consumed
                }
                MouseEventKind::ScrollUp if self.focus == RosterFocus::Table => {
                    self.select_previous();
                    RosterKeyResult::Consumed
                }
                _ => RosterKeyResult::Ignored,
            };
        };

        if let Some(field) = self.form.field_at(position) {
            self.set_focus(RosterFocus::Form(field));
            return RosterKeyResult::Consumed;
        }
        if self.form.is_submit_at(position) {
            return RosterKeyResult::Submit(self.form.to_form());
        }
        if let Some(field) = self.filters.field_at(position) {
            self.set_focus(RosterFocus::Filter(field));
            return RosterKeyResult::Consumed;
        }
        if let Some(key) = self.table.header_column_at(position) {
            self.sort_by(key);
            return RosterKeyResult::Consumed;
        }
        if let Some(index) = self.table.delete_control_at(position) {
            if let Some(student) = self.visible_students().get(index) {
                return RosterKeyResult::Delete(student.id().clone());
            }
            return RosterKeyResult::Ignored;
        }
        if let Some(index) = self.table.row_at(position) {
            self.set_focus(RosterFocus::Table);
            self.table.select(Some(index));
            return RosterKeyResult::Consumed;
        }
        RosterKeyResult::Ignored
    }

    fn sync_filter(&mut self) {
        self.filter = self.filters.to_filter();
        self.clamp_selection();
    }

    fn visible_count(&self) -> usize {
        self.visible_students().len()
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            self.table.select(None);
        } else {
            let index = self.table.selected().unwrap_or(0).min(count - 1);
            self.table.select(Some(index));
        }
    }

    fn select_next(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        let index = self.table.selected().map_or(0, |i| (i + 1).min(count - 1));
        self.table.select(Some(index));
    }

    fn select_previous(&mut self) {
        if self.visible_count() == 0 {
            return;
        }
        let index = self.table.selected().map_or(0, |i| i.saturating_sub(1));
        self.table.select(Some(index));
    }

    fn select_first(&mut self) {
        if self.visible_count() > 0 {
            self.table.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let count = self.visible_count();
        if count > 0 {
            self.table.select(Some(count - 1));
        }
    }
}

impl HasCommands for RosterScreenState {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        if self.alert.is_some() {
            return Vec::new();
        }
        let actions: &[(Action, &'static str)] = match self.focus {
            RosterFocus::Form(_) => &[
                (Action::Submit, "Add"),
                (Action::FocusNext, "Next"),
                (Action::ClearInput, "Clear"),
                (Action::FocusTable, "Table"),
                (Action::Reload, "Reload"),
                (Action::Quit, "Quit"),
            ],
            RosterFocus::Filter(_) => &[
                (Action::FocusNext, "Next"),
                (Action::ClearInput, "Clear"),
                (Action::Cancel, "Table"),
                (Action::Reload, "Reload"),
                (Action::Quit, "Quit"),
            ],
            RosterFocus::Table => &[
                (Action::SortBy(SortKey::FullName), "Sort 1-4"),
                (Action::DeleteSelected, "Delete"),
                (Action::FocusForm, "Add"),
                (Action::FocusFilters, "Filter"),
                (Action::Reload, "Reload"),
                (Action::Quit, "Quit"),
            ],
        };
        registry.keybinds(actions)
    }
}

pub struct RosterScreen;

impl RosterScreen {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for RosterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulWidget for RosterScreen {
    type State = RosterScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [form_area, filter_area, table_area, status_area, footer_area] = Layout::vertical([
            Constraint::Length(StudentFormPanel::HEIGHT),
            Constraint::Length(FilterBar::HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let focus = state.focus.to_focus_context();
        StudentFormPanel::new(focus == FocusContext::Form).render(form_area, buf, &mut state.form);
        FilterBar::new(focus == FocusContext::Filters).render(filter_area, buf, &mut state.filters);
        render_table(state, table_area, buf);
        render_status_bar(state, status_area, buf);
        render_footer_bar(state, footer_area, buf);

        if let Some(alert) = &state.alert {
            AlertPopup::new(alert).render(area, buf);
        }
    }
}

fn render_table(state: &mut RosterScreenState, area: Rect, buf: &mut Buffer) {
    let visible = state.filter.apply(state.roster.students());
    StudentTable::new(&visible, state.today, &state.options.date_format)
        .sort_key(state.sort_key)
        .focused(state.focus == RosterFocus::Table)
        .render(area, buf, &mut state.table);
}

fn render_status_bar(state: &RosterScreenState, area: Rect, buf: &mut Buffer) {
    StatusBar::new(state.visible_count(), state.roster.len())
        .message(state.status.as_ref())
        .pending(state.pending)
        .endpoint(&state.options.endpoint)
        .render(area, buf);
}

fn render_footer_bar(state: &RosterScreenState, area: Rect, buf: &mut Buffer) {
    let context = if state.alert.is_some() {
        FocusContext::Alert
    } else {
        state.focus.to_focus_context()
    };
    let keybinds = state.get_commands(&state.commands);
    FooterBar::new(&keybinds, context).render(area, buf);
}
