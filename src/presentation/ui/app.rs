//! Main application orchestrator.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::dto::StudentForm;
use crate::application::use_cases::{
    CreateStudentUseCase, DeleteStudentUseCase, LoadRosterUseCase,
};
use crate::domain::entities::{Student, StudentId};
use crate::domain::errors::{ApiError, SyncError};
use crate::domain::ports::{Collation, StudentsPort};
use crate::domain::Notification;
use crate::infrastructure::AppConfig;
use crate::presentation::events::{EventResult, is_key_press, is_quit_event};
use crate::presentation::ui::{RosterKeyResult, RosterScreen, RosterScreenState, ScreenOptions};

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug)]
enum Action {
    Loaded(Result<Vec<Student>, ApiError>),
    Created(Result<Student, SyncError>),
    Deleted {
        id: StudentId,
        result: Result<(), ApiError>,
    },
}

pub struct App {
    screen: RosterScreenState,
    load_roster_use_case: LoadRosterUseCase,
    create_student_use_case: CreateStudentUseCase,
    delete_student_use_case: DeleteStudentUseCase,
    deleting: HashSet<StudentId>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    running: bool,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn failure_title(error: &ApiError, title: &'static str) -> &'static str {
    if error.is_network_error() {
        "Server unreachable"
    } else {
        title
    }
}

impl App {
    #[must_use]
    pub fn new(
        students_port: Arc<dyn StudentsPort>,
        collation: Arc<dyn Collation>,
        config: &AppConfig,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let options = ScreenOptions {
            date_format: config.ui.date_format.clone(),
            endpoint: config.api_url.clone(),
            status_duration: config.notification_duration(),
        };

        Self {
            screen: RosterScreenState::new(collation, options, today()),
            load_roster_use_case: LoadRosterUseCase::new(students_port.clone()),
            create_student_use_case: CreateStudentUseCase::new(students_port.clone()),
            delete_student_use_case: DeleteStudentUseCase::new(students_port),
            deleting: HashSet::new(),
            action_tx,
            action_rx,
            running: true,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.reload();
        self.run_event_loop(terminal).await?;
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick_interval = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.running = false;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = tick_interval.tick() => {
                    if self.screen.tick(today()) {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(RosterScreen::new(), frame.area(), &mut self.screen);
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if is_key_press(&key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                let result = self.screen.handle_mouse(mouse);
                self.dispatch(result)
            }
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if is_quit_event(&key) {
            return EventResult::Exit;
        }
        let result = self.screen.handle_key(key);
        self.dispatch(result)
    }

    fn dispatch(&mut self, result: RosterKeyResult) -> EventResult {
        match result {
            RosterKeyResult::Quit => EventResult::Exit,
            RosterKeyResult::Reload => {
                self.reload();
                EventResult::Consumed
            }
            RosterKeyResult::Submit(form) => {
                self.create(form);
                EventResult::Consumed
            }
            RosterKeyResult::Delete(id) => {
                self.delete(id);
                EventResult::Consumed
            }
            RosterKeyResult::Consumed => EventResult::Consumed,
            RosterKeyResult::Ignored => EventResult::Continue,
        }
    }

    fn reload(&mut self) {
        debug!("Requesting roster");
        self.screen.begin_request();

        let use_case = self.load_roster_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute().await;
            let _ = tx.send(Action::Loaded(result));
        });
    }

    fn create(&mut self, form: StudentForm) {
        self.screen.begin_request();

        let use_case = self.create_student_use_case.clone();
        let tx = self.action_tx.clone();
        let today = today();
        tokio::spawn(async move {
            let result = use_case.execute(&form, today).await;
            let _ = tx.send(Action::Created(result));
        });
    }

    fn delete(&mut self, id: StudentId) {
        if !self.deleting.insert(id.clone()) {
            debug!(id = %id, "Delete already in flight");
            return;
        }
        self.screen.begin_request();

        let use_case = self.delete_student_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute(id.clone()).await;
            let _ = tx.send(Action::Deleted { id, result });
        });
    }

    fn handle_action(&mut self, action: Action) {
        self.screen.end_request();

        match action {
            Action::Loaded(Ok(students)) => {
                let count = students.len();
                self.screen.replace_students(students);
                let status = if count == 0 {
                    info!("No students found");
                    Notification::warn("Loaded", "No students found")
                } else {
                    Notification::info("Loaded", format!("{count} students"))
                };
                self.screen.set_status(status);
            }
            Action::Loaded(Err(e)) => {
                error!(error = %e, "Roster load failed");
                let title = failure_title(&e, "Load failed");
                self.screen.set_status(Notification::error(title, e.to_string()));
            }
            Action::Created(Ok(student)) => {
                let name = student.full_name();
                self.screen.append_student(student);
                self.screen.clear_form();
                self.screen.set_status(Notification::info("Added", name));
            }
            Action::Created(Err(SyncError::Validation(e))) => {
                self.screen.show_alert(e.title(), e.to_string());
            }
            Action::Created(Err(SyncError::Api(e))) => {
                error!(error = %e, "Student creation failed");
                let title = failure_title(&e, "Add failed");
                self.screen.set_status(Notification::error(title, e.to_string()));
            }
            Action::Deleted { id, result: Ok(()) } => {
                self.deleting.remove(&id);
                if !self.screen.remove_student(&id) {
                    warn!(id = %id, "Deleted student was no longer in the roster");
                }
                self.screen
                    .set_status(Notification::info("Deleted", format!("student {id}")));
            }
            Action::Deleted { id, result: Err(e) } => {
                self.deleting.remove(&id);
                error!(id = %id, error = %e, "Student deletion failed");
                let title = failure_title(&e, "Delete failed");
                self.screen.set_status(Notification::error(title, e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationLevel;
    use crate::domain::entities::NewStudent;
    use crate::domain::ports::OrdinalCollation;
    use crate::domain::ports::mocks::MockStudentsPort;
    use crate::presentation::ui::RosterFocus;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app(mock: MockStudentsPort) -> App {
        App::new(
            Arc::new(mock),
            Arc::new(OrdinalCollation),
            &AppConfig::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    async fn settle(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);
    }

    #[tokio::test]
    async fn test_load_replaces_roster() {
        let mut mock = MockStudentsPort::new();
        mock.expect_fetch_all().times(1).returning(|| {
            Ok(vec![
                Student::new("1", "Ivan", "Petrov", 2021, "Physics"),
                Student::new("2", "Anna", "Smirnova", 2022, "History"),
            ])
        });
        let mut app = app(mock);

        app.reload();
        assert_eq!(app.screen.pending_requests(), 1);
        settle(&mut app).await;

        assert_eq!(app.screen.roster().len(), 2);
        assert_eq!(app.screen.pending_requests(), 0);
        assert_eq!(app.screen.status().unwrap().message, "2 students");
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_roster() {
        let mut mock = MockStudentsPort::new();
        mock.expect_fetch_all()
            .times(1)
            .returning(|| Err(ApiError::network("connection refused")));
        let mut app = app(mock);
        app.screen
            .replace_students(vec![Student::new("1", "Ivan", "Petrov", 2021, "Physics")]);

        app.reload();
        settle(&mut app).await;

        assert_eq!(app.screen.roster().len(), 1);
        let status = app.screen.status().unwrap();
        assert_eq!(status.level, NotificationLevel::Error);
        assert_eq!(status.title, "Server unreachable");
    }

    #[tokio::test]
    async fn test_load_error_status_reports_load_failed() {
        let mut mock = MockStudentsPort::new();
        mock.expect_fetch_all()
            .times(1)
            .returning(|| Err(ApiError::status(500, "Internal Server Error")));
        let mut app = app(mock);

        app.reload();
        settle(&mut app).await;

        let status = app.screen.status().unwrap();
        assert_eq!(status.level, NotificationLevel::Error);
        assert_eq!(status.title, "Load failed");
    }

    #[tokio::test]
    async fn test_empty_load_reports_no_students() {
        let mut mock = MockStudentsPort::new();
        mock.expect_fetch_all().times(1).returning(|| Ok(Vec::new()));
        let mut app = app(mock);
        app.screen
            .replace_students(vec![Student::new("1", "Ivan", "Petrov", 2021, "Physics")]);

        app.reload();
        settle(&mut app).await;

        assert!(app.screen.roster().is_empty());
        let status = app.screen.status().unwrap();
        assert_eq!(status.level, NotificationLevel::Warn);
        assert_eq!(status.message, "No students found");
    }

    #[tokio::test]
    async fn test_submit_appends_created_student_and_clears_form() {
        let mut mock = MockStudentsPort::new();
        mock.expect_create()
            .times(1)
            .returning(|candidate: NewStudent| Ok(candidate.into_student("42")));
        let mut app = app(mock);

        type_text(&mut app, "Ivan");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Petrov");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "2021");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Physics");

        assert_eq!(app.handle_key(key(KeyCode::Enter)), EventResult::Consumed);
        settle(&mut app).await;

        let students = app.screen.roster().students();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id().as_str(), "42");
        assert_eq!(app.screen.form(), StudentForm::default());
    }

    #[tokio::test]
    async fn test_invalid_form_opens_alert_without_request() {
        let mut mock = MockStudentsPort::new();
        mock.expect_create().times(0);
        let mut app = app(mock);

        type_text(&mut app, "Ivan");
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        assert!(app.screen.roster().is_empty());
        assert_eq!(app.screen.alert().unwrap().title, "Missing fields");
        assert_eq!(app.screen.form().name, "Ivan");
    }

    #[tokio::test]
    async fn test_failed_create_leaves_roster_and_form() {
        let mut mock = MockStudentsPort::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Err(ApiError::status(500, "Internal Server Error")));
        let mut app = app(mock);
        let form = StudentForm {
            name: "Ivan".to_string(),
            surname: "Petrov".to_string(),
            study_start: "2021".to_string(),
            faculty: "Physics".to_string(),
            ..StudentForm::default()
        };

        app.create(form);
        settle(&mut app).await;

        assert!(app.screen.roster().is_empty());
        assert_eq!(app.screen.status().unwrap().title, "Add failed");
        assert!(app.screen.alert().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_row_only_on_success() {
        let mut mock = MockStudentsPort::new();
        mock.expect_delete()
            .withf(|id: &StudentId| id.as_str() == "1")
            .times(1)
            .returning(|_| Err(ApiError::status(404, "Not Found")));
        mock.expect_delete()
            .withf(|id: &StudentId| id.as_str() == "2")
            .times(1)
            .returning(|_| Ok(()));
        let mut app = app(mock);
        app.screen.replace_students(vec![
            Student::new("1", "Ivan", "Petrov", 2021, "Physics"),
            Student::new("2", "Anna", "Smirnova", 2022, "History"),
        ]);
        app.screen.set_focus(RosterFocus::Table);

        app.handle_key(key(KeyCode::Delete));
        settle(&mut app).await;
        assert_eq!(app.screen.roster().len(), 2);
        assert_eq!(app.screen.status().unwrap().title, "Delete failed");

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Delete));
        settle(&mut app).await;
        assert_eq!(app.screen.roster().len(), 1);
        assert_eq!(app.screen.roster().students()[0].id().as_str(), "1");
    }

    #[tokio::test]
    async fn test_repeated_delete_sends_one_request() {
        let mut mock = MockStudentsPort::new();
        mock.expect_delete().times(1).returning(|_| Ok(()));
        let mut app = app(mock);
        app.screen.replace_students(vec![
            Student::new("1", "Ivan", "Petrov", 2021, "Physics"),
            Student::new("2", "Anna", "Smirnova", 2022, "History"),
        ]);
        app.screen.set_focus(RosterFocus::Table);

        app.handle_key(key(KeyCode::Delete));
        app.handle_key(key(KeyCode::Delete));
        assert_eq!(app.screen.pending_requests(), 1);
        settle(&mut app).await;

        assert_eq!(app.screen.roster().len(), 1);
        assert_eq!(app.screen.status().unwrap().title, "Deleted");
        assert!(app.deleting.is_empty());
    }

    #[tokio::test]
    async fn test_delete_can_be_retried_after_failure() {
        let mut mock = MockStudentsPort::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ApiError::network("connection refused")));
        mock.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let mut app = app(mock);
        app.screen
            .replace_students(vec![Student::new("1", "Ivan", "Petrov", 2021, "Physics")]);
        app.screen.set_focus(RosterFocus::Table);

        app.handle_key(key(KeyCode::Delete));
        settle(&mut app).await;
        assert_eq!(app.screen.status().unwrap().title, "Server unreachable");

        app.handle_key(key(KeyCode::Delete));
        settle(&mut app).await;
        assert!(app.screen.roster().is_empty());
    }

    #[test]
    fn test_quit_keys_exit() {
        let mut app = app(MockStudentsPort::new());
        let result = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(result, EventResult::Exit);
    }
}
