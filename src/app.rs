//! Application state and core logic

use crate::draft::{hydrate_draft, persist_draft, DraftStore, FileDraftStore, DRAFT_KEY};
use crate::platform::PRIMARY_MODIFIER;
use crate::state::{stops, Field, FormSession, Stop};
use crate::submit::{ConsoleSink, SubmissionSink};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    ActionPanel,
}

/// Transient status-bar message
#[derive(Debug, Clone)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Main application struct
pub struct App {
    /// Current form session
    pub session: FormSession,
    /// Draft persistence
    store: Box<dyn DraftStore>,
    /// Destination for accepted records
    sink: Box<dyn SubmissionSink>,
    /// Whether the app should quit
    quit: bool,
    /// Which pane has keyboard focus
    pub focus: Focus,
    /// Which button is selected on the action panel (0=Submit, 1=Reset)
    pub selected_button: usize,
    /// Transient status-bar message
    pub notice: Option<Notice>,
}

impl App {
    /// Create a new App instance, hydrating any saved draft
    pub fn new() -> Self {
        let store = FileDraftStore::new();
        let record = hydrate_draft(&store);
        Self {
            session: FormSession::from_record(record),
            store: Box::new(store),
            sink: Box::new(ConsoleSink),
            quit: false,
            focus: Focus::Form,
            selected_button: 0,
            notice: None,
        }
    }

    #[cfg(test)]
    fn with_parts(store: Box<dyn DraftStore>, sink: Box<dyn SubmissionSink>) -> Self {
        let record = hydrate_draft(store.as_ref());
        Self {
            session: FormSession::from_record(record),
            store,
            sink,
            quit: false,
            focus: Focus::Form,
            selected_button: 0,
            notice: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Clear the success banner once its display interval has passed.
    /// Called every event-loop tick.
    pub fn update_banner(&mut self) {
        self.session.clear_expired_banner();
    }

    /// Save the in-progress draft at session end. Pristine sessions remove
    /// the stored draft instead of writing an empty one.
    pub fn persist_draft_on_exit(&self) -> Result<()> {
        if !self.session.is_dirty() {
            return Ok(());
        }
        if self.session.is_pristine() {
            self.store.remove(DRAFT_KEY)
        } else {
            persist_draft(self.store.as_ref(), &self.session.record)
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_action_panel = self.focus == Focus::ActionPanel;

        match key.code {
            // Shortcuts work from anywhere (Ctrl always, Cmd on macOS)
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(PRIMARY_MODIFIER) =>
            {
                self.submit_record().await;
            }
            KeyCode::Char('r')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(PRIMARY_MODIFIER) =>
            {
                self.reset_form();
            }
            KeyCode::Esc => self.quit = true,

            KeyCode::Tab => self.advance_focus(),
            KeyCode::BackTab => self.retreat_focus(),

            // Action panel navigation
            KeyCode::Up | KeyCode::Down if on_action_panel => {
                self.selected_button = (self.selected_button + 1) % 2;
            }
            KeyCode::Enter if on_action_panel => match self.selected_button {
                0 => self.submit_record().await,
                _ => self.reset_form(),
            },

            // Form navigation
            KeyCode::Up => self.session.prev_stop(),
            KeyCode::Down => self.session.next_stop(),
            KeyCode::PageUp => self.session.prev_section(),
            KeyCode::PageDown => self.session.next_section(),

            // Checklist items and the unit selector toggle in place;
            // Enter on a text field advances instead
            KeyCode::Enter | KeyCode::Char(' ') if self.on_toggle_stop() => {
                self.session.toggle_active();
            }
            KeyCode::Enter => self.session.next_stop(),

            // Form field input (only when the form is focused)
            KeyCode::Char(c)
                if !on_action_panel && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                let ch = if key.modifiers.contains(KeyModifiers::SHIFT) {
                    c.to_ascii_uppercase()
                } else {
                    c
                };
                self.session.input_char(ch);
            }
            KeyCode::Backspace if !on_action_panel => self.session.backspace(),
            _ => {}
        }
        Ok(())
    }

    fn on_toggle_stop(&self) -> bool {
        if self.focus != Focus::Form {
            return false;
        }
        matches!(
            self.session.active_stop(),
            Stop::SafetyItem(_) | Stop::EquipmentItem(_) | Stop::Field(Field::QuantityUnit)
        )
    }

    /// Tab: forward through the form, then onto the action panel
    fn advance_focus(&mut self) {
        match self.focus {
            Focus::Form => {
                if self.session.cursor() + 1 == stops().len() {
                    self.focus = Focus::ActionPanel;
                    self.selected_button = 0;
                } else {
                    self.session.next_stop();
                }
            }
            Focus::ActionPanel => {
                self.focus = Focus::Form;
            }
        }
    }

    /// Shift+Tab: the reverse walk
    fn retreat_focus(&mut self) {
        match self.focus {
            Focus::Form => {
                if self.session.cursor() == 0 {
                    self.focus = Focus::ActionPanel;
                    self.selected_button = 1;
                } else {
                    self.session.prev_stop();
                }
            }
            Focus::ActionPanel => {
                self.focus = Focus::Form;
            }
        }
    }

    /// Run the submission attempt end to end
    async fn submit_record(&mut self) {
        match self.session.submit() {
            Some(finalized) => {
                if let Err(err) = self.sink.submit(&finalized).await {
                    self.notice = Some(Notice::Error(format!("Submission failed: {err}")));
                    return;
                }
                if let Err(err) = self.store.remove(DRAFT_KEY) {
                    tracing::warn!("failed to remove submitted draft: {err}");
                }
                self.session.mark_submitted();
                self.notice = Some(Notice::Info("Vessel intake recorded".to_string()));
            }
            None => {
                let count = self.session.errors.len();
                self.focus = Focus::Form;
                let message = if count == 1 {
                    "1 field needs attention".to_string()
                } else {
                    format!("{count} fields need attention")
                };
                self.notice = Some(Notice::Error(message));
            }
        }
    }

    /// Clear the form and erase the saved draft
    fn reset_form(&mut self) {
        self.session.reset();
        self.focus = Focus::Form;
        self.selected_button = 0;
        if let Err(err) = self.store.remove(DRAFT_KEY) {
            tracing::warn!("failed to remove draft on reset: {err}");
        }
        self.notice = Some(Notice::Info("Form cleared".to_string()));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EquipmentChecklist, IntakeRecord, SafetyChecklist, Section};
    use crate::submit::MockSubmissionSink;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn valid_record() -> IntakeRecord {
        let mut safety = SafetyChecklist::default();
        for i in 0..SafetyChecklist::LEN {
            safety.toggle(i);
        }
        let mut equipment = EquipmentChecklist::default();
        for i in 0..EquipmentChecklist::LEN {
            equipment.toggle(i);
        }
        IntakeRecord {
            vessel_name: "MT Stolt Auk".to_string(),
            vessel_id: "V-2041".to_string(),
            imo_number: "IMO9123456".to_string(),
            flag_state: "Norway".to_string(),
            vessel_type: "Chemical tanker".to_string(),
            date_of_arrival: "2025-03-14".to_string(),
            time_of_arrival: "06:30".to_string(),
            berth_assignment: "Jetty 4".to_string(),
            estimated_departure: "2025-03-15T18:00".to_string(),
            quantity: "12500".to_string(),
            safety_checks: safety,
            equipment_checks: equipment,
            vessel_rep_name: "A. Larsen".to_string(),
            vessel_rep_signature: "A. Larsen".to_string(),
            terminal_rep_name: "P. Okafor".to_string(),
            terminal_rep_signature: "P. Okafor".to_string(),
            ..Default::default()
        }
    }

    fn test_app(sink: MockSubmissionSink) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = FileDraftStore::with_dir(dir.path().to_path_buf());
        let app = App::with_parts(Box::new(store), Box::new(sink));
        (dir, app)
    }

    #[tokio::test]
    async fn test_accepted_submission_delivers_one_stamped_record() {
        let mut sink = MockSubmissionSink::new();
        sink.expect_submit()
            .withf(|record: &IntakeRecord| record.approval_date_time.is_some())
            .once()
            .returning(|_| Ok(()));

        let (_dir, mut app) = test_app(sink);
        app.session = FormSession::from_record(valid_record());

        app.handle_key(ctrl('s')).await.unwrap();
        assert!(app.session.submitted.is_some());
        assert!(matches!(app.notice, Some(Notice::Info(_))));
        // Field values are kept after an accepted submission
        assert_eq!(app.session.record.vessel_name, "MT Stolt Auk");
    }

    #[tokio::test]
    async fn test_rejected_submission_never_reaches_the_sink() {
        let mut sink = MockSubmissionSink::new();
        sink.expect_submit().never();

        let (_dir, mut app) = test_app(sink);
        app.handle_key(ctrl('s')).await.unwrap();

        assert!(app.session.submitted.is_none());
        assert!(matches!(app.notice, Some(Notice::Error(_))));
        assert!(app.session.error_sections().contains(&Section::VesselInfo));
    }

    #[tokio::test]
    async fn test_successful_submission_erases_the_draft() {
        let mut sink = MockSubmissionSink::new();
        sink.expect_submit().returning(|_| Ok(()));

        let dir = TempDir::new().unwrap();
        let store = FileDraftStore::with_dir(dir.path().to_path_buf());
        persist_draft(&store, &valid_record()).unwrap();

        let mut app = App::with_parts(Box::new(store), Box::new(sink));
        assert_eq!(app.session.record, valid_record());

        app.handle_key(ctrl('s')).await.unwrap();
        let store = FileDraftStore::with_dir(dir.path().to_path_buf());
        assert!(store.load(DRAFT_KEY).is_none());
    }

    #[tokio::test]
    async fn test_reset_clears_form_and_draft() {
        let mut sink = MockSubmissionSink::new();
        sink.expect_submit().never();

        let dir = TempDir::new().unwrap();
        let store = FileDraftStore::with_dir(dir.path().to_path_buf());
        persist_draft(&store, &valid_record()).unwrap();

        let mut app = App::with_parts(Box::new(store), Box::new(sink));
        app.handle_key(ctrl('r')).await.unwrap();

        assert!(app.session.is_pristine());
        let store = FileDraftStore::with_dir(dir.path().to_path_buf());
        assert!(store.load(DRAFT_KEY).is_none());
    }

    #[tokio::test]
    async fn test_typing_reaches_the_active_field() {
        let (_dir, mut app) = test_app(MockSubmissionSink::new());
        app.handle_key(key(KeyCode::Char('m'))).await.unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::SHIFT))
            .await
            .unwrap();
        assert_eq!(app.session.record.vessel_name, "mT");
    }

    #[tokio::test]
    async fn test_space_toggles_checklist_but_types_in_text_fields() {
        let (_dir, mut app) = test_app(MockSubmissionSink::new());

        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        assert_eq!(app.session.record.vessel_name, " ");

        app.session.jump_to_section(Section::Safety);
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        assert!(app.session.record.safety_checks.mooring_secured);
    }

    #[tokio::test]
    async fn test_tab_walks_onto_the_action_panel_and_back() {
        let (_dir, mut app) = test_app(MockSubmissionSink::new());

        // Walk to the last stop, then one more Tab reaches the panel
        for _ in 0..stops().len() - 1 {
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
        }
        assert_eq!(app.focus, Focus::Form);
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.focus, Focus::ActionPanel);
        assert_eq!(app.selected_button, 0);

        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.focus, Focus::Form);
    }

    #[tokio::test]
    async fn test_esc_quits() {
        let (_dir, mut app) = test_app(MockSubmissionSink::new());
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_draft_persists_on_exit_only_when_dirty() {
        let dir = TempDir::new().unwrap();
        let store = FileDraftStore::with_dir(dir.path().to_path_buf());
        let mut app = App::with_parts(Box::new(store), Box::new(MockSubmissionSink::new()));

        // Untouched session writes nothing
        app.persist_draft_on_exit().unwrap();
        let probe = FileDraftStore::with_dir(dir.path().to_path_buf());
        assert!(probe.load(DRAFT_KEY).is_none());

        app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
        app.persist_draft_on_exit().unwrap();
        assert!(probe.load(DRAFT_KEY).is_some());
    }
}
