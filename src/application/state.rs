//! Application state management for the grant assistant.
//!
//! [`App`] owns every piece of state the screens draw from: the wizard, the
//! document slots, the chat log, the session and the static directories.
//! Uploads run on worker threads and report back over a channel; the event
//! loop calls [`App::tick`] to fold their completions (and any due chat
//! replies) into state on the UI thread.

use crate::domain::{
    active_grant_info, approved_count, chat_sessions, dashboard_stats, directory_grants,
    filter_grants, next_category, notifications, past_applications, pending_count,
    sample_transcript, section_checklist, ChatResponder, ChatSession, ChecklistItem,
    ChooseOutcome, DashboardStat, DirectoryGrant, DocumentKey, FileDecision, GrantInfo,
    MemorySessionRepository, Notification, PastApplication, ProfileField, SelectedFile,
    SessionRepository, SessionStore, SettingKey, Settings, SummaryExporter, TranscriptMessage,
    UploadEndpoint, UploadError, UploadJob, UploadReceipt, UploadTracker, UserField,
    WizardState, WizardStep, ALL_CATEGORY, ALL_DOCUMENT_KEYS, ALL_PROFILE_FIELDS,
    ALL_SETTING_KEYS, ALL_USER_FIELDS,
};
use crate::infrastructure::{AppConfig, ClipboardService, FileSessionRepository, HttpUploadClient};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Longest the event loop waits for input before ticking again.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Wizard,
    /// Saved chat sessions with the section checklist and grant details
    Chat,
    Grants,
    History,
    Settings,
}

/// Represents the current input mode of the application.
///
/// The mode decides how key presses are interpreted; the screen decides what
/// is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation: arrows move the highlight, letters trigger actions
    Normal,
    /// Typing into the sign-in form
    Login,
    /// Typing into a free-text business field
    Editing(UserField),
    /// Typing a new value for a profile field on the settings screen
    EditingProfile(ProfileField),
    /// Typing a chat message
    Chat,
    /// Typing the path of the file to upload for the pending slot
    PickFile,
    /// Typing the file name for the summary export
    ExportSummary,
    /// Typing a grants directory search
    Search,
    /// Help popup is displayed
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// Entries of the dashboard menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Open(Screen),
    Logout,
}

pub const DASHBOARD_MENU: [(MenuEntry, &str); 6] = [
    (MenuEntry::Open(Screen::Wizard), "Start a grant application"),
    (MenuEntry::Open(Screen::Chat), "Chat sessions"),
    (MenuEntry::Open(Screen::Grants), "Browse grants directory"),
    (MenuEntry::Open(Screen::History), "Past applications"),
    (MenuEntry::Open(Screen::Settings), "Settings"),
    (MenuEntry::Logout, "Sign out"),
];

/// One row of the settings screen: the profile fields come first, then the
/// preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Profile(ProfileField),
    Preference(SettingKey),
}

pub fn settings_rows() -> impl Iterator<Item = SettingsRow> {
    ALL_PROFILE_FIELDS
        .iter()
        .map(|field| SettingsRow::Profile(*field))
        .chain(ALL_SETTING_KEYS.iter().map(|key| SettingsRow::Preference(*key)))
}

#[derive(Debug)]
struct UploadCompletion {
    key: DocumentKey,
    result: Result<UploadReceipt, UploadError>,
}

pub struct App {
    pub screen: Screen,
    pub mode: AppMode,
    pub wizard: WizardState,
    pub uploads: UploadTracker,
    pub chat: ChatResponder,
    pub session: SessionStore,
    pub settings: Settings,
    pub directory: Vec<DirectoryGrant>,
    pub history: Vec<PastApplication>,
    /// Saved conversations listed on the chats screen and the dashboard
    pub chat_sessions: Vec<ChatSession>,
    /// Transcript of the highlighted chat session
    pub transcript: Vec<TranscriptMessage>,
    pub checklist: Vec<ChecklistItem>,
    pub grant_info: GrantInfo,
    pub notifications: Vec<Notification>,
    pub stats: Vec<DashboardStat>,
    /// Active directory search query
    pub grant_query: String,
    /// Active directory category filter
    pub grant_category: &'static str,
    /// Highlighted row of whatever list the current screen shows
    pub selected: usize,
    /// Shared input buffer for the text-entry modes
    pub input: String,
    /// Cursor position within `input`, in characters
    pub cursor_position: usize,
    pub login_email: String,
    pub login_password: String,
    pub login_field: LoginField,
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    uploader: Arc<dyn UploadEndpoint>,
    completions_tx: Sender<UploadCompletion>,
    completions_rx: Receiver<UploadCompletion>,
}

impl App {
    /// Creates an application on the sign-in screen.
    ///
    /// # Arguments
    ///
    /// * `backend_url` - Base URL that relative download paths are joined to
    /// * `reply_delay` - How long the assistant waits before each reply
    /// * `session` - Where the signed-in user is persisted
    /// * `uploader` - The endpoint document uploads are sent to
    pub fn new(
        backend_url: &str,
        reply_delay: Duration,
        session: Box<dyn SessionRepository>,
        uploader: Arc<dyn UploadEndpoint>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel();
        Self {
            screen: Screen::Login,
            mode: AppMode::Login,
            wizard: WizardState::default(),
            uploads: UploadTracker::new(backend_url),
            chat: ChatResponder::new(reply_delay),
            session: SessionStore::new(session),
            settings: Settings::default(),
            directory: directory_grants(),
            history: past_applications(),
            chat_sessions: chat_sessions(),
            transcript: sample_transcript(),
            checklist: section_checklist(),
            grant_info: active_grant_info(),
            notifications: notifications(),
            stats: dashboard_stats(),
            grant_query: String::new(),
            grant_category: ALL_CATEGORY,
            selected: 0,
            input: String::new(),
            cursor_position: 0,
            login_email: String::new(),
            login_password: String::new(),
            login_field: LoginField::Email,
            help_scroll: 0,
            status_message: None,
            uploader,
            completions_tx,
            completions_rx,
        }
    }

    /// Builds the application from resolved configuration, wiring the HTTP
    /// upload client and the file (or in-memory) session repository.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] when the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, UploadError> {
        let uploader = Arc::new(HttpUploadClient::new(&config.backend_url)?);
        let session: Box<dyn SessionRepository> = match &config.session_file {
            Some(path) => Box::new(FileSessionRepository::new(path)),
            None => Box::new(MemorySessionRepository::default()),
        };
        Ok(Self::new(&config.backend_url, config.reply_delay, session, uploader))
    }

    /// Adopts a persisted session, skipping the sign-in screen.
    pub fn restore_session(&mut self) {
        match self.session.restore() {
            Ok(Some(_)) => self.open_screen(Screen::Dashboard),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "could not restore session");
                self.status_message = Some(format!("Could not restore session: {err}"));
            }
        }
    }

    // ---- session ----

    /// Checks the typed credentials. On success the password buffer is
    /// wiped and the dashboard opens; on failure the reason lands in the
    /// status bar.
    pub fn submit_login(&mut self) {
        match self.session.login(self.login_email.trim(), &self.login_password) {
            Ok(true) => {
                self.login_password.clear();
                self.open_screen(Screen::Dashboard);
                self.status_message = Some("Signed in".to_string());
            }
            Ok(false) => {
                self.login_password.clear();
                self.status_message = Some("Invalid email or password".to_string());
            }
            Err(err) => {
                tracing::warn!(error = %err, "login could not be persisted");
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Moves focus between the email and password inputs.
    pub fn toggle_login_field(&mut self) {
        self.login_field = match self.login_field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    /// The buffer of whichever login input has focus.
    pub fn login_buffer_mut(&mut self) -> &mut String {
        match self.login_field {
            LoginField::Email => &mut self.login_email,
            LoginField::Password => &mut self.login_password,
        }
    }

    /// Forgets the stored session and returns to the sign-in screen. A
    /// repository failure is logged; the user is signed out regardless.
    pub fn logout(&mut self) {
        if let Err(err) = self.session.logout() {
            tracing::warn!(error = %err, "could not clear stored session");
        }
        self.screen = Screen::Login;
        self.mode = AppMode::Login;
        self.login_field = LoginField::Email;
        self.selected = 0;
        self.status_message = Some("Signed out".to_string());
    }

    // ---- navigation ----

    /// Switches screens, resetting the highlight and any status message.
    pub fn open_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.mode = if screen == Screen::Login {
            AppMode::Login
        } else {
            AppMode::Normal
        };
        self.selected = 0;
        self.status_message = None;
    }

    /// Enter on the dashboard menu.
    pub fn activate_menu_entry(&mut self) {
        match DASHBOARD_MENU.get(self.selected).map(|(entry, _)| *entry) {
            Some(MenuEntry::Open(screen)) => self.open_screen(screen),
            Some(MenuEntry::Logout) => self.logout(),
            None => {}
        }
    }

    /// Number of rows in the list the current screen highlights.
    pub fn list_len(&self) -> usize {
        match self.screen {
            Screen::Login => 0,
            Screen::Dashboard => DASHBOARD_MENU.len(),
            Screen::Wizard => match self.wizard.current_step {
                WizardStep::BusinessDetails => ALL_USER_FIELDS.len(),
                WizardStep::GrantDiscovery => self.wizard.candidates().len(),
                WizardStep::ApplicationGuidance => ALL_DOCUMENT_KEYS.len(),
                _ => 0,
            },
            Screen::Chat => self.chat_sessions.len(),
            Screen::Grants => self.filtered_grants().len(),
            Screen::History => self.history.len(),
            Screen::Settings => ALL_PROFILE_FIELDS.len() + ALL_SETTING_KEYS.len(),
        }
    }

    /// Moves the highlight one row, clamped to the current list.
    pub fn move_selection(&mut self, down: bool) {
        let len = self.list_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(len - 1)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    // ---- wizard ----

    /// Advances the wizard, or explains in the status bar which gate is
    /// still closed.
    pub fn next_step(&mut self) {
        if self.wizard.advance() {
            self.selected = 0;
            self.status_message = None;
        } else if self.wizard.current_step != WizardStep::LAST {
            self.status_message = Some(match self.wizard.current_step {
                WizardStep::BusinessDetails => "Fill in every business detail to continue".to_string(),
                WizardStep::GrantDiscovery => "Select a grant to continue".to_string(),
                _ => String::new(),
            });
        }
    }

    /// Goes back one step; a no-op on the first step.
    pub fn previous_step(&mut self) {
        if self.wizard.retreat() {
            self.selected = 0;
            self.status_message = None;
        }
    }

    pub fn highlighted_field(&self) -> Option<UserField> {
        ALL_USER_FIELDS.get(self.selected).copied()
    }

    pub fn highlighted_slot(&self) -> Option<DocumentKey> {
        ALL_DOCUMENT_KEYS.get(self.selected).copied()
    }

    /// Enter on a step-1 field: free-text fields open the editor, select
    /// fields step to their next option.
    pub fn activate_field(&mut self) {
        let Some(field) = self.highlighted_field() else {
            return;
        };
        if field.is_free_text() {
            self.mode = AppMode::Editing(field);
            self.input = self.wizard.user_info.get(field).to_string();
            self.cursor_position = self.input.chars().count();
        } else {
            self.wizard.user_info.cycle_option(field, true);
        }
    }

    /// Left/Right on a step-1 select field.
    pub fn cycle_field_option(&mut self, forward: bool) {
        if let Some(field) = self.highlighted_field() {
            self.wizard.user_info.cycle_option(field, forward);
        }
    }

    /// Commits the editor into the business details or the profile. A
    /// blank profile value is refused and the old value kept.
    pub fn finish_editing(&mut self) {
        match self.mode {
            AppMode::Editing(field) => self.wizard.user_info.set(field, self.input.trim()),
            AppMode::EditingProfile(field) => {
                if !self.settings.update_profile(field, &self.input) {
                    self.status_message = Some(format!("{} cannot be empty", field.label()));
                }
            }
            _ => {}
        }
        self.reset_input();
    }

    /// Marks the highlighted candidate as the grant being applied for.
    pub fn select_highlighted_grant(&mut self) {
        let id = self
            .wizard
            .candidates()
            .get(self.selected)
            .map(|grant| grant.id.clone());
        if let Some(id) = id {
            self.wizard.select_grant(&id);
        }
    }

    // ---- document uploads ----

    /// Opens the file prompt for the highlighted slot.
    pub fn choose_highlighted_slot(&mut self) {
        let Some(key) = self.highlighted_slot() else {
            return;
        };
        match self.uploads.choose(key) {
            ChooseOutcome::OpenPicker => {
                self.mode = AppMode::PickFile;
                self.input.clear();
                self.cursor_position = 0;
                self.status_message = None;
            }
            ChooseOutcome::Busy => {
                self.status_message = Some(format!("{} is still uploading", key.label()));
            }
        }
    }

    /// Leaves the file prompt without uploading anything.
    pub fn cancel_pick(&mut self) {
        self.uploads.cancel_pick();
        self.reset_input();
    }

    /// Hands the typed path to the tracker. The prompt is cleared whatever
    /// the outcome, so the same file can be picked again.
    pub fn submit_picked_file(&mut self) {
        let path = self.input.trim().to_string();
        self.reset_input();
        if path.is_empty() {
            self.uploads.cancel_pick();
            return;
        }
        match self.uploads.on_file_selected(SelectedFile::from_path(path)) {
            FileDecision::Ignored => {}
            FileDecision::Rejected(key) => {
                tracing::info!(doc_key = %key, "file refused before upload");
            }
            FileDecision::Upload(job) => self.dispatch_upload(job),
        }
    }

    fn dispatch_upload(&self, job: UploadJob) {
        let uploader = Arc::clone(&self.uploader);
        let tx = self.completions_tx.clone();
        tracing::info!(doc_key = %job.key, file = %job.file.name, "upload dispatched");
        thread::spawn(move || {
            let result = uploader.upload(&job);
            let key = job.key;
            if tx.send(UploadCompletion { key, result }).is_err() {
                tracing::debug!(doc_key = %key, "upload completion dropped, receiver gone");
            }
        });
    }

    /// Folds finished uploads into the tracker. Returns how many landed.
    pub fn drain_upload_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            match &completion.result {
                Ok(receipt) => {
                    tracing::info!(doc_key = %completion.key, filename = %receipt.filename, "upload saved")
                }
                Err(err) => tracing::warn!(doc_key = %completion.key, error = %err, "upload rejected"),
            }
            if self.uploads.complete(completion.key, completion.result) {
                applied += 1;
            }
        }
        applied
    }

    /// Copies the highlighted slot's download link to the clipboard.
    pub fn copy_download_url(&mut self) {
        let Some(key) = self.highlighted_slot() else {
            return;
        };
        let message = match self.uploads.slot(key).download_url.clone() {
            Some(url) => match ClipboardService::copy_text(&url) {
                Ok(()) => format!("Copied {url}"),
                Err(err) => {
                    tracing::warn!(error = %err, "copy to clipboard failed");
                    format!("Copy failed: {err}")
                }
            },
            None => format!("{} has no saved file", key.label()),
        };
        self.status_message = Some(message);
    }

    // ---- chat ----

    /// Focuses the chat prompt.
    pub fn start_chat(&mut self) {
        self.mode = AppMode::Chat;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Sends the prompt text. From the wizard it goes to the assistant,
    /// which replies after its delay; on the chats screen it is appended to
    /// the session transcript. Blank text is ignored in both places.
    pub fn send_chat(&mut self, now: Instant) {
        let text = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        if self.screen == Screen::Chat {
            let text = text.trim();
            if !text.is_empty() {
                self.transcript.push(TranscriptMessage::from_user(text));
                tracing::debug!(session = ?self.highlighted_session().map(|s| s.id), "transcript message added");
            }
            return;
        }
        self.chat.send(&text, self.wizard.current_step, now);
    }

    pub fn highlighted_session(&self) -> Option<&ChatSession> {
        self.chat_sessions.get(self.selected)
    }

    // ---- export ----

    /// Opens the export prompt with a default file name.
    pub fn start_export_summary(&mut self) {
        self.mode = AppMode::ExportSummary;
        self.input = "application-summary.csv".to_string();
        self.cursor_position = self.input.chars().count();
        self.status_message = None;
    }

    /// Writes the CSV summary and reports the path or the failure.
    pub fn finish_export_summary(&mut self) {
        let filename = if self.input.trim().is_empty() {
            "application-summary.csv".to_string()
        } else {
            self.input.trim().to_string()
        };
        self.status_message = Some(
            match SummaryExporter::export_to_csv(&self.wizard, &self.uploads, &filename) {
                Ok(path) => format!("Summary written to {path}"),
                Err(err) => format!("Export failed: {err}"),
            },
        );
        self.reset_input();
    }

    // ---- grants directory ----

    /// Directory entries matching the current query and category.
    pub fn filtered_grants(&self) -> Vec<&DirectoryGrant> {
        filter_grants(&self.directory, &self.grant_query, self.grant_category)
    }

    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.input = self.grant_query.clone();
        self.cursor_position = self.input.chars().count();
    }

    /// Live update while typing.
    pub fn update_search(&mut self) {
        self.grant_query = self.input.clone();
        self.selected = 0;
    }

    /// Clears the query and leaves the search prompt.
    pub fn cancel_search(&mut self) {
        self.grant_query.clear();
        self.selected = 0;
        self.reset_input();
    }

    /// Steps the category filter, wrapping back to "All".
    pub fn cycle_category(&mut self) {
        self.grant_category = next_category(self.grant_category);
        self.selected = 0;
    }

    // ---- history / settings ----

    /// `(pending, approved)` across past applications.
    pub fn history_counts(&self) -> (usize, usize) {
        (pending_count(&self.history), approved_count(&self.history))
    }

    pub fn highlighted_setting_row(&self) -> Option<SettingsRow> {
        settings_rows().nth(self.selected)
    }

    /// Enter on the settings screen: a profile row opens the editor
    /// prefilled with the current value, a preference row toggles.
    pub fn activate_highlighted_setting(&mut self) {
        match self.highlighted_setting_row() {
            Some(SettingsRow::Profile(field)) => {
                self.mode = AppMode::EditingProfile(field);
                self.input = self.settings.profile.get(field).to_string();
                self.cursor_position = self.input.chars().count();
                self.status_message = None;
            }
            Some(SettingsRow::Preference(key)) => self.toggle_setting(key),
            None => {}
        }
    }

    /// Space on the settings screen. Profile rows are left alone.
    pub fn toggle_highlighted_setting(&mut self) {
        if let Some(SettingsRow::Preference(key)) = self.highlighted_setting_row() {
            self.toggle_setting(key);
        }
    }

    /// Left/Right on the settings screen. The language row steps through
    /// the languages in either direction; other preferences toggle.
    pub fn cycle_highlighted_setting(&mut self, forward: bool) {
        match self.highlighted_setting_row() {
            Some(SettingsRow::Preference(SettingKey::Language)) => {
                self.settings.cycle_language(forward);
                tracing::info!(language = %self.settings.language, "language changed");
            }
            Some(SettingsRow::Preference(key)) => self.toggle_setting(key),
            _ => {}
        }
    }

    pub fn toggle_setting(&mut self, key: SettingKey) {
        self.settings.toggle(key);
    }

    // ---- lifecycle ----

    /// One turn of the event loop: land finished uploads and due replies.
    pub fn tick(&mut self, now: Instant) {
        self.drain_upload_completions();
        self.chat.poll(now);
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.chat
            .next_deadline()
            .map(|due| due.saturating_duration_since(now).min(TICK_INTERVAL))
            .unwrap_or(TICK_INTERVAL)
    }

    /// Uploads dispatched but not yet folded back in.
    pub fn uploads_in_flight(&self) -> usize {
        self.uploads.in_flight()
    }

    /// Teardown. Scheduled chat replies are dropped; uploads still running
    /// report into a channel nobody reads.
    pub fn shutdown(&mut self) {
        self.chat.dispose();
        tracing::info!(in_flight = self.uploads_in_flight(), "shutting down");
    }

    /// The shared input buffer, if `mode` is the one currently typing.
    pub fn input_for(&self, mode: AppMode) -> &str {
        if self.mode == mode { &self.input } else { "" }
    }

    /// Back to navigation with an empty input buffer.
    pub fn reset_input(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("mode", &self.mode)
            .field("step", &self.wizard.current_step)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
