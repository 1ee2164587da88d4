use crate::application::{App, AppMode, LoginField, Screen};
use crate::domain::WizardStep;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Instant;

/// Translates key presses into [`App`] operations.
pub struct InputHandler;

impl InputHandler {
    /// Routes a key by the current [`AppMode`]; in normal mode the screen
    /// picks the handler.
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Login => Self::handle_login_mode(app, key),
            AppMode::Editing(_) | AppMode::EditingProfile(_) => {
                Self::handle_editing_mode(app, key)
            }
            AppMode::Chat => Self::handle_chat_mode(app, key),
            AppMode::PickFile => Self::handle_pick_file_mode(app, key),
            AppMode::ExportSummary => Self::handle_export_mode(app, key),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.move_selection(false);
                return;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.move_selection(true);
                return;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
                return;
            }
            KeyCode::Esc if app.screen != Screen::Dashboard => {
                app.open_screen(Screen::Dashboard);
                return;
            }
            _ => {}
        }

        match app.screen {
            Screen::Login => app.mode = AppMode::Login,
            Screen::Dashboard => Self::handle_dashboard_keys(app, key),
            Screen::Wizard => Self::handle_wizard_keys(app, key),
            Screen::Chat => {
                if matches!(key, KeyCode::Tab | KeyCode::Char('c')) {
                    app.start_chat();
                }
            }
            Screen::Grants => Self::handle_grants_keys(app, key),
            Screen::History => {}
            Screen::Settings => Self::handle_settings_keys(app, key),
        }
    }

    fn handle_settings_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.activate_highlighted_setting(),
            KeyCode::Char(' ') => app.toggle_highlighted_setting(),
            KeyCode::Left | KeyCode::Char('h') => app.cycle_highlighted_setting(false),
            KeyCode::Right | KeyCode::Char('l') => app.cycle_highlighted_setting(true),
            _ => {}
        }
    }

    fn handle_dashboard_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.activate_menu_entry(),
            KeyCode::Char('w') => app.open_screen(Screen::Wizard),
            KeyCode::Char('c') => app.open_screen(Screen::Chat),
            KeyCode::Char('g') => app.open_screen(Screen::Grants),
            KeyCode::Char('h') => app.open_screen(Screen::History),
            KeyCode::Char('s') => app.open_screen(Screen::Settings),
            KeyCode::Char('l') => app.logout(),
            _ => {}
        }
    }

    fn handle_wizard_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::PageDown => {
                app.next_step();
                return;
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                app.previous_step();
                return;
            }
            KeyCode::Tab | KeyCode::Char('c') => {
                app.start_chat();
                return;
            }
            _ => {}
        }

        match (app.wizard.current_step, key) {
            (WizardStep::BusinessDetails, KeyCode::Enter) => app.activate_field(),
            (WizardStep::BusinessDetails, KeyCode::Left | KeyCode::Char('h')) => {
                app.cycle_field_option(false)
            }
            (WizardStep::BusinessDetails, KeyCode::Right | KeyCode::Char('l')) => {
                app.cycle_field_option(true)
            }
            (WizardStep::GrantDiscovery, KeyCode::Enter | KeyCode::Char(' ')) => {
                app.select_highlighted_grant()
            }
            (WizardStep::ApplicationGuidance, KeyCode::Enter | KeyCode::Char('u')) => {
                app.choose_highlighted_slot()
            }
            (WizardStep::ApplicationGuidance, KeyCode::Char('y')) => app.copy_download_url(),
            (WizardStep::SubmitApplication, KeyCode::Char('x')) => app.start_export_summary(),
            _ => {}
        }
    }

    fn handle_grants_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('c') | KeyCode::Tab => app.cycle_category(),
            _ => {}
        }
    }

    fn handle_login_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.toggle_login_field(),
            KeyCode::Enter => match app.login_field {
                LoginField::Email => app.toggle_login_field(),
                LoginField::Password => app.submit_login(),
            },
            KeyCode::Backspace => {
                app.login_buffer_mut().pop();
            }
            KeyCode::Char(c) => app.login_buffer_mut().push(c),
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.reset_input(),
            _ => {
                edit_input(app, key);
            }
        }
    }

    fn handle_chat_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.send_chat(Instant::now()),
            KeyCode::Esc | KeyCode::Tab => app.reset_input(),
            _ => {
                edit_input(app, key);
            }
        }
    }

    fn handle_pick_file_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_picked_file(),
            KeyCode::Esc => app.cancel_pick(),
            _ => {
                edit_input(app, key);
            }
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_export_summary(),
            KeyCode::Esc => app.reset_input(),
            _ => {
                edit_input(app, key);
            }
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            // Keep the query, leave the prompt
            KeyCode::Enter => {
                app.mode = AppMode::Normal;
                app.cursor_position = 0;
                app.input.clear();
            }
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Down => app.move_selection(true),
            KeyCode::Up => app.move_selection(false),
            _ => {
                if edit_input(app, key) {
                    app.update_search();
                }
            }
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = if app.screen == Screen::Login {
                    AppMode::Login
                } else {
                    AppMode::Normal
                };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Line editing on `app.input`. Returns true when the text changed.
fn edit_input(app: &mut App, key: KeyCode) -> bool {
    let len = app.input.chars().count();
    match key {
        KeyCode::Backspace => {
            if app.cursor_position > 0 {
                let idx = byte_index(&app.input, app.cursor_position - 1);
                app.input.remove(idx);
                app.cursor_position -= 1;
                return true;
            }
        }
        KeyCode::Delete => {
            if app.cursor_position < len {
                let idx = byte_index(&app.input, app.cursor_position);
                app.input.remove(idx);
                return true;
            }
        }
        KeyCode::Left => {
            app.cursor_position = app.cursor_position.saturating_sub(1);
        }
        KeyCode::Right => {
            if app.cursor_position < len {
                app.cursor_position += 1;
            }
        }
        KeyCode::Home => {
            app.cursor_position = 0;
        }
        KeyCode::End => {
            app.cursor_position = len;
        }
        KeyCode::Char(c) => {
            let idx = byte_index(&app.input, app.cursor_position);
            app.input.insert(idx, c);
            app.cursor_position += 1;
            return true;
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DocumentKey, MemorySessionRepository, UploadEndpoint, UploadError, UploadJob,
        UploadReceipt, UserField,
    };
    use std::sync::Arc;
    use std::time::Duration;

    struct RefusingEndpoint;

    impl UploadEndpoint for RefusingEndpoint {
        fn upload(&self, _job: &UploadJob) -> Result<UploadReceipt, UploadError> {
            Err(UploadError::rejected(None, None))
        }
    }

    fn new_app() -> App {
        App::new(
            "http://127.0.0.1:5000",
            Duration::from_millis(1000),
            Box::new(MemorySessionRepository::default()),
            Arc::new(RefusingEndpoint),
        )
    }

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn signed_in_app() -> App {
        let mut app = new_app();
        type_text(&mut app, "test@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "password123");
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn test_login_form_keys() {
        let mut app = new_app();
        type_text(&mut app, "test@example.comx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.login_email, "test@example.com");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.login_field, LoginField::Password);
        type_text(&mut app, "password123");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Dashboard);
        assert!(matches!(app.mode, AppMode::Normal));
    }

    #[test]
    fn test_q_is_typed_on_login_screen() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.login_email, "q");
    }

    #[test]
    fn test_dashboard_shortcuts_and_escape() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.screen, Screen::Wizard);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Dashboard);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Chat);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.screen, Screen::Grants);
    }

    #[test]
    fn test_chat_screen_keys() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.screen, Screen::Chat);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.highlighted_session().map(|s| s.id), Some(2));

        press(&mut app, KeyCode::Char('c'));
        assert!(matches!(app.mode, AppMode::Chat));
        type_text(&mut app, "done");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.transcript.last().map(|m| m.content.as_str()), Some("done"));
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Normal));
    }

    #[test]
    fn test_wizard_field_editing_keys() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('w'));

        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::Editing(UserField::BusinessName)));
        type_text(&mut app, "Acme");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.wizard.user_info.business_name, "acme");

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.wizard.user_info.business_type, "sme");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.wizard.user_info.business_type, "startup");
    }

    #[test]
    fn test_editing_handles_multibyte_text() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('w'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Café");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('é'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.wizard.user_info.business_name, "Café");
    }

    #[test]
    fn test_step_navigation_keys() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('w'));
        for field in crate::domain::ALL_USER_FIELDS {
            app.wizard.user_info.set(field, "x");
        }
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.wizard.current_step, WizardStep::GrantDiscovery);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.wizard.current_step, WizardStep::GrantDiscovery);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.wizard.is_selected("2"));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.wizard.current_step, WizardStep::ApplicationGuidance);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.wizard.current_step, WizardStep::GrantDiscovery);
    }

    #[test]
    fn test_pick_file_prompt_cancel_clears_pending() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('w'));
        app.wizard.current_step = WizardStep::ApplicationGuidance;

        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::PickFile));
        assert_eq!(app.uploads.pending(), Some(DocumentKey::RegistrationCertificate));

        type_text(&mut app, "/tmp/a.pdf");
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.uploads.pending().is_none());
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_chat_keys() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('w'));
        press(&mut app, KeyCode::Tab);
        assert!(matches!(app.mode, AppMode::Chat));

        type_text(&mut app, "help");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.chat.log().last().map(String::as_str), Some("You: help"));
        assert!(matches!(app.mode, AppMode::Chat));

        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Normal));
    }

    #[test]
    fn test_search_filters_live() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('/'));
        assert!(matches!(app.mode, AppMode::Search));

        type_text(&mut app, "arts");
        assert_eq!(app.grant_query, "arts");
        assert_eq!(app.filtered_grants().len(), 1);

        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.grant_query, "arts");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert!(app.grant_query.is_empty());
    }

    #[test]
    fn test_settings_toggle_key() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('s'));
        for _ in 0..crate::domain::ALL_PROFILE_FIELDS.len() {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.settings.email_notifications);
    }

    #[test]
    fn test_settings_profile_edit_keys() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::EditingProfile(_)));
        for _ in 0.."John".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "Jane");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.settings.profile.first_name, "Jane");

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "-Smith");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.settings.profile.last_name, "Doe");
    }

    #[test]
    fn test_settings_language_arrows() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('s'));
        while app.highlighted_setting_row()
            != Some(crate::application::SettingsRow::Preference(crate::domain::SettingKey::Language))
        {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.settings.language, "French");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.settings.language_label(), "Español");
    }

    #[test]
    fn test_help_popup_round_trip() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.mode, AppMode::Help));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.help_scroll, 1);
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Normal));
    }
}
