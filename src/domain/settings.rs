//! In-memory user preferences shown on the settings screen.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organization: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Organization,
    Phone,
}

pub const ALL_PROFILE_FIELDS: [ProfileField; 5] = [
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Email,
    ProfileField::Organization,
    ProfileField::Phone,
];

impl ProfileField {
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::FirstName => "First name",
            ProfileField::LastName => "Last name",
            ProfileField::Email => "Email",
            ProfileField::Organization => "Organization",
            ProfileField::Phone => "Phone",
        }
    }
}

impl Profile {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::Organization => &self.organization,
            ProfileField::Phone => &self.phone,
        }
    }

    fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Organization => &mut self.organization,
            ProfileField::Phone => &mut self.phone,
        }
    }
}

/// `(value, label)` pairs for the interface language select.
pub const LANGUAGES: [(&str, &str); 5] = [
    ("English", "English"),
    ("Spanish", "Español"),
    ("French", "Français"),
    ("German", "Deutsch"),
    ("Chinese", "中文"),
];

impl Default for Profile {
    fn default() -> Self {
        Self {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            organization: "Tech Startup Inc.".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl FontSize {
    pub fn next(self) -> Self {
        match self {
            FontSize::Small => FontSize::Medium,
            FontSize::Medium => FontSize::Large,
            FontSize::Large => FontSize::ExtraLarge,
            FontSize::ExtraLarge => FontSize::Small,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
            FontSize::ExtraLarge => "Extra Large",
        }
    }
}

/// Every adjustable entry on the settings screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    EmailNotifications,
    PushNotifications,
    DeadlineReminders,
    StatusUpdates,
    WeeklyDigest,
    Language,
    ColorBlindMode,
    TextToSpeech,
    FontSize,
    HighContrast,
    ReducedMotion,
}

pub const ALL_SETTING_KEYS: [SettingKey; 11] = [
    SettingKey::EmailNotifications,
    SettingKey::PushNotifications,
    SettingKey::DeadlineReminders,
    SettingKey::StatusUpdates,
    SettingKey::WeeklyDigest,
    SettingKey::Language,
    SettingKey::ColorBlindMode,
    SettingKey::TextToSpeech,
    SettingKey::FontSize,
    SettingKey::HighContrast,
    SettingKey::ReducedMotion,
];

impl SettingKey {
    pub fn label(self) -> &'static str {
        match self {
            SettingKey::EmailNotifications => "Email notifications",
            SettingKey::PushNotifications => "Push notifications",
            SettingKey::DeadlineReminders => "Deadline reminders",
            SettingKey::StatusUpdates => "Status updates",
            SettingKey::WeeklyDigest => "Weekly digest",
            SettingKey::Language => "Language",
            SettingKey::ColorBlindMode => "Colour-blind mode",
            SettingKey::TextToSpeech => "Text to speech",
            SettingKey::FontSize => "Font size",
            SettingKey::HighContrast => "High contrast",
            SettingKey::ReducedMotion => "Reduced motion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: Profile,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub deadline_reminders: bool,
    pub status_updates: bool,
    pub weekly_digest: bool,
    pub language: String,
    pub color_blind_mode: bool,
    pub text_to_speech: bool,
    pub font_size: FontSize,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            email_notifications: true,
            push_notifications: true,
            deadline_reminders: true,
            status_updates: true,
            weekly_digest: false,
            language: "English".to_string(),
            color_blind_mode: false,
            text_to_speech: false,
            font_size: FontSize::Medium,
            high_contrast: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    fn flag_mut(&mut self, key: SettingKey) -> Option<&mut bool> {
        match key {
            SettingKey::EmailNotifications => Some(&mut self.email_notifications),
            SettingKey::PushNotifications => Some(&mut self.push_notifications),
            SettingKey::DeadlineReminders => Some(&mut self.deadline_reminders),
            SettingKey::StatusUpdates => Some(&mut self.status_updates),
            SettingKey::WeeklyDigest => Some(&mut self.weekly_digest),
            SettingKey::ColorBlindMode => Some(&mut self.color_blind_mode),
            SettingKey::TextToSpeech => Some(&mut self.text_to_speech),
            SettingKey::HighContrast => Some(&mut self.high_contrast),
            SettingKey::ReducedMotion => Some(&mut self.reduced_motion),
            SettingKey::FontSize | SettingKey::Language => None,
        }
    }

    /// Flips a boolean preference; the font size and the language step to
    /// their next value.
    pub fn toggle(&mut self, key: SettingKey) {
        match key {
            SettingKey::FontSize => self.font_size = self.font_size.next(),
            SettingKey::Language => self.cycle_language(true),
            _ => {
                if let Some(flag) = self.flag_mut(key) {
                    *flag = !*flag;
                }
            }
        }
    }

    /// Moves to the next (or previous) entry of [`LANGUAGES`], wrapping. An
    /// unknown language restarts at the first entry.
    pub fn cycle_language(&mut self, forward: bool) {
        let current = LANGUAGES
            .iter()
            .position(|(value, _)| *value == self.language);
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(idx), true) => (idx + 1) % LANGUAGES.len(),
            (Some(idx), false) => (idx + LANGUAGES.len() - 1) % LANGUAGES.len(),
        };
        self.language = LANGUAGES[next].0.to_string();
    }

    pub fn language_label(&self) -> &str {
        match LANGUAGES.iter().find(|(value, _)| *value == self.language) {
            Some((_, label)) => label,
            None => &self.language,
        }
    }

    /// Replaces one profile field with the trimmed value. Blank input is
    /// refused and leaves the field as it was.
    pub fn update_profile(&mut self, field: ProfileField, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        *self.profile.get_mut(field) = value.to_string();
        tracing::info!(field = field.label(), "profile updated");
        true
    }

    pub fn display_value(&self, key: SettingKey) -> String {
        let flag = match key {
            SettingKey::EmailNotifications => self.email_notifications,
            SettingKey::PushNotifications => self.push_notifications,
            SettingKey::DeadlineReminders => self.deadline_reminders,
            SettingKey::StatusUpdates => self.status_updates,
            SettingKey::WeeklyDigest => self.weekly_digest,
            SettingKey::ColorBlindMode => self.color_blind_mode,
            SettingKey::TextToSpeech => self.text_to_speech,
            SettingKey::HighContrast => self.high_contrast,
            SettingKey::ReducedMotion => self.reduced_motion,
            SettingKey::FontSize => return self.font_size.as_str().to_string(),
            SettingKey::Language => return self.language_label().to_string(),
        };
        if flag { "on" } else { "off" }.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_page() {
        let settings = Settings::default();
        assert!(settings.email_notifications);
        assert!(!settings.weekly_digest);
        assert_eq!(settings.font_size, FontSize::Medium);
        assert_eq!(settings.language, "English");
    }

    #[test]
    fn test_toggle_flips_flags_and_cycles_font_size() {
        let mut settings = Settings::default();
        settings.toggle(SettingKey::WeeklyDigest);
        assert!(settings.weekly_digest);
        assert_eq!(settings.display_value(SettingKey::WeeklyDigest), "on");
        settings.toggle(SettingKey::WeeklyDigest);
        assert_eq!(settings.display_value(SettingKey::WeeklyDigest), "off");

        settings.toggle(SettingKey::FontSize);
        assert_eq!(settings.display_value(SettingKey::FontSize), "Large");
        settings.toggle(SettingKey::FontSize);
        assert_eq!(settings.display_value(SettingKey::FontSize), "Extra Large");
        settings.toggle(SettingKey::FontSize);
        assert_eq!(settings.font_size, FontSize::Small);
    }

    #[test]
    fn test_language_cycles_both_ways() {
        let mut settings = Settings::default();
        settings.cycle_language(true);
        assert_eq!(settings.language, "Spanish");
        assert_eq!(settings.display_value(SettingKey::Language), "Español");
        settings.cycle_language(false);
        settings.cycle_language(false);
        assert_eq!(settings.language, "Chinese");
        settings.toggle(SettingKey::Language);
        assert_eq!(settings.language, "English");
    }

    #[test]
    fn test_update_profile_trims_and_refuses_blank() {
        let mut settings = Settings::default();
        assert!(settings.update_profile(ProfileField::Organization, "  Acme Pty Ltd "));
        assert_eq!(settings.profile.get(ProfileField::Organization), "Acme Pty Ltd");
        assert!(!settings.update_profile(ProfileField::Email, "   "));
        assert_eq!(settings.profile.email, "john@example.com");
    }
}
