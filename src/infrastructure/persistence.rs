use crate::domain::{SessionError, SessionRepository, SessionUser, SESSION_STORAGE_KEY};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Session record kept in a small JSON object file, one entry per storage
/// key. Other keys in the file are preserved across writes.
#[derive(Debug, Clone)]
pub struct FileSessionRepository {
    path: PathBuf,
}

impl FileSessionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn read_entries(&self) -> Result<Map<String, Value>, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(SessionError::Read {
                    path: self.display_path(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(|source| SessionError::Parse {
            path: self.display_path(),
            source,
        })
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SessionError::Write {
                path: self.display_path(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|source| SessionError::Write {
            path: self.display_path(),
            source,
        })
    }
}

impl SessionRepository for FileSessionRepository {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        let mut entries = self.read_entries()?;
        match entries.remove(SESSION_STORAGE_KEY) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| SessionError::Parse {
                    path: self.display_path(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn save(&mut self, user: &SessionUser) -> Result<(), SessionError> {
        let mut entries = self.read_entries()?;
        entries.insert(SESSION_STORAGE_KEY.to_string(), serde_json::to_value(user)?);
        self.write_entries(&entries)
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        let mut entries = self.read_entries()?;
        if entries.remove(SESSION_STORAGE_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{demo_user, SessionStore};

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("session.json"));
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_save_writes_mock_auth_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.json");
        let mut repo = FileSessionRepository::new(&path);
        repo.save(&demo_user()).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["mockAuth"]["email"], "test@example.com");
        assert_eq!(raw["mockAuth"]["name"], "Demo User");
        assert_eq!(repo.load().unwrap(), Some(demo_user()));
    }

    #[test]
    fn test_clear_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"theme":"dark","mockAuth":{"email":"a@b.c","name":"A"}}"#).unwrap();

        let mut repo = FileSessionRepository::new(&path);
        repo.clear().unwrap();
        assert!(repo.load().unwrap().is_none());
        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_corrupt_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let repo = FileSessionRepository::new(&path);
        assert!(matches!(repo.load(), Err(SessionError::Parse { .. })));
    }

    #[test]
    fn test_session_survives_restart_until_logout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::new(Box::new(FileSessionRepository::new(&path)));
        assert!(store.login("test@example.com", "password123").unwrap());

        let mut restarted = SessionStore::new(Box::new(FileSessionRepository::new(&path)));
        assert_eq!(restarted.restore().unwrap(), Some(&demo_user()));
        restarted.logout().unwrap();

        let mut fresh = SessionStore::new(Box::new(FileSessionRepository::new(&path)));
        assert!(fresh.restore().unwrap().is_none());
    }
}
