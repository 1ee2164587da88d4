//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Parser)]
#[command(name = "granted", version, about = "Terminal assistant for Australian business grant applications")]
pub struct Cli {
    /// Base URL of the document upload backend.
    #[arg(long, env = "GRANTED_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// File holding the signed-in demo session.
    #[arg(long, env = "GRANTED_SESSION_FILE", default_value = "granted-session.json")]
    pub session_file: PathBuf,

    /// Log output; the terminal itself is taken by the UI.
    #[arg(long, env = "GRANTED_LOG_FILE", default_value = "granted.log")]
    pub log_file: PathBuf,

    /// Delay before the assistant answers a chat message.
    #[arg(long, default_value_t = 1000)]
    pub reply_delay_ms: u64,

    /// Keep the session in memory only.
    #[arg(long)]
    pub ephemeral: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("backend url must start with http:// or https://, got `{0}`")]
    InvalidBackendUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub session_file: Option<PathBuf>,
    pub log_file: PathBuf,
    pub reply_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            session_file: None,
            log_file: PathBuf::from("granted.log"),
            reply_delay: Duration::from_millis(1000),
        }
    }
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let backend_url = cli.backend_url.trim().trim_end_matches('/').to_string();
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(cli.backend_url));
        }
        Ok(Self {
            backend_url,
            session_file: (!cli.ephemeral).then_some(cli.session_file),
            log_file: cli.log_file,
            reply_delay: Duration::from_millis(cli.reply_delay_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("granted").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = AppConfig::from_cli(parse(&[
            "--backend-url",
            "https://grants.example.com/",
            "--session-file",
            "/tmp/s.json",
            "--reply-delay-ms",
            "250",
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "https://grants.example.com");
        assert_eq!(config.session_file, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(config.reply_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_ephemeral_drops_session_file() {
        let config = AppConfig::from_cli(parse(&[
            "--backend-url",
            DEFAULT_BACKEND_URL,
            "--ephemeral",
        ]))
        .unwrap();
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_rejects_backend_without_scheme() {
        let err = AppConfig::from_cli(parse(&["--backend-url", "localhost:5000"])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidBackendUrl("localhost:5000".to_string()));
    }
}
