use crate::errors::{AppError, AppResult};
use crate::session::DEFAULT_MAX_SESSIONS;
use crate::utils::path::resolve_in;
use crate::utils::time::parse_utc_offset;
use chrono::FixedOffset;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod migrate; // use submodule at src/config/migrate.rs

/// Open-source FingerprintJS build loaded by the kiosk page.
pub const DEFAULT_FINGERPRINT_SCRIPT: &str = "https://openfpcdn.io/fingerprintjs/v4";

/// Environment variable overriding the admin secret.
pub const ADMIN_PASSWORD_ENV: &str = "RCHECKIN_ADMIN_PASSWORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Directory of CSV worksheets, edited like a spreadsheet
    Workbook,
    /// SQLite database with conditional writes
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default)]
    pub store: String,
    #[serde(default = "default_worksheet")]
    pub worksheet: String,
    #[serde(default = "default_settings_worksheet")]
    pub settings_worksheet: String,
    #[serde(default = "default_log_worksheet")]
    pub log_worksheet: String,
    #[serde(default)]
    pub utc_offset: String,
    #[serde(default)]
    pub admin_password: String,
    #[serde(default = "default_attendee_cache")]
    pub attendee_cache_secs: u64,
    #[serde(default = "default_settings_cache")]
    pub settings_cache_secs: u64,
    #[serde(default = "default_session_idle")]
    pub session_idle_minutes: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_fingerprint_script")]
    pub fingerprint_script: String,

    /// Where this configuration was loaded from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn default_backend() -> Backend {
    Backend::Workbook
}
fn default_worksheet() -> String {
    "Sheet1".to_string()
}
fn default_settings_worksheet() -> String {
    "Settings".to_string()
}
fn default_log_worksheet() -> String {
    "Log".to_string()
}
fn default_attendee_cache() -> u64 {
    30
}
fn default_settings_cache() -> u64 {
    60
}
fn default_session_idle() -> u64 {
    12 * 60
}
fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}
fn default_fingerprint_script() -> String {
    DEFAULT_FINGERPRINT_SCRIPT.to_string()
}
fn default_bind() -> String {
    "127.0.0.1:8501".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_store(Backend::Workbook, None)
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rcheckin")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rcheckin")
        }
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcheckin.conf")
    }

    /// Default store location for a backend
    pub fn default_store(backend: Backend) -> PathBuf {
        match backend {
            Backend::Workbook => Self::config_dir().join("Event_Check-in"),
            Backend::Sqlite => Self::config_dir().join("rcheckin.sqlite"),
        }
    }

    pub fn with_store(backend: Backend, store: Option<String>) -> Self {
        let store = store.unwrap_or_else(|| {
            Self::default_store(backend)
                .to_string_lossy()
                .to_string()
        });

        Self {
            backend,
            store,
            worksheet: default_worksheet(),
            settings_worksheet: default_settings_worksheet(),
            log_worksheet: default_log_worksheet(),
            utc_offset: String::new(),
            admin_password: String::new(),
            attendee_cache_secs: default_attendee_cache(),
            settings_cache_secs: default_settings_cache(),
            session_idle_minutes: default_session_idle(),
            max_sessions: default_max_sessions(),
            bind: default_bind(),
            fingerprint_script: default_fingerprint_script(),
            source: None,
        }
    }

    /// Load configuration from `path` (or the default file), or return defaults if not found
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };

        cfg.source = Some(path);
        Ok(cfg)
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Directory the config lives in; relative store paths are anchored here.
    pub fn base_dir(&self) -> PathBuf {
        self.source
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir)
    }

    pub fn store_path(&self) -> PathBuf {
        if self.store.trim().is_empty() {
            return Self::default_store(self.backend);
        }
        resolve_in(&self.base_dir(), &self.store)
    }

    /// Event-location offset; `None` means the machine's local time.
    pub fn offset(&self) -> AppResult<Option<FixedOffset>> {
        parse_utc_offset(&self.utc_offset)
    }

    /// Effective admin secret: environment first, then the config file.
    pub fn admin_secret(&self) -> String {
        env::var(ADMIN_PASSWORD_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.admin_password.clone())
    }

    pub fn attendee_ttl(&self) -> Duration {
        Duration::from_secs(self.attendee_cache_secs)
    }

    pub fn settings_ttl(&self) -> Duration {
        Duration::from_secs(self.settings_cache_secs)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes * 60)
    }

    /// Setup problems worth telling the operator about before serving.
    pub fn serve_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.admin_secret().is_empty() {
            warnings.push("No admin password configured: the admin panel is disabled.".to_string());
        }
        if self.fingerprint_script.trim().is_empty() {
            warnings.push(
                "No fingerprint_script configured: devices are identified by a browser-stored id, \
                 which clearing site data resets."
                    .to_string(),
            );
        }
        warnings
    }

    /// Basic sanity checks before serving.
    pub fn validate(&self) -> AppResult<()> {
        self.offset()?;
        if self.worksheet.trim().is_empty() {
            return Err(AppError::Config("worksheet name is empty".into()));
        }
        Ok(())
    }
}
