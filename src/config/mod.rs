use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub members_file: String,
    pub students_file: String,
    pub teachers_file: String,
    pub events_file: String,
    pub subscriptions_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "clubhouse=info".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn members_path(&self) -> PathBuf {
        self.data_dir.join(&self.members_file)
    }

    pub fn students_path(&self) -> PathBuf {
        self.data_dir.join(&self.students_file)
    }

    pub fn teachers_path(&self) -> PathBuf {
        self.data_dir.join(&self.teachers_file)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }

    pub fn subscriptions_path(&self) -> PathBuf {
        self.data_dir.join(&self.subscriptions_file)
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("storage.data_dir", "data")?
            .set_default("storage.members_file", "members.json")?
            .set_default("storage.students_file", "students.json")?
            .set_default("storage.teachers_file", "teachers.json")?
            .set_default("storage.events_file", "events.json")?
            .set_default("storage.subscriptions_file", "subscriptions.json")?
            .set_default("logging.filter", "clubhouse=info")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Environment variables (CLUBHOUSE__STORAGE__DATA_DIR=...)
            .add_source(Environment::with_prefix("CLUBHOUSE").separator("__"))

            .build()?;

        config.try_deserialize()
    }

    /// Default settings rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let mut settings = Self::default();
        settings.storage.data_dir = data_dir.as_ref().to_path_buf();
        settings
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from("data"),
                members_file: "members.json".to_string(),
                students_file: "students.json".to_string(),
                teachers_file: "teachers.json".to_string(),
                events_file: "events.json".to_string(),
                subscriptions_file: "subscriptions.json".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }
}
