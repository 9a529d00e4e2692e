use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    /// Directory holding tasks.json, goals.json, reminders.json and config.json
    pub const DATA_DIR: &str = "DATA_DIR";
    /// Directory served at `/` (dashboard front-end). Skipped when missing.
    pub const STATIC_DIR: &str = "STATIC_DIR";
    pub const WEATHER_API_URL: &str = "WEATHER_API_URL";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 5001;
    pub const BIND_ADDRESS: &str = "127.0.0.1";
    pub const DATA_DIR: &str = "data";
    pub const STATIC_DIR: &str = "static";
    pub const WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
}

/// File names inside the data directory
pub mod files {
    pub const TASKS: &str = "tasks.json";
    pub const GOALS: &str = "goals.json";
    pub const REMINDERS: &str = "reminders.json";
    pub const CONFIG: &str = "config.json";
}

/// Returns the absolute path to the dashboard-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so relative defaults resolve
/// the same way regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub weather_api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = match env::var(env_vars::PORT) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT '{}', using {}", raw, defaults::PORT);
                defaults::PORT
            }),
            Err(_) => defaults::PORT,
        };

        Self {
            port,
            bind_address: env::var(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|_| defaults::BIND_ADDRESS.to_string()),
            data_dir: env::var(env_vars::DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| backend_dir().join(defaults::DATA_DIR)),
            static_dir: env::var(env_vars::STATIC_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| backend_dir().join(defaults::STATIC_DIR)),
            weather_api_url: env::var(env_vars::WEATHER_API_URL)
                .unwrap_or_else(|_| defaults::WEATHER_API_URL.to_string()),
        }
    }

    /// Config rooted at `data_dir` with every other value at its default
    #[cfg(test)]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: defaults::PORT,
            bind_address: defaults::BIND_ADDRESS.to_string(),
            data_dir: data_dir.into(),
            static_dir: backend_dir().join(defaults::STATIC_DIR),
            weather_api_url: defaults::WEATHER_API_URL.to_string(),
        }
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(files::TASKS)
    }

    pub fn goals_path(&self) -> PathBuf {
        self.data_dir.join(files::GOALS)
    }

    pub fn reminders_path(&self) -> PathBuf {
        self.data_dir.join(files::REMINDERS)
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(files::CONFIG)
    }
}
