use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub faq_path: PathBuf,
    pub leads_path: PathBuf,
    pub prompts_path: Option<PathBuf>,
    pub world_path: Option<PathBuf>,
    pub log_level: Level,
}

fn path_var(name: &str) -> Result<Option<PathBuf>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue(
            name.to_string(),
            "path must not be empty".to_string(),
        )),
        Ok(value) => Ok(Some(PathBuf::from(value))),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env files in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::from_filename(".env.local").ok();
            dotenvy::dotenv().ok();
        }

        let faq_path = path_var("FAQ_PATH")?.unwrap_or_else(|| PathBuf::from("store_faq.json"));
        let leads_path =
            path_var("LEADS_PATH")?.unwrap_or_else(|| PathBuf::from("leads_db.json"));
        let prompts_path = path_var("PROMPTS_PATH")?;
        let world_path = path_var("WORLD_PATH")?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            faq_path,
            leads_path,
            prompts_path,
            world_path,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("FAQ_PATH");
            env::remove_var("LEADS_PATH");
            env::remove_var("PROMPTS_PATH");
            env::remove_var("WORLD_PATH");
            env::remove_var("RUST_LOG");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.faq_path, PathBuf::from("store_faq.json"));
        assert_eq!(config.leads_path, PathBuf::from("leads_db.json"));
        assert_eq!(config.prompts_path, None);
        assert_eq!(config.world_path, None);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    #[serial]
    fn test_config_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("FAQ_PATH", "/data/faq.json");
            env::set_var("LEADS_PATH", "/data/leads.json");
            env::set_var("PROMPTS_PATH", "/custom/prompts");
            env::set_var("WORLD_PATH", "/data/world.json");
            env::set_var("RUST_LOG", "debug");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.faq_path, PathBuf::from("/data/faq.json"));
        assert_eq!(config.leads_path, PathBuf::from("/data/leads.json"));
        assert_eq!(config.prompts_path, Some(PathBuf::from("/custom/prompts")));
        assert_eq!(config.world_path, Some(PathBuf::from("/data/world.json")));
        assert_eq!(config.log_level, Level::DEBUG);
        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
        }
        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_config_empty_path_is_rejected() {
        clear_env_vars();
        unsafe {
            env::set_var("LEADS_PATH", "  ");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "LEADS_PATH"),
        }
        clear_env_vars();
    }
}
