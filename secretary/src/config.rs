use std::{path::PathBuf, time::Duration};

use clap::Parser;
use serde::Deserialize;

use crate::{error::ConfigError, product::validate_payment_day, salary::Salary};

pub const DEFAULT_BOT_TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// A Telegram bot that tracks recurring expenses between salary days
#[derive(Parser, Debug)]
#[command(name = "secretary")]
#[command(about = "A Telegram bot that tracks recurring expenses", long_about = None)]
pub struct Args {
    /// Environment variable name containing the bot token
    #[arg(long, default_value = DEFAULT_BOT_TOKEN_ENV)]
    pub bot_token_env: String,

    /// SQLite database file; data is kept in memory when omitted
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// YAML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Get the bot token from the configured environment variable
    pub fn get_token(&self) -> Result<String, ConfigError> {
        std::env::var(&self.bot_token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingToken(self.bot_token_env.clone()))
    }

    /// Settings from `--config`, or the defaults
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        match &self.config {
            Some(path) => Settings::load(path),
            None => Ok(Settings::default()),
        }
    }
}

/// Runtime settings, every field optional in the file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ping_interval_secs: u64,
    pub retry_attempts: u32,
    pub poll_timeout_secs: u64,
    /// Salaries inserted on start-up unless already stored
    pub salaries: Vec<Salary>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ping_interval_secs: 60,
            retry_attempts: 10,
            poll_timeout_secs: 60,
            salaries: Vec::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ping_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "ping_interval_secs must be positive".to_string(),
            ));
        }
        for salary in &self.salaries {
            validate_payment_day(salary.payment_day as i64).map_err(|err| {
                ConfigError::Invalid(format!("salary `{}`: {}", salary.name, err))
            })?;
        }
        Ok(())
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["secretary"]).unwrap();
        assert_eq!(args.bot_token_env, "TELEGRAM_TOKEN");
        assert_eq!(args.database, None);
        assert_eq!(args.config, None);
        assert_eq!(args.load_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_args_explicit() {
        let args = Args::try_parse_from([
            "secretary",
            "--bot-token-env",
            "SECRETARY_TEST_TOKEN_EXPLICIT",
            "--database",
            "secretary.db",
            "--config",
            "secretary.yaml",
        ])
        .unwrap();
        assert_eq!(args.bot_token_env, "SECRETARY_TEST_TOKEN_EXPLICIT");
        assert_eq!(args.database, Some(PathBuf::from("secretary.db")));
        assert_eq!(args.config, Some(PathBuf::from("secretary.yaml")));
    }

    #[test]
    fn test_missing_token() {
        let args = Args::try_parse_from([
            "secretary",
            "--bot-token-env",
            "SECRETARY_TEST_TOKEN_THAT_IS_NEVER_SET",
        ])
        .unwrap();
        assert!(matches!(
            args.get_token(),
            Err(ConfigError::MissingToken(ref name)) if name == "SECRETARY_TEST_TOKEN_THAT_IS_NEVER_SET"
        ));
    }

    #[test]
    fn test_settings_from_yaml() {
        let yaml = r#"
ping_interval_secs: 30
retry_attempts: 3
salaries:
  - name: main job
    sum: 5000
    payment_day: 5
  - name: advance
    sum: 2000
    payment_day: 20
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.ping_interval(), Duration::from_secs(30));
        assert_eq!(settings.retry_attempts, 3);
        assert_eq!(settings.poll_timeout(), Duration::from_secs(60));
        assert_eq!(
            settings.salaries,
            vec![
                Salary::new("main job", 5000, 5),
                Salary::new("advance", 2000, 20)
            ]
        );
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        assert_eq!(Settings::from_yaml("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            Settings::from_yaml("ping_interval_secs: 0"),
            Err(ConfigError::Invalid(_))
        ));
        let yaml = "salaries:\n  - name: broken\n    sum: 1\n    payment_day: 40\n";
        assert!(matches!(
            Settings::from_yaml(yaml),
            Err(ConfigError::Invalid(ref msg)) if msg.contains("broken")
        ));
        assert!(matches!(
            Settings::from_yaml("retry_attempts: many"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("secretary-settings-that-does-not-exist.yaml");
        assert!(matches!(Settings::load(&path), Err(ConfigError::Io(_))));
    }
}
