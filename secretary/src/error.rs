use secretary_kit::{markdown::MarkdownString, markdown_format, markdown_string};
use thiserror::Error;

/// Invalid arguments of a command, reported back to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("expected {expected} arguments, found {found}")]
    Count { expected: usize, found: usize },

    #[error("{name} should be a number, got `{value}`")]
    Type { name: &'static str, value: String },

    #[error("payment day should be between 1 and 31, got {0}")]
    PaymentDayOutOfRange(i64),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("product `{0}` already exists")]
    DuplicateProduct(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("no salary payment days defined, cannot compute the pay period")]
    NoPeriodDefined,

    #[error("cannot place day {day} of month {month} into the reference year")]
    DateOutOfRange { month: u32, day: u32 },
}

/// Everything that can go wrong while running a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error("product `{0}` already exists")]
    DuplicateProduct(String),

    #[error(transparent)]
    Period(#[from] PeriodError),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateProduct(name) => CommandError::DuplicateProduct(name),
            other => CommandError::Storage(other),
        }
    }
}

impl CommandError {
    /// Internal errors go to the operator log, the user only sees a generic notice
    pub fn is_internal(&self) -> bool {
        matches!(self, CommandError::Period(_) | CommandError::Storage(_))
    }

    /// Text sent back to the chat
    pub fn user_message(&self) -> MarkdownString {
        match self {
            CommandError::Argument(err) => markdown_format!("❌ {}", err.user_message()),
            CommandError::DuplicateProduct(name) => markdown_format!(
                "ℹ️ Product *{}* already exists\\.",
                name
            ),
            CommandError::Period(_) | CommandError::Storage(_) => {
                markdown_string!("😞 Something went wrong on the server :\\(")
            }
        }
    }
}

impl ArgumentError {
    fn user_message(&self) -> MarkdownString {
        match self {
            ArgumentError::Count { expected, found } => markdown_format!(
                "Expected {} arguments, found {}\\.",
                *expected,
                *found
            ),
            ArgumentError::Type { name, value } => markdown_format!(
                "{} should be a number, got `{}`\\.",
                capitalize(name),
                value
            ),
            ArgumentError::PaymentDayOutOfRange(day) => markdown_format!(
                "Payment day should be between 1 and 31, got {}\\.",
                *day
            ),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Start-up configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} with the bot token is not set")]
    MissingToken(String),

    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
