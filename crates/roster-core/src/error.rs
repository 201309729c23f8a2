use thiserror::Error;

/// Top-level error type for Roster.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid sort field: {0} (expected one of: name, surname, position)")]
    InvalidSortField(String),

    #[error("Invalid sort order: {0} (expected ASC or DESC)")]
    InvalidSortOrder(String),
}

impl From<config::ConfigError> for RosterError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
