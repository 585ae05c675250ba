use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration property \"{0}\" is not defined")]
    MissingKey(String),

    #[error("Invalid value at \"{path}\": {message}")]
    InvalidValue { path: String, message: String },
}
