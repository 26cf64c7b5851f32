use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeqRipError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Failed to read input file {path}: {source}")]
    InputUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputNotWritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SeqRipError {
    fn user_message(&self) -> String {
        match self {
            SeqRipError::InputNotFound { path } => {
                format!("Input binary not found: {}", path)
            }
            SeqRipError::InputUnreadable { path, source } => {
                format!("Could not read input binary {}: {}", path, source)
            }
            SeqRipError::OutputNotWritable { path, source } => {
                format!("Could not write output file {}: {}", path, source)
            }
            SeqRipError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            SeqRipError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            SeqRipError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SeqRipError::InputNotFound { .. } => Some(
                "Copy the game executables into the working directory under their variant names (e.g. AePc, AoPsx), or pass the binaries to scan as arguments.".to_string()
            ),
            SeqRipError::InputUnreadable { .. } => Some(
                "Ensure the input file is a regular file and you have permission to read it.".to_string()
            ),
            SeqRipError::OutputNotWritable { .. } => Some(
                "Ensure the output directory exists and is writable, or choose another one with --output-dir.".to_string()
            ),
            SeqRipError::Config { .. } => Some(
                "Check your configuration file syntax, or run with --generate-config to write a fresh sample.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SeqRipError {
    fn from(error: toml::de::Error) -> Self {
        SeqRipError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeqRipError>;
