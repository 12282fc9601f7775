//! Error handling module for probeshape

use thiserror::Error;

use crate::validate::ValidationError;

/// Main error type for probe operations
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probing tool ran and exited unsuccessfully
    #[error("{program} exited with {}: {stderr}", describe_exit(.exit_code))]
    Process {
        program: String,
        /// `None` when the process was terminated by a signal
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The probing tool could not be started at all
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The caller-side timeout elapsed before the tool finished
    #[error("{program} did not finish within {seconds:.1}s")]
    TimedOut { program: String, seconds: f64 },

    /// Probe output is not well-formed JSON
    #[error("Failed to parse probe output: {message}")]
    Syntax { message: String },

    /// Probe output parsed but does not match the schema
    #[error(transparent)]
    Schema(#[from] ValidationError),

    /// Configuration could not be loaded or is invalid
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Typed output could not be rendered
    #[error("Failed to render output: {message}")]
    Render { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`ProbeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Process,
    Syntax,
    Schema,
    Config,
    Io,
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::Process { .. }
            | ProbeError::Launch { .. }
            | ProbeError::TimedOut { .. } => ErrorKind::Process,
            ProbeError::Syntax { .. } => ErrorKind::Syntax,
            ProbeError::Schema(_) => ErrorKind::Schema,
            ProbeError::Config { .. } => ErrorKind::Config,
            ProbeError::Render { .. } | ProbeError::Io(_) => ErrorKind::Io,
        }
    }

    /// Violations carried by a schema error, empty for every other kind
    pub fn violations(&self) -> &[crate::validate::Violation] {
        match self {
            ProbeError::Schema(err) => err.violations(),
            _ => &[],
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        ProbeError::Config {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Syntax {
            message: err.to_string(),
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

/// Result type alias for probe operations
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
