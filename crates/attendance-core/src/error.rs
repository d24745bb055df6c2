use thiserror::Error;

/// Failure of a single admin action.
///
/// Every variant has already been surfaced to the user as a notification by
/// the time the controller returns it; callers only use it to pick an exit
/// status or to branch in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// A required field was empty, or a confirmation field did not match.
    /// Detected before any request is made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server answered with a non-2xx status (or a 2xx missing the
    /// expected payload).
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// No response, timeout, or a response body that could not be parsed.
    #[error("network error: {0}")]
    Network(String),
}

impl ActionError {
    pub fn kind(&self) -> &'static str {
        match self {
            ActionError::Validation(_) => "validation",
            ActionError::Server { .. } => "server",
            ActionError::Network(_) => "network",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid form field '{0}': expected key=value")]
    InvalidField(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
