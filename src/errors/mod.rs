use thiserror::Error;

/// Failures a workflow reports back to the user.
///
/// Storage and serialization failures are not listed here: they travel as
/// plain `anyhow` errors and surface as the generic notice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing fields: {0}")]
    MissingFields(String),

    #[error("missing data: {0}")]
    MissingData(String),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password shorter than {0} characters")]
    WeakPassword(usize),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("rank step not supported: {0}")]
    UnsupportedStep(String),

    #[error("username already exists: {0}")]
    UsernameTaken(String),

    #[error("no user found with username: {0}")]
    NotFound(String),

    #[error("incorrect password")]
    WrongPassword,

    #[error("no active session")]
    NoSession,

    #[error("game has no rank ladder: {0}")]
    UnsupportedGame(String),

    #[error("no job at position {0}")]
    JobNotFound(usize),
}

impl TrackerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TrackerError::InvalidInput(message.into())
    }
}

/// Blocking notice shown to the user when a workflow aborts.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    fn new(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
        }
    }
}

pub fn user_notice(error: &anyhow::Error) -> Notice {
    match error.downcast_ref::<TrackerError>() {
        Some(tracker_error) => notice_for(tracker_error),
        None => Notice::new("Error", "Something went wrong, nothing was saved"),
    }
}

fn notice_for(error: &TrackerError) -> Notice {
    match error {
        TrackerError::InvalidInput(message) => Notice::new("Invalid input", message.clone()),
        TrackerError::MissingFields(message) => Notice::new("Missing fields", message.clone()),
        TrackerError::MissingData(message) => Notice::new("Missing data", message.clone()),
        TrackerError::PasswordMismatch => Notice::new("Mismatch", "Passwords do not match"),
        TrackerError::WeakPassword(min) => Notice::new(
            "Weak password",
            format!("Password must be at least {min} characters"),
        ),
        TrackerError::InvalidDate(message) => Notice::new("Invalid date", message.clone()),
        TrackerError::UnsupportedStep(step) => {
            Notice::new("Not supported", format!("Rank/tier {step} is not supported"))
        }
        TrackerError::UsernameTaken(_) => Notice::new("Taken", "Username already exists"),
        TrackerError::NotFound(_) => Notice::new("Not found", "No user found with that username"),
        TrackerError::WrongPassword => Notice::new("Invalid", "Incorrect password"),
        TrackerError::NoSession => Notice::new("Signed out", "Please sign in first"),
        TrackerError::UnsupportedGame(game) => {
            Notice::new("Not supported", format!("{game} has no price ladder yet"))
        }
        TrackerError::JobNotFound(position) => {
            Notice::new("Missing data", format!("There is no job #{}", position + 1))
        }
    }
}

/// Context string for a failed storage operation on a key
pub fn storage_context(operation: &str, key: &str) -> String {
    format!("Failed to {} key: {}", operation, key)
}

/// Context string for a value that could not be (de)serialized
pub fn codec_context(data_type: &str, key: &str) -> String {
    format!("Failed to decode {} stored under {}", data_type, key)
}
