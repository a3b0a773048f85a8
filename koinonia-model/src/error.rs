/// Validation errors for client-supplied payloads.
///
/// Handlers map every variant to HTTP 400.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "Invalid username: must be 3-30 characters, alphanumeric or underscore"
    )]
    InvalidUsername,

    #[error("Password too short: minimum 8 characters required")]
    PasswordTooShort,

    #[error("Invalid display name: must be 1-100 characters")]
    InvalidDisplayName,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Title must be 1-200 characters")]
    InvalidTitle,

    #[error("Body must not be empty")]
    EmptyBody,

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
