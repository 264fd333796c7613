use std::fmt;

// === ApiError ===

/// Errors raised while talking to the bookmark backend.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    Network(String),
    /// The backend answered with a non-2xx status.
    Http { status: u16, message: String },
    /// The response body could not be decoded into the expected shape.
    Decode(String),
    /// The configured base URL is not usable.
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::InvalidBaseUrl(url) => write!(f, "Invalid API base URL: {}", url),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

// === SettingsError ===

/// Errors related to display settings.
#[derive(Debug)]
pub enum SettingsError {
    /// A settings value failed validation.
    InvalidValue(String),
    /// Reading or writing the local cache failed.
    IoError(String),
    /// The settings could not be (de)serialized.
    SerializationError(String),
    /// The backend settings endpoint failed.
    Remote(ApiError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::Remote(err) => write!(f, "Remote settings error: {}", err),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Remote(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for SettingsError {
    fn from(error: ApiError) -> Self {
        SettingsError::Remote(error)
    }
}

// === BookmarkError ===

/// Errors related to bookmark actions on the board.
#[derive(Debug)]
pub enum BookmarkError {
    /// No bookmark with the given ID is loaded.
    NotFound(i64),
    /// The title is empty after trimming.
    EmptyTitle,
    /// The URL is empty or not an absolute http(s) URL.
    InvalidUrl(String),
    /// The backend call failed.
    Api(ApiError),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::EmptyTitle => write!(f, "Please provide a title"),
            BookmarkError::InvalidUrl(url) if url.is_empty() => write!(f, "URL cannot be empty"),
            BookmarkError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            BookmarkError::Api(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookmarkError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for BookmarkError {
    fn from(error: ApiError) -> Self {
        BookmarkError::Api(error)
    }
}
