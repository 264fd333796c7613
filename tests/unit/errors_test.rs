use linkshelf::types::errors::*;

// === ApiError Tests ===

#[test]
fn api_error_display_variants() {
    assert_eq!(
        ApiError::Network("connection refused".to_string()).to_string(),
        "Network error: connection refused"
    );
    assert_eq!(
        ApiError::Http {
            status: 404,
            message: "Not Found".to_string()
        }
        .to_string(),
        "HTTP error 404: Not Found"
    );
    assert_eq!(
        ApiError::Decode("expected a list".to_string()).to_string(),
        "Invalid response: expected a list"
    );
    assert_eq!(
        ApiError::InvalidBaseUrl("ftp://x".to_string()).to_string(),
        "Invalid API base URL: ftp://x"
    );
}

#[test]
fn api_error_user_message_prefers_backend_text() {
    let err = ApiError::Http {
        status: 400,
        message: "title too long".to_string(),
    };
    assert_eq!(err.user_message(), "title too long");

    let blank = ApiError::Http {
        status: 502,
        message: "  ".to_string(),
    };
    assert_eq!(blank.user_message(), "HTTP error 502:   ");

    let network = ApiError::Network("timed out".to_string());
    assert_eq!(network.user_message(), "Network error: timed out");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::InvalidValue("too small".to_string()).to_string(),
        "Invalid settings value: too small"
    );
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
}

#[test]
fn settings_error_wraps_api_error_as_source() {
    let err: SettingsError = ApiError::Network("down".to_string()).into();
    assert_eq!(err.to_string(), "Remote settings error: Network error: down");
    let err: Box<dyn std::error::Error> = Box::new(err);
    assert!(err.source().is_some());
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(BookmarkError::NotFound(7).to_string(), "Bookmark not found: 7");
    assert_eq!(BookmarkError::EmptyTitle.to_string(), "Please provide a title");
    assert_eq!(
        BookmarkError::InvalidUrl(String::new()).to_string(),
        "URL cannot be empty"
    );
    assert_eq!(
        BookmarkError::InvalidUrl("nope".to_string()).to_string(),
        "Invalid URL: nope"
    );
}

#[test]
fn bookmark_error_source() {
    let err: Box<dyn std::error::Error> = Box::new(BookmarkError::EmptyTitle);
    assert!(err.source().is_none());

    let wrapped: BookmarkError = ApiError::Decode("x".to_string()).into();
    assert_eq!(wrapped.to_string(), "Invalid response: x");
    let wrapped: Box<dyn std::error::Error> = Box::new(wrapped);
    assert!(wrapped.source().is_some());
}
