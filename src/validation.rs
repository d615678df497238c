use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Please add a {0}")]
    MissingField(&'static str),
    #[error("{field} must be an HTTP or HTTPS URL: {value}")]
    MalformedUrl { field: &'static str, value: String },
    #[error("{field} must have a host")]
    MissingHost { field: &'static str },
    #[error("Unsupported scheme {scheme:?} for {field}")]
    UnsupportedScheme {
        field: &'static str,
        scheme: String,
    },
}

/// Checks that a required text field is present and non-empty.
///
/// Leading/trailing whitespace does not count towards presence, but the
/// value itself is returned untouched.
pub fn required_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Like [`required_text`], but the stored value is the trimmed one.
pub fn required_trimmed(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    required_text(field, value).map(|v| v.trim().to_string())
}

/// Checks that a string is a well-formed internet URL: http or https
/// scheme and a dotted host, with optional path and query.
pub fn validate_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let url = Url::parse(value).map_err(|_| ValidationError::MalformedUrl {
        field,
        value: value.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ValidationError::UnsupportedScheme {
                field,
                scheme: scheme.to_string(),
            });
        }
    }

    // A bare hostname like "localhost" is not an internet bookmark target
    let host = url.host_str().ok_or(ValidationError::MissingHost { field })?;
    if host.is_empty() || !host.contains('.') {
        return Err(ValidationError::MissingHost { field });
    }

    Ok(())
}
