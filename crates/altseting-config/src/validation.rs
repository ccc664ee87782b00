//! Validation helpers for configuration fields

use url::Url;
use validator::ValidationError;

/// Validate the deployment route marker (e.g. "/franchise-ALTSETING")
pub fn validate_route_marker(marker: &str) -> Result<(), ValidationError> {
    if marker.len() < 2 || !marker.starts_with('/') {
        return Err(ValidationError::new("invalid_route_marker"));
    }

    if marker.ends_with('/') {
        return Err(ValidationError::new("route_marker_trailing_slash"));
    }

    Ok(())
}

/// Validate the dictionary directory, which is joined onto the base path
pub fn validate_data_dir(dir: &str) -> Result<(), ValidationError> {
    if dir.is_empty() {
        return Err(ValidationError::new("empty_data_dir"));
    }

    if dir.starts_with('/') || dir.ends_with('/') {
        return Err(ValidationError::new("data_dir_surrounding_slash"));
    }

    Ok(())
}

/// Validate the dictionary origin: absolute and served over http(s)
pub fn validate_origin(origin: &str) -> Result<(), ValidationError> {
    match Url::parse(origin) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        Ok(_) => Err(ValidationError::new("unsupported_origin_scheme")),
        Err(_) => Err(ValidationError::new("invalid_origin_url")),
    }
}

/// Validate a log level name
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}
