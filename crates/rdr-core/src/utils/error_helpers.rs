use crate::error::ApiError;
use reqwest::Method;

/// Helper functions for standardizing error conversions across the client.
/// Convert reqwest errors to ApiError with method and endpoint context
pub fn convert_request_error(error: reqwest::Error, method: &Method, endpoint: &str) -> ApiError {
    match error.status() {
        Some(status) => ApiError::RequestFailed {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message: error.to_string(),
        },
        None => ApiError::Transport {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        },
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: serde_json::Error, endpoint: &str) -> ApiError {
    ApiError::InvalidResponse {
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

/// Report a field the service was expected to return but did not
pub fn missing_field_error(endpoint: &str, field: &str) -> ApiError {
    ApiError::InvalidResponse {
        endpoint: endpoint.to_string(),
        message: format!("response has no '{}' field", field),
    }
}
