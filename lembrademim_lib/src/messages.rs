//! User-facing text for failed account operations.

use crate::error::LibError;

const CONNECTIVITY_HINT: &str = "Could not reach the server. Check that it is running and use `lembrademim diagnose` to test connectivity.";

fn connectivity_failure(err: &LibError) -> bool {
    matches!(err, LibError::Api(e) if e.is_network())
}

pub fn login_error(err: &LibError) -> String {
    if connectivity_failure(err) {
        return CONNECTIVITY_HINT.to_string();
    }
    match err.status() {
        Some(401) => "Wrong email or password".to_string(),
        Some(400) => "Invalid data".to_string(),
        Some(500) => "Internal server error".to_string(),
        Some(status) => format!("Server error: {}", status),
        None => err.to_string(),
    }
}

pub fn signup_error(err: &LibError) -> String {
    if connectivity_failure(err) {
        return CONNECTIVITY_HINT.to_string();
    }
    match err.status() {
        Some(409) => "This email is already in use".to_string(),
        Some(400) => "Invalid data".to_string(),
        _ => "Failed to create account".to_string(),
    }
}

pub fn reset_request_error(err: &LibError) -> String {
    match err.status() {
        Some(404) => "Email not found".to_string(),
        Some(400) => "Invalid email".to_string(),
        _ => "Failed to request a password reset".to_string(),
    }
}

pub fn reset_confirm_error(err: &LibError) -> String {
    match err.status() {
        Some(400) => "Invalid or expired code".to_string(),
        _ => "Failed to reset password".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> LibError {
        LibError::Api(lembrademim_api::Error::HttpStatus {
            status,
            message: format!("HTTP Error: {}", status),
            body: String::new(),
        })
    }

    fn offline() -> LibError {
        LibError::Api(lembrademim_api::Error::AllEndpointsFailed { last: None })
    }

    #[test]
    fn login_statuses() {
        assert_eq!(login_error(&http(401)), "Wrong email or password");
        assert_eq!(login_error(&http(400)), "Invalid data");
        assert_eq!(login_error(&http(500)), "Internal server error");
        assert_eq!(login_error(&http(503)), "Server error: 503");
        assert_eq!(login_error(&offline()), CONNECTIVITY_HINT);
        assert_eq!(
            login_error(&LibError::MissingToken),
            "Token not found in server response"
        );
    }

    #[test]
    fn signup_statuses() {
        assert_eq!(signup_error(&http(409)), "This email is already in use");
        assert_eq!(signup_error(&http(400)), "Invalid data");
        assert_eq!(signup_error(&http(500)), "Failed to create account");
    }

    #[test]
    fn reset_statuses() {
        assert_eq!(reset_request_error(&http(404)), "Email not found");
        assert_eq!(reset_request_error(&http(400)), "Invalid email");
        assert_eq!(reset_confirm_error(&http(400)), "Invalid or expired code");
        assert_eq!(reset_confirm_error(&http(500)), "Failed to reset password");
    }
}
