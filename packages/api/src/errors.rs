//! Error taxonomy of the edit-profile routes and its HTTP mapping.
//!
//! Client errors carry a specific message. Server errors are logged with their
//! source and answered with a fixed message that leaks no internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use store::{InvalidBudget, StoreError, UnknownUserType};

pub const NOT_LOGGED_IN: &str = "You are not logged in";
pub const INVALID_BUDGET: &str = "Invalid budget value";
pub const FETCH_FAILED: &str = "Error fetching profile data";
pub const UPDATE_FAILED: &str = "Error updating profile";
pub const UNKNOWN_USER_TYPE: &str = "Unknown user type";
pub const SESSION_FAILED: &str = "Session error";

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("no authenticated session")]
    AuthenticationRequired,

    #[error(transparent)]
    InvalidBudget(#[from] InvalidBudget),

    #[error("malformed request body: {0}")]
    InvalidBody(String),

    #[error("session holds an {0}")]
    UnknownUserType(#[from] UnknownUserType),

    #[error("failed to fetch profile: {0}")]
    Fetch(#[source] StoreError),

    #[error("failed to render profile page: {0}")]
    Render(#[from] tera::Error),

    #[error("failed to update profile: {0}")]
    Update(#[source] StoreError),

    #[error("session store failure: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("session layer is not installed on this router")]
    SessionLayerMissing,
}

impl ProfileError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProfileError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            ProfileError::InvalidBudget(_) | ProfileError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ProfileError::UnknownUserType(_)
            | ProfileError::Fetch(_)
            | ProfileError::Render(_)
            | ProfileError::Update(_)
            | ProfileError::Session(_)
            | ProfileError::SessionLayerMissing => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client.
    pub fn public_message(&self) -> String {
        match self {
            ProfileError::AuthenticationRequired => NOT_LOGGED_IN.to_string(),
            ProfileError::InvalidBudget(_) => INVALID_BUDGET.to_string(),
            ProfileError::InvalidBody(rejection) => rejection.clone(),
            ProfileError::UnknownUserType(_) => UNKNOWN_USER_TYPE.to_string(),
            ProfileError::Fetch(_) | ProfileError::Render(_) => FETCH_FAILED.to_string(),
            ProfileError::Update(_) => UPDATE_FAILED.to_string(),
            ProfileError::Session(_) | ProfileError::SessionLayerMissing => {
                SESSION_FAILED.to_string()
            }
        }
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "{}", self);
        } else {
            tracing::debug!(%status, "{}", self);
        }
        (status, self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        let err = ProfileError::AuthenticationRequired;
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "You are not logged in");

        let err = ProfileError::from(InvalidBudget("-5".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Invalid budget value");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = ProfileError::Fetch(StoreError::backend("password authentication failed"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Error fetching profile data");

        let err = ProfileError::Update(StoreError::backend("deadlock detected"));
        assert_eq!(err.public_message(), "Error updating profile");

        let err = ProfileError::from(UnknownUserType("admin".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Unknown user type");
        assert_eq!(err.to_string(), "session holds an unknown user type \"admin\"");
    }
}
