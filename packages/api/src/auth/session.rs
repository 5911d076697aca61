//! Session data and the request guard built on it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use store::{UserId, UserType};
use tower_sessions::Session;

use crate::errors::ProfileError;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";
/// Key for storing the account type (`employer` or `freelancer`) in session.
pub const SESSION_USER_TYPE_KEY: &str = "user_type";
/// Key for storing the login email in session.
pub const SESSION_EMAIL_KEY: &str = "email";
/// Key for the one-shot message shown by the next page render.
pub const SESSION_FLASH_KEY: &str = "flash";

/// A message carried across a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: String,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success".to_string(),
            message: message.into(),
        }
    }
}

/// The authenticated identity of a request.
///
/// Extracting it is the session guard: a request without a user id in its
/// session is rejected with [`ProfileError::AuthenticationRequired`] before the
/// handler runs. The user type is parsed here, once, so handlers only ever see a
/// valid [`UserType`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub user_type: UserType,
    pub email: Option<String>,
    session: Session,
}

impl CurrentUser {
    /// Store an identity in the session. Called by the login flow.
    pub async fn sign_in(
        session: &Session,
        user_id: UserId,
        user_type: UserType,
        email: &str,
    ) -> Result<(), tower_sessions::session::Error> {
        session.insert(SESSION_USER_ID_KEY, user_id).await?;
        session.insert(SESSION_USER_TYPE_KEY, user_type).await?;
        session.insert(SESSION_EMAIL_KEY, email).await?;
        Ok(())
    }

    /// The pending flash message, if any. It stays in the session until
    /// [`clear_flash`](Self::clear_flash).
    pub async fn flash(&self) -> Result<Option<Flash>, ProfileError> {
        Ok(self.session.get::<Flash>(SESSION_FLASH_KEY).await?)
    }

    pub async fn clear_flash(&self) -> Result<(), ProfileError> {
        self.session.remove::<Flash>(SESSION_FLASH_KEY).await?;
        Ok(())
    }

    pub async fn set_flash(&self, flash: Flash) -> Result<(), ProfileError> {
        Ok(self.session.insert(SESSION_FLASH_KEY, flash).await?)
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ProfileError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(ProfileError::SessionLayerMissing)?;

        let Some(user_id) = session.get::<UserId>(SESSION_USER_ID_KEY).await? else {
            return Err(ProfileError::AuthenticationRequired);
        };

        let user_type: UserType = session
            .get::<String>(SESSION_USER_TYPE_KEY)
            .await?
            .unwrap_or_default()
            .parse()?;

        let email = session.get::<String>(SESSION_EMAIL_KEY).await?;

        Ok(Self {
            user_id,
            user_type,
            email,
            session,
        })
    }
}
