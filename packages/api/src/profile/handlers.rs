use axum::extract::State;
use axum::http::header::ACCEPT;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, Flash};
use crate::errors::ProfileError;
use crate::profile::form::{BodyFormat, Submission};
use crate::profile::view::EditProfileView;
use crate::AppState;

pub const EDIT_PROFILE_PATH: &str = "/edit-profile";
pub const PROFILE_UPDATED: &str = "Profile updated successfully";

/// Body of a successful JSON submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAck {
    pub status: String,
    pub message: String,
}

impl UpdateAck {
    fn updated() -> Self {
        Self {
            status: "updated".to_string(),
            message: PROFILE_UPDATED.to_string(),
        }
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

/// `GET /edit-profile`
pub async fn edit_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
) -> Result<Response, ProfileError> {
    let profile = state
        .store
        .read_profile(user.user_id, user.user_type)
        .await
        .map_err(ProfileError::Fetch)?;

    let flash = user.flash().await?;
    let shows_flash = flash.is_some();
    let view = EditProfileView::new(profile, user.email.clone()).with_flash(flash);

    let response = if wants_json(&headers) {
        Json(view).into_response()
    } else {
        Html(state.views.edit_profile(&view)?).into_response()
    };

    // Only a page that actually carried the message consumes it
    if shows_flash {
        user.clear_flash().await?;
    }
    Ok(response)
}

/// `POST /edit-profile`
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    submission: Submission,
) -> Result<Response, ProfileError> {
    let update = submission.form.into_update(user.user_type)?;

    if !update.is_empty() {
        state
            .store
            .apply_update(user.user_id, &update)
            .await
            .map_err(ProfileError::Update)?;
        tracing::info!(user_id = user.user_id, user_type = %user.user_type, "profile updated");
    }

    match submission.format {
        BodyFormat::Json => Ok(Json(UpdateAck::updated()).into_response()),
        BodyFormat::Form => {
            user.set_flash(Flash::success(PROFILE_UPDATED)).await?;
            Ok(Redirect::to(EDIT_PROFILE_PATH).into_response())
        }
    }
}
