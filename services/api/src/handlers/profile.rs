use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use cookbook_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::profile::{GetProfileUseCase, ProfileView, UpdateProfileUseCase};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub bio: String,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            user_id: view.user_id.to_string(),
            username: view.username,
            email: view.email,
            bio: view.bio,
        }
    }
}

// ── GET /users/profile ───────────────────────────────────────────────────────

pub async fn get_profile(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
        profiles: state.profile_repo(),
    };
    let view = usecase.execute(identity.user_id).await?;
    Ok(Json(view.into()))
}

// ── PATCH /users/profile ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: String,
}

pub async fn update_profile(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
        profiles: state.profile_repo(),
    };
    let view = usecase.execute(identity.user_id, &body.bio).await?;
    Ok(Json(view.into()))
}
