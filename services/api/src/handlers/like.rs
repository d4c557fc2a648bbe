use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use cookbook_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::like::{LikeRecipeUseCase, UnlikeRecipeUseCase};

#[derive(Serialize)]
pub struct LikeResponse {
    pub recipe_id: i32,
    pub liked: bool,
}

// ── POST /recipes/{id}/like ──────────────────────────────────────────────────

pub async fn like_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<LikeResponse>), ApiError> {
    let usecase = LikeRecipeUseCase {
        recipes: state.recipe_repo(),
        likes: state.like_repo(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(LikeResponse {
            recipe_id,
            liked: true,
        }),
    ))
}

// ── DELETE /recipes/{id}/like ────────────────────────────────────────────────

pub async fn unlike_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<LikeResponse>, ApiError> {
    let usecase = UnlikeRecipeUseCase {
        recipes: state.recipe_repo(),
        likes: state.like_repo(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    Ok(Json(LikeResponse {
        recipe_id,
        liked: false,
    }))
}
