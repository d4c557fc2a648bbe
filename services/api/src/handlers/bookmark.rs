use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cookbook_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::handlers::recipe::RecipeResponse;
use crate::state::AppState;
use crate::usecase::bookmark::{
    AddBookmarkUseCase, ListBookmarksUseCase, RemoveBookmarkUseCase,
};

/// Body of both toggle calls: `id` is the recipe id.
#[derive(Deserialize)]
pub struct BookmarkRequest {
    pub id: i32,
}

#[derive(Serialize)]
pub struct BookmarkResponse {
    pub recipe_id: i32,
    pub bookmarked: bool,
}

// ── GET /users/{id}/bookmark ─────────────────────────────────────────────────

pub async fn list_bookmarks(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let usecase = ListBookmarksUseCase {
        profiles: state.profile_repo(),
        recipes: state.recipe_repo(),
        bookmarks: state.bookmark_repo(),
        likes: state.like_repo(),
    };
    let summaries = usecase.execute(identity.user_id, user_id).await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

// ── POST /users/{id}/bookmark ────────────────────────────────────────────────

pub async fn add_bookmark(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<BookmarkRequest>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let usecase = AddBookmarkUseCase {
        profiles: state.profile_repo(),
        recipes: state.recipe_repo(),
        bookmarks: state.bookmark_repo(),
    };
    usecase.execute(identity.user_id, user_id, body.id).await?;
    Ok(Json(BookmarkResponse {
        recipe_id: body.id,
        bookmarked: true,
    }))
}

// ── DELETE /users/{id}/bookmark ──────────────────────────────────────────────

pub async fn remove_bookmark(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<BookmarkRequest>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let usecase = RemoveBookmarkUseCase {
        profiles: state.profile_repo(),
        bookmarks: state.bookmark_repo(),
    };
    usecase.execute(identity.user_id, user_id, body.id).await?;
    Ok(Json(BookmarkResponse {
        recipe_id: body.id,
        bookmarked: false,
    }))
}
