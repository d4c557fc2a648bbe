use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};

use cookbook_auth_types::identity::Identity;
use cookbook_domain::pagination::PageRequest;

use crate::domain::types::{NewRecipe, Recipe, RecipePatch, RecipeSummary};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    UpdateRecipeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub title: String,
    pub author_id: String,
    pub category_id: i32,
    pub picture: Option<String>,
    pub description: String,
    /// Minutes.
    pub cook_time: i32,
    pub ingredients: String,
    pub procedure: String,
    pub total_likes: u64,
    #[serde(serialize_with = "cookbook_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cookbook_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl RecipeResponse {
    pub fn new(recipe: Recipe, total_likes: u64) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            author_id: recipe.author_id.to_string(),
            category_id: recipe.category_id,
            picture: recipe.picture,
            description: recipe.description,
            cook_time: recipe.cook_time_minutes,
            ingredients: recipe.ingredients,
            procedure: recipe.procedure,
            total_likes,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

impl From<RecipeSummary> for RecipeResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self::new(summary.recipe, summary.total_likes)
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RecipeListQuery {
    pub category_id: Option<i32>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn list_recipes(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let query: RecipeListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?
        .unwrap_or_default();

    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        likes: state.like_repo(),
    };
    let summaries = usecase
        .execute(
            query.category_id,
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        likes: state.like_repo(),
    };
    let summary = usecase.execute(id).await?;
    Ok(Json(summary.into()))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub category_id: i32,
    pub picture: Option<String>,
    #[serde(default)]
    pub description: String,
    pub cook_time: i32,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub procedure: String,
}

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        categories: state.category_repo(),
    };
    let recipe = usecase
        .execute(
            identity.user_id,
            NewRecipe {
                title: body.title,
                category_id: body.category_id,
                picture: body.picture,
                description: body.description,
                cook_time_minutes: body.cook_time,
                ingredients: body.ingredients,
                procedure: body.procedure,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(RecipeResponse::new(recipe, 0))))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

/// Absent stays `None`; an explicit `null` becomes `Some(None)`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub picture: Option<Option<String>>,
    pub description: Option<String>,
    pub cook_time: Option<i32>,
    pub ingredients: Option<String>,
    pub procedure: Option<String>,
}

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        categories: state.category_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            id,
            RecipePatch {
                title: body.title,
                category_id: body.category_id,
                picture: body.picture,
                description: body.description,
                cook_time_minutes: body.cook_time,
                ingredients: body.ingredients,
                procedure: body.procedure,
            },
        )
        .await?;

    // Re-read so the response carries the current like total.
    let summary = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        likes: state.like_repo(),
    }
    .execute(id)
    .await?;
    Ok(Json(summary.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
