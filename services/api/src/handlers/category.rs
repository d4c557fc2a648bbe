use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use cookbook_auth_types::identity::Identity;

use crate::domain::types::Category;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::category::{CreateCategoryUseCase, ListCategoriesUseCase};

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

// ── GET /categories ──────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let usecase = ListCategoriesUseCase {
        repo: state.category_repo(),
    };
    let categories = usecase.execute().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

// ── POST /categories ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

pub async fn create_category(
    _identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let usecase = CreateCategoryUseCase {
        repo: state.category_repo(),
    };
    let category = usecase.execute(&body.name).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}
