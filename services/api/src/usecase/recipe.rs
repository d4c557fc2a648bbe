use uuid::Uuid;

use cookbook_domain::pagination::PageRequest;

use crate::domain::repository::{CategoryRepository, LikeRepository, RecipeRepository};
use crate::domain::types::{
    MAX_TITLE_LEN, NewRecipe, Recipe, RecipePatch, RecipeSummary, validate_label,
};
use crate::error::ApiError;

fn validate_title(title: &str) -> Result<(), ApiError> {
    if !validate_label(title, MAX_TITLE_LEN) {
        return Err(ApiError::InvalidPayload(format!(
            "title must be 1-{MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_cook_time(minutes: i32) -> Result<(), ApiError> {
    if minutes < 0 {
        return Err(ApiError::InvalidPayload(
            "cook_time must not be negative".to_owned(),
        ));
    }
    Ok(())
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository, L: LikeRepository> {
    pub recipes: R,
    pub likes: L,
}

impl<R: RecipeRepository, L: LikeRepository> ListRecipesUseCase<R, L> {
    pub async fn execute(
        &self,
        category_id: Option<i32>,
        page: PageRequest,
    ) -> Result<Vec<RecipeSummary>, ApiError> {
        let recipes = self.recipes.list(category_id, page).await?;
        let ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let counts = self.likes.count_by_recipe(&ids).await?;
        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeSummary {
                total_likes: counts.get(&recipe.id).copied().unwrap_or(0),
                recipe,
            })
            .collect())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository, L: LikeRepository> {
    pub recipes: R,
    pub likes: L,
}

impl<R: RecipeRepository, L: LikeRepository> GetRecipeUseCase<R, L> {
    pub async fn execute(&self, id: i32) -> Result<RecipeSummary, ApiError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        let counts = self.likes.count_by_recipe(&[id]).await?;
        Ok(RecipeSummary {
            total_likes: counts.get(&id).copied().unwrap_or(0),
            recipe,
        })
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R: RecipeRepository, C: CategoryRepository> {
    pub recipes: R,
    pub categories: C,
}

impl<R: RecipeRepository, C: CategoryRepository> CreateRecipeUseCase<R, C> {
    pub async fn execute(&self, author_id: Uuid, input: NewRecipe) -> Result<Recipe, ApiError> {
        validate_title(&input.title)?;
        validate_cook_time(input.cook_time_minutes)?;
        if !self.categories.exists(input.category_id).await? {
            return Err(ApiError::CategoryNotFound);
        }
        let input = NewRecipe {
            title: input.title.trim().to_owned(),
            ..input
        };
        self.recipes.create(author_id, &input).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R: RecipeRepository, C: CategoryRepository> {
    pub recipes: R,
    pub categories: C,
}

impl<R: RecipeRepository, C: CategoryRepository> UpdateRecipeUseCase<R, C> {
    /// Only the author may update.
    pub async fn execute(
        &self,
        caller: Uuid,
        id: i32,
        mut patch: RecipePatch,
    ) -> Result<Recipe, ApiError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if recipe.author_id != caller {
            return Err(ApiError::Forbidden);
        }
        if let Some(title) = patch.title.as_deref() {
            validate_title(title)?;
            patch.title = Some(title.trim().to_owned());
        }
        if let Some(minutes) = patch.cook_time_minutes {
            validate_cook_time(minutes)?;
        }
        if let Some(category_id) = patch.category_id {
            if !self.categories.exists(category_id).await? {
                return Err(ApiError::CategoryNotFound);
            }
        }
        self.recipes.update(id, &patch).await
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    /// Only the author may delete. Likes and bookmarks go with the recipe.
    pub async fn execute(&self, caller: Uuid, id: i32) -> Result<(), ApiError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if recipe.author_id != caller {
            return Err(ApiError::Forbidden);
        }
        if !self.recipes.delete(id).await? {
            return Err(ApiError::RecipeNotFound);
        }
        Ok(())
    }
}
