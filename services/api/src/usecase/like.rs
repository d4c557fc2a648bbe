use uuid::Uuid;

use crate::domain::repository::{LikeRepository, RecipeRepository};
use crate::error::ApiError;

// ── LikeRecipe ───────────────────────────────────────────────────────────────

pub struct LikeRecipeUseCase<R: RecipeRepository, L: LikeRepository> {
    pub recipes: R,
    pub likes: L,
}

impl<R: RecipeRepository, L: LikeRepository> LikeRecipeUseCase<R, L> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), ApiError> {
        if !self.recipes.exists(recipe_id).await? {
            return Err(ApiError::RecipeNotFound);
        }
        // The (user, recipe) key decides; no read-before-write.
        let inserted = self.likes.insert(user_id, recipe_id).await?;
        if !inserted {
            return Err(ApiError::RecipeAlreadyLiked);
        }
        Ok(())
    }
}

// ── UnlikeRecipe ─────────────────────────────────────────────────────────────

pub struct UnlikeRecipeUseCase<R: RecipeRepository, L: LikeRepository> {
    pub recipes: R,
    pub likes: L,
}

impl<R: RecipeRepository, L: LikeRepository> UnlikeRecipeUseCase<R, L> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), ApiError> {
        if !self.recipes.exists(recipe_id).await? {
            return Err(ApiError::RecipeNotFound);
        }
        let deleted = self.likes.delete(user_id, recipe_id).await?;
        if !deleted {
            return Err(ApiError::RecipeNotLiked);
        }
        Ok(())
    }
}
