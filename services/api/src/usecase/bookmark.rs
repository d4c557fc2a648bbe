use uuid::Uuid;

use crate::domain::repository::{
    BookmarkRepository, LikeRepository, ProfileRepository, RecipeRepository,
};
use crate::domain::types::RecipeSummary;
use crate::error::ApiError;

/// Bookmarks live on the caller's own profile only.
fn ensure_own_profile(caller: Uuid, target_user_id: Uuid) -> Result<(), ApiError> {
    if caller != target_user_id {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

// ── AddBookmark ──────────────────────────────────────────────────────────────

pub struct AddBookmarkUseCase<P: ProfileRepository, R: RecipeRepository, B: BookmarkRepository> {
    pub profiles: P,
    pub recipes: R,
    pub bookmarks: B,
}

impl<P: ProfileRepository, R: RecipeRepository, B: BookmarkRepository> AddBookmarkUseCase<P, R, B> {
    /// Adding an already-bookmarked recipe is a no-op.
    pub async fn execute(
        &self,
        caller: Uuid,
        target_user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), ApiError> {
        ensure_own_profile(caller, target_user_id)?;
        if !self.recipes.exists(recipe_id).await? {
            return Err(ApiError::RecipeNotFound);
        }
        let profile = self.profiles.get_or_create(caller).await?;
        self.bookmarks.add(profile.id, recipe_id).await?;
        Ok(())
    }
}

// ── RemoveBookmark ───────────────────────────────────────────────────────────

pub struct RemoveBookmarkUseCase<P: ProfileRepository, B: BookmarkRepository> {
    pub profiles: P,
    pub bookmarks: B,
}

impl<P: ProfileRepository, B: BookmarkRepository> RemoveBookmarkUseCase<P, B> {
    /// Removing a recipe that is not bookmarked is a no-op.
    pub async fn execute(
        &self,
        caller: Uuid,
        target_user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), ApiError> {
        ensure_own_profile(caller, target_user_id)?;
        let profile = self.profiles.get_or_create(caller).await?;
        self.bookmarks.remove(profile.id, recipe_id).await?;
        Ok(())
    }
}

// ── ListBookmarks ────────────────────────────────────────────────────────────

pub struct ListBookmarksUseCase<
    P: ProfileRepository,
    R: RecipeRepository,
    B: BookmarkRepository,
    L: LikeRepository,
> {
    pub profiles: P,
    pub recipes: R,
    pub bookmarks: B,
    pub likes: L,
}

impl<P: ProfileRepository, R: RecipeRepository, B: BookmarkRepository, L: LikeRepository>
    ListBookmarksUseCase<P, R, B, L>
{
    /// Bookmarked recipes, most recently bookmarked first.
    pub async fn execute(
        &self,
        caller: Uuid,
        target_user_id: Uuid,
    ) -> Result<Vec<RecipeSummary>, ApiError> {
        ensure_own_profile(caller, target_user_id)?;
        let profile = self.profiles.get_or_create(caller).await?;
        let ids = self.bookmarks.list_recipe_ids(profile.id).await?;
        let mut recipes = self.recipes.list_by_ids(&ids).await?;
        recipes.sort_by_key(|r| ids.iter().position(|id| *id == r.id));
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
