use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait as _,
    SqlErr, TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use cookbook_api_schema::{
    job_runs, profile_bookmarks, profiles, recipe_categories, recipe_likes, recipes,
    revoked_tokens, users,
};
use cookbook_domain::pagination::PageRequest;

use crate::domain::repository::{
    BookmarkRepository, CategoryRepository, JobRunRepository, LikeRepository, ProfileRepository,
    RecipeRepository, RevokedTokenRepository, UserRepository,
};
use crate::domain::types::{Category, NewRecipe, Profile, Recipe, RecipePatch, User};
use crate::error::ApiError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create_with_profile(&self, user: &User, profile: &Profile) -> Result<(), ApiError> {
        let user = user.clone();
        let profile = profile.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        username: Set(user.username),
                        email: Set(user.email),
                        password_hash: Set(user.password_hash),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    profiles::ActiveModel {
                        id: Set(profile.id),
                        user_id: Set(profile.user_id),
                        bio: Set(profile.bio),
                        updated_at: Set(profile.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Transaction(ref db_err) if is_unique_violation(db_err) => {
                    ApiError::UserAlreadyExists
                }
                other => anyhow::Error::new(other)
                    .context("create user with profile")
                    .into(),
            })
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::PasswordHash,
                Expr::value(password_hash),
            )
            .col_expr(
                users::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update user password")?;
        if result.rows_affected == 0 {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list all users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn get_or_create(&self, user_id: Uuid) -> Result<Profile, ApiError> {
        let existing = profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find profile by user id")?;
        if let Some(model) = existing {
            return Ok(profile_from_model(model));
        }

        // A concurrent request may create it first; the unique user_id wins.
        profiles::Entity::insert(profiles::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            bio: Set(String::new()),
            updated_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(profiles::Column::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert profile")?;

        let model = profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find created profile")?
            .ok_or_else(|| anyhow::anyhow!("profile for {user_id} missing after insert"))?;
        Ok(profile_from_model(model))
    }

    async fn update_bio(&self, user_id: Uuid, bio: &str) -> Result<Profile, ApiError> {
        let profile = self.get_or_create(user_id).await?;
        let model = profiles::ActiveModel {
            id: Set(profile.id),
            bio: Set(bio.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update profile bio")?;
        Ok(profile_from_model(model))
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: model.id,
        user_id: model.user_id,
        bio: model.bio,
        updated_at: model.updated_at,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let models = recipe_categories::Entity::find()
            .order_by_asc(recipe_categories::Column::Name)
            .all(&self.db)
            .await
            .context("list categories")?;
        Ok(models.into_iter().map(category_from_model).collect())
    }

    async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        let count = recipe_categories::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .context("check category exists")?;
        Ok(count > 0)
    }

    async fn create(&self, name: &str) -> Result<Category, ApiError> {
        let model = recipe_categories::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::CategoryAlreadyExists
            } else {
                anyhow::Error::new(e).context("create category").into()
            }
        })?;
        Ok(category_from_model(model))
    }
}

fn category_from_model(model: recipe_categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        let count = recipes::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .context("check recipe exists")?;
        Ok(count > 0)
    }

    async fn list(
        &self,
        category_id: Option<i32>,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, ApiError> {
        let mut query = recipes::Entity::find();
        if let Some(category_id) = category_id {
            query = query.filter(recipes::Column::CategoryId.eq(category_id));
        }
        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn list_by_ids(&self, ids: &[i32]) -> Result<Vec<Recipe>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = recipes::Entity::find()
            .filter(recipes::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("list recipes by ids")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn create(&self, author_id: Uuid, recipe: &NewRecipe) -> Result<Recipe, ApiError> {
        let now = Utc::now();
        let model = recipes::ActiveModel {
            title: Set(recipe.title.clone()),
            author_id: Set(author_id),
            category_id: Set(recipe.category_id),
            picture: Set(recipe.picture.clone()),
            description: Set(recipe.description.clone()),
            cook_time_minutes: Set(recipe.cook_time_minutes),
            ingredients: Set(recipe.ingredients.clone()),
            procedure: Set(recipe.procedure.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create recipe")?;
        Ok(recipe_from_model(model))
    }

    async fn update(&self, id: i32, patch: &RecipePatch) -> Result<Recipe, ApiError> {
        let mut am = recipes::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(title) = &patch.title {
            am.title = Set(title.clone());
        }
        if let Some(category_id) = patch.category_id {
            am.category_id = Set(category_id);
        }
        if let Some(picture) = &patch.picture {
            am.picture = Set(picture.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(description.clone());
        }
        if let Some(cook_time) = patch.cook_time_minutes {
            am.cook_time_minutes = Set(cook_time);
        }
        if let Some(ingredients) = &patch.ingredients {
            am.ingredients = Set(ingredients.clone());
        }
        if let Some(procedure) = &patch.procedure {
            am.procedure = Set(procedure.clone());
        }
        match am.update(&self.db).await {
            Ok(model) => Ok(recipe_from_model(model)),
            Err(DbErr::RecordNotUpdated) => Err(ApiError::RecipeNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update recipe").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        title: model.title,
        author_id: model.author_id,
        category_id: model.category_id,
        picture: model.picture,
        description: model.description,
        cook_time_minutes: model.cook_time_minutes,
        ingredients: model.ingredients,
        procedure: model.procedure,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Like repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLikeRepository {
    pub db: DatabaseConnection,
}

impl LikeRepository for DbLikeRepository {
    async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let inserted = recipe_likes::Entity::insert(recipe_likes::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([recipe_likes::Column::UserId, recipe_likes::Column::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert recipe like")?;
        Ok(inserted > 0)
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let result = recipe_likes::Entity::delete_many()
            .filter(recipe_likes::Column::UserId.eq(user_id))
            .filter(recipe_likes::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await
            .context("delete recipe like")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_by_recipe(&self, recipe_ids: &[i32]) -> Result<HashMap<i32, u64>, ApiError> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(Debug, FromQueryResult)]
        struct LikeCountRow {
            recipe_id: i32,
            likes: i64,
        }

        let rows = recipe_likes::Entity::find()
            .select_only()
            .column(recipe_likes::Column::RecipeId)
            .column_as(Expr::col(recipe_likes::Column::UserId).count(), "likes")
            .filter(recipe_likes::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .group_by(recipe_likes::Column::RecipeId)
            .into_model::<LikeCountRow>()
            .all(&self.db)
            .await
            .context("count likes by recipe")?;
        Ok(rows
            .into_iter()
            .map(|row| (row.recipe_id, row.likes.max(0) as u64))
            .collect())
    }

    async fn count_for_author(&self, author_id: Uuid) -> Result<u64, ApiError> {
        let count = recipe_likes::Entity::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                recipe_likes::Relation::Recipe.def(),
            )
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count likes for author")?;
        Ok(count)
    }
}

// ── Bookmark repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookmarkRepository {
    pub db: DatabaseConnection,
}

impl BookmarkRepository for DbBookmarkRepository {
    async fn add(&self, profile_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let inserted = profile_bookmarks::Entity::insert(profile_bookmarks::ActiveModel {
            profile_id: Set(profile_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                profile_bookmarks::Column::ProfileId,
                profile_bookmarks::Column::RecipeId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert bookmark")?;
        Ok(inserted > 0)
    }

    async fn remove(&self, profile_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let result = profile_bookmarks::Entity::delete_many()
            .filter(profile_bookmarks::Column::ProfileId.eq(profile_id))
            .filter(profile_bookmarks::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await
            .context("delete bookmark")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_recipe_ids(&self, profile_id: Uuid) -> Result<Vec<i32>, ApiError> {
        let ids = profile_bookmarks::Entity::find()
            .select_only()
            .column(profile_bookmarks::Column::RecipeId)
            .filter(profile_bookmarks::Column::ProfileId.eq(profile_id))
            .order_by_desc(profile_bookmarks::Column::CreatedAt)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("list bookmarked recipe ids")?;
        Ok(ids)
    }
}

// ── Revoked token repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRevokedTokenRepository {
    pub db: DatabaseConnection,
}

impl RevokedTokenRepository for DbRevokedTokenRepository {
    async fn revoke(
        &self,
        jti: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        let inserted = revoked_tokens::Entity::insert(revoked_tokens::ActiveModel {
            jti: Set(jti),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            revoked_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(revoked_tokens::Column::Jti)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("revoke token")?;
        Ok(inserted > 0)
    }
}

// ── Job run repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbJobRunRepository {
    pub db: DatabaseConnection,
}

impl JobRunRepository for DbJobRunRepository {
    async fn claim(&self, job_name: &str, date: NaiveDate) -> Result<bool, ApiError> {
        let inserted = job_runs::Entity::insert(job_runs::ActiveModel {
            job_name: Set(job_name.to_owned()),
            run_date: Set(date),
            started_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([job_runs::Column::JobName, job_runs::Column::RunDate])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("claim job run")?;
        Ok(inserted > 0)
    }
}
