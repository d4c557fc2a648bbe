//! sea-orm entities for the Cookbook API database.

pub mod job_runs;
pub mod profile_bookmarks;
pub mod profiles;
pub mod recipe_categories;
pub mod recipe_likes;
pub mod recipes;
pub mod revoked_tokens;
pub mod users;
