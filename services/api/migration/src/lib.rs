use sea_orm_migration::prelude::*;

mod m20251001_000001_create_users;
mod m20251001_000002_create_profiles;
mod m20251001_000003_create_recipe_categories;
mod m20251001_000004_create_recipes;
mod m20251001_000005_create_recipe_likes;
mod m20251001_000006_create_profile_bookmarks;
mod m20251001_000007_create_revoked_tokens;
mod m20251001_000008_create_job_runs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_users::Migration),
            Box::new(m20251001_000002_create_profiles::Migration),
            Box::new(m20251001_000003_create_recipe_categories::Migration),
            Box::new(m20251001_000004_create_recipes::Migration),
            Box::new(m20251001_000005_create_recipe_likes::Migration),
            Box::new(m20251001_000006_create_profile_bookmarks::Migration),
            Box::new(m20251001_000007_create_revoked_tokens::Migration),
            Box::new(m20251001_000008_create_job_runs::Migration),
        ]
    }
}
