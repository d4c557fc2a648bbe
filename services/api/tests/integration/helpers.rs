use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::Utc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use cookbook_api::domain::repository::{
    CategoryRepository, Mailer, RecipeRepository, UserRepository,
};
use cookbook_api::domain::types::{Category, NewRecipe, OutgoingEmail, Profile, Recipe, User};
use cookbook_api::error::MailError;
use cookbook_api::infra::db::{DbCategoryRepository, DbRecipeRepository, DbUserRepository};
use cookbook_api::jobs::JobRegistry;
use cookbook_api::router::build_router;
use cookbook_api::state::AppState;
use cookbook_api_migration::Migrator;
use cookbook_auth_types::identity::JwtSecret;
use cookbook_testing::auth::{MockAuth, TEST_JWT_SECRET};

// ── RecordingMailer ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Poll until `n` messages were sent or a second has passed.
    pub async fn wait_for(&self, n: usize) -> Vec<OutgoingEmail> {
        for _ in 0..50 {
            if self.sent.lock().unwrap().len() >= n {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.sent()
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ── TestApp ──────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub db: DatabaseConnection,
    pub mailer: Arc<RecordingMailer>,
}

/// A migrated in-memory SQLite database. One connection, so every query sees
/// the same memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn spawn_app() -> TestApp {
    let db = test_db().await;
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState {
        db: db.clone(),
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        jobs: Arc::new(JobRegistry::new()),
        mailer: mailer.clone(),
    };
    let server = TestServer::new(build_router(state)).unwrap();
    TestApp { server, db, mailer }
}

pub fn bearer(user_id: Uuid) -> (HeaderName, HeaderValue) {
    MockAuth::new(user_id).header()
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub async fn seed_user(db: &DatabaseConnection, username: &str) -> User {
    let now = Utc::now();
    let user = User {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        password_hash: "not-a-real-hash".to_owned(),
        created_at: now,
        updated_at: now,
    };
    let profile = Profile {
        id: Uuid::now_v7(),
        user_id: user.id,
        bio: String::new(),
        updated_at: now,
    };
    DbUserRepository { db: db.clone() }
        .create_with_profile(&user, &profile)
        .await
        .unwrap();
    user
}

pub async fn seed_category(db: &DatabaseConnection, name: &str) -> Category {
    DbCategoryRepository { db: db.clone() }
        .create(name)
        .await
        .unwrap()
}

pub async fn seed_recipe(db: &DatabaseConnection, author_id: Uuid, category_id: i32, title: &str) -> Recipe {
    DbRecipeRepository { db: db.clone() }
        .create(
            author_id,
            &NewRecipe {
                title: title.to_owned(),
                category_id,
                picture: None,
                description: format!("How to make {title}"),
                cook_time_minutes: 30,
                ingredients: "salt, water".to_owned(),
                procedure: "mix and cook".to_owned(),
            },
        )
        .await
        .unwrap()
}
