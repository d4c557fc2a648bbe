use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use cookbook_core::error::fallback;
use cookbook_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{change_password, login, logout, refresh_token, register},
    bookmark::{add_bookmark, list_bookmarks, remove_bookmark},
    category::{create_category, list_categories},
    health::{healthz, readyz},
    like::{like_recipe, unlike_recipe},
    profile::{get_profile, update_profile},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/token/refresh", post(refresh_token))
        .route("/users/logout", post(logout))
        .route("/users/profile", get(get_profile).patch(update_profile))
        .route("/users/password", patch(change_password))
        // Bookmarks
        .route(
            "/users/{id}/bookmark",
            get(list_bookmarks).post(add_bookmark).delete(remove_bookmark),
        )
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        // Recipes
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        // Likes
        .route("/recipes/{id}/like", post(like_recipe).delete(unlike_recipe))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
