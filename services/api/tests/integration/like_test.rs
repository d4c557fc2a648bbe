use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::Value;

use cookbook_api_schema::recipe_likes;

use crate::helpers::{bearer, seed_category, seed_recipe, seed_user, spawn_app};

#[tokio::test]
async fn should_like_once_and_reject_second_like() {
    let app = spawn_app().await;
    let author = seed_user(&app.db, "author").await;
    let fan = seed_user(&app.db, "fan").await;
    let category = seed_category(&app.db, "Dessert").await;
    let recipe = seed_recipe(&app.db, author.id, category.id, "Brownies").await;
    let (name, value) = bearer(fan.id);

    let first = app
        .server
        .post(&format!("/recipes/{}/like", recipe.id))
        .add_header(name.clone(), value.clone())
        .await;
    first.assert_status(StatusCode::CREATED);

    let second = app
        .server
        .post(&format!("/recipes/{}/like", recipe.id))
        .add_header(name, value)
        .await;
    second.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(second.json::<Value>()["kind"], "RECIPE_ALREADY_LIKED");

    let rows = recipe_likes::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn should_unlike_then_reject_second_unlike() {
    let app = spawn_app().await;
    let author = seed_user(&app.db, "author").await;
    let fan = seed_user(&app.db, "fan").await;
    let category = seed_category(&app.db, "Soup").await;
    let recipe = seed_recipe(&app.db, author.id, category.id, "Miso").await;
    let (name, value) = bearer(fan.id);
    let path = format!("/recipes/{}/like", recipe.id);

    app.server
        .post(&path)
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::CREATED);

    app.server
        .delete(&path)
        .add_header(name.clone(), value.clone())
        .await
        .assert_status_ok();

    let again = app.server.delete(&path).add_header(name, value).await;
    again.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(again.json::<Value>()["kind"], "RECIPE_NOT_LIKED");

    let rows = recipe_likes::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn should_report_total_likes_on_recipe() {
    let app = spawn_app().await;
    let author = seed_user(&app.db, "author").await;
    let category = seed_category(&app.db, "Bread").await;
    let recipe = seed_recipe(&app.db, author.id, category.id, "Focaccia").await;
    let path = format!("/recipes/{}/like", recipe.id);

    for username in ["ana", "ben", "cy"] {
        let fan = seed_user(&app.db, username).await;
        let (name, value) = bearer(fan.id);
        app.server
            .post(&path)
            .add_header(name, value)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = app
        .server
        .get(&format!("/recipes/{}", recipe.id))
        .await
        .json();
    assert_eq!(body["total_likes"], 3);
}

#[tokio::test]
async fn should_return_not_found_for_missing_recipe() {
    let app = spawn_app().await;
    let fan = seed_user(&app.db, "fan").await;
    let (name, value) = bearer(fan.id);

    let response = app
        .server
        .post("/recipes/9999/like")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "RECIPE_NOT_FOUND");
}

#[tokio::test]
async fn should_require_bearer_to_like() {
    let app = spawn_app().await;
    let author = seed_user(&app.db, "author").await;
    let category = seed_category(&app.db, "Salad").await;
    let recipe = seed_recipe(&app.db, author.id, category.id, "Caesar").await;

    app.server
        .post(&format!("/recipes/{}/like", recipe.id))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
