use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{bearer, seed_category, seed_recipe, seed_user, spawn_app};

#[tokio::test]
async fn should_add_bookmark_once_and_list_it() {
    let app = spawn_app().await;
    let user = seed_user(&app.db, "reader").await;
    let category = seed_category(&app.db, "Pasta").await;
    let recipe = seed_recipe(&app.db, user.id, category.id, "Carbonara").await;
    let (name, value) = bearer(user.id);
    let path = format!("/users/{}/bookmark", user.id);

    for _ in 0..2 {
        app.server
            .post(&path)
            .add_header(name.clone(), value.clone())
            .json(&json!({ "id": recipe.id }))
            .await
            .assert_status_ok();
    }

    let listed: Value = app
        .server
        .get(&path)
        .add_header(name, value)
        .await
        .json();
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], recipe.id);
    assert_eq!(items[0]["title"], "Carbonara");
}

#[tokio::test]
async fn should_remove_bookmark_idempotently() {
    let app = spawn_app().await;
    let user = seed_user(&app.db, "reader").await;
    let category = seed_category(&app.db, "Pasta").await;
    let recipe = seed_recipe(&app.db, user.id, category.id, "Pesto").await;
    let (name, value) = bearer(user.id);
    let path = format!("/users/{}/bookmark", user.id);

    app.server
        .post(&path)
        .add_header(name.clone(), value.clone())
        .json(&json!({ "id": recipe.id }))
        .await
        .assert_status_ok();

    for _ in 0..2 {
        app.server
            .delete(&path)
            .add_header(name.clone(), value.clone())
            .json(&json!({ "id": recipe.id }))
            .await
            .assert_status_ok();
    }

    let listed: Value = app
        .server
        .get(&path)
        .add_header(name, value)
        .await
        .json();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_forbid_bookmarking_on_another_profile() {
    let app = spawn_app().await;
    let owner = seed_user(&app.db, "owner").await;
    let intruder = seed_user(&app.db, "intruder").await;
    let category = seed_category(&app.db, "Pie").await;
    let recipe = seed_recipe(&app.db, owner.id, category.id, "Apple pie").await;
    let (name, value) = bearer(intruder.id);

    let response = app
        .server
        .post(&format!("/users/{}/bookmark", owner.id))
        .add_header(name, value)
        .json(&json!({ "id": recipe.id }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_reject_bookmark_of_missing_recipe() {
    let app = spawn_app().await;
    let user = seed_user(&app.db, "reader").await;
    let (name, value) = bearer(user.id);

    app.server
        .post(&format!("/users/{}/bookmark", user.id))
        .add_header(name, value)
        .json(&json!({ "id": 4242 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_drop_bookmark_when_recipe_is_deleted() {
    let app = spawn_app().await;
    let user = seed_user(&app.db, "reader").await;
    let category = seed_category(&app.db, "Stew").await;
    let recipe = seed_recipe(&app.db, user.id, category.id, "Goulash").await;
    let (name, value) = bearer(user.id);
    let path = format!("/users/{}/bookmark", user.id);

    app.server
        .post(&path)
        .add_header(name.clone(), value.clone())
        .json(&json!({ "id": recipe.id }))
        .await
        .assert_status_ok();

    app.server
        .delete(&format!("/recipes/{}", recipe.id))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let listed: Value = app
        .server
        .get(&path)
        .add_header(name, value)
        .await
        .json();
    assert!(listed.as_array().unwrap().is_empty());
}
