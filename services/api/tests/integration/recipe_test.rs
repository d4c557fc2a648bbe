use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{bearer, seed_category, seed_recipe, seed_user, spawn_app};

#[tokio::test]
async fn should_create_and_fetch_recipe() {
    let app = spawn_app().await;
    let author = seed_user(&app.db, "author").await;
    let category = seed_category(&app.db, "Curry").await;
    let (name, value) = bearer(author.id);

    let response = app
        .server
        .post("/recipes")
        .add_header(name, value)
        .json(&json!({
            "title": "  Dal  ",
            "category_id": category.id,
            "description": "Yellow lentils",
            "cook_time": 40,
            "ingredients": "lentils, turmeric",
            "procedure": "simmer",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["title"], "Dal");
    assert_eq!(created["author_id"], author.id.to_string());
    assert_eq!(created["total_likes"], 0);

    let fetched: Value = app
        .server
        .get(&format!("/recipes/{}", created["id"]))
        .await
        .json();
    assert_eq!(fetched["cook_time"], 40);
    assert_eq!(fetched["picture"], Value::Null);
}

#[tokio::test]
async fn should_reject_recipe_in_unknown_category() {
    let app = spawn_app().await;
    let author = seed_user(&app.db, "author").await;
    let (name, value) = bearer(author.id);

    let response = app
        .server
        .post("/recipes")
        .add_header(name, value)
        .json(&json!({ "title": "Ghost", "category_id": 77, "cook_time": 5 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "CATEGORY_NOT_FOUND");
}

#[tokio::test]
async fn should_filter_and_paginate_recipes() {
    let app = spawn_app().await;
    let author = seed_user(&app.db, "author").await;
    let soup = seed_category(&app.db, "Soup").await;
    let cake = seed_category(&app.db, "Cake").await;
    seed_recipe(&app.db, author.id, soup.id, "Borscht").await;
    seed_recipe(&app.db, author.id, soup.id, "Pho").await;
    seed_recipe(&app.db, author.id, cake.id, "Sponge").await;

    let soups: Value = app
        .server
        .get(&format!("/recipes?category-id={}", soup.id))
        .await
        .json();
    assert_eq!(soups.as_array().unwrap().len(), 2);

    let page: Value = app
        .server
        .get("/recipes?per-page=2&page=2")
        .await
        .json();
    assert_eq!(page.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_only_let_author_update_or_delete() {
    let app = spawn_app().await;
    let author = seed_user(&app.db, "author").await;
    let other = seed_user(&app.db, "other").await;
    let category = seed_category(&app.db, "Grill").await;
    let recipe = seed_recipe(&app.db, author.id, category.id, "Kebab").await;
    let path = format!("/recipes/{}", recipe.id);

    let (name, value) = bearer(other.id);
    app.server
        .patch(&path)
        .add_header(name.clone(), value.clone())
        .json(&json!({ "title": "Stolen" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&path)
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = bearer(author.id);
    let updated: Value = app
        .server
        .patch(&path)
        .add_header(name.clone(), value.clone())
        .json(&json!({ "title": "Adana kebab", "picture": "kebab.jpg" }))
        .await
        .json();
    assert_eq!(updated["title"], "Adana kebab");
    assert_eq!(updated["picture"], "kebab.jpg");

    app.server
        .delete(&path)
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get(&path)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_create_and_list_categories() {
    let app = spawn_app().await;
    let user = seed_user(&app.db, "cook").await;
    let (name, value) = bearer(user.id);

    app.server
        .post("/categories")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "name": "Breakfast" }))
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = app
        .server
        .post("/categories")
        .add_header(name, value)
        .json(&json!({ "name": "Breakfast" }))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
    assert_eq!(duplicate.json::<Value>()["kind"], "CATEGORY_ALREADY_EXISTS");

    let listed: Value = app.server.get("/categories").await.json();
    assert_eq!(listed, json!([{ "id": 1, "name": "Breakfast" }]));
}
