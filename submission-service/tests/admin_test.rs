mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{spawn_app, DEMO_PASSWORD};

#[tokio::test]
async fn invite_creation_is_director_only() {
    let app = spawn_app().await;
    let finance = app.login("finance", DEMO_PASSWORD).await;

    let (status, _) = app
        .post(
            "/api/admin/users/invite",
            Some(&finance),
            json!({ "username": "fin2", "role": "FINANCE" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/api/admin/users/invite",
            None,
            json!({ "username": "fin2", "role": "FINANCE" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invite_for_existing_username_conflicts() {
    let app = spawn_app().await;
    let director = app.login("director", DEMO_PASSWORD).await;

    let (status, _) = app
        .post(
            "/api/admin/users/invite",
            Some(&director),
            json!({ "username": "finance", "role": "FINANCE" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invite_redeem_login_end_to_end_overwrites_username() {
    let app = spawn_app().await;
    let director = app.login("director", DEMO_PASSWORD).await;

    // Director invites "fin1" as FINANCE.
    let (status, body) = app
        .post(
            "/api/admin/users/invite",
            Some(&director),
            json!({ "username": "fin1", "role": "FINANCE" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let code = body["invite_code"].as_str().unwrap().to_string();
    assert!(code.starts_with("FIN-"));

    // The invitee registers under a chosen username and is auto-logged-in.
    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "invite_code": code,
                "username": "finlead",
                "password": "a-strong-secret",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "finlead");
    assert_eq!(body["user"]["role"], "FINANCE");
    assert!(body["token"].as_str().is_some());

    // The chosen username authenticates with role FINANCE.
    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "finlead", "password": "a-strong-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "FINANCE");

    // The admin-assigned username was overwritten and no longer works.
    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "fin1", "password": "a-strong-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Redemption is exactly-once, even with otherwise valid credentials.
    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "invite_code": code,
                "username": "someone-else",
                "password": "another-secret",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid invite code");
}

#[tokio::test]
async fn second_redemption_of_the_same_code_fails() {
    let app = spawn_app().await;
    let director = app.login("director", DEMO_PASSWORD).await;

    let (_, body) = app
        .post(
            "/api/admin/users/invite",
            Some(&director),
            json!({ "username": "vet1", "role": "VETTING" }),
        )
        .await;
    let code = body["invite_code"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "invite_code": code, "username": "vet1", "password": "first-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "invite_code": code, "username": "vet2", "password": "second-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid invite code");
}

#[tokio::test]
async fn account_listing_shows_pending_invites_to_the_director() {
    let app = spawn_app().await;
    let director = app.login("director", DEMO_PASSWORD).await;

    app.post(
        "/api/admin/users/invite",
        Some(&director),
        json!({ "username": "doc2", "role": "DOCUMENTATION" }),
    )
    .await;

    let (status, body) = app.get("/api/admin/users", Some(&director)).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 5);
    let pending = users.iter().find(|u| u["username"] == "doc2").unwrap();
    assert!(pending["invite_code"].as_str().is_some());
    // Credentials never appear in the listing.
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn director_can_delete_an_account() {
    let app = spawn_app().await;
    let director = app.login("director", DEMO_PASSWORD).await;

    let (_, body) = app.get("/api/admin/users", Some(&director)).await;
    let vetting_id = body
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "vetting")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, _) = app
        .delete(&format!("/api/admin/users/{}", vetting_id), Some(&director))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .delete(&format!("/api/admin/users/{}", vetting_id), Some(&director))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
