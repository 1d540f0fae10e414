mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use devconnector_api::database::Store;

#[tokio::test]
async fn own_profile_requires_token() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/api/profile/me", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "No token, authorization denied");

    let res = app.get("/api/profile/me", Some("not-a-jwt")).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Token is not valid");
    Ok(())
}

#[tokio::test]
async fn missing_own_profile_is_reported() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Jane", "jane@example.com").await?;

    let res = app.get("/api/profile/me", Some(&token)).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "There is no profile for this user");
    Ok(())
}

#[tokio::test]
async fn upsert_creates_then_partially_updates() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Jane", "jane@example.com").await?;
    let user = app.store.find_user_by_email("jane@example.com").await?.unwrap();

    let created = app
        .post(
            "/api/profile",
            Some(&token),
            json!({
                "status": "Developer",
                "skills": "a, b ,c",
                "company": "Acme",
                "twitter": "https://twitter.com/jane"
            }),
        )
        .await?;
    assert_eq!(created.status, StatusCode::OK, "unexpected body: {}", created.body);
    assert_eq!(created.body["skills"], json!(["a", "b", "c"]));
    assert_eq!(created.body["user"], json!(user.id));

    let updated = app
        .post(
            "/api/profile",
            Some(&token),
            json!({
                "status": "Senior Developer",
                "skills": "rust",
                "youtube": "https://youtube.com/jane"
            }),
        )
        .await?;
    assert_eq!(updated.status, StatusCode::OK, "unexpected body: {}", updated.body);
    assert_eq!(updated.body["id"], created.body["id"]);
    assert_eq!(updated.body["status"], "Senior Developer");
    assert_eq!(updated.body["skills"], json!(["rust"]));
    assert_eq!(updated.body["company"], "Acme");
    assert_eq!(updated.body["social"]["twitter"], "https://twitter.com/jane");
    assert_eq!(updated.body["social"]["youtube"], "https://youtube.com/jane");

    let listed = app.get("/api/profile", None).await?;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn upsert_validates_status_and_skills() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Jane", "jane@example.com").await?;

    let res = app.post("/api/profile", Some(&token), json!({ "company": "Acme" })).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["errors"][0]["message"], "Status is required");
    assert_eq!(res.body["errors"][1]["message"], "Skills is required");

    let me = app.get("/api/profile/me", Some(&token)).await?;
    assert_eq!(me.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn own_profile_is_populated_with_owner() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Jane", "jane@example.com").await?;
    app.post("/api/profile", Some(&token), json!({ "status": "Developer", "skills": ["rust"] }))
        .await?;

    let res = app.get("/api/profile/me", Some(&token)).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["user"]["name"], "Jane");
    assert!(res.body["user"]["avatar"].as_str().is_some());
    assert!(res.body["user"].get("email").is_none());
    assert!(res.body["user"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn listing_is_public_and_populated() -> Result<()> {
    let app = common::TestApp::new();
    for (name, email) in [("Jane", "jane@example.com"), ("John", "john@example.com")] {
        let token = app.register(name, email).await?;
        app.post("/api/profile", Some(&token), json!({ "status": "Developer", "skills": "rust" }))
            .await?;
    }

    let res = app.get("/api/profile", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    let mut names: Vec<_> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["user"]["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Jane", "John"]);
    Ok(())
}

#[tokio::test]
async fn profile_by_user_id() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Jane", "jane@example.com").await?;
    app.post("/api/profile", Some(&token), json!({ "status": "Developer", "skills": "rust" }))
        .await?;
    let user = app.store.find_user_by_email("jane@example.com").await?.unwrap();

    let found = app.get(&format!("/api/profile/users/{}", user.id), None).await?;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["user"]["name"], "Jane");

    let unknown = app
        .get(&format!("/api/profile/users/{}", uuid::Uuid::new_v4()), None)
        .await?;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.body["message"], "Profile not found");

    let malformed = app.get("/api/profile/users/not-an-id", None).await?;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["message"], "Profile not found");
    Ok(())
}

#[tokio::test]
async fn bearer_scheme_is_case_insensitive() -> Result<()> {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let app = common::TestApp::new();
    let token = app.register("Jane", "jane@example.com").await?;
    app.post(
        "/api/profile",
        Some(&token),
        json!({ "status": "Developer", "skills": "rust" }),
    )
    .await?;

    let request = Request::builder()
        .uri("/api/profile/me")
        .header(header::AUTHORIZATION, format!("bearer {}", token))
        .body(Body::empty())?;
    let response = app.router.clone().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
