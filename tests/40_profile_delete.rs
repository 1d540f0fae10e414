mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use devconnector_api::database::Store;

#[tokio::test]
async fn delete_removes_profile_and_user() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Jane", "jane@example.com").await?;
    app.post("/api/profile", Some(&token), json!({ "status": "Developer", "skills": "rust" }))
        .await?;
    let user = app.store.find_user_by_email("jane@example.com").await?.unwrap();

    let res = app.delete("/api/profile", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "User deleted");

    assert!(app.store.find_user(user.id).await?.is_none());
    assert!(app.store.find_profile(user.id).await?.is_none());

    let me = app.get("/api/profile/me", Some(&token)).await?;
    assert_eq!(me.status, StatusCode::BAD_REQUEST);
    assert_eq!(me.body["message"], "There is no profile for this user");

    let by_id = app.get(&format!("/api/profile/users/{}", user.id), None).await?;
    assert_eq!(by_id.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_without_profile_still_removes_user() -> Result<()> {
    let app = common::TestApp::new();
    let token = app.register("Jane", "jane@example.com").await?;

    let res = app.delete("/api/profile", Some(&token)).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert!(app.store.find_user_by_email("jane@example.com").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn delete_leaves_other_profiles_alone() -> Result<()> {
    let app = common::TestApp::new();
    let jane = app.register("Jane", "jane@example.com").await?;
    let john = app.register("John", "john@example.com").await?;
    for token in [&jane, &john] {
        app.post("/api/profile", Some(token.as_str()), json!({ "status": "Developer", "skills": "rust" }))
            .await?;
    }

    app.delete("/api/profile", Some(&jane)).await?;

    let listed = app.get("/api/profile", None).await?;
    let profiles = listed.body.as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["user"]["name"], "John");
    Ok(())
}

#[tokio::test]
async fn delete_requires_token() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.delete("/api/profile", None).await?;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}
