use restaurant::{domain::pagination::Page, error::ErrorBody, models::UserView};

use crate::helpers::{TestApp, TestUser};

#[actix_web::test]
async fn signup_returns_id_and_token_pair(){
    let app = TestApp::spawn_app().await;
    let user = TestUser::generate();

    let response = app.post_signup(&user.signup_body()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["inserted_id"].as_str().unwrap().len(), 24);
    assert!(body["token"].is_string());
    assert!(body["refresh_token"].is_string());
}

#[actix_web::test]
async fn signup_with_registered_email_is_a_conflict(){
    let app = TestApp::spawn_app().await;
    let user = TestUser::generate();
    assert_eq!(app.post_signup(&user.signup_body()).await.status().as_u16(), 200);

    let mut again = TestUser::generate().signup_body();
    again["email"] = serde_json::json!(user.email);
    let response = app.post_signup(&again).await;

    assert_eq!(response.status().as_u16(), 409);
    let error: ErrorBody = response.json().await.unwrap();
    assert_eq!(error.code, 409);

    let token = app.create_user_and_login().await;
    let page: Page<UserView> = app.get("/users", &token).await.json().await.unwrap();
    // the first user and the one created to log in, nothing from the rejected signup
    assert_eq!(page.total_count, 2);
}

#[actix_web::test]
async fn signup_with_invalid_fields_is_a_bad_request(){
    let app = TestApp::spawn_app().await;
    let test_cases = vec![
        ("email", serde_json::json!("not-an-email"), "invalid email"),
        ("phone", serde_json::json!("call me"), "invalid phone"),
        ("password", serde_json::json!("123"), "short password"),
        ("first_name", serde_json::json!("A"), "short first name"),
    ];

    for (field, value, description) in test_cases {
        let mut body = TestUser::generate().signup_body();
        body[field] = value;

        let response = app.post_signup(&body).await;
        assert_eq!(response.status().as_u16(), 400, "signup did not fail for {}", description);
    }
}

#[actix_web::test]
async fn malformed_json_gets_the_json_error_body(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client
        .post(format!("{}/users/signup", app.get_app_url()))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let error: ErrorBody = response.json().await.unwrap();
    assert_eq!(error.code, 400);
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized(){
    let app = TestApp::spawn_app().await;
    let user = TestUser::generate();
    app.post_signup(&user.signup_body()).await;

    let response = app.post_login(&user.email, "wrong password").await;

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn login_with_unknown_email_is_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.post_login("nobody@example.com", "whatever1").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn login_returns_user_with_fresh_tokens(){
    let app = TestApp::spawn_app().await;
    let user = TestUser::generate();
    let signup: serde_json::Value = app.post_signup(&user.signup_body()).await.json().await.unwrap();

    let response = app.post_login(&user.email, &user.password).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("password").is_none());
    assert_eq!(body["email"], serde_json::json!(user.email));
    assert_eq!(body["user_id"], signup["inserted_id"]);
    assert!(body["token"].is_string());
}

#[actix_web::test]
async fn protected_routes_require_a_valid_token(){
    let app = TestApp::spawn_app().await;

    let missing = app.api_client
        .get(format!("{}/foods", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 401);

    let invalid = app.get("/foods", "not-a-token").await;
    assert_eq!(invalid.status().as_u16(), 401);
    let error: ErrorBody = invalid.json().await.unwrap();
    assert_eq!(error.code, 401);
}

#[actix_web::test]
async fn patch_user_changes_only_supplied_fields(){
    let app = TestApp::spawn_app().await;
    let user = TestUser::generate();
    let signup: serde_json::Value = app.post_signup(&user.signup_body()).await.json().await.unwrap();
    let user_id = signup["inserted_id"].as_str().unwrap();
    let token = signup["token"].as_str().unwrap();

    let response = app.patch(&format!("/users/{}", user_id), token, &serde_json::json!({
        "avatar": "https://img.example/me.png"
    }))
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let stored: UserView = app.get(&format!("/users/{}", user_id), token).await.json().await.unwrap();
    assert_eq!(stored.avatar.as_deref(), Some("https://img.example/me.png"));
    assert_eq!(stored.email, user.email);
    assert_eq!(stored.phone, user.phone);
}

#[actix_web::test]
async fn user_views_do_not_expose_other_sessions(){
    let app = TestApp::spawn_app().await;
    let victim = TestUser::generate();
    let signup: serde_json::Value = app.post_signup(&victim.signup_body()).await.json().await.unwrap();
    let victim_id = signup["inserted_id"].as_str().unwrap();

    let token = app.create_user_and_login().await;

    let list: serde_json::Value = app.get("/users", &token).await.json().await.unwrap();
    let single: serde_json::Value = app.get(&format!("/users/{}", victim_id), &token).await.json().await.unwrap();

    for view in list["items"].as_array().unwrap().iter().chain(std::iter::once(&single)) {
        assert!(view.get("token").is_none());
        assert!(view.get("refresh_token").is_none());
    }
    assert_eq!(single["user_id"], signup["inserted_id"]);
}
