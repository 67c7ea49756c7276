use restaurant::{models::Table, store::UpdateAck};

use crate::helpers::TestApp;

#[actix_web::test]
async fn patch_with_only_guests_keeps_table_number(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let table_id = app.create_table(&token, 12).await;
    let before: Table = app.get(&format!("/tables/{}", table_id), &token).await.json().await.unwrap();

    // timestamps have second precision
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let response = app.patch(&format!("/tables/{}", table_id), &token, &serde_json::json!({
        "number_of_guests": 6
    }))
    .await;
    assert_eq!(response.status().as_u16(), 200);
    let ack: UpdateAck = response.json().await.unwrap();
    assert_eq!(ack.matched_count, 1);

    let after: Table = app.get(&format!("/tables/{}", table_id), &token).await.json().await.unwrap();
    assert_eq!(after.number_of_guests, 6);
    assert_eq!(after.table_number, 12);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[actix_web::test]
async fn patch_of_unknown_table_is_not_found(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;

    let response = app.patch("/tables/652f0c0e0a1b2c3d4e5f6071", &token, &serde_json::json!({
        "table_number": 3
    }))
    .await;

    assert_eq!(response.status().as_u16(), 404);
    let tables: Vec<Table> = app.get("/tables", &token).await.json().await.unwrap();
    assert!(tables.is_empty());
}

#[actix_web::test]
async fn table_with_zero_guests_is_rejected(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;

    let response = app.post("/tables", &token, &serde_json::json!({
        "number_of_guests": 0,
        "table_number": 1
    }))
    .await;

    assert_eq!(response.status().as_u16(), 400);
}
