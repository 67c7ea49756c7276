use restaurant::{db_interaction::order_items::OrderItemPackAck, models::{Invoice, InvoiceView, PaymentStatus}};

use crate::helpers::TestApp;

#[actix_web::test]
async fn invoice_view_carries_the_order_summary(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let menu_id = app.create_menu(&token).await;
    let table_id = app.create_table(&token, 3).await;
    let food_id = app.create_food(&token, &menu_id, "Curry", 6.25).await;
    let order: OrderItemPackAck = app.post("/orderItems", &token, &serde_json::json!({
        "table_id": table_id,
        "order_items": [{ "food_id": food_id, "quantity": 2, "unit_price": 6.25 }]
    }))
    .await
    .json()
    .await
    .unwrap();

    let invoice_id = app.create("/invoices", &token, &serde_json::json!({
        "order_id": order.order_id,
        "payment_method": "CARD"
    }))
    .await;

    let response = app.get(&format!("/invoices/{}", invoice_id), &token).await;
    assert_eq!(response.status().as_u16(), 200);

    let view: InvoiceView = response.json().await.unwrap();
    assert_eq!(view.invoice_id, invoice_id);
    assert_eq!(view.order_id, order.order_id);
    assert_eq!(view.payment_method, "CARD");
    assert_eq!(view.payment_status, PaymentStatus::Pending);
    assert_eq!(view.payment_due, 12.5);
    assert_eq!(view.table_number, Some(3));
    assert_eq!(view.order_details.len(), 1);
}

#[actix_web::test]
async fn invoice_without_method_shows_null_literal(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let menu_id = app.create_menu(&token).await;
    let food_id = app.create_food(&token, &menu_id, "Curry", 6.25).await;
    let order: OrderItemPackAck = app.post("/orderItems", &token, &serde_json::json!({
        "order_items": [{ "food_id": food_id, "quantity": 1, "unit_price": 6.25 }]
    }))
    .await
    .json()
    .await
    .unwrap();

    let invoice_id = app.create("/invoices", &token, &serde_json::json!({ "order_id": order.order_id })).await;

    let view: InvoiceView = app.get(&format!("/invoices/{}", invoice_id), &token).await.json().await.unwrap();
    assert_eq!(view.payment_method, "null");
    assert_eq!(view.table_number, None);
}

#[actix_web::test]
async fn invoice_for_order_without_items_is_not_found(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let order_id = app.create("/orders", &token, &serde_json::json!({})).await;
    let invoice_id = app.create("/invoices", &token, &serde_json::json!({ "order_id": order_id })).await;

    let response = app.get(&format!("/invoices/{}", invoice_id), &token).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn invoice_for_unknown_order_is_not_found(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;

    let response = app.post("/invoices", &token, &serde_json::json!({ "order_id": "652f0c0e0a1b2c3d4e5f6071" })).await;

    assert_eq!(response.status().as_u16(), 404);
    let invoices: Vec<Invoice> = app.get("/invoices", &token).await.json().await.unwrap();
    assert!(invoices.is_empty());
}

#[actix_web::test]
async fn unknown_payment_method_is_a_bad_request(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let order_id = app.create("/orders", &token, &serde_json::json!({})).await;

    let response = app.post("/invoices", &token, &serde_json::json!({
        "order_id": order_id,
        "payment_method": "CHEQUE"
    }))
    .await;

    assert_eq!(response.status().as_u16(), 400);
}
