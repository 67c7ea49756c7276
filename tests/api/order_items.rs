use restaurant::{db_interaction::order_items::OrderItemPackAck, domain::order_summary::OrderSummary, models::{Order, OrderItem}};

use crate::helpers::TestApp;

#[actix_web::test]
async fn order_items_share_the_created_order(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let menu_id = app.create_menu(&token).await;
    let table_id = app.create_table(&token, 4).await;
    let soup = app.create_food(&token, &menu_id, "Soup", 4.5).await;
    let bread = app.create_food(&token, &menu_id, "Bread", 1.25).await;

    let response = app.post("/orderItems", &token, &serde_json::json!({
        "table_id": table_id,
        "order_items": [
            { "food_id": soup, "quantity": 2, "unit_price": 4.499 },
            { "food_id": bread, "quantity": 1, "unit_price": 1.25 }
        ]
    }))
    .await;
    assert_eq!(response.status().as_u16(), 200);
    let ack: OrderItemPackAck = response.json().await.unwrap();

    let order: Order = app.get(&format!("/orders/{}", ack.order_id), &token).await.json().await.unwrap();
    assert_eq!(order.table_id.as_deref(), Some(table_id.as_str()));

    let mut prices = Vec::new();
    for id in &ack.inserted_ids {
        let item: OrderItem = app.get(&format!("/orderItems/{}", id), &token).await.json().await.unwrap();
        assert_eq!(item.order_id, ack.order_id);
        prices.push(item.unit_price);
    }
    assert_eq!(prices, vec![4.5, 1.25]);
}

#[actix_web::test]
async fn order_items_with_unknown_food_create_nothing(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;

    let response = app.post("/orderItems", &token, &serde_json::json!({
        "order_items": [{ "food_id": "652f0c0e0a1b2c3d4e5f6071", "quantity": 1, "unit_price": 3.0 }]
    }))
    .await;
    assert_eq!(response.status().as_u16(), 404);

    let orders: Vec<Order> = app.get("/orders", &token).await.json().await.unwrap();
    assert!(orders.is_empty());
}

#[actix_web::test]
async fn three_items_on_one_table_are_summarized_together(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let menu_id = app.create_menu(&token).await;
    let table_id = app.create_table(&token, 7).await;
    let foods = vec![
        app.create_food(&token, &menu_id, "Tea", 1.1).await,
        app.create_food(&token, &menu_id, "Cake", 3.35).await,
        app.create_food(&token, &menu_id, "Pie", 5.99).await,
    ];

    let ack: OrderItemPackAck = app.post("/orderItems", &token, &serde_json::json!({
        "table_id": table_id,
        "order_items": [
            { "food_id": foods[0], "quantity": 3, "unit_price": 1.1 },
            { "food_id": foods[1], "quantity": 2, "unit_price": 3.35 },
            { "food_id": foods[2], "quantity": 1, "unit_price": 5.99 }
        ]
    }))
    .await
    .json()
    .await
    .unwrap();

    let groups: Vec<OrderSummary> = app.get(&format!("/orderItems-order/{}", ack.order_id), &token)
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].total_count, 3);
    assert_eq!(groups[0].table_number, Some(7));
    // 3 * 1.10 + 2 * 3.35 + 5.99
    assert_eq!(groups[0].payment_due, 15.99);
    assert!(groups[0].order_items.iter().all(|line| line.order_id.as_deref() == Some(ack.order_id.as_str())));
}

#[actix_web::test]
async fn order_without_items_has_no_summary(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let order_id = app.create("/orders", &token, &serde_json::json!({})).await;

    let response = app.get(&format!("/orderItems-order/{}", order_id), &token).await;
    assert_eq!(response.status().as_u16(), 200);

    let groups: Vec<OrderSummary> = response.json().await.unwrap();
    assert!(groups.is_empty());
}

#[actix_web::test]
async fn order_item_quantity_can_be_changed(){
    let app = TestApp::spawn_app().await;
    let token = app.create_user_and_login().await;
    let menu_id = app.create_menu(&token).await;
    let food_id = app.create_food(&token, &menu_id, "Soup", 4.5).await;
    let ack: OrderItemPackAck = app.post("/orderItems", &token, &serde_json::json!({
        "order_items": [{ "food_id": food_id, "quantity": 1, "unit_price": 4.5 }]
    }))
    .await
    .json()
    .await
    .unwrap();
    let path = format!("/orderItems/{}", ack.inserted_ids[0]);

    let zero = app.patch(&path, &token, &serde_json::json!({ "quantity": 0 })).await;
    assert_eq!(zero.status().as_u16(), 400);

    let response = app.patch(&path, &token, &serde_json::json!({ "quantity": 4 })).await;
    assert_eq!(response.status().as_u16(), 200);

    let item: OrderItem = app.get(&path, &token).await.json().await.unwrap();
    assert_eq!(item.quantity, 4);
    assert_eq!(item.unit_price, 4.5);
}
