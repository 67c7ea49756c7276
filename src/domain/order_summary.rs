//! Per-order billing summary.
//!
//! Order items are left-joined with their food, their order and, through the
//! order's `table_id`, the table. Joined lines are grouped per
//! (order, table) so each group carries the number of lines, the amount due
//! and the lines themselves. A food or table that no longer resolves leaves
//! the matching fields null instead of dropping the line.

use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::{domain::money::{round_currency, sum_currency, MoneyError}, models::{Food, Order, OrderItem, Table}};

/// One joined order item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderLine{
    /// `price * quantity`, null when the food is gone
    pub amount: Option<f64>,
    pub price: Option<f64>,
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    pub table_number: Option<i32>,
    pub table_id: Option<String>,
    pub order_id: Option<String>,
    pub quantity: i32
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderSummary{
    pub payment_due: f64,
    pub total_count: u64,
    pub table_number: Option<i32>,
    pub order_items: Vec<OrderLine>
}

impl OrderSummary {
    /// Rounds every line to the cent and recomputes the amount due from the
    /// rounded lines, so a store that multiplies and sums in binary floating
    /// point reports the same figures as [`summarize_order`].
    pub fn settled(mut self) -> Result<Self, MoneyError> {
        for line in self.order_items.iter_mut() {
            line.amount = line.amount.map(round_currency);
        }
        self.payment_due = sum_currency(self.order_items.iter().filter_map(|l| l.amount))?;
        Ok(self)
    }
}

pub fn order_summary_pipeline(order_id: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "order_id": order_id } },
        doc! { "$lookup": {
            "from": "food",
            "localField": "food_id",
            "foreignField": "food_id",
            "as": "food"
        }},
        doc! { "$unwind": { "path": "$food", "preserveNullAndEmptyArrays": true } },
        doc! { "$lookup": {
            "from": "order",
            "localField": "order_id",
            "foreignField": "order_id",
            "as": "order"
        }},
        doc! { "$unwind": { "path": "$order", "preserveNullAndEmptyArrays": true } },
        doc! { "$lookup": {
            "from": "table",
            "localField": "order.table_id",
            "foreignField": "table_id",
            "as": "table"
        }},
        doc! { "$unwind": { "path": "$table", "preserveNullAndEmptyArrays": true } },
        doc! { "$project": {
            "_id": 0,
            "amount": { "$multiply": ["$food.price", "$quantity"] },
            "price": "$food.price",
            "food_name": "$food.name",
            "food_image": "$food.food_image",
            "table_number": "$table.table_number",
            "table_id": "$table.table_id",
            "order_id": "$order_id",
            "quantity": "$quantity"
        }},
        doc! { "$group": {
            "_id": {
                "order_id": "$order_id",
                "table_id": "$table_id",
                "table_number": "$table_number"
            },
            "payment_due": { "$sum": "$amount" },
            "total_count": { "$sum": 1 },
            "order_items": { "$push": "$$ROOT" }
        }},
        doc! { "$project": {
            "_id": 0,
            "payment_due": 1,
            "total_count": 1,
            "table_number": "$_id.table_number",
            "order_items": 1
        }},
    ]
}

type GroupKey = (Option<String>, Option<String>, Option<i32>);

/// In-process equivalent of [`order_summary_pipeline`]. Groups come out in
/// the order their first line was seen.
pub fn summarize_order(
    order_id: &str,
    items: &[OrderItem],
    foods: &[Food],
    orders: &[Order],
    tables: &[Table]
) -> Result<Vec<OrderSummary>, MoneyError> {
    let mut groups: Vec<(GroupKey, Vec<OrderLine>)> = Vec::new();

    for item in items.iter().filter(|i| i.order_id == order_id) {
        let food = foods.iter().find(|f| f.food_id == item.food_id);
        let table = orders
            .iter()
            .find(|o| o.order_id == item.order_id)
            .and_then(|o| o.table_id.as_deref())
            .and_then(|table_id| tables.iter().find(|t| t.table_id == table_id));

        let price = food.map(|f| f.price);
        let line = OrderLine{
            amount: price.map(|p| round_currency(p * f64::from(item.quantity))),
            price,
            food_name: food.map(|f| f.name.clone()),
            food_image: food.map(|f| f.food_image.clone()),
            table_number: table.map(|t| t.table_number),
            table_id: table.map(|t| t.table_id.clone()),
            order_id: Some(item.order_id.clone()),
            quantity: item.quantity
        };

        let key = (line.order_id.clone(), line.table_id.clone(), line.table_number);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, lines)) => lines.push(line),
            None => groups.push((key, vec![line]))
        }
    }

    groups
        .into_iter()
        .map(|((_, _, table_number), lines)| Ok(OrderSummary{
            payment_due: sum_currency(lines.iter().filter_map(|l| l.amount))?,
            total_count: lines.len() as u64,
            table_number,
            order_items: lines
        }))
        .collect()
}
