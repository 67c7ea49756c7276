use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Stored documents. The store's own `_id` is never read back into these.

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User{
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub email: String,
    pub avatar: Option<String>,
    pub phone: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String
}

/// A user as returned over the API, without the password hash or the
/// session tokens.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserView{
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self{
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            avatar: user.avatar,
            phone: user.phone,
            created_at: user.created_at,
            updated_at: user.updated_at,
            user_id: user.user_id
        }
    }
}

/// The logged in user together with the tokens just issued to them. Only
/// ever returned to that user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionView{
    #[serde(flatten)]
    pub user: UserView,
    pub token: String,
    pub refresh_token: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Menu{
    pub name: String,
    pub category: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub menu_id: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Food{
    pub name: String,
    pub price: f64,
    pub food_image: String,
    pub menu_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub food_id: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Table{
    pub number_of_guests: i32,
    pub table_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub table_id: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order{
    pub order_date: DateTime<Utc>,
    pub table_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub order_id: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderItem{
    pub quantity: i32,
    pub unit_price: f64,
    pub food_id: String,
    pub order_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub order_item_id: String
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod{
    Card,
    Cash
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH"
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus{
    #[default]
    Pending,
    Paid
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Invoice{
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub payment_due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub invoice_id: String
}

/// Invoice joined with the summary of its order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InvoiceView{
    pub invoice_id: String,
    pub payment_method: String,
    pub order_id: String,
    pub payment_status: PaymentStatus,
    pub payment_due: f64,
    pub table_number: Option<i32>,
    pub payment_due_date: DateTime<Utc>,
    pub order_details: Vec<crate::domain::order_summary::OrderLine>
}
