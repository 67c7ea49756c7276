mod health_check;
mod helpers;
mod invoices;
mod order_items;
mod tables;
mod users;
