pub mod money;
pub mod order_summary;
pub mod pagination;
pub mod phone_number;
