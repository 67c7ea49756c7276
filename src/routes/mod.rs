mod food;
mod health_check;
mod invoice;
mod menu;
mod order;
mod order_item;
mod table;
mod user;

pub use food::*;
pub use health_check::*;
pub use invoice::*;
pub use menu::*;
pub use order::*;
pub use order_item::*;
pub use table::*;
pub use user::*;
