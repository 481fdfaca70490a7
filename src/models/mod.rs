//! Data structures representing database entities and their hydrated
//! response shapes.

pub mod order;
pub mod order_item;
pub mod product;

pub use order::{Order, OrderDetail, OrderItemDetail};
pub use order_item::OrderItem;
pub use product::Product;
