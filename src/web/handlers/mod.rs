pub mod order_handlers;
pub mod product_handlers;
