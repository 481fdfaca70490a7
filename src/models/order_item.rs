use serde::Serialize;
use sqlx::FromRow;

/// One line of an order: a product reference plus a requested quantity
/// (kilograms, or the product's own unit). Owned by its order; immutable
/// after creation.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub id: i32,
  pub order_id: i32,
  pub product_id: i32,
  pub quantity: i32,
}
