use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A catalog entry for a purchasable item. Prices are integer minor units
/// (cents); `stock_quantity` is absent for products not stock-tracked.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: i32,
  pub name: String,
  pub description: Option<String>,
  pub price_cents: i32,
  pub category: String,
  pub image_url: Option<String>,
  pub stock_quantity: Option<i32>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
