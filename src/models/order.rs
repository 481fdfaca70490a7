use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::{OrderItem, Product};
use crate::workflow::OrderStatus;

/// A confirmed bulk purchase request. Always created together with at least
/// one `OrderItem`; never deleted, only advanced through the status workflow.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: i32,
  pub customer_name: String,
  pub contact_number: String,
  pub address: String,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// An order hydrated with its line items and their resolved products, the
/// shape every order read and write returns to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
  #[serde(flatten)]
  pub order: Order,
  pub order_items: Vec<OrderItemDetail>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
  #[serde(flatten)]
  pub item: OrderItem,
  pub product: Product,
}
