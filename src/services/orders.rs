//! Order placement and tracking service.
//!
//! Placement validates a draft order end to end before touching the database,
//! then creates the order row and all of its line items inside a single
//! transaction, so no order ever exists without items and no item ever
//! references a product that was not resolved at creation time.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::{Order, OrderDetail, OrderItem, OrderItemDetail, Product};
use crate::workflow::OrderStatus;

const ORDER_COLUMNS: &str =
  "id, customer_name, contact_number, address, status, created_at, updated_at";

/// A draft order as submitted at checkout: delivery details plus the cart
/// contents. The client also pattern-checks the contact number (10-15
/// digits); the server contract only requires presence.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
  pub customer_name: Option<String>,
  pub contact_number: Option<String>,
  pub address: Option<String>,
  #[serde(default)]
  pub items: Vec<OrderItemDraft>,
  pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
  pub product_id: i32,
  pub quantity: i32,
}

/// Checks everything that can be checked without a database round trip.
/// Returns the status the order will be created with (`Pending` unless the
/// draft carries a valid explicit status).
fn validate_draft(draft: &OrderDraft) -> Result<OrderStatus> {
  let present = |field: &Option<String>| {
    field
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .is_some()
  };

  if !present(&draft.customer_name) || !present(&draft.contact_number) || !present(&draft.address) {
    return Err(AppError::Validation(
      "Customer name, contact, and address are required".to_string(),
    ));
  }

  if draft.items.is_empty() {
    return Err(AppError::Validation(
      "Order must contain at least one item".to_string(),
    ));
  }
  if draft.items.iter().any(|item| item.quantity <= 0) {
    return Err(AppError::Validation(
      "Item quantity must be a positive integer".to_string(),
    ));
  }

  match draft.status.as_deref() {
    None => Ok(OrderStatus::Pending),
    Some(s) => {
      OrderStatus::parse(s).ok_or_else(|| AppError::Validation("Invalid order status".to_string()))
    }
  }
}

/// Validates `draft`, resolves every referenced product, and persists the
/// order with all of its line items atomically. Nothing is written on any
/// validation failure.
#[instrument(name = "orders::place_order", skip(pool, draft))]
pub async fn place_order(pool: &PgPool, draft: OrderDraft) -> Result<OrderDetail> {
  let status = validate_draft(&draft)?;

  // One batch lookup for all distinct referenced products; any miss fails
  // the whole order.
  let mut product_ids: Vec<i32> = draft.items.iter().map(|item| item.product_id).collect();
  product_ids.sort_unstable();
  product_ids.dedup();

  let (found,): (i64,) = sqlx::query_as("SELECT count(*) FROM products WHERE id = ANY($1)")
    .bind(&product_ids)
    .fetch_one(pool)
    .await?;
  if found as usize != product_ids.len() {
    warn!(
      requested = product_ids.len(),
      found, "Draft order references unknown products."
    );
    return Err(AppError::Validation(
      "One or more products do not exist".to_string(),
    ));
  }

  let mut tx = pool.begin().await?;

  let order: Order = sqlx::query_as(&format!(
    "INSERT INTO orders (customer_name, contact_number, address, status) \
     VALUES ($1, $2, $3, $4) RETURNING {ORDER_COLUMNS}"
  ))
  // Presence is checked on trimmed values, but the submitted strings are
  // stored verbatim.
  .bind(draft.customer_name.as_deref())
  .bind(draft.contact_number.as_deref())
  .bind(draft.address.as_deref())
  .bind(status)
  .fetch_one(&mut *tx)
  .await?;

  for item in &draft.items {
    sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES ($1, $2, $3)")
      .bind(order.id)
      .bind(item.product_id)
      .bind(item.quantity)
      .execute(&mut *tx)
      .await?;
  }

  tx.commit().await?;

  info!(
    order_id = order.id,
    items = draft.items.len(),
    "Order placed."
  );
  hydrate_order(pool, order).await
}

/// All orders, newest first, each with nested items and products.
#[instrument(name = "orders::list_orders", skip(pool))]
pub async fn list_orders(pool: &PgPool) -> Result<Vec<OrderDetail>> {
  let orders: Vec<Order> = sqlx::query_as(&format!(
    "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
  ))
  .fetch_all(pool)
  .await?;

  let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
  let mut items_by_order = load_items(pool, &ids).await?;

  Ok(
    orders
      .into_iter()
      .map(|order| {
        let order_items = items_by_order.remove(&order.id).unwrap_or_default();
        OrderDetail { order, order_items }
      })
      .collect(),
  )
}

/// One order by id, hydrated; not-found error if no such order exists.
#[instrument(name = "orders::get_order", skip(pool))]
pub async fn get_order(pool: &PgPool, order_id: i32) -> Result<OrderDetail> {
  let order: Option<Order> =
    sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
      .bind(order_id)
      .fetch_optional(pool)
      .await?;
  let order = order.ok_or_else(|| {
    warn!("Order with ID {} not found.", order_id);
    AppError::NotFound("Order not found".to_string())
  })?;
  hydrate_order(pool, order).await
}

/// Sets a new status on an existing order. The label must be one of the
/// recognized statuses, but the workflow deliberately does not require the
/// new status to be one step from the current one (admin override is
/// allowed). "Invalid status" and "not found" are distinct rejections.
#[instrument(name = "orders::update_status", skip(pool))]
pub async fn update_status(pool: &PgPool, order_id: i32, status: Option<&str>) -> Result<OrderDetail> {
  let status = status
    .and_then(OrderStatus::parse)
    .ok_or_else(|| AppError::Validation("Valid status is required".to_string()))?;

  let exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM orders WHERE id = $1")
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
  if exists.is_none() {
    warn!("Order with ID {} not found for status update.", order_id);
    return Err(AppError::NotFound("Order not found".to_string()));
  }

  let order: Order = sqlx::query_as(&format!(
    "UPDATE orders SET status = $1, updated_at = now() WHERE id = $2 RETURNING {ORDER_COLUMNS}"
  ))
  .bind(status)
  .bind(order_id)
  .fetch_one(pool)
  .await?;

  info!(order_id, status = %status, "Order status updated.");
  hydrate_order(pool, order).await
}

async fn hydrate_order(pool: &PgPool, order: Order) -> Result<OrderDetail> {
  let mut items_by_order = load_items(pool, &[order.id]).await?;
  let order_items = items_by_order.remove(&order.id).unwrap_or_default();
  Ok(OrderDetail { order, order_items })
}

/// Flat row shape for the item-with-product join; split back into the nested
/// response structs below.
#[derive(FromRow)]
struct ItemRow {
  id: i32,
  order_id: i32,
  product_id: i32,
  quantity: i32,
  product_name: String,
  product_description: Option<String>,
  product_price_cents: i32,
  product_category: String,
  product_image_url: Option<String>,
  product_stock_quantity: Option<i32>,
  product_created_at: DateTime<Utc>,
  product_updated_at: DateTime<Utc>,
}

async fn load_items(pool: &PgPool, order_ids: &[i32]) -> Result<HashMap<i32, Vec<OrderItemDetail>>> {
  let rows: Vec<ItemRow> = sqlx::query_as(
    "SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, \
            p.name AS product_name, p.description AS product_description, \
            p.price_cents AS product_price_cents, p.category AS product_category, \
            p.image_url AS product_image_url, p.stock_quantity AS product_stock_quantity, \
            p.created_at AS product_created_at, p.updated_at AS product_updated_at \
     FROM order_items oi \
     JOIN products p ON p.id = oi.product_id \
     WHERE oi.order_id = ANY($1) \
     ORDER BY oi.id ASC",
  )
  .bind(order_ids)
  .fetch_all(pool)
  .await?;

  let mut grouped: HashMap<i32, Vec<OrderItemDetail>> = HashMap::new();
  for row in rows {
    let detail = OrderItemDetail {
      item: OrderItem {
        id: row.id,
        order_id: row.order_id,
        product_id: row.product_id,
        quantity: row.quantity,
      },
      product: Product {
        id: row.product_id,
        name: row.product_name,
        description: row.product_description,
        price_cents: row.product_price_cents,
        category: row.product_category,
        image_url: row.product_image_url,
        stock_quantity: row.product_stock_quantity,
        created_at: row.product_created_at,
        updated_at: row.product_updated_at,
      },
    };
    grouped.entry(row.order_id).or_default().push(detail);
  }
  Ok(grouped)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn draft(value: serde_json::Value) -> OrderDraft {
    serde_json::from_value(value).unwrap()
  }

  fn complete_draft() -> serde_json::Value {
    json!({
      "customerName": "Asha Verma",
      "contactNumber": "9876543210",
      "address": "14 Market Road, Pune",
      "items": [
        { "productId": 1, "quantity": 3 },
        { "productId": 2, "quantity": 1 }
      ]
    })
  }

  #[test]
  fn a_complete_draft_defaults_to_pending() {
    let status = validate_draft(&draft(complete_draft())).unwrap();
    assert_eq!(status, OrderStatus::Pending);
  }

  #[test]
  fn an_explicit_valid_status_is_honored() {
    let mut body = complete_draft();
    body["status"] = json!("In Progress");
    let status = validate_draft(&draft(body)).unwrap();
    assert_eq!(status, OrderStatus::InProgress);
  }

  #[test]
  fn an_unrecognized_status_is_rejected() {
    let mut body = complete_draft();
    body["status"] = json!("Shipped");
    let err = validate_draft(&draft(body)).unwrap_err();
    assert!(matches!(err, AppError::Validation(m) if m == "Invalid order status"));
  }

  #[test]
  fn missing_or_blank_contact_fields_are_rejected() {
    for field in ["customerName", "contactNumber", "address"] {
      let mut body = complete_draft();
      body.as_object_mut().unwrap().remove(field);
      assert!(validate_draft(&draft(body)).is_err());

      let mut body = complete_draft();
      body[field] = json!("   ");
      assert!(validate_draft(&draft(body)).is_err());
    }
  }

  #[test]
  fn validation_does_not_normalize_the_submitted_values() {
    let mut body = complete_draft();
    body["customerName"] = json!("  Asha Verma ");
    let draft = draft(body);
    assert!(validate_draft(&draft).is_ok());
    // Trimming applies to the presence check only; the draft keeps what the
    // customer typed, and that is what gets stored.
    assert_eq!(draft.customer_name.as_deref(), Some("  Asha Verma "));
  }

  #[test]
  fn contact_number_only_needs_presence_not_a_digit_pattern() {
    // The 10-15 digit check is a client-side convenience; the server accepts
    // any non-empty contact string.
    let mut body = complete_draft();
    body["contactNumber"] = json!("call the shop");
    assert!(validate_draft(&draft(body)).is_ok());
  }

  #[test]
  fn an_empty_item_list_is_rejected_before_any_lookup() {
    let mut body = complete_draft();
    body["items"] = json!([]);
    let err = validate_draft(&draft(body)).unwrap_err();
    assert!(matches!(err, AppError::Validation(m) if m == "Order must contain at least one item"));

    // A missing items field deserializes to the same empty list.
    let mut body = complete_draft();
    body.as_object_mut().unwrap().remove("items");
    assert!(validate_draft(&draft(body)).is_err());
  }

  #[test]
  fn non_positive_quantities_are_rejected() {
    for quantity in [0, -2] {
      let mut body = complete_draft();
      body["items"][1]["quantity"] = json!(quantity);
      let err = validate_draft(&draft(body)).unwrap_err();
      assert!(matches!(err, AppError::Validation(_)));
    }
  }

  #[test]
  fn drafts_deserialize_from_camel_case_bodies() {
    let draft = draft(complete_draft());
    assert_eq!(draft.customer_name.as_deref(), Some("Asha Verma"));
    assert_eq!(draft.items.len(), 2);
    assert_eq!(draft.items[0].product_id, 1);
    assert_eq!(draft.items[0].quantity, 3);
  }
}
