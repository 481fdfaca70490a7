//! Product catalog service: CRUD over the `products` table, including the
//! referential-integrity guard that forbids deleting a product while any
//! order line item still references it.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::Product;

const PRODUCT_COLUMNS: &str =
  "id, name, description, price_cents, category, image_url, stock_quantity, created_at, updated_at";

/// Incoming body for product create and update. Update is a full replace of
/// the mutable fields, mirroring the admin form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
  pub name: Option<String>,
  pub description: Option<String>,
  pub price_cents: Option<i32>,
  pub category: Option<String>,
  pub image_url: Option<String>,
  pub stock_quantity: Option<i32>,
}

#[derive(Debug)]
struct ValidProduct<'a> {
  name: &'a str,
  price_cents: i32,
  category: &'a str,
}

/// Name, a positive price, and a category are required; everything else is
/// optional.
fn validate_input(input: &ProductInput) -> Result<ValidProduct<'_>> {
  let required = "Name, price, and category are required";
  let name = input
    .name
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .ok_or_else(|| AppError::Validation(required.to_string()))?;
  let category = input
    .category
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .ok_or_else(|| AppError::Validation(required.to_string()))?;
  let price_cents = input
    .price_cents
    .ok_or_else(|| AppError::Validation(required.to_string()))?;
  if price_cents <= 0 {
    return Err(AppError::Validation("Price must be a positive amount".to_string()));
  }
  Ok(ValidProduct {
    name,
    price_cents,
    category,
  })
}

#[instrument(name = "catalog::list_products", skip(pool))]
pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>> {
  let products: Vec<Product> =
    sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name ASC"))
      .fetch_all(pool)
      .await?;
  info!("Fetched {} products.", products.len());
  Ok(products)
}

#[instrument(name = "catalog::get_product", skip(pool))]
pub async fn get_product(pool: &PgPool, product_id: i32) -> Result<Product> {
  let product: Option<Product> =
    sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
      .bind(product_id)
      .fetch_optional(pool)
      .await?;
  product.ok_or_else(|| {
    warn!("Product with ID {} not found.", product_id);
    AppError::NotFound("Product not found".to_string())
  })
}

#[instrument(name = "catalog::create_product", skip(pool, input))]
pub async fn create_product(pool: &PgPool, input: ProductInput) -> Result<Product> {
  let valid = validate_input(&input)?;

  let product: Product = sqlx::query_as(&format!(
    "INSERT INTO products (name, description, price_cents, category, image_url, stock_quantity) \
     VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PRODUCT_COLUMNS}"
  ))
  .bind(valid.name)
  .bind(input.description.as_deref())
  .bind(valid.price_cents)
  .bind(valid.category)
  .bind(input.image_url.as_deref())
  .bind(input.stock_quantity)
  .fetch_one(pool)
  .await?;

  info!(product_id = product.id, "Created product '{}'.", product.name);
  Ok(product)
}

#[instrument(name = "catalog::update_product", skip(pool, input))]
pub async fn update_product(pool: &PgPool, product_id: i32, input: ProductInput) -> Result<Product> {
  let valid = validate_input(&input)?;

  // Existence check first so a bad id reads as 404, not a silent no-op.
  get_product(pool, product_id).await?;

  let product: Product = sqlx::query_as(&format!(
    "UPDATE products SET name = $1, description = $2, price_cents = $3, category = $4, \
     image_url = $5, stock_quantity = $6, updated_at = now() \
     WHERE id = $7 RETURNING {PRODUCT_COLUMNS}"
  ))
  .bind(valid.name)
  .bind(input.description.as_deref())
  .bind(valid.price_cents)
  .bind(valid.category)
  .bind(input.image_url.as_deref())
  .bind(input.stock_quantity)
  .bind(product_id)
  .fetch_one(pool)
  .await?;

  info!(product_id, "Updated product '{}'.", product.name);
  Ok(product)
}

#[instrument(name = "catalog::delete_product", skip(pool))]
pub async fn delete_product(pool: &PgPool, product_id: i32) -> Result<()> {
  get_product(pool, product_id).await?;

  let (referenced,): (bool,) =
    sqlx::query_as("SELECT EXISTS(SELECT 1 FROM order_items WHERE product_id = $1)")
      .bind(product_id)
      .fetch_one(pool)
      .await?;
  if referenced {
    warn!(product_id, "Refusing to delete product referenced by order items.");
    return Err(AppError::Conflict(
      "Cannot delete product as it is associated with existing orders".to_string(),
    ));
  }

  sqlx::query("DELETE FROM products WHERE id = $1")
    .bind(product_id)
    .execute(pool)
    .await?;

  info!(product_id, "Deleted product.");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn input(value: serde_json::Value) -> ProductInput {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn accepts_a_complete_product() {
    let input = input(json!({
      "name": "Carrots",
      "description": "Fresh and crunchy carrots.",
      "priceCents": 199,
      "category": "vegetable",
      "imageUrl": "https://example.com/carrots.jpg",
      "stockQuantity": 120
    }));
    let valid = validate_input(&input).unwrap();
    assert_eq!(valid.name, "Carrots");
    assert_eq!(valid.price_cents, 199);
    assert_eq!(valid.category, "vegetable");
  }

  #[test]
  fn description_image_and_stock_are_optional() {
    let input = input(json!({ "name": "Apples", "priceCents": 219, "category": "fruit" }));
    assert!(validate_input(&input).is_ok());
  }

  #[test]
  fn rejects_missing_name_price_or_category() {
    for body in [
      json!({ "priceCents": 199, "category": "vegetable" }),
      json!({ "name": "Carrots", "category": "vegetable" }),
      json!({ "name": "Carrots", "priceCents": 199 }),
      json!({ "name": "  ", "priceCents": 199, "category": "vegetable" }),
    ] {
      let err = validate_input(&input(body)).unwrap_err();
      assert!(matches!(err, AppError::Validation(_)));
    }
  }

  #[test]
  fn rejects_non_positive_prices() {
    for price in [0, -1] {
      let err = validate_input(&input(json!({
        "name": "Carrots",
        "priceCents": price,
        "category": "vegetable"
      })))
      .unwrap_err();
      assert!(matches!(err, AppError::Validation(_)));
    }
  }
}
