use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::services::catalog::{self, ProductInput};
use crate::state::AppState;
use crate::web::auth::AdminUser;

fn parse_product_id(raw: &str) -> Result<i32, AppError> {
  raw
    .parse::<i32>()
    .map_err(|_| AppError::Validation("Invalid product ID".to_string()))
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = catalog::list_products(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_product_id(&path.into_inner())?;
  let product = catalog::get_product(&app_state.db_pool, product_id).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::create_product", skip(app_state, payload, _admin))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<ProductInput>,
  _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let product = catalog::create_product(&app_state.db_pool, payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload, _admin), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<ProductInput>,
  _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_product_id(&path.into_inner())?;
  let product = catalog::update_product(&app_state.db_pool, product_id, payload.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::delete_product", skip(app_state, path, _admin), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_product_id(&path.into_inner())?;
  catalog::delete_product(&app_state.db_pool, product_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted successfully" })))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn product_ids_must_be_numeric() {
    assert_eq!(parse_product_id("42").unwrap(), 42);
    assert!(matches!(
      parse_product_id("carrots"),
      Err(AppError::Validation(_))
    ));
  }
}
