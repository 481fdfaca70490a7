use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::errors::AppError;
use crate::services::orders::{self, OrderDraft};
use crate::state::AppState;
use crate::web::auth::AdminUser;

fn parse_order_id(raw: &str) -> Result<i32, AppError> {
  raw
    .parse::<i32>()
    .map_err(|_| AppError::Validation("Invalid order ID".to_string()))
}

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = orders::list_orders(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::place_order", skip(app_state, payload))]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<OrderDraft>,
) -> Result<HttpResponse, AppError> {
  let order = orders::place_order(&app_state.db_pool, payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(order))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let order_id = parse_order_id(&path.into_inner())?;
  let order = orders::get_order(&app_state.db_pool, order_id).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
  pub status: Option<String>,
}

#[instrument(name = "handler::update_order_status", skip(app_state, path, payload, _admin), fields(order_id = %path.as_ref()))]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<UpdateStatusPayload>,
  _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let order_id = parse_order_id(&path.into_inner())?;
  let order =
    orders::update_status(&app_state.db_pool, order_id, payload.status.as_deref()).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_ids_must_be_numeric() {
    assert_eq!(parse_order_id("7").unwrap(), 7);
    assert!(matches!(parse_order_id("abc"), Err(AppError::Validation(_))));
  }

  #[test]
  fn status_payload_tolerates_a_missing_field() {
    let payload: UpdateStatusPayload = serde_json::from_str("{}").unwrap();
    assert!(payload.status.is_none());

    let payload: UpdateStatusPayload = serde_json::from_str(r#"{"status":"Delivered"}"#).unwrap();
    assert_eq!(payload.status.as_deref(), Some("Delivered"));
  }
}
