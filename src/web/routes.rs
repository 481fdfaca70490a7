use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::web::handlers::{order_handlers, product_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Catch-all for known paths hit with an unsupported method.
async fn method_not_allowed_handler() -> HttpResponse {
  HttpResponse::MethodNotAllowed().json(json!({ "message": "Method not allowed" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .service(
          web::resource("")
            .route(web::get().to(product_handlers::list_products_handler))
            .route(web::post().to(product_handlers::create_product_handler))
            .default_service(web::route().to(method_not_allowed_handler)),
        )
        .service(
          web::resource("/{product_id}")
            .route(web::get().to(product_handlers::get_product_handler))
            .route(web::put().to(product_handlers::update_product_handler))
            .route(web::delete().to(product_handlers::delete_product_handler))
            .default_service(web::route().to(method_not_allowed_handler)),
        ),
    )
    .service(
      web::scope("/orders")
        .service(
          web::resource("")
            .route(web::get().to(order_handlers::list_orders_handler))
            .route(web::post().to(order_handlers::place_order_handler))
            .default_service(web::route().to(method_not_allowed_handler)),
        )
        .service(
          web::resource("/{order_id}")
            .route(web::get().to(order_handlers::get_order_handler))
            .route(web::put().to(order_handlers::update_order_status_handler))
            .default_service(web::route().to(method_not_allowed_handler)),
        ),
    );
}
