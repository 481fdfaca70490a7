//! Harvest Hub bulk produce ordering backend.
//!
//! Public product catalog, order placement and tracking, and admin-gated
//! inventory and status management over actix-web and Postgres. The order
//! fulfillment workflow lives in [`workflow`]; order placement in
//! [`services::orders`].

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;
pub mod workflow;
