//! Admin gating for mutating endpoints.
//!
//! The storefront sets a `session` cookie holding a JSON blob with the signed
//! in user's id, name, email, and role. Admin-only handlers take an
//! [`AdminUser`] extractor argument; requests without a session get 401,
//! sessions without the ADMIN role get 403. Password verification and session
//! issuance live outside this service.

use actix_web::{FromRequest, HttpRequest};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;

pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, Deserialize)]
pub struct SessionUser {
  pub id: i32,
  pub name: String,
  pub email: String,
  pub role: String,
}

/// Extractor proving the request carries an admin session.
#[derive(Debug)]
pub struct AdminUser(pub SessionUser);

/// Parses the raw `session` cookie value.
pub fn parse_session(value: &str) -> Result<SessionUser, AppError> {
  serde_json::from_str(value).map_err(|e| {
    warn!(error = %e, "Rejecting malformed session cookie.");
    AppError::Auth("Invalid session".to_string())
  })
}

fn admin_from_request(req: &HttpRequest) -> Result<AdminUser, AppError> {
  let cookie = req
    .cookie("session")
    .ok_or_else(|| AppError::Auth("Authentication required".to_string()))?;
  let user = parse_session(cookie.value())?;
  if user.role != ADMIN_ROLE {
    warn!(user_id = user.id, role = %user.role, "Non-admin session on admin endpoint.");
    return Err(AppError::Forbidden("Admin access required".to_string()));
  }
  Ok(AdminUser(user))
}

impl FromRequest for AdminUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    futures_util::future::ready(admin_from_request(req))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_an_admin_session() {
    let user = parse_session(
      r#"{"id":1,"name":"Site Admin","email":"admin@harvesthub.test","role":"ADMIN"}"#,
    )
    .unwrap();
    assert_eq!(user.role, ADMIN_ROLE);
    assert_eq!(user.id, 1);
  }

  #[test]
  fn rejects_malformed_session_values() {
    let err = parse_session("not json").unwrap_err();
    assert!(matches!(err, AppError::Auth(_)));
  }

  #[test]
  fn customer_sessions_parse_but_carry_their_role() {
    let user = parse_session(
      r#"{"id":7,"name":"Asha Verma","email":"asha@example.com","role":"CUSTOMER"}"#,
    )
    .unwrap();
    assert_ne!(user.role, ADMIN_ROLE);
  }
}
