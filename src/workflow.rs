//! Order fulfillment workflow: the fixed status sequence and its neighbor
//! lookups.
//!
//! The workflow is a strict linear progression, `Pending` -> `In Progress` ->
//! `Delivered`, held as an ordered array so "next" and "previous" are plain
//! index arithmetic. Callers validate incoming labels with [`is_valid_status`]
//! before any write; the workflow itself performs no authorization and does
//! not require that an update move exactly one step (an admin may set
//! `Delivered` on a `Pending` order).

use serde::{Deserialize, Serialize};
use sqlx::Type as SqlxType;
use std::fmt;

/// The full status sequence, in fulfillment order.
pub const ORDER_STATUSES: [OrderStatus; 3] =
  [OrderStatus::Pending, OrderStatus::InProgress, OrderStatus::Delivered];

/// An order's position in the fulfillment sequence.
///
/// Stored in Postgres as the `order_status` enum type and serialized on the
/// wire with the display labels (`"In Progress"`, not `"InProgress"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
  Pending,
  #[serde(rename = "In Progress")]
  #[sqlx(rename = "In Progress")]
  InProgress,
  Delivered,
}

impl OrderStatus {
  /// The canonical label, as stored and served.
  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "Pending",
      OrderStatus::InProgress => "In Progress",
      OrderStatus::Delivered => "Delivered",
    }
  }

  /// Parses a label with exact, case-sensitive matching. `None` for anything
  /// outside the three known labels.
  pub fn parse(candidate: &str) -> Option<OrderStatus> {
    ORDER_STATUSES.iter().copied().find(|s| s.as_str() == candidate)
  }

  fn index(self) -> usize {
    match self {
      OrderStatus::Pending => 0,
      OrderStatus::InProgress => 1,
      OrderStatus::Delivered => 2,
    }
  }

  /// The status immediately after this one, or `None` at the end of the
  /// sequence.
  pub fn next(self) -> Option<OrderStatus> {
    ORDER_STATUSES.get(self.index() + 1).copied()
  }

  /// The status immediately before this one, or `None` at the start of the
  /// sequence.
  pub fn prev(self) -> Option<OrderStatus> {
    let idx = self.index().checked_sub(1)?;
    Some(ORDER_STATUSES[idx])
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// True iff `candidate` is exactly one of the three recognized labels.
pub fn is_valid_status(candidate: &str) -> bool {
  OrderStatus::parse(candidate).is_some()
}

/// The label following `current` in the sequence.
///
/// Returns `None` both for the terminal `Delivered` and for an unrecognized
/// label; callers that need to distinguish the two should check
/// [`is_valid_status`] first.
pub fn next_status(current: &str) -> Option<&'static str> {
  OrderStatus::parse(current)?.next().map(OrderStatus::as_str)
}

/// The label preceding `current` in the sequence, `None` for `Pending` or an
/// unrecognized label.
pub fn prev_status(current: &str) -> Option<&'static str> {
  OrderStatus::parse(current)?.prev().map(OrderStatus::as_str)
}
