//! Business services backing the HTTP handlers: the product catalog and the
//! order placement/tracking flow.

pub mod catalog;
pub mod orders;
