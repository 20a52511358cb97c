//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod api;
pub mod catalog;
pub mod id;
pub mod line;
pub mod order;
pub mod price;

pub use api::{CartResponse, ErrorBody, HealthStatus, MessageResponse, OrderRequest, OrderResponse};
pub use catalog::CatalogItem;
pub use id::*;
pub use line::{CartLine, ProductInfo};
pub use order::{DeepLink, ORDER_GREETING, OrderSummary, build_order_message};
pub use price::{Price, format_amount, parse_amount};
