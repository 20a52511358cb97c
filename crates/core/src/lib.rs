//! Vitrine Core - Shared types library.
//!
//! This crate provides the types shared by every Vitrine component:
//! - `widget` - Cart store, persistence strategies and view projection
//! - `server` - Cart and order HTTP service
//! - `cli` - Terminal front-end for the cart widget
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and allows it to be used
//! on both sides of the cart API.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, BRL prices, cart lines, catalog items and order messages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
