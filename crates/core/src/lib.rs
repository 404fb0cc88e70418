//! Gearhouse Core - Shared types library.
//!
//! This crate provides the types shared across Gearhouse components:
//! - `storefront` - Public-facing catalog and cart site
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Record identifiers and price handling
//! - [`cart`] - The in-memory shopping cart state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
