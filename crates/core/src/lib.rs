//! CRM Console Core - Shared record types.
//!
//! This crate provides the types exchanged with the customer/order backend:
//! - `client` - API client, credential store and view controllers
//! - `cli` - Terminal console driving the controllers
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, records, request payloads, prices and tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
