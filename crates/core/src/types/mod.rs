//! Core types for the CRM console.
//!
//! Records mirror the backend's JSON bodies; newtypes keep ids of different
//! entities from being mixed up.

pub mod ack;
pub mod credential;
pub mod customer;
pub mod id;
pub mod order;
pub mod price;
pub mod timestamp;

pub use ack::Ack;
pub use credential::{AccessToken, Credentials, TokenResponse};
pub use customer::{Customer, CustomerInput};
pub use id::*;
pub use order::{NewOrder, Order, PageRequest};
pub use price::Price;
pub use timestamp::Timestamp;
