//! CRM console client.
//!
//! Everything between the user and the customer/order backend:
//!
//! - [`config`]: environment-driven settings
//! - [`credentials`]: the persisted bearer token
//! - [`api`]: typed REST operations resolving to an [`api::Outcome`]
//! - [`controllers`]: per-surface state and actions
//! - [`views`] and [`components`]: text rendering
//! - [`shell`]: the host seam controllers talk through

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod controllers;
pub mod credentials;
pub mod shell;
pub mod views;

pub use api::{ApiClient, ApiError, Outcome};
pub use config::{ClientConfig, ConfigError};
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreError};
pub use shell::{RecordingShell, Shell, ShellEvent, Surface};
