//! View controllers.
//!
//! Each controller owns the state of one surface (records, active filter,
//! modal form) and drives it through the [`ApiClient`](crate::api::ApiClient)
//! and a [`Shell`]. User actions arrive as text commands resolved through a
//! per-view [`Binding`] table, so a host binds a view exactly once and
//! re-rendering never touches the bindings.

pub mod auth;
pub mod customers;
pub mod orders;

pub use auth::{AuthController, LoginForm, check_auth};
pub use customers::{CUSTOMER_BINDINGS, CustomerAction, CustomerController};
pub use orders::{ORDER_BINDINGS, OrderAction, OrderController};

use std::str::FromStr;

use crm_core::IdError;
use thiserror::Error;

use crate::api::Outcome;
use crate::shell::Shell;

/// Unwrap an outcome, handing redirects and errors to the shell.
///
/// A redirect navigates; an error becomes a blocking alert with its
/// message. Either way the caller gets `None` and should stop.
pub(crate) fn settle<T>(outcome: Outcome<T>, shell: &mut dyn Shell) -> Option<T> {
    match outcome {
        Outcome::Ok(value) => Some(value),
        Outcome::Redirect(surface) => {
            shell.navigate(surface);
            None
        }
        Outcome::Err(err) => {
            shell.alert(&err.to_string());
            None
        }
    }
}

/// Errors resolving a command line against a binding table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("Unknown action: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid argument for {action}: {reason}")]
    InvalidArgument { action: &'static str, reason: String },
}

/// Maps an action name to a typed action.
pub struct Binding<A> {
    /// Command word, e.g. `delete`.
    pub name: &'static str,
    /// Usage line shown in help output.
    pub usage: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Build the action from the optional argument.
    pub build: fn(&'static str, Option<&str>) -> Result<A, BindingError>,
}

impl<A> std::fmt::Debug for Binding<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

/// Resolve a command line such as `edit 42` against a binding table.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns `BindingError` when the action is unknown or its argument is
/// missing or malformed.
pub fn resolve<A>(bindings: &[Binding<A>], line: &str) -> Result<Option<A>, BindingError> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let Some(name) = parts.next().filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    let argument = parts.next().map(str::trim).filter(|a| !a.is_empty());

    let binding = bindings
        .iter()
        .find(|b| b.name == name)
        .ok_or_else(|| BindingError::Unknown(name.to_string()))?;
    (binding.build)(binding.usage, argument).map(Some)
}

/// Parse a required id argument.
pub(crate) fn required_id<T>(usage: &'static str, argument: Option<&str>) -> Result<T, BindingError>
where
    T: FromStr<Err = IdError>,
{
    let raw = argument.ok_or(BindingError::MissingArgument(usage))?;
    raw.parse().map_err(|e: IdError| BindingError::InvalidArgument {
        action: usage,
        reason: e.to_string(),
    })
}

/// Reject an argument on an action that takes none.
pub(crate) fn no_argument(usage: &'static str, argument: Option<&str>) -> Result<(), BindingError> {
    match argument {
        None => Ok(()),
        Some(extra) => Err(BindingError::InvalidArgument {
            action: usage,
            reason: format!("unexpected argument '{extra}'"),
        }),
    }
}
