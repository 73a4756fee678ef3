//! Customer records.

use serde::{Deserialize, Serialize};

use super::{CustomerId, Timestamp};

/// A customer as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Server-assigned identifier.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Contact email. Not validated client-side.
    pub email: String,
    /// Creation time.
    pub created_at: Timestamp,
}

/// Body of a customer create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
}

impl CustomerInput {
    /// Create a new customer payload.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
