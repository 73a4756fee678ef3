//! Order records and listing parameters.

use serde::{Deserialize, Serialize};

use super::{CustomerId, OrderId, Price, Timestamp};

/// Default page of the "all orders" listing.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size of the "all orders" listing.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Server-assigned identifier.
    pub id: OrderId,
    /// Owning customer. May reference a customer the client has not loaded.
    pub customer_id: CustomerId,
    pub product_name: String,
    pub price: Price,
    /// Creation time.
    pub created_at: Timestamp,
}

/// Body of an order create request.
///
/// `price` is `None` when the form value was not numeric; it is sent as
/// `null` so the backend reports the problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub product_name: String,
    pub price: Option<Price>,
}

/// Page selection for the paged order listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl PageRequest {
    /// First page with the given size.
    #[must_use]
    pub const fn first(limit: u32) -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}
