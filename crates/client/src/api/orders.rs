//! Order endpoints.

use crm_core::{Ack, CustomerId, NewOrder, Order, OrderId, PageRequest};
use tracing::instrument;

use super::{ApiClient, Auth, Outcome};

/// Which orders a listing covers.
///
/// Filtering happens server-side: each scope maps to its own endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderScope {
    /// One page of all orders (`GET /orders?page&limit`).
    All(PageRequest),
    /// Every order of one customer, unpaged (`GET /orders/{customerId}`).
    Customer(CustomerId),
}

impl ApiClient {
    /// List one page of all orders.
    #[instrument(skip(self), fields(page = page.page, limit = page.limit))]
    pub async fn list_orders(&self, page: PageRequest) -> Outcome<Vec<Order>> {
        let mut url = match self.endpoint(&["orders"]) {
            Ok(url) => url,
            Err(e) => return Outcome::Err(e),
        };
        url.query_pairs_mut()
            .append_pair("page", &page.page.to_string())
            .append_pair("limit", &page.limit.to_string());
        self.get(url).await
    }

    /// List every order belonging to one customer.
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn list_orders_by_customer(&self, customer_id: &CustomerId) -> Outcome<Vec<Order>> {
        match self.endpoint(&["orders", customer_id.as_str()]) {
            Ok(url) => self.get(url).await,
            Err(e) => Outcome::Err(e),
        }
    }

    /// List orders for a scope.
    pub async fn list_orders_in(&self, scope: &OrderScope) -> Outcome<Vec<Order>> {
        match scope {
            OrderScope::All(page) => self.list_orders(*page).await,
            OrderScope::Customer(customer_id) => self.list_orders_by_customer(customer_id).await,
        }
    }

    /// Create an order. Orders cannot be updated afterwards.
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id))]
    pub async fn create_order(&self, order: &NewOrder) -> Outcome<Order> {
        match self.endpoint(&["orders"]) {
            Ok(url) => self.post(url, order, Auth::Bearer).await,
            Err(e) => Outcome::Err(e),
        }
    }

    /// Delete an order.
    ///
    /// A 2xx answer may still report `success: false`; callers check the
    /// acknowledgement.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: &OrderId) -> Outcome<Ack> {
        match self.endpoint(&["orders", id.as_str()]) {
            Ok(url) => self.delete(url).await,
            Err(e) => Outcome::Err(e),
        }
    }
}
