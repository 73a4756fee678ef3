//! Customer endpoints.

use crm_core::{Ack, Customer, CustomerId, CustomerInput};
use tracing::instrument;

use super::{ApiClient, Auth, Outcome};

impl ApiClient {
    /// List all customers.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Outcome<Vec<Customer>> {
        match self.endpoint(&["customers"]) {
            Ok(url) => self.get(url).await,
            Err(e) => Outcome::Err(e),
        }
    }

    /// Fetch a single customer.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: &CustomerId) -> Outcome<Customer> {
        match self.endpoint(&["customers", id.as_str()]) {
            Ok(url) => self.get(url).await,
            Err(e) => Outcome::Err(e),
        }
    }

    /// Create a customer. The backend assigns id and creation time.
    #[instrument(skip(self, input))]
    pub async fn create_customer(&self, input: &CustomerInput) -> Outcome<Customer> {
        match self.endpoint(&["customers"]) {
            Ok(url) => self.post(url, input, Auth::Bearer).await,
            Err(e) => Outcome::Err(e),
        }
    }

    /// Replace a customer's name and email.
    #[instrument(skip(self, input), fields(customer_id = %id))]
    pub async fn update_customer(&self, id: &CustomerId, input: &CustomerInput) -> Outcome<Customer> {
        match self.endpoint(&["customers", id.as_str()]) {
            Ok(url) => self.put(url, input).await,
            Err(e) => Outcome::Err(e),
        }
    }

    /// Delete a customer.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete_customer(&self, id: &CustomerId) -> Outcome<Ack> {
        match self.endpoint(&["customers", id.as_str()]) {
            Ok(url) => self.delete(url).await,
            Err(e) => Outcome::Err(e),
        }
    }
}
