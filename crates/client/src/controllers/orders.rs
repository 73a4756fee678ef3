//! Order list controller.

use crm_core::{Customer, CustomerId, Order, OrderId};
use tracing::instrument;

use super::{Binding, BindingError, no_argument, required_id, settle};
use crate::api::{ApiClient, OrderScope, Outcome};
use crate::components::Modal;
use crate::shell::{Shell, Surface};
use crate::views::{OrderForm, render_order_form, render_orders};

pub const ADD_TITLE: &str = "Add Order";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this order?";
pub const DELETE_REJECTED: &str = "Failed to delete order";
pub const DELETE_ERROR_PREFIX: &str = "Error deleting order: ";

/// A user action on the order surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Add,
    Delete(OrderId),
    /// Show one customer's orders, or all of them for `None`.
    Filter(Option<CustomerId>),
    Close,
    Reload,
}

/// Action bindings of the order surface.
pub const ORDER_BINDINGS: &[Binding<OrderAction>] = &[
    Binding {
        name: "add",
        usage: "add",
        summary: "Open an empty order form",
        build: add_action,
    },
    Binding {
        name: "delete",
        usage: "delete <id>",
        summary: "Delete an order after confirmation",
        build: delete_action,
    },
    Binding {
        name: "filter",
        usage: "filter [<customer id>]",
        summary: "Show one customer's orders, or all without an id",
        build: filter_action,
    },
    Binding {
        name: "close",
        usage: "close",
        summary: "Close the form without saving",
        build: close_action,
    },
    Binding {
        name: "reload",
        usage: "reload",
        summary: "Reload customers and orders",
        build: reload_action,
    },
];

fn add_action(usage: &'static str, arg: Option<&str>) -> Result<OrderAction, BindingError> {
    no_argument(usage, arg).map(|()| OrderAction::Add)
}

fn delete_action(usage: &'static str, arg: Option<&str>) -> Result<OrderAction, BindingError> {
    required_id(usage, arg).map(OrderAction::Delete)
}

fn filter_action(usage: &'static str, arg: Option<&str>) -> Result<OrderAction, BindingError> {
    match arg {
        None => Ok(OrderAction::Filter(None)),
        Some(_) => required_id(usage, arg).map(|id| OrderAction::Filter(Some(id))),
    }
}

fn close_action(usage: &'static str, arg: Option<&str>) -> Result<OrderAction, BindingError> {
    no_argument(usage, arg).map(|()| OrderAction::Close)
}

fn reload_action(usage: &'static str, arg: Option<&str>) -> Result<OrderAction, BindingError> {
    no_argument(usage, arg).map(|()| OrderAction::Reload)
}

/// Owns the customer set, the order list, the active filter and the order
/// modal form.
#[derive(Debug)]
pub struct OrderController {
    client: ApiClient,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    filter: Option<CustomerId>,
    modal: Modal<OrderForm>,
}

impl OrderController {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            customers: Vec::new(),
            orders: Vec::new(),
            filter: None,
            modal: Modal::default(),
        }
    }

    /// Start with a customer filter applied.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<CustomerId>) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Customer whose orders are shown, `None` for all.
    #[must_use]
    pub const fn filter(&self) -> Option<&CustomerId> {
        self.filter.as_ref()
    }

    #[must_use]
    pub const fn modal(&self) -> &Modal<OrderForm> {
        &self.modal
    }

    /// Listing the active filter maps to.
    #[must_use]
    pub fn scope(&self) -> OrderScope {
        match &self.filter {
            Some(customer_id) => OrderScope::Customer(customer_id.clone()),
            None => OrderScope::All(self.client.default_page()),
        }
    }

    /// Load customers, then orders under the active filter.
    ///
    /// Stops with an alert when customers cannot be loaded. The selectors
    /// are derived from the customer set, so they are current as soon as
    /// customers load even if the order listing then fails.
    #[instrument(skip(self, shell))]
    pub async fn load(&mut self, shell: &mut dyn Shell) -> bool {
        self.load_customers(shell).await && self.load_orders(shell).await
    }

    /// Refresh the customer set used for name joins and selectors.
    pub async fn load_customers(&mut self, shell: &mut dyn Shell) -> bool {
        let Some(customers) = settle(self.client.list_customers().await, shell) else {
            return false;
        };
        tracing::debug!(count = customers.len(), "Loaded customers");
        self.customers = customers;
        true
    }

    /// Reload orders under the active filter, keeping the customer set.
    #[instrument(skip(self, shell), fields(filter = ?self.filter))]
    pub async fn load_orders(&mut self, shell: &mut dyn Shell) -> bool {
        let scope = self.scope();
        let Some(orders) = settle(self.client.list_orders_in(&scope).await, shell) else {
            return false;
        };
        tracing::debug!(count = orders.len(), "Loaded orders");
        self.orders = orders;
        shell.present(Surface::Orders, &self.render());
        true
    }

    /// Switch the filter and reload orders.
    pub async fn set_filter(&mut self, customer_id: Option<CustomerId>, shell: &mut dyn Shell) -> bool {
        self.filter = customer_id;
        self.load_orders(shell).await
    }

    /// Render the order table and filter from in-memory state.
    #[must_use]
    pub fn render(&self) -> String {
        render_orders(&self.orders, &self.customers, self.filter.as_ref())
    }

    /// Open the modal with an empty form.
    pub fn open_add(&mut self, shell: &mut dyn Shell) {
        self.modal.open_with(ADD_TITLE, OrderForm::blank(&self.customers));
        shell.present(
            Surface::Orders,
            &render_order_form(&self.modal, &self.customers),
        );
    }

    /// Create an order from the form.
    ///
    /// On success the modal closes and orders reload under the active
    /// filter. On failure the error is alerted and the modal keeps the
    /// submitted values.
    #[instrument(skip(self, form, shell), fields(customer_id = ?form.customer_id))]
    pub async fn submit(&mut self, form: OrderForm, shell: &mut dyn Shell) -> bool {
        let order = form.to_new_order();
        let outcome = self.client.create_order(&order).await;
        *self.modal.form_mut() = form;

        let Some(created) = settle(outcome, shell) else {
            return false;
        };
        tracing::info!(order_id = %created.id, "Created order");
        self.modal.close();
        self.load_orders(shell).await
    }

    /// Delete an order after confirmation, then reload under the active
    /// filter.
    #[instrument(skip(self, shell), fields(order_id = %id))]
    pub async fn delete(&mut self, id: &OrderId, shell: &mut dyn Shell) -> bool {
        if !shell.confirm(DELETE_CONFIRM) {
            return false;
        }
        let ack = match self.client.delete_order(id).await {
            Outcome::Ok(ack) => ack,
            Outcome::Redirect(surface) => {
                shell.navigate(surface);
                return false;
            }
            Outcome::Err(e) => {
                shell.alert(&format!("{DELETE_ERROR_PREFIX}{e}"));
                return false;
            }
        };
        if !ack.success {
            shell.alert(DELETE_REJECTED);
            return false;
        }
        tracing::info!("Deleted order");
        self.load_orders(shell).await
    }

    /// Close the modal without saving.
    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Run a bound action.
    pub async fn dispatch(&mut self, action: OrderAction, shell: &mut dyn Shell) -> bool {
        match action {
            OrderAction::Add => {
                self.open_add(shell);
                true
            }
            OrderAction::Delete(id) => self.delete(&id, shell).await,
            OrderAction::Filter(customer_id) => self.set_filter(customer_id, shell).await,
            OrderAction::Close => {
                self.close_modal();
                true
            }
            OrderAction::Reload => self.load(shell).await,
        }
    }
}
