//! Customer list controller.

use crm_core::{Customer, CustomerId};
use tracing::instrument;

use super::{Binding, BindingError, no_argument, required_id, settle};
use crate::api::ApiClient;
use crate::components::Modal;
use crate::shell::{Shell, Surface};
use crate::views::{CustomerForm, render_customer_form, render_customers};

pub const ADD_TITLE: &str = "Add Customer";
pub const EDIT_TITLE: &str = "Edit Customer";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this customer?";
pub const DELETE_REJECTED: &str = "Failed to delete customer";

/// A user action on the customer surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerAction {
    Add,
    Edit(CustomerId),
    Delete(CustomerId),
    Close,
    Reload,
}

/// Action bindings of the customer surface.
pub const CUSTOMER_BINDINGS: &[Binding<CustomerAction>] = &[
    Binding {
        name: "add",
        usage: "add",
        summary: "Open an empty customer form",
        build: add_action,
    },
    Binding {
        name: "edit",
        usage: "edit <id>",
        summary: "Open the form for an existing customer",
        build: edit_action,
    },
    Binding {
        name: "delete",
        usage: "delete <id>",
        summary: "Delete a customer after confirmation",
        build: delete_action,
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
        summary: "Reload the customer list",
        build: reload_action,
    },
];

fn add_action(usage: &'static str, arg: Option<&str>) -> Result<CustomerAction, BindingError> {
    no_argument(usage, arg).map(|()| CustomerAction::Add)
}

fn edit_action(usage: &'static str, arg: Option<&str>) -> Result<CustomerAction, BindingError> {
    required_id(usage, arg).map(CustomerAction::Edit)
}

fn delete_action(usage: &'static str, arg: Option<&str>) -> Result<CustomerAction, BindingError> {
    required_id(usage, arg).map(CustomerAction::Delete)
}

fn close_action(usage: &'static str, arg: Option<&str>) -> Result<CustomerAction, BindingError> {
    no_argument(usage, arg).map(|()| CustomerAction::Close)
}

fn reload_action(usage: &'static str, arg: Option<&str>) -> Result<CustomerAction, BindingError> {
    no_argument(usage, arg).map(|()| CustomerAction::Reload)
}

/// Owns the customer list and the customer modal form.
#[derive(Debug)]
pub struct CustomerController {
    client: ApiClient,
    customers: Vec<Customer>,
    modal: Modal<CustomerForm>,
}

impl CustomerController {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            customers: Vec::new(),
            modal: Modal::default(),
        }
    }

    /// Records from the last successful load.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    #[must_use]
    pub const fn modal(&self) -> &Modal<CustomerForm> {
        &self.modal
    }

    /// Fetch all customers, replace the list and present the table.
    ///
    /// On failure the previous list is kept.
    #[instrument(skip(self, shell))]
    pub async fn load(&mut self, shell: &mut dyn Shell) -> bool {
        let Some(customers) = settle(self.client.list_customers().await, shell) else {
            return false;
        };
        tracing::debug!(count = customers.len(), "Loaded customers");
        self.customers = customers;
        shell.present(Surface::Customers, &self.render());
        true
    }

    /// Render the customer table from the in-memory list.
    #[must_use]
    pub fn render(&self) -> String {
        render_customers(&self.customers)
    }

    /// Open the modal with an empty form.
    pub fn open_add(&mut self, shell: &mut dyn Shell) {
        self.modal.open_with(ADD_TITLE, CustomerForm::default());
        shell.present(Surface::Customers, &render_customer_form(&self.modal));
    }

    /// Fetch one customer and open the modal prefilled with it.
    #[instrument(skip(self, shell), fields(customer_id = %id))]
    pub async fn open_edit(&mut self, id: &CustomerId, shell: &mut dyn Shell) -> bool {
        let Some(customer) = settle(self.client.get_customer(id).await, shell) else {
            return false;
        };
        self.modal.open_with(EDIT_TITLE, CustomerForm::editing(&customer));
        shell.present(Surface::Customers, &render_customer_form(&self.modal));
        true
    }

    /// Save the form: update when it carries an id, create otherwise.
    ///
    /// On success the modal closes and the whole list reloads. On failure
    /// the error is alerted and the modal keeps the submitted values.
    #[instrument(skip(self, form, shell), fields(customer_id = ?form.id))]
    pub async fn submit(&mut self, form: CustomerForm, shell: &mut dyn Shell) -> bool {
        let input = form.input();
        let outcome = match &form.id {
            Some(id) => self.client.update_customer(id, &input).await,
            None => self.client.create_customer(&input).await,
        };
        *self.modal.form_mut() = form;

        let Some(saved) = settle(outcome, shell) else {
            return false;
        };
        tracing::info!(customer_id = %saved.id, "Saved customer");
        self.modal.close();
        self.load(shell).await
    }

    /// Delete a customer after confirmation, then reload.
    ///
    /// A declined confirmation sends nothing and leaves the list as is. The
    /// acknowledgement is checked on purpose, even though the backend only
    /// ever sends `success: true`: `success: false` alerts
    /// [`DELETE_REJECTED`] and skips the reload, the same as order deletes.
    #[instrument(skip(self, shell), fields(customer_id = %id))]
    pub async fn delete(&mut self, id: &CustomerId, shell: &mut dyn Shell) -> bool {
        if !shell.confirm(DELETE_CONFIRM) {
            return false;
        }
        let Some(ack) = settle(self.client.delete_customer(id).await, shell) else {
            return false;
        };
        if !ack.success {
            shell.alert(DELETE_REJECTED);
            return false;
        }
        tracing::info!("Deleted customer");
        self.load(shell).await
    }

    /// Close the modal without saving.
    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Run a bound action.
    pub async fn dispatch(&mut self, action: CustomerAction, shell: &mut dyn Shell) -> bool {
        match action {
            CustomerAction::Add => {
                self.open_add(shell);
                true
            }
            CustomerAction::Edit(id) => self.open_edit(&id, shell).await,
            CustomerAction::Delete(id) => self.delete(&id, shell).await,
            CustomerAction::Close => {
                self.close_modal();
                true
            }
            CustomerAction::Reload => self.load(shell).await,
        }
    }
}
