//! Customer list and form views.

use askama::Template;
use crm_core::{Customer, CustomerId, CustomerInput};

use super::render_or_log;
use crate::components::{DataTable, Modal, TableColumn, TableView};

/// Columns of the customer table.
pub const CUSTOMER_COLUMNS: &[TableColumn] = &[
    TableColumn::new("id", "ID"),
    TableColumn::new("name", "Name"),
    TableColumn::new("email", "Email"),
    TableColumn::new("created_at", "Created"),
    TableColumn::new("actions", "Actions"),
];

/// Fields of the customer modal form.
///
/// `id` is set while editing; submitting without one creates a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub id: Option<CustomerId>,
    pub name: String,
    pub email: String,
}

impl CustomerForm {
    /// Form prefilled from an existing customer.
    #[must_use]
    pub fn editing(customer: &Customer) -> Self {
        Self {
            id: Some(customer.id.clone()),
            name: customer.name.clone(),
            email: customer.email.clone(),
        }
    }

    /// Request body for create or update.
    #[must_use]
    pub fn input(&self) -> CustomerInput {
        CustomerInput::new(self.name.clone(), self.email.clone())
    }
}

/// One table row.
#[derive(Debug, Clone)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created: String,
    pub actions: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            created: customer.created_at.display(),
            actions: format!("edit {id} | delete {id}", id = customer.id),
        }
    }
}

impl From<CustomerRow> for Vec<String> {
    fn from(row: CustomerRow) -> Self {
        vec![row.id, row.name, row.email, row.created, row.actions]
    }
}

#[derive(Template)]
#[template(path = "customers/index.txt")]
struct CustomerListTemplate {
    table: TableView,
    empty: bool,
}

#[derive(Template)]
#[template(path = "customers/form.txt")]
struct CustomerFormTemplate<'a> {
    title: &'a str,
    id: Option<&'a str>,
    name: &'a str,
    email: &'a str,
}

/// Render the customer table.
#[must_use]
pub fn render_customers(customers: &[Customer]) -> String {
    let mut table = DataTable::new(CUSTOMER_COLUMNS);
    for customer in customers {
        table.push_row(CustomerRow::from(customer).into());
    }

    let template = CustomerListTemplate {
        empty: table.is_empty(),
        table: table.layout(),
    };
    render_or_log(&template, "customers")
}

/// Render the customer modal form.
#[must_use]
pub fn render_customer_form(modal: &Modal<CustomerForm>) -> String {
    let form = modal.form();
    let template = CustomerFormTemplate {
        title: modal.title(),
        id: form.id.as_ref().map(CustomerId::as_str),
        name: &form.name,
        email: &form.email,
    };
    render_or_log(&template, "customer_form")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crm_core::Timestamp;

    use super::*;

    fn customer(id: &str, name: &str, email: &str) -> Customer {
        Customer {
            id: CustomerId::new(id),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Timestamp::new("2024-03-01T09:30:00"),
        }
    }

    #[test]
    fn test_render_customers_table() {
        let rendered = render_customers(&[
            customer("1", "Ada", "ada@example.com"),
            customer("2", "Grace", "grace@example.com"),
        ]);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Customers");
        assert!(lines[1].starts_with("ID"));
        assert!(lines[1].contains("Email"));
        assert!(lines[1].ends_with("Actions"));
        assert!(lines[3].contains("ada@example.com"));
        assert!(lines[3].contains("2024-03-01 09:30:00"));
        assert!(lines[3].ends_with("edit 1 | delete 1"));
        assert!(lines[4].ends_with("edit 2 | delete 2"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let customers = [customer("1", "Ada", "ada@example.com")];
        assert_eq!(render_customers(&customers), render_customers(&customers));
    }

    #[test]
    fn test_render_empty_list() {
        let rendered = render_customers(&[]);
        assert!(rendered.contains("No customers found."));
        assert!(!rendered.contains("Actions"));
    }

    #[test]
    fn test_render_form_titles() {
        let mut modal = Modal::default();
        modal.open_with("Add Customer", CustomerForm::default());
        let rendered = render_customer_form(&modal);
        assert!(rendered.starts_with("Add Customer"));
        assert!(!rendered.contains("ID:"));

        let ada = customer("7", "Ada", "ada@example.com");
        modal.open_with("Edit Customer", CustomerForm::editing(&ada));
        let rendered = render_customer_form(&modal);
        assert!(rendered.starts_with("Edit Customer"));
        assert!(rendered.contains("ID:    7"));
        assert!(rendered.contains("Email: ada@example.com"));
    }
}
