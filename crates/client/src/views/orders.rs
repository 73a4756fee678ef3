//! Order list and form views.

use askama::Template;
use crm_core::{Customer, CustomerId, NewOrder, Order, Price};

use super::render_or_log;
use crate::components::{DataTable, FilterOption, Modal, TableColumn, TableView};

/// Columns of the order table.
pub const ORDER_COLUMNS: &[TableColumn] = &[
    TableColumn::new("id", "ID"),
    TableColumn::new("customer", "Customer"),
    TableColumn::new("product_name", "Product"),
    TableColumn::new("price", "Price"),
    TableColumn::new("created_at", "Created"),
    TableColumn::new("actions", "Actions"),
];

/// Label of the "no filter" selector option.
pub const ALL_CUSTOMERS: &str = "All Customers";

/// Customer name shown for orders whose customer is not loaded.
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Fields of the order modal form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub customer_id: Option<CustomerId>,
    pub product_name: String,
    /// Raw price text as typed.
    pub price: String,
}

impl OrderForm {
    /// Empty form preselecting the first customer, if any.
    #[must_use]
    pub fn blank(customers: &[Customer]) -> Self {
        Self {
            customer_id: customers.first().map(|c| c.id.clone()),
            ..Self::default()
        }
    }

    /// Request body for order creation.
    ///
    /// Text that is not a number becomes a `null` price, and a missing
    /// customer an empty id; the backend rejects both.
    #[must_use]
    pub fn to_new_order(&self) -> NewOrder {
        NewOrder {
            customer_id: self.customer_id.clone().unwrap_or_else(|| CustomerId::new("")),
            product_name: self.product_name.clone(),
            price: Price::parse(&self.price),
        }
    }
}

/// Name of the customer with `id`, or [`UNKNOWN_CUSTOMER`].
#[must_use]
pub fn customer_name<'a>(customers: &'a [Customer], id: &CustomerId) -> &'a str {
    customers
        .iter()
        .find(|c| &c.id == id)
        .map_or(UNKNOWN_CUSTOMER, |c| c.name.as_str())
}

/// Filter selector: [`ALL_CUSTOMERS`] followed by one option per customer.
#[must_use]
pub fn filter_options(customers: &[Customer], active: Option<&CustomerId>) -> Vec<FilterOption> {
    std::iter::once(FilterOption::new("", ALL_CUSTOMERS).selected(active.is_none()))
        .chain(customer_options(customers, active))
        .collect()
}

/// Form customer selector: one option per customer.
#[must_use]
pub fn customer_options(customers: &[Customer], selected: Option<&CustomerId>) -> Vec<FilterOption> {
    customers
        .iter()
        .map(|c| FilterOption::new(c.id.as_str(), &c.name).selected(selected == Some(&c.id)))
        .collect()
}

/// One table row, joined with its customer's name.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: String,
    pub customer: String,
    pub product_name: String,
    pub price: String,
    pub created: String,
    pub actions: String,
}

impl OrderRow {
    #[must_use]
    pub fn new(order: &Order, customers: &[Customer]) -> Self {
        Self {
            id: order.id.to_string(),
            customer: customer_name(customers, &order.customer_id).to_string(),
            product_name: order.product_name.clone(),
            price: order.price.to_string(),
            created: order.created_at.display(),
            actions: format!("delete {}", order.id),
        }
    }
}

impl From<OrderRow> for Vec<String> {
    fn from(row: OrderRow) -> Self {
        vec![
            row.id,
            row.customer,
            row.product_name,
            row.price,
            row.created,
            row.actions,
        ]
    }
}

#[derive(Template)]
#[template(path = "orders/index.txt")]
struct OrderListTemplate {
    filters: Vec<FilterOption>,
    table: TableView,
    empty: bool,
}

#[derive(Template)]
#[template(path = "orders/form.txt")]
struct OrderFormTemplate<'a> {
    title: &'a str,
    customers: Vec<FilterOption>,
    product_name: &'a str,
    price: &'a str,
}

/// Render the order table with its filter selector.
#[must_use]
pub fn render_orders(
    orders: &[Order],
    customers: &[Customer],
    filter: Option<&CustomerId>,
) -> String {
    let mut table = DataTable::new(ORDER_COLUMNS);
    for order in orders {
        table.push_row(OrderRow::new(order, customers).into());
    }

    let template = OrderListTemplate {
        filters: filter_options(customers, filter),
        empty: table.is_empty(),
        table: table.layout(),
    };
    render_or_log(&template, "orders")
}

/// Render the order modal form.
#[must_use]
pub fn render_order_form(modal: &Modal<OrderForm>, customers: &[Customer]) -> String {
    let form = modal.form();
    let template = OrderFormTemplate {
        title: modal.title(),
        customers: customer_options(customers, form.customer_id.as_ref()),
        product_name: &form.product_name,
        price: &form.price,
    };
    render_or_log(&template, "order_form")
}
