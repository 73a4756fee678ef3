//! One-shot order commands.

use crm_client::Surface;
use crm_client::controllers::{OrderController, check_auth};
use crm_client::views::OrderForm;
use crm_core::{CustomerId, OrderId};

use super::Context;
use crate::error::{CliError, completed};
use crate::terminal::StdShell;

async fn open(
    context: &Context,
    filter: Option<CustomerId>,
    shell: &mut StdShell,
) -> Result<OrderController, CliError> {
    completed(
        check_auth(context.client.credentials(), Surface::Orders, shell),
        "Authentication",
    )?;
    let mut controller = OrderController::new(context.client.clone()).with_filter(filter);
    completed(controller.load_customers(shell).await, "Loading customers")?;
    Ok(controller)
}

/// Print one page of all orders, or every order of `customer`.
pub async fn list(context: &Context, customer: Option<CustomerId>) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    let mut controller = open(context, customer, &mut shell).await?;
    completed(controller.load_orders(&mut shell).await, "Loading orders")
}

/// Create an order and print the customer's orders.
pub async fn add(
    context: &Context,
    customer: CustomerId,
    product: String,
    price: String,
) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    let mut controller = open(context, Some(customer.clone()), &mut shell).await?;
    let form = OrderForm {
        customer_id: Some(customer),
        product_name: product,
        price,
    };
    completed(controller.submit(form, &mut shell).await, "Creating order")
}

/// Delete an order, asking first unless `yes`.
pub async fn delete(context: &Context, id: &OrderId, yes: bool) -> Result<(), CliError> {
    let mut shell = StdShell::stdio().assume_yes(yes);
    let mut controller = open(context, None, &mut shell).await?;
    completed(controller.delete(id, &mut shell).await, "Deleting order")
}
