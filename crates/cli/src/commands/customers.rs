//! One-shot customer commands.

use crm_client::Surface;
use crm_client::controllers::{CustomerController, check_auth};
use crm_client::views::CustomerForm;
use crm_core::CustomerId;

use super::Context;
use crate::error::{CliError, completed};
use crate::terminal::StdShell;

fn open(context: &Context, shell: &mut StdShell) -> Result<CustomerController, CliError> {
    completed(
        check_auth(context.client.credentials(), Surface::Customers, shell),
        "Authentication",
    )?;
    Ok(CustomerController::new(context.client.clone()))
}

/// Print the customer table.
pub async fn list(context: &Context) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    let mut controller = open(context, &mut shell)?;
    completed(controller.load(&mut shell).await, "Loading customers")
}

/// Create a customer and print the reloaded table.
pub async fn add(context: &Context, name: String, email: String) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    let mut controller = open(context, &mut shell)?;
    let form = CustomerForm {
        id: None,
        name,
        email,
    };
    completed(controller.submit(form, &mut shell).await, "Creating customer")
}

/// Update the given fields of a customer.
pub async fn edit(
    context: &Context,
    id: &CustomerId,
    name: Option<String>,
    email: Option<String>,
) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    let mut controller = open(context, &mut shell)?;

    // Unchanged fields come from the current record
    completed(controller.open_edit(id, &mut shell).await, "Loading customer")?;
    let mut form = controller.modal().form().clone();
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(email) = email {
        form.email = email;
    }
    completed(controller.submit(form, &mut shell).await, "Updating customer")
}

/// Delete a customer, asking first unless `yes`.
pub async fn delete(context: &Context, id: &CustomerId, yes: bool) -> Result<(), CliError> {
    let mut shell = StdShell::stdio().assume_yes(yes);
    let mut controller = open(context, &mut shell)?;
    completed(controller.delete(id, &mut shell).await, "Deleting customer")
}
