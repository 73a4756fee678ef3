//! Interactive view sessions.
//!
//! Each input line is resolved against the view's binding table and
//! dispatched to its controller. Opening a form prompts for its fields and
//! submits; a failed submit keeps the entered values and offers a retry.

use std::io::{BufRead, Write};

use crm_client::controllers::{
    Binding, CUSTOMER_BINDINGS, CustomerAction, CustomerController, ORDER_BINDINGS, OrderAction,
    OrderController, check_auth, resolve,
};
use crm_client::{Shell, Surface};

use super::Context;
use crate::error::{CliError, completed};
use crate::terminal::{StdShell, TerminalShell};

const RETRY_PROMPT: &str = "Edit and submit again?";

/// What the session loop should do after a line.
enum Step<A> {
    Run(A),
    Help,
    Quit,
    Skip,
}

fn next_step<A, R, O, E>(
    bindings: &[Binding<A>],
    prompt: &str,
    shell: &mut TerminalShell<R, O, E>,
) -> Result<Step<A>, CliError>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let Some(line) = shell.read_line(prompt)? else {
        return Ok(Step::Quit);
    };
    match line.trim() {
        "quit" | "exit" => return Ok(Step::Quit),
        "help" | "?" => return Ok(Step::Help),
        _ => {}
    }
    match resolve(bindings, &line) {
        Ok(Some(action)) => Ok(Step::Run(action)),
        Ok(None) => Ok(Step::Skip),
        Err(e) => {
            shell.alert(&e.to_string());
            Ok(Step::Skip)
        }
    }
}

fn print_help<A, R, O, E>(bindings: &[Binding<A>], shell: &mut TerminalShell<R, O, E>)
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let width = bindings.iter().map(|b| b.usage.len()).max().unwrap_or(0).max(4);
    for binding in bindings {
        shell.note(&format!("  {:<width$}  {}", binding.usage, binding.summary));
    }
    shell.note(&format!("  {:<width$}  {}", "help", "Show this help"));
    shell.note(&format!("  {:<width$}  {}", "quit", "End the session"));
}

/// Run an interactive customer session.
pub async fn customers(context: &Context) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    completed(
        check_auth(context.client.credentials(), Surface::Customers, &mut shell),
        "Authentication",
    )?;

    let mut controller = CustomerController::new(context.client.clone());
    controller.load(&mut shell).await;

    loop {
        let action = match next_step(CUSTOMER_BINDINGS, "customers> ", &mut shell)? {
            Step::Run(action) => action,
            Step::Help => {
                print_help(CUSTOMER_BINDINGS, &mut shell);
                continue;
            }
            Step::Skip => continue,
            Step::Quit => break,
        };

        let opens_form = matches!(action, CustomerAction::Add | CustomerAction::Edit(_));
        controller.dispatch(action, &mut shell).await;
        if shell.last_navigation() == Some(Surface::Login) {
            break;
        }
        if opens_form {
            fill_customer_form(&mut controller, &mut shell).await?;
        }
    }
    Ok(())
}

async fn fill_customer_form(
    controller: &mut CustomerController,
    shell: &mut StdShell,
) -> Result<(), CliError> {
    while controller.modal().is_open() {
        let mut form = controller.modal().form().clone();
        let Some(name) = shell.read_field("Name", &form.name)? else {
            break;
        };
        let Some(email) = shell.read_field("Email", &form.email)? else {
            break;
        };
        form.name = name;
        form.email = email;

        if controller.submit(form, shell).await || shell.last_navigation() == Some(Surface::Login) {
            return Ok(());
        }
        if !shell.confirm(RETRY_PROMPT) {
            break;
        }
    }
    controller.close_modal();
    Ok(())
}

/// Run an interactive order session.
pub async fn orders(context: &Context) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    completed(
        check_auth(context.client.credentials(), Surface::Orders, &mut shell),
        "Authentication",
    )?;

    let mut controller = OrderController::new(context.client.clone());
    controller.load(&mut shell).await;

    loop {
        let action = match next_step(ORDER_BINDINGS, "orders> ", &mut shell)? {
            Step::Run(action) => action,
            Step::Help => {
                print_help(ORDER_BINDINGS, &mut shell);
                continue;
            }
            Step::Skip => continue,
            Step::Quit => break,
        };

        let opens_form = matches!(action, OrderAction::Add);
        controller.dispatch(action, &mut shell).await;
        if shell.last_navigation() == Some(Surface::Login) {
            break;
        }
        if opens_form {
            fill_order_form(&mut controller, &mut shell).await?;
        }
    }
    Ok(())
}

async fn fill_order_form(
    controller: &mut OrderController,
    shell: &mut StdShell,
) -> Result<(), CliError> {
    while controller.modal().is_open() {
        let mut form = controller.modal().form().clone();
        let current_customer = form
            .customer_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let Some(customer) = shell.read_field("Customer ID", &current_customer)? else {
            break;
        };
        let Some(product_name) = shell.read_field("Product", &form.product_name)? else {
            break;
        };
        let Some(price) = shell.read_field("Price", &form.price)? else {
            break;
        };
        form.customer_id = customer.parse().ok();
        form.product_name = product_name;
        form.price = price;

        if controller.submit(form, shell).await || shell.last_navigation() == Some(Surface::Login) {
            return Ok(());
        }
        if !shell.confirm(RETRY_PROMPT) {
            break;
        }
    }
    controller.close_modal();
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn shell(input: &str) -> TerminalShell<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>> {
        TerminalShell::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Vec::new())
    }

    #[test]
    fn test_next_step_resolves_bindings() {
        let mut shell = shell("filter 5\n\nhelp\nbogus\nquit\n");
        assert!(matches!(
            next_step(ORDER_BINDINGS, "> ", &mut shell).unwrap(),
            Step::Run(OrderAction::Filter(Some(_)))
        ));
        assert!(matches!(next_step(ORDER_BINDINGS, "> ", &mut shell).unwrap(), Step::Skip));
        assert!(matches!(next_step(ORDER_BINDINGS, "> ", &mut shell).unwrap(), Step::Help));
        assert!(matches!(next_step(ORDER_BINDINGS, "> ", &mut shell).unwrap(), Step::Skip));
        assert!(matches!(next_step(ORDER_BINDINGS, "> ", &mut shell).unwrap(), Step::Quit));
        // End of input quits too
        assert!(matches!(next_step(ORDER_BINDINGS, "> ", &mut shell).unwrap(), Step::Quit));

        let (_, _, err) = shell.into_parts();
        assert!(String::from_utf8(err).unwrap().contains("Unknown action: bogus"));
    }

    #[test]
    fn test_help_lists_every_binding() {
        let mut shell = shell("");
        print_help(CUSTOMER_BINDINGS, &mut shell);
        let (_, _, err) = shell.into_parts();
        let help = String::from_utf8(err).unwrap();
        for binding in CUSTOMER_BINDINGS {
            assert!(help.contains(binding.usage));
        }
        assert!(help.contains("quit"));
    }
}
