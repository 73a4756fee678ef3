//! Sign-in commands.

use crm_client::controllers::{AuthController, LoginForm};

use super::Context;
use crate::error::{CliError, completed};
use crate::terminal::{StdShell, TerminalShell};

/// Log in and store the token.
pub async fn login(context: &Context, username: String, password: Option<String>) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    let form = LoginForm::new(username, password_or_prompt(&mut shell, password)?);

    let mut controller = AuthController::new(context.client.clone());
    completed(controller.submit_login(form, &mut shell).await, "Login")?;
    shell.note("Signed in.");
    Ok(())
}

/// Register an account and store its token.
pub async fn register(context: &Context, username: String, password: Option<String>) -> Result<(), CliError> {
    let mut shell = StdShell::stdio();
    let form = LoginForm::new(username, password_or_prompt(&mut shell, password)?);

    let mut controller = AuthController::new(context.client.clone());
    completed(controller.submit_register(form, &mut shell).await, "Registration")?;
    shell.note("Account created and signed in.");
    Ok(())
}

/// Forget the stored token.
pub fn logout(context: &Context) {
    let mut shell = StdShell::stdio();
    AuthController::new(context.client.clone()).logout(&mut shell);
}

fn password_or_prompt<R, O, E>(
    shell: &mut TerminalShell<R, O, E>,
    password: Option<String>,
) -> Result<String, CliError>
where
    R: std::io::BufRead,
    O: std::io::Write,
    E: std::io::Write,
{
    if let Some(password) = password {
        return Ok(password);
    }
    shell
        .read_line("Password: ")?
        .filter(|p| !p.is_empty())
        .ok_or(CliError::MissingPassword)
}
