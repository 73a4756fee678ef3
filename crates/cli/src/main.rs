//! CRM console - terminal client for the customer/order backend.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password is prompted when omitted)
//! crm login -u alice
//!
//! # List, add, edit and delete customers
//! crm customers list
//! crm customers add --name "Ada Lovelace" --email ada@example.com
//! crm customers edit 42 --email ada@lovelace.dev
//! crm customers delete 42 --yes
//!
//! # Orders, optionally filtered by customer
//! crm orders list --customer 42
//! crm orders add --customer 42 --product Widget --price 9.99
//!
//! # Interactive session over a view
//! crm shell orders
//! ```
//!
//! # Environment Variables
//!
//! - `CRM_API_BASE_URL`, `CRM_CREDENTIALS_PATH`, `CRM_HOME`, `CRM_PAGE_SIZE` - see `crm_client::config`
//! - `CRM_PASSWORD` - Password for `login`/`register` when `-p` is omitted
//! - `CRM_LOG_FORMAT` - `json` for structured logs (default: text)
//! - `RUST_LOG` - Log filter (default: `crm_client=info,crm_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use crm_core::{CustomerId, OrderId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod terminal;

use error::CliError;

#[derive(Parser)]
#[command(name = "crm")]
#[command(author, version, about = "CRM console for customers and orders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the access token
    Login(AccountArgs),
    /// Create an account and store its access token
    Register(AccountArgs),
    /// Forget the stored access token
    Logout,
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: CustomerCommand,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderCommand,
    },
    /// Interactive session over a view
    Shell {
        #[arg(value_enum)]
        view: View,
    },
}

#[derive(clap::Args)]
struct AccountArgs {
    /// Account username
    #[arg(short, long)]
    username: String,

    /// Account password (prompted when omitted)
    #[arg(short, long, env = "CRM_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum CustomerCommand {
    /// List all customers
    List,
    /// Create a customer
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
    },
    /// Update a customer; omitted fields keep their value
    Edit {
        id: CustomerId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Delete a customer
    Delete {
        id: CustomerId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum OrderCommand {
    /// List orders: one page of all orders, or every order of a customer
    List {
        #[arg(short, long)]
        customer: Option<CustomerId>,
    },
    /// Create an order
    Add {
        #[arg(short, long)]
        customer: CustomerId,
        #[arg(short, long)]
        product: String,
        /// Decimal price, e.g. 9.99
        #[arg(long)]
        price: String,
    },
    /// Delete an order
    Delete {
        id: OrderId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    Customers,
    Orders,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries rendered views only.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crm_client=info,crm_cli=info".into());

    let json = std::env::var("CRM_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let context = commands::Context::from_env()?;

    match cli.command {
        Commands::Login(args) => commands::auth::login(&context, args.username, args.password).await?,
        Commands::Register(args) => {
            commands::auth::register(&context, args.username, args.password).await?;
        }
        Commands::Logout => commands::auth::logout(&context),
        Commands::Customers { action } => match action {
            CustomerCommand::List => commands::customers::list(&context).await?,
            CustomerCommand::Add { name, email } => {
                commands::customers::add(&context, name, email).await?;
            }
            CustomerCommand::Edit { id, name, email } => {
                commands::customers::edit(&context, &id, name, email).await?;
            }
            CustomerCommand::Delete { id, yes } => {
                commands::customers::delete(&context, &id, yes).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrderCommand::List { customer } => commands::orders::list(&context, customer).await?,
            OrderCommand::Add {
                customer,
                product,
                price,
            } => commands::orders::add(&context, customer, product, price).await?,
            OrderCommand::Delete { id, yes } => {
                commands::orders::delete(&context, &id, yes).await?;
            }
        },
        Commands::Shell { view } => match view {
            View::Customers => commands::session::customers(&context).await?,
            View::Orders => commands::session::orders(&context).await?,
        },
    }
    Ok(())
}
