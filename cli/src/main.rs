//! Expense tracker CLI
//!
//! Shows the expense screen and performs one action per invocation against
//! the service at `EXPENSE_API_BASE_URL`.

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use expense_cli::{Session, UreqTransport};
use expense_core::{render::chf, ClientConfig, ExpenseApi, ExpenseClient, Outcome};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "expense", version, about = "Track and approve expenses")]
struct Cli {
    /// Service base URL; overrides EXPENSE_API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show totals and all expenses.
    List,
    /// Submit a new expense.
    Add {
        /// Expense date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: String,
        /// Amount in CHF.
        #[arg(long)]
        amount: Decimal,
    },
    /// Approve a pending expense.
    Approve { id: String },
    /// Record a reimbursement and print what is still outstanding.
    Reimburse { amount: Decimal },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match cli.base_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    tracing::debug!(base_url = %config.base_url, "configuration resolved");
    let client = ExpenseClient::from_config(&config);

    if let Some(Command::Reimburse { amount }) = cli.command {
        let api = ExpenseApi::new(client, UreqTransport::new());
        let remaining = api.reimburse(amount).context("reimbursement failed")?;
        println!("Remaining: {}", chf(remaining));
        return Ok(());
    }

    let mut session = Session::new(client, UreqTransport::new());
    if session.load() == Some(Outcome::Failed) {
        print!("{}", session.render());
        bail!("could not load expenses");
    }

    let outcome = match cli.command {
        None | Some(Command::List) | Some(Command::Reimburse { .. }) => None,
        Some(Command::Add {
            date,
            description,
            amount,
        }) => {
            let date = date.unwrap_or_else(|| session.view().draft().date);
            session.add(date, &description, amount)
        }
        Some(Command::Approve { id }) => match session.approve(&id) {
            Some(outcome) => Some(outcome),
            None => {
                print!("{}", session.render());
                bail!("expense {id} cannot be approved");
            }
        },
    };

    print!("{}", session.render());
    session.close();

    if outcome == Some(Outcome::Failed) {
        bail!("request failed");
    }
    Ok(())
}
