use clap::Parser;
use daybudget::args::{Args, Command};
use daybudget::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Show => commands::show(Config::load(home).await?).await?.print(),

        Command::Today => commands::today_breakdown(Config::load(home).await?)
            .await?
            .print(),

        Command::Next => commands::next_day(Config::load(home).await?)
            .await?
            .print(),

        Command::Prev => commands::previous_day(Config::load(home).await?)
            .await?
            .print(),

        Command::Shift(shift_args) => {
            let config = Config::load(home).await?;
            commands::shift(config, shift_args.days()).await?.print()
        }

        Command::Tab(tab_args) => {
            let config = Config::load(home).await?;
            commands::tab(config, tab_args.tab()).await?.print()
        }

        Command::Expense(entry_args) => {
            let config = Config::load(home).await?;
            commands::expense(config, entry_args.clone()).await?.print()
        }

        Command::Income(entry_args) => {
            let config = Config::load(home).await?;
            commands::income(config, entry_args.clone()).await?.print()
        }

        Command::Add(entry_args) => {
            let config = Config::load(home).await?;
            commands::add(config, entry_args.clone()).await?.print()
        }

        Command::List => commands::list(Config::load(home).await?).await?.print(),

        Command::Schema => commands::schema().await?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
