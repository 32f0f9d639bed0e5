//! These structs provide the CLI interface for the daybudget CLI.

use crate::model::NavTab;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// daybudget: how much can I still spend today?
///
/// Record your income and expenses as you go. daybudget spreads the month's income evenly over
/// the days of the month and tells you how much of it is left for the selected day once every
/// expense so far has been taken out.
///
/// Transactions are recorded on the selected date, which starts as today and can be moved with
/// `next`, `prev` and `shift`.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// By default the data directory is $HOME/daybudget. Pass --home or set DAYBUDGET_HOME to put
    /// it somewhere else.
    Init,
    /// Show the selected date, the active form and how much is left for today.
    Show,
    /// Show how much is left for today along with how it was computed.
    Today,
    /// Move the selected date one day forward.
    Next,
    /// Move the selected date one day back.
    Prev,
    /// Move the selected date by any number of days.
    Shift(ShiftArgs),
    /// Switch the active entry form.
    Tab(TabArgs),
    /// Record an expense on the selected date. The amount is always stored as negative.
    Expense(EntryArgs),
    /// Record income on the selected date. The amount is always stored as positive.
    Income(EntryArgs),
    /// Record a transaction through the active entry form.
    Add(EntryArgs),
    /// List the transactions of the selected month.
    List,
    /// Print the JSON Schema of the state file.
    Schema,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where daybudget data and configuration is held. Defaults to ~/daybudget
    #[arg(long, env = "DAYBUDGET_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `daybudget shift` command.
#[derive(Debug, Parser, Clone)]
pub struct ShiftArgs {
    /// The number of days to move by. Negative values move back.
    #[arg(allow_hyphen_values = true)]
    days: i64,
}

impl ShiftArgs {
    pub fn days(&self) -> i64 {
        self.days
    }
}

/// Args for the `daybudget tab` command.
#[derive(Debug, Parser, Clone)]
pub struct TabArgs {
    /// The form to switch to.
    #[arg(value_enum)]
    tab: NavTab,
}

impl TabArgs {
    pub fn tab(&self) -> NavTab {
        self.tab
    }
}

/// Args for the `daybudget expense`, `income` and `add` commands.
#[derive(Debug, Parser, Clone)]
pub struct EntryArgs {
    /// The amount, e.g. 250 or 1,200.50. A currency sign is allowed.
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// A free-text label such as "food" or "salary".
    #[arg(long, short, default_value = "")]
    category: String,
}

impl EntryArgs {
    pub fn new(amount: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("daybudget"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or DAYBUDGET_HOME instead of relying on the default \
                daybudget home directory. If you continue using the program right now, you may \
                have problems!",
            );
            PathBuf::from("daybudget")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
