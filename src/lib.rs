//! daybudget: a personal daily budget.
//!
//! Income and expense transactions are recorded against a selected date. The month's income is
//! spread evenly across its days, and [`budget::remaining_today`] says how much of the allowance
//! accrued so far is still unspent.

pub mod args;
mod backup;
pub mod budget;
pub mod commands;
mod config;
pub mod date;
pub mod entry;
mod error;
pub mod model;
pub mod persist;
pub mod store;
mod utils;


pub use backup::Backup;
pub use config::Config;
pub use error::{Error, ErrorType, Result};
