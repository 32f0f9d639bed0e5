//! Read-only views of the budget.

use crate::budget::Breakdown;
use crate::commands::navigate::Header;
use crate::commands::{open_store, Out};
use crate::model::{Amount, Transaction};
use crate::{date, Config, Result};
use chrono::Datelike;

/// The header line: selected date, active form and what is left for today.
pub async fn show(config: Config) -> Result<Out<Header>> {
    let store = open_store(&config).await?;
    let header = Header::of(&store);
    Ok(Out::new(header.line(), header))
}

/// What is left for today, with the figures it was computed from.
pub async fn today(config: Config) -> Result<Out<Breakdown>> {
    let store = open_store(&config).await?;
    let b = store.breakdown();
    let message = format!(
        "Left for {}: {}\n  daily allowance:   {}\n  accrued ({} days): {}\n  spent so far:      {}",
        date::format(store.date()),
        Amount::new(b.remaining),
        Amount::new(b.daily_allowance),
        store.date().day(),
        Amount::new(b.accrued_allowance),
        Amount::new(b.spent_so_far),
    );
    Ok(Out::new(message, b))
}

/// The transactions of the selected month as a table.
pub async fn list(config: Config) -> Result<Out<Vec<Transaction>>> {
    let store = open_store(&config).await?;
    let month: Vec<Transaction> = store.month_transactions().into_iter().cloned().collect();
    let title = store.date().format("%B %Y").to_string();
    if month.is_empty() {
        return Ok(Out::new(format!("No transactions in {title}"), month));
    }
    Ok(Out::new(format!("{title}\n{}", table(&month)), month))
}

fn table(transactions: &[Transaction]) -> String {
    let rows: Vec<(String, String, &str)> = transactions
        .iter()
        .map(|t| (date::format(t.date()), t.sum().to_string(), t.category()))
        .collect();
    let width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(day, sum, category)| format!("{day}  {sum:>width$}  {category}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
