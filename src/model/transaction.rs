use crate::model::Amount;
use crate::{date, Result};
use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

/// The transaction list, always sorted by ascending date. Transactions recorded on the same day
/// keep the order in which they were inserted.
#[derive(Default, Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Transactions {
    data: Vec<Transaction>,
}

impl Transactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `transaction` and re-sorts the whole list by date.
    pub fn insert(&mut self, transaction: Transaction) {
        self.data.push(transaction);
        self.sort();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.data
    }

    /// The transactions that fall in the same calendar month as `day`, in order.
    pub fn in_month(&self, day: NaiveDate) -> impl Iterator<Item = &Transaction> + '_ {
        self.data
            .iter()
            .filter(move |t| date::same_month(t.date, day))
    }

    /// `sort_by` is stable, so same-day transactions stay in insertion order.
    fn sort(&mut self) {
        self.data.sort_by(|a, b| date::compare(a.date, b.date));
    }
}

impl From<Vec<Transaction>> for Transactions {
    fn from(data: Vec<Transaction>) -> Self {
        let mut transactions = Self { data };
        transactions.sort();
        transactions
    }
}

impl<'a> IntoIterator for &'a Transactions {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Stored transactions are decoded one by one. A transaction that cannot be understood, whatever
/// is wrong with it, is logged and dropped so that the rest of the list survives. A `null` list is
/// the same as a missing one.
impl<'de> Deserialize<'de> for Transactions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        let data = raw
            .into_iter()
            .enumerate()
            .filter_map(|(ix, stored)| match stored_transaction(stored) {
                Ok(transaction) => Some(transaction),
                Err(e) => {
                    warn!("Dropping stored transaction #{ix}: {e:#}");
                    None
                }
            })
            .collect::<Vec<_>>();
        Ok(Transactions::from(data))
    }
}

/// A single dated, signed money record with a category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    /// The day the transaction was recorded, as `DD.MM.YYYY`.
    #[serde(with = "date::dmy")]
    #[schemars(with = "String")]
    pub(crate) date: NaiveDate,
    /// Free text, may be empty.
    pub(crate) category: String,
    /// Positive for income, negative for expenses.
    pub(crate) sum: Amount,
}

impl Transaction {
    pub fn new(date: NaiveDate, category: impl Into<String>, sum: Amount) -> Self {
        Self {
            date,
            category: category.into(),
            sum,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sum(&self) -> Amount {
        self.sum
    }
}

/// Reads one stored transaction from its loosest possible shape. Older snapshots wrote `null` for
/// an empty category and for an amount that failed to parse.
fn stored_transaction(stored: Value) -> Result<Transaction> {
    let mut fields = match stored {
        Value::Object(fields) => fields,
        other => bail!("{other} is not an object"),
    };
    let date = match fields.remove("date") {
        Some(Value::String(text)) => date::parse(&text)?,
        Some(Value::Null) | None => bail!("it has no date"),
        Some(other) => bail!("its date {other} is not a string"),
    };
    let category = match fields.remove("category") {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(label @ (Value::Number(_) | Value::Bool(_))) => label.to_string(),
        Some(other) => bail!("its category {other} is not text"),
    };
    let sum = match fields.remove("sum") {
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Amount::new)
            .ok_or_else(|| anyhow!("its amount {n} does not fit in a float"))?,
        Some(Value::String(s)) => Amount::from_str(&s).context("its amount is not usable")?,
        Some(Value::Null) | None => bail!("it has no amount"),
        Some(other) => bail!("its amount {other} is not a number"),
    };
    Ok(Transaction {
        date,
        category,
        sum,
    })
}
