//! The transaction store. It owns the `AppState` and writes a full snapshot through its
//! `Persistence` after every change.

use crate::budget::{self, Breakdown};
use crate::model::{Amount, AppState, NavTab, Transaction};
use crate::persist::Persistence;
use crate::{date, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

pub struct Store<P: Persistence> {
    state: AppState,
    persistence: P,
}

impl<P: Persistence> Store<P> {
    /// Loads the stored state, or starts a fresh one on `today` when nothing usable is stored.
    pub async fn open(persistence: P, today: NaiveDate) -> Result<Self> {
        let state = match persistence.load().await? {
            Some(state) => {
                debug!(
                    "Loaded state for {} with {} transactions",
                    state.date(),
                    state.transactions().len()
                );
                state
            }
            None => {
                info!("Starting with an empty budget on {}", date::format(today));
                AppState::new(today)
            }
        };
        Ok(Self { state, persistence })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn date(&self) -> NaiveDate {
        self.state.date
    }

    /// Records a transaction on the selected date. The sign of `sum` is taken as given.
    pub async fn insert(&mut self, sum: Amount, category: impl Into<String>) -> Result<()> {
        let transaction = Transaction::new(self.state.date, category, sum);
        debug!(
            "Inserting {} '{}' on {}",
            transaction.sum(),
            transaction.category(),
            date::format(transaction.date())
        );
        self.state.transactions.insert(transaction);
        self.persist().await
    }

    /// Moves the selected date by `delta_days`, which may be negative.
    pub async fn advance_date(&mut self, delta_days: i64) -> Result<()> {
        self.state.date = date::shift(self.state.date, delta_days);
        debug!("Selected date is now {}", date::format(self.state.date));
        self.persist().await
    }

    pub async fn next_day(&mut self) -> Result<()> {
        self.advance_date(1).await
    }

    pub async fn previous_day(&mut self) -> Result<()> {
        self.advance_date(-1).await
    }

    pub async fn select_tab(&mut self, tab: NavTab) -> Result<()> {
        self.state.nav_selected = tab;
        self.persist().await
    }

    /// How much can still be spent on the selected date. Computed fresh on every call.
    pub fn remaining_today(&self) -> f64 {
        budget::remaining_today(&self.state.transactions, self.state.date)
    }

    pub fn breakdown(&self) -> Breakdown {
        budget::breakdown(&self.state.transactions, self.state.date)
    }

    /// The transactions of the selected month, oldest first.
    pub fn month_transactions(&self) -> Vec<&Transaction> {
        self.state.transactions.in_month(self.state.date).collect()
    }

    async fn persist(&self) -> Result<()> {
        self.persistence.save(&self.state).await
    }
}
