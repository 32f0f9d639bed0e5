//! Date navigation and tab switching.

use crate::commands::{open_store, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, NavTab};
use crate::persist::Persistence;
use crate::store::Store;
use crate::{date, Config, Result};
use serde::Serialize;

/// What the top of the screen shows: the selected date, the active form and the money left for
/// the selected date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// `DD.MM.YYYY`
    pub date: String,
    pub tab: NavTab,
    pub remaining_today: f64,
}

impl Header {
    pub(crate) fn of<P: Persistence>(store: &Store<P>) -> Self {
        Self {
            date: date::format(store.date()),
            tab: store.state().nav_selected(),
            remaining_today: store.remaining_today(),
        }
    }

    pub(crate) fn line(&self) -> String {
        format!(
            "{}  [{}]  Left for today: {}",
            self.date,
            self.tab,
            Amount::new(self.remaining_today)
        )
    }
}

/// Moves the selected date one day forward.
pub async fn next_day(config: Config) -> Result<Out<Header>> {
    let mut store = open_store(&config).await?;
    store.next_day().await.pub_result(ErrorType::Storage)?;
    let header = Header::of(&store);
    Ok(Out::new(header.line(), header))
}

/// Moves the selected date one day back.
pub async fn previous_day(config: Config) -> Result<Out<Header>> {
    let mut store = open_store(&config).await?;
    store.previous_day().await.pub_result(ErrorType::Storage)?;
    let header = Header::of(&store);
    Ok(Out::new(header.line(), header))
}

/// Moves the selected date by `days`, forward when positive.
pub async fn shift(config: Config, days: i64) -> Result<Out<Header>> {
    let mut store = open_store(&config).await?;
    store.advance_date(days).await.pub_result(ErrorType::Storage)?;
    let header = Header::of(&store);
    Ok(Out::new(header.line(), header))
}

/// Makes `tab` the active entry form.
pub async fn tab(config: Config, tab: NavTab) -> Result<Out<Header>> {
    let mut store = open_store(&config).await?;
    store.select_tab(tab).await.pub_result(ErrorType::Storage)?;
    let header = Header::of(&store);
    Ok(Out::new(format!("Switched to the {tab} form"), header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_shift_and_step() {
        let env = TestEnv::new().await;
        env.seed_date(NaiveDate::from_ymd_opt(2023, 6, 10).unwrap())
            .await;

        let out = next_day(env.config()).await.unwrap();
        assert_eq!(out.structure().unwrap().date, "11.06.2023");

        let out = shift(env.config(), -11).await.unwrap();
        assert_eq!(out.structure().unwrap().date, "31.05.2023");

        let out = previous_day(env.config()).await.unwrap();
        assert_eq!(out.structure().unwrap().date, "30.05.2023");
        assert!(out.message().starts_with("30.05.2023"));
    }

    #[tokio::test]
    async fn test_tab() {
        let env = TestEnv::new().await;
        let out = tab(env.config(), NavTab::Expense).await.unwrap();
        assert_eq!(out.message(), "Switched to the expense form");
        assert_eq!(env.state().await.nav_selected(), NavTab::Expense);
    }

    #[test]
    fn test_header_line() {
        let header = Header {
            date: "10.06.2023".to_string(),
            tab: NavTab::Income,
            remaining_today: 1234.5,
        };
        assert_eq!(header.line(), "10.06.2023  [income]  Left for today: 1,234.50");
    }
}
