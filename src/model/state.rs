use crate::date;
use crate::model::nav;
use crate::model::{NavTab, Transactions};
use chrono::{Local, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The whole application state. This is exactly what gets persisted.
///
/// Example snapshot:
/// ```json
/// {
///   "date": "2018-05-10",
///   "navSelected": "expense",
///   "transactions": [
///     { "date": "01.05.2018", "category": "salary", "sum": 3000.0 },
///     { "date": "05.05.2018", "category": "food", "sum": -200.0 }
///   ]
/// }
/// ```
///
/// Any field may be missing or `null`, in which case it takes its default. Unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// The selected date, written as `YYYY-MM-DD`. Defaults to today.
    #[serde(with = "date::selected", default = "today")]
    #[schemars(with = "String")]
    pub(crate) date: NaiveDate,

    /// The active entry form. Defaults to `income`.
    #[serde(default, deserialize_with = "nav::lenient")]
    #[schemars(with = "NavTab")]
    pub(crate) nav_selected: NavTab,

    /// Sorted by ascending date.
    #[serde(default)]
    pub(crate) transactions: Transactions,
}

impl AppState {
    /// The state of a first start: `date` selected, income tab, no transactions.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            nav_selected: NavTab::default(),
            transactions: Transactions::default(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn nav_selected(&self) -> NavTab {
        self.nav_selected
    }

    pub fn transactions(&self) -> &Transactions {
        &self.transactions
    }

    /// Decodes a snapshot.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Encodes a snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(today())
    }
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
