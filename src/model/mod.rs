//! Types that represent the core data model, such as `Transaction` and `AppState`.
mod amount;
pub(crate) mod nav;
mod state;
mod transaction;

pub use amount::{Amount, AmountError};
pub use nav::NavTab;
pub use state::{today, AppState};
pub use transaction::{Transaction, Transactions};
