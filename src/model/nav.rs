use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Which entry form is active. This only routes input, the budget does not depend on it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum NavTab {
    /// The expense form.
    #[serde(alias = "expanse")]
    Expense,
    /// The income form.
    #[default]
    #[serde(alias = "incomes")]
    Income,
}

serde_plain::derive_display_from_serialize!(NavTab);
serde_plain::derive_fromstr_from_deserialize!(NavTab);

/// Reads a tab name, falling back to the default tab for anything unrecognized.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<NavTab, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(match tag {
        Some(tag) => NavTab::from_str(&tag).unwrap_or_else(|_| {
            warn!("Unknown tab '{tag}' in the stored state, using '{}'", NavTab::default());
            NavTab::default()
        }),
        None => NavTab::default(),
    })
}
