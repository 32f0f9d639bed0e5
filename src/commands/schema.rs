//! The `schema` command.

use crate::commands::Out;
use crate::model::AppState;
use crate::Result;
use anyhow::Context;

/// Returns the JSON Schema of the state file, for anyone who wants to read or write it with
/// other tools.
pub async fn schema() -> Result<Out<serde_json::Value>> {
    let schema = schemars::schema_for!(AppState);
    let value = serde_json::to_value(&schema).context("Unable to serialize the schema")?;
    let text = serde_json::to_string_pretty(&value).context("Unable to serialize the schema")?;
    Ok(Out::new(text, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_describes_the_snapshot() {
        let out = schema().await.unwrap();
        let value = out.structure().unwrap();
        let properties = value.get("properties").unwrap();
        assert!(properties.get("date").is_some());
        assert!(properties.get("navSelected").is_some());
        assert!(properties.get("transactions").is_some());
        assert!(out.message().contains("navSelected"));
    }
}
