//! Persistence of the `AppState` snapshot.
//!
//! The store decides when to save; a `Persistence` implementation decides how.

use crate::backup::{Backup, MALFORMED, PARTIAL};
use crate::model::AppState;
use crate::{utils, Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, trace, warn};

/// A durable slot holding one `AppState` snapshot.
#[async_trait::async_trait]
pub trait Persistence: Send + Sync {
    /// Returns the stored snapshot. `None` means there is nothing usable, either because nothing
    /// was ever saved or because what was saved cannot be parsed.
    async fn load(&self) -> Result<Option<AppState>>;

    /// Replaces the stored snapshot with `state`.
    async fn save(&self, state: &AppState) -> Result<()>;
}

/// Keeps the snapshot as a pretty-printed JSON file.
///
/// A file that cannot be parsed is copied to the backups directory before `load` reports that
/// there is no usable state, so the next `save` does not destroy it.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    backup: Backup,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>, backup: Backup) -> Self {
        Self {
            path: path.into(),
            backup,
        }
    }

    /// The snapshot file configured in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.state_path(), config.backup())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl Persistence for JsonFile {
    async fn load(&self) -> Result<Option<AppState>> {
        let Some(content) = utils::read_optional(&self.path).await? else {
            debug!("No state file at {}", self.path.display());
            return Ok(None);
        };

        match decode(&content) {
            Decoded::Complete(state) => Ok(Some(state)),
            Decoded::Partial(state) => {
                let copy = self.backup.copy_json(PARTIAL, &self.path).await?;
                warn!(
                    "Some stored transactions could not be read and were skipped, the original \
                    state file was saved to {}",
                    copy.display()
                );
                Ok(Some(state))
            }
            Decoded::Malformed(e) => {
                let copy = self.backup.copy_json(MALFORMED, &self.path).await?;
                warn!(
                    "The state file {} could not be parsed ({e}), starting from an empty state. \
                    The unreadable file was saved to {}",
                    self.path.display(),
                    copy.display()
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, state: &AppState) -> Result<()> {
        let json = state.to_json().context("Unable to serialize the state")?;
        if let Some(parent) = self.path.parent() {
            utils::make_dir(parent).await?;
        }
        utils::write_atomic(&self.path, json)
            .await
            .context("Unable to write the state file")?;
        trace!("Saved state to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the snapshot text in memory. It goes through the same JSON encoding as `JsonFile`.
#[derive(Debug, Default)]
pub struct Memory {
    slot: Mutex<Option<String>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `json`, which does not have to be valid.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(json.into())),
        }
    }

    /// The raw text currently stored.
    pub fn json(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

#[async_trait::async_trait]
impl Persistence for Memory {
    async fn load(&self) -> Result<Option<AppState>> {
        Ok(match self.json() {
            Some(content) => match decode(&content) {
                Decoded::Complete(state) | Decoded::Partial(state) => Some(state),
                Decoded::Malformed(e) => {
                    warn!("The stored state could not be parsed ({e}), starting from an empty state");
                    None
                }
            },
            None => None,
        })
    }

    async fn save(&self, state: &AppState) -> Result<()> {
        let json = state.to_json().context("Unable to serialize the state")?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("The in-memory state slot is poisoned"))?;
        *slot = Some(json);
        Ok(())
    }
}

enum Decoded {
    /// Everything in the snapshot was understood.
    Complete(AppState),
    /// The snapshot parsed, but some transactions were dropped.
    Partial(AppState),
    Malformed(serde_json::Error),
}

fn decode(content: &str) -> Decoded {
    let state = match AppState::from_json(content) {
        Ok(state) => state,
        Err(e) => return Decoded::Malformed(e),
    };
    let stored = serde_json::from_str::<serde_json::Value>(content)
        .ok()
        .and_then(|v| v.get("transactions").and_then(|t| t.as_array().map(Vec::len)))
        .unwrap_or(0);
    if stored > state.transactions().len() {
        Decoded::Partial(state)
    } else {
        Decoded::Complete(state)
    }
}
