//! Backup management for state snapshots that could not be used as they were.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Prefix for copies of snapshot files that could not be parsed.
pub const MALFORMED: &str = "malformed";

/// Prefix for copies of snapshot files from which some transactions had to be dropped.
pub const PARTIAL: &str = "partial";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self::with_dir(config.backups(), config.backup_copies())
    }

    pub(crate) fn with_dir(backups_dir: impl Into<PathBuf>, backup_copies: u32) -> Self {
        Self {
            backups_dir: backups_dir.into(),
            backup_copies,
        }
    }

    /// Copies the file at `source` into the backups directory.
    ///
    /// The filename format is `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files.
    ///
    /// If the newest backup with this prefix already holds the same content, no copy is made and
    /// its path is returned instead. Otherwise returns the path to the created backup file.
    pub async fn copy_json(&self, prefix: &str, source: &Path) -> Result<PathBuf> {
        let content = utils::read(source).await?;
        if let Some(latest) = self.backup_files(prefix).await?.pop() {
            if matches!(utils::read(&latest).await, Ok(existing) if existing == content) {
                trace!("{} already holds this content", latest.display());
                return Ok(latest);
            }
        }

        let date = today();
        let seq = self.next_sequence_number(prefix, &date).await?;
        let filename = format!("{prefix}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        utils::copy(source, &path).await?;

        self.rotate(prefix).await?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }

        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    async fn rotate(&self, prefix: &str) -> Result<()> {
        let files = self.backup_files(prefix).await?;
        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for path in files.into_iter().take(to_delete) {
            utils::remove(&path).await?;
        }

        Ok(())
    }

    /// The backup files with the given prefix, oldest first.
    async fn backup_files(&self, prefix: &str) -> Result<Vec<PathBuf>> {
        let mut files: Vec<(PathBuf, String)> = Vec::new();

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // The name sorts by date, then sequence number
        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files.into_iter().map(|(path, _)| path).collect())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename of the form `{prefix}.{date}-{NNN}.json`.
/// Returns None if the filename doesn't match.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    let expected_start = format!("{prefix}.{date}-");
    filename
        .strip_prefix(&expected_start)?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}
