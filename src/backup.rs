//! Backup management for snapshot files that can no longer be parsed.
//!
//! When the store finds an unreadable snapshot it does not delete it; the
//! file is moved into the `.backups` directory under a dated, numbered name
//! so the data can be recovered by hand. Old quarantined files are rotated
//! away after a fixed number of copies.

use crate::{fs, Home, Result};
use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Prefix for quarantined snapshot files.
pub const QUARANTINE: &str = "snapshot-unreadable";

/// How many quarantined copies to keep before rotating the oldest away.
const BACKUP_COPIES: usize = 5;

/// Manages backup file creation and rotation within a tracker home.
///
/// The `Backup` struct is immutable and owns a copy of the backups path.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Home`.
    pub fn new(home: &Home) -> Self {
        Self {
            backups_dir: home.backups().to_path_buf(),
        }
    }

    /// Moves `file` into the backups directory under the name
    /// `{QUARANTINE}.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old files, keeping only the newest copies.
    ///
    /// Returns the path to the quarantined file.
    pub fn quarantine(&self, file: &Path) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(QUARANTINE, &date)?;
        let filename = format!("{QUARANTINE}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        fs::rename(file, &path)?;
        self.rotate(QUARANTINE)?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix
    /// and date, and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;
        for name in self.file_names()? {
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }
        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `BACKUP_COPIES` files with the
    /// given prefix.
    fn rotate(&self, prefix: &str) -> Result<()> {
        let mut names: Vec<String> = self
            .file_names()?
            .into_iter()
            .filter(|name| name.starts_with(&format!("{prefix}.")) && name.ends_with(".json"))
            .collect();

        // The filename format sorts by date and sequence number.
        names.sort();

        let to_delete = names.len().saturating_sub(BACKUP_COPIES);
        for name in names.into_iter().take(to_delete) {
            fs::remove(self.backups_dir.join(name))?;
        }
        Ok(())
    }

    fn file_names(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.backups_dir).with_context(|| {
            format!(
                "Unable to read the backups directory {}",
                self.backups_dir.display()
            )
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    // Pattern: {prefix}.{date}-{NNN}.json
    let expected_start = format!("{prefix}.{date}-");
    let remainder = filename.strip_prefix(&expected_start)?;
    let seq_str = remainder.strip_suffix(".json")?;
    seq_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backup_env() -> (TempDir, Home, Backup) {
        let dir = TempDir::new().unwrap();
        let home = Home::new(dir.path().join("tracker")).unwrap();
        let backup = Backup::new(&home);
        (dir, home, backup)
    }

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number(
                "snapshot-unreadable.2025-12-14-001.json",
                "snapshot-unreadable",
                "2025-12-14"
            ),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number(
                "snapshot-unreadable.2025-12-14-042.json",
                "snapshot-unreadable",
                "2025-12-14"
            ),
            Some(42)
        );
        assert_eq!(
            parse_sequence_number("other.2025-12-14-001.json", "snapshot-unreadable", "2025-12-14"),
            None
        );
        assert_eq!(
            parse_sequence_number(
                "snapshot-unreadable.2025-12-14-xyz.json",
                "snapshot-unreadable",
                "2025-12-14"
            ),
            None
        );
    }

    #[test]
    fn test_quarantine_moves_the_file() {
        let (_dir, home, backup) = backup_env();
        let corrupt = home.root().join("snapshot.json");
        std::fs::write(&corrupt, "not json").unwrap();

        let quarantined = backup.quarantine(&corrupt).unwrap();

        assert!(!corrupt.exists());
        assert!(quarantined.exists());
        assert_eq!(std::fs::read_to_string(&quarantined).unwrap(), "not json");
    }

    #[test]
    fn test_quarantine_sequence_numbers_increment() {
        let (_dir, home, backup) = backup_env();
        let corrupt = home.root().join("snapshot.json");

        std::fs::write(&corrupt, "a").unwrap();
        let first = backup.quarantine(&corrupt).unwrap();
        std::fs::write(&corrupt, "b").unwrap();
        let second = backup.quarantine(&corrupt).unwrap();

        assert_ne!(first, second);
        assert!(first.to_string_lossy().contains("-001.json"));
        assert!(second.to_string_lossy().contains("-002.json"));
    }

    #[test]
    fn test_rotation_keeps_a_fixed_number_of_copies() {
        let (_dir, home, backup) = backup_env();
        let corrupt = home.root().join("snapshot.json");

        for i in 0..8 {
            std::fs::write(&corrupt, format!("copy {i}")).unwrap();
            backup.quarantine(&corrupt).unwrap();
        }

        let count = std::fs::read_dir(home.backups()).unwrap().count();
        assert_eq!(count, BACKUP_COPIES);
    }
}
