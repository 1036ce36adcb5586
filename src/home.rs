use crate::{fs, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// The `Home` object represents the file paths of the `$PURCHASE_TRACKER_HOME`
/// directory and those paths which are not configurable within it, such as
/// `$PURCHASE_TRACKER_HOME/snapshot.json`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Home {
    root: PathBuf,
    snapshot: PathBuf,
    backups: PathBuf,
}

impl Home {
    /// This will create the tracker home directory, if it does not exist, and
    /// canonicalize itself.
    pub fn new(tracker_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = tracker_home.into();
        fs::create_dir_all(&maybe_relative)
            .context("Unable to create the tracker home directory")?;
        let root = fs::canonicalize(&maybe_relative)?;
        let home = Self {
            snapshot: root.join("snapshot.json"),
            backups: root.join(".backups"),
            root,
        };
        fs::create_dir_all(&home.backups)?;
        Ok(home)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot(&self) -> &Path {
        &self.snapshot
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }
}

#[test]
fn test_home() {
    use tempfile::TempDir;
    let dir = TempDir::new().unwrap();
    let home_dir = dir.path().join("tracker");
    let home = Home::new(home_dir).unwrap();
    assert!(home.root().is_dir());
    assert!(home.backups().is_dir());
    assert!(!home.snapshot().exists());
}
