//! Snapshot persistence.
//!
//! The store owns a single slot: `$PURCHASE_TRACKER_HOME/snapshot.json`. On
//! startup the slot is read into a [`Tracker`]; after every successful
//! mutation the whole snapshot is serialized and the slot is overwritten.
//! There is no merge or diff logic. A missing slot yields the seed data; an
//! unreadable slot is quarantined and then yields the seed data, so the
//! user is never blocked by a broken file.

use crate::backup::Backup;
use crate::model::{Price, ProductEdit, Tracker};
use crate::{fs, Home, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads and saves the snapshot file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    backup: Backup,
}

impl Store {
    /// Creates a store for the snapshot slot inside `home`.
    pub fn new(home: &Home) -> Self {
        Self {
            path: home.snapshot().to_path_buf(),
            backup: Backup::new(home),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current snapshot.
    ///
    /// A missing file is not an error; it means a first run, and the seed
    /// snapshot is returned. A file that exists but cannot be parsed is
    /// moved into the backups directory and the seed snapshot is returned.
    /// An I/O failure on an existing file propagates.
    pub fn load(&self) -> Result<Tracker> {
        if !self.path.is_file() {
            debug!(
                "No snapshot at {}; starting from seed data",
                self.path.display()
            );
            return Ok(seed());
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(tracker) => Ok(tracker),
            Err(e) => {
                warn!(
                    "The snapshot at {} could not be parsed ({e}); starting from seed data",
                    self.path.display()
                );
                let quarantined = self.backup.quarantine(&self.path)?;
                debug!("Moved the unreadable snapshot to {}", quarantined.display());
                Ok(seed())
            }
        }
    }

    /// Serializes the whole snapshot and overwrites the slot.
    pub fn save(&self, tracker: &Tracker) -> Result<()> {
        let json =
            serde_json::to_string_pretty(tracker).context("Unable to serialize the snapshot")?;
        fs::write(&self.path, json)?;
        debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

/// The snapshot used when no persisted snapshot exists.
fn seed() -> Tracker {
    let tracker = Tracker::default().add_person("Sarah");
    let sarah = tracker.people()[0].id();
    let tracker = tracker.add_product(sarah, "Laptop Stand");
    let stand = tracker.people()[0].products()[0].id();
    let tracker = tracker
        .update_product(
            sarah,
            stand,
            ProductEdit::Reprice(Price::parse_lenient("45")),
        )
        .add_link(sarah, stand, "https://amazon.com/...")
        .add_product(sarah, "USB Hub");
    let hub = tracker.people()[0].products()[1].id();
    tracker.update_product(sarah, hub, ProductEdit::Reprice(Price::parse_lenient("29")))
}
