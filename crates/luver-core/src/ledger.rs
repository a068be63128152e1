use crate::error::SyncResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default ledger file, relative to the working directory.
pub const LEDGER_FILE: &str = ".luis-app-version";

/// The remote version tag in use and the model hash it was minted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub tag: String,
    pub hash: String,
}

impl VersionRecord {
    /// Whether this record was written for content with `hash`, in either
    /// the current or the legacy signed rendering.
    #[must_use]
    pub fn describes(&self, hash: &str, legacy_hash: &str) -> bool {
        self.hash == hash || self.hash == legacy_hash
    }

    /// Picks the tag for a model with `hash`.
    ///
    /// Reuses the previous tag when the model is unchanged, so repeated runs
    /// keep pointing at the same remote version. The returned record always
    /// carries `hash`, so a legacy ledger is rewritten in the current form.
    #[must_use]
    pub fn reconcile(hash: String, legacy_hash: &str, new_tag: String, previous: Option<&VersionRecord>) -> Self {
        match previous {
            Some(prev) if prev.describes(&hash, legacy_hash) => Self { tag: prev.tag.clone(), hash },
            _ => Self { tag: new_tag, hash },
        }
    }
}

/// Single-entry ledger persisted as JSON.
#[derive(Debug, Clone)]
pub struct VersionLedger {
    path: PathBuf,
}

impl VersionLedger {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Ledger in the given working directory.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(LEDGER_FILE))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the last record. A missing file means this is the first run.
    pub fn load(&self) -> SyncResult<Option<VersionRecord>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Overwrites the ledger with `record`.
    pub fn persist(&self, record: &VersionRecord) -> SyncResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }
}
