use std::path::PathBuf;

use anyhow::{Context, Result};

/// File name holding the API key inside the client home directory.
const CREDENTIAL_FILE: &str = "api_key";

/// File-backed store for the agent's API key.
///
/// Holds zero or one value. Writes go through a sibling temp file and a
/// rename, so a concurrent reader sees the previous key or the new one,
/// never a torn write.
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn credential_path(&self) -> PathBuf {
        self.dir.join(CREDENTIAL_FILE)
    }

    /// Read the stored key, if any. Missing or empty files read as absent.
    pub fn get(&self) -> Option<String> {
        let contents = std::fs::read_to_string(self.credential_path()).ok()?;
        let key = contents.trim();
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }

    /// Store a key, or delete the stored one when `value` is empty. The
    /// new value is visible to `get` as soon as this returns.
    pub fn set(&self, value: &str) -> Result<()> {
        if value.is_empty() {
            return self.clear();
        }

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create credential directory {}", self.dir.display()))?;

        let tmp = self.dir.join(format!("{}.tmp", CREDENTIAL_FILE));
        std::fs::write(&tmp, value).context("Failed to write credential file")?;
        std::fs::rename(&tmp, self.credential_path())
            .context("Failed to move credential file into place")?;
        Ok(())
    }

    /// Delete the stored key. A no-op when nothing is stored.
    pub fn clear(&self) -> Result<()> {
        let path = self.credential_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to delete credential file")?;
        }
        Ok(())
    }

    /// Whether a key is currently stored.
    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}
