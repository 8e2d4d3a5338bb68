use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

/// On-disk record of past searches, one JSON file per fetched envelope.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArchiveRecord<T> {
    nuc: String,
    searched_at: DateTime<Utc>,
    response: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedSearch {
    pub nuc: String,
    pub searched_at: DateTime<Utc>,
    pub response: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub modified: DateTime<Utc>,
    pub size: u64,
}

impl ArchiveStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn file_name(nuc: &str, at: &DateTime<Utc>) -> String {
        let safe_nuc = nuc.trim().replace(['-', '/', '\\', ' '], "_");
        format!("search_{}_{}.json", safe_nuc, at.format("%Y%m%d_%H%M%S_%3f"))
    }

    /// Writes one search response and returns the archive file name.
    pub fn save<T: Serialize>(&self, nuc: &str, response: &T) -> Result<String> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create archive directory: {}", self.dir.display())
        })?;

        let searched_at = Utc::now();
        let record = ArchiveRecord {
            nuc: nuc.to_string(),
            searched_at,
            response,
        };

        let name = Self::file_name(nuc, &searched_at);
        let content =
            serde_json::to_string_pretty(&record).context("Failed to serialize search record")?;
        let path = self.dir.join(&name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write archive file: {}", path.display()))?;

        debug!(nuc = nuc, file = %name, "Search archived");
        Ok(name)
    }

    /// Archived searches, newest first. A missing directory is an empty
    /// archive.
    pub fn list(&self) -> Result<Vec<ArchiveEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read archive directory: {}", self.dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let metadata = entry.metadata()?;
            let modified = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_default();
            entries.push(ArchiveEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                modified,
                size: metadata.len(),
            });
        }

        entries.sort_by(|a, b| b.modified.cmp(&a.modified).then(b.name.cmp(&a.name)));
        Ok(entries)
    }

    pub fn load(&self, name: &str) -> Result<Option<ArchivedSearch>> {
        if name.contains(['/', '\\']) || name.contains("..") {
            bail!("Invalid archive name: {}", name);
        }

        let path = self.dir.join(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read archive file: {}", path.display()));
            }
        };

        let record: ArchiveRecord<Value> = match serde_json::from_str(&content) {
            Ok(r) => r,
            Err(e) => {
                warn!(file = name, error = %e, "Failed to parse archive file");
                return Err(e).context("Failed to parse archive file");
            }
        };

        Ok(Some(ArchivedSearch {
            nuc: record.nuc,
            searched_at: record.searched_at,
            response: record.response,
        }))
    }

    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            for entry in std::fs::read_dir(&self.dir)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    std::fs::remove_file(&path)?;
                }
            }
            debug!("Archive cleared");
        }
        Ok(())
    }
}
