use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::StorageError;
use crate::models::resume::StoredResume;

/// Write-only mirror of stored resumes, one indented JSON file per id.
/// Nothing reads these files back.
#[derive(Debug, Clone)]
pub struct DiskMirror {
    dir: PathBuf,
}

impl DiskMirror {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DiskMirror { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/resume_<id>.json`
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("resume_{id}.json"))
    }

    /// Writes `stored` to its file, creating the directory if absent.
    /// The body goes to a sibling temp file first and is renamed over the
    /// target, so a reader never sees a partial `resume_<id>.json`.
    pub async fn write(&self, stored: &StoredResume) -> Result<PathBuf, StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(&stored.id);
        let tmp_path = self.dir.join(format!(".resume_{}.json.tmp", stored.id));
        let body = serde_json::to_vec_pretty(stored)?;

        let staged = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(&body).await?;
            file.sync_all().await
        }
        .await;
        if let Err(source) = staged {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io {
                path: tmp_path,
                source,
            });
        }

        if let Err(source) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io { path, source });
        }

        debug!("Mirrored resume {} to {}", stored.id, path.display());
        Ok(path)
    }
}
