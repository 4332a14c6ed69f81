use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

/// A file written under a temporary name and renamed into place on [`AtomicFile::commit`].
///
/// Dropping it without committing removes the temporary file, so the
/// destination never holds a partial write.
pub struct AtomicFile {
    temp: NamedTempFile,
    file: tokio::fs::File,
    destination: PathBuf,
}

impl AtomicFile {
    pub fn create(destination: &Path) -> Result<Self> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let temp = tempfile::Builder::new()
            .prefix(".tmp-")
            .tempfile_in(dir)
            .context("Failed to create temporary file")?;
        let file = tokio::fs::File::from_std(temp.reopen()?);

        Ok(Self {
            temp,
            file,
            destination: destination.to_path_buf(),
        })
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.file
            .write_all(bytes)
            .await
            .context("Failed to write temporary file")
    }

    /// Flushes, syncs and renames the temporary file to the destination.
    pub async fn commit(self) -> Result<PathBuf> {
        let AtomicFile {
            temp,
            mut file,
            destination,
        } = self;

        file.flush().await?;
        file.sync_all()
            .await
            .context("Failed to sync temporary file")?;
        drop(file);

        temp.persist(&destination)
            .with_context(|| format!("Failed to move download to {}", destination.display()))?;
        Ok(destination)
    }
}
