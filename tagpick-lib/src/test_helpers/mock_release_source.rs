use crate::persist::AtomicFile;
use crate::source::{ReleaseRef, ReleaseSource, Repository};
use anyhow::bail;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Scripted release source. Lists a fixed set of tags and "downloads" a
/// small text file describing the request.
pub struct MockReleaseSource {
    tags: Vec<String>,
    list_failures: AtomicU32,
    delay: Duration,
    list_calls: AtomicU32,
    download_calls: AtomicU32,
    last_token: Mutex<Option<String>>,
}

impl MockReleaseSource {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            list_failures: AtomicU32::new(0),
            delay: Duration::ZERO,
            list_calls: AtomicU32::new(0),
            download_calls: AtomicU32::new(0),
            last_token: Mutex::new(None),
        }
    }

    /// Fails the next `count` tag listings.
    pub fn with_list_failures(self, count: u32) -> Self {
        self.list_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Waits this long in the middle of every operation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> u32 {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }
}

impl ReleaseSource for MockReleaseSource {
    async fn list_tags(
        &self,
        _repository: &Repository,
        token: Option<&str>,
    ) -> anyhow::Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = token.map(str::to_string);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let remaining = self.list_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.list_failures.store(remaining - 1, Ordering::SeqCst);
            bail!("mock list failure");
        }
        Ok(self.tags.clone())
    }

    async fn download_asset(
        &self,
        release: &ReleaseRef,
        asset_name: &str,
        destination: &Path,
        token: Option<&str>,
    ) -> anyhow::Result<()> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = token.map(str::to_string);
        if !self.tags.contains(&release.tag) {
            bail!("release {} not found", release.tag);
        }

        let mut file = AtomicFile::create(destination)?;
        let content = format!("{} {} {}", release.repository, release.tag, asset_name);
        file.write_all(content.as_bytes()).await?;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        file.commit().await?;
        Ok(())
    }
}
