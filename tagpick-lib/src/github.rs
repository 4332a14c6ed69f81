use crate::logging::{progress_bar_style, spinner_style};
use crate::persist::AtomicFile;
use crate::source::{ReleaseRef, ReleaseSource, Repository};
use anyhow::{Context, Result, anyhow, bail};
use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

pub const GITHUB_API_URL: &str = "https://api.github.com";
const ERROR_BODY_LIMIT: usize = 64 * 1024;

/// Matches the fields of the GitHub API release response needed to locate assets
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GitHubReleaseJson {
    pub tag_name: String,
    pub assets: Vec<GitHubAssetJson>,
}

/// Matches the GitHub API JSON response for a single release asset
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GitHubAssetJson {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

impl GitHubReleaseJson {
    /// Find an asset by its exact file name
    pub fn find_asset(&self, asset_name: &str) -> Result<&GitHubAssetJson> {
        let asset = self
            .assets
            .iter()
            .find(|a| a.name == asset_name)
            .ok_or_else(|| anyhow!("asset {asset_name:?} not found in release {}", self.tag_name))?;
        if asset.browser_download_url.is_empty() {
            bail!("asset {asset_name:?} has empty browser_download_url");
        }
        Ok(asset)
    }
}

/// Release source backed by `git ls-remote` for tags and the GitHub REST API for assets.
pub struct GitHubSource {
    client: Client,
    api_url: String,
}

impl GitHubSource {
    pub fn new() -> Result<Self> {
        Self::with_api_url(GITHUB_API_URL)
    }

    pub fn with_api_url(api_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tagpick/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(15))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn authorized(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    #[instrument(skip_all, fields(release = %release.tag))]
    pub async fn release_by_tag(
        &self,
        release: &ReleaseRef,
        token: Option<&str>,
    ) -> Result<GitHubReleaseJson> {
        let url = format!(
            "{}/repos/{}/{}/releases/tags/{}",
            self.api_url, release.repository.owner, release.repository.name, release.tag
        );
        tracing::debug!("GET {url}");

        let request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        let response = Self::authorized(request, token)
            .send()
            .await
            .context("fetch release metadata")?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = error_body(response).await;
            bail!("fetch release metadata: status={status} body={body}");
        }

        response
            .json::<GitHubReleaseJson>()
            .await
            .context("decode release JSON")
    }

    #[instrument(skip_all, fields(asset = %asset.name))]
    async fn stream_asset(
        &self,
        asset: &GitHubAssetJson,
        destination: &Path,
        token: Option<&str>,
    ) -> Result<()> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&progress_bar_style()?);
        current_span.pb_set_length(asset.size);
        current_span.pb_set_message(&format!("Downloading {}...", asset.name));
        current_span.pb_set_finish_message(&format!("Downloading {}... Complete!", asset.name));

        let request = self.client.get(&asset.browser_download_url);
        let response = Self::authorized(request, token)
            .send()
            .await
            .context("download asset")?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = error_body(response).await;
            bail!("download asset: status={status} body={body}");
        }

        let mut file = AtomicFile::create(destination)?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("stream asset")?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            current_span.pb_set_position(downloaded);
        }

        file.commit().await?;
        tracing::info!("Downloaded {} bytes to {}", downloaded, destination.display());
        Ok(())
    }
}

impl ReleaseSource for GitHubSource {
    #[instrument(skip_all, fields(repository = %repository))]
    async fn list_tags(&self, repository: &Repository, _token: Option<&str>) -> Result<Vec<String>> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&spinner_style("{msg}")?);
        current_span.pb_set_message(&format!("Fetching tags of {repository}..."));
        current_span.pb_set_finish_message(&format!("Fetching tags of {repository}... Done"));

        // git ls-remote does not use the API token
        let remote = repository.git_remote_url();
        let output = Command::new("git")
            .args(["ls-remote", "--tags", &remote])
            .kill_on_drop(true)
            .output()
            .await
            .context("Failed to execute git ls-remote")?;

        if !output.status.success() {
            bail!(
                "git ls-remote failed: {}; stderr={}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let tags = parse_ls_remote_tags(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!("Fetched {} tags from {}", tags.len(), remote);
        Ok(tags)
    }

    async fn download_asset(
        &self,
        release: &ReleaseRef,
        asset_name: &str,
        destination: &Path,
        token: Option<&str>,
    ) -> Result<()> {
        let metadata = self.release_by_tag(release, token).await?;
        let asset = metadata
            .find_asset(asset_name)
            .context("resolve asset URL")?;
        self.stream_asset(asset, destination, token).await
    }
}

async fn error_body(response: reqwest::Response) -> String {
    match response.bytes().await {
        Ok(bytes) => {
            let end = bytes.len().min(ERROR_BODY_LIMIT);
            String::from_utf8_lossy(&bytes[..end]).into_owned()
        }
        Err(_) => String::new(),
    }
}

/// Extracts tag names from `git ls-remote --tags` output.
///
/// Annotated tag dereferences (`^{}`) are folded into their tag; the result
/// is de-duplicated and sorted.
pub fn parse_ls_remote_tags(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let _sha = fields.next()?;
            let reference = fields.next()?;
            let tag = reference.strip_prefix("refs/tags/")?;
            let tag = tag.strip_suffix("^{}").unwrap_or(tag);
            (!tag.is_empty()).then(|| tag.to_string())
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
