use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tagpick_lib::github::GitHubSource;
use tagpick_lib::retry::{RetryPolicy, run_with_retry};
use tagpick_lib::source::{ReleaseRef, ReleaseSource, Repository};

#[derive(Args)]
pub struct GetCommand {
    /// Tag to download, exactly as listed (e.g. "v0.6.5")
    #[arg(short, long)]
    pub tag: String,

    /// Destination file (defaults to <output_dir>/<asset> from the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GetCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.load_config()?;
        let source = GitHubSource::new()?;
        let release = ReleaseRef {
            repository: Repository::new(&config.owner, &config.repo),
            tag: self.tag.trim().to_string(),
        };
        let destination = self
            .output
            .unwrap_or_else(|| config.default_output_path());
        let token = config.resolve_token();

        ui::info(&format!(
            "Downloading {} of {} {}",
            config.asset, release.repository, release.tag
        ));

        let policy = RetryPolicy::DOWNLOAD;
        let scope = policy.scope(super::cancel_on_ctrl_c());
        run_with_retry(&scope, policy, || {
            source.download_asset(&release, &config.asset, &destination, token.as_deref())
        })
        .await
        .context("download asset")?;

        ui::success(&format!("Downloaded: {}", destination.display()));
        Ok(())
    }
}
