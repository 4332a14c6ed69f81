use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tagpick_lib::github::GitHubSource;
use tagpick_lib::retry::{RetryPolicy, run_with_retry};
use tagpick_lib::source::{ReleaseSource, Repository};
use tagpick_lib::version::{TagItem, rank_tags};

#[derive(Args)]
pub struct TagsCommand {
    /// Show at most this many tags
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl TagsCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.load_config()?;
        let source = GitHubSource::new()?;
        let repository = Repository::new(&config.owner, &config.repo);
        let token = config.resolve_token();

        let policy = RetryPolicy::REFRESH;
        let scope = policy.scope(super::cancel_on_ctrl_c());
        let tags = run_with_retry(&scope, policy, || {
            source.list_tags(&repository, token.as_deref())
        })
        .await
        .context("refresh tags")?;

        let items = rank_tags(tags);
        if items.is_empty() {
            ui::warning(&format!("No versions found for {repository}."));
            return Ok(());
        }

        ui::info(&format!(
            "{}",
            format!("Tags of {repository}:").underline().green()
        ));
        let shown = self.limit.unwrap_or(items.len()).min(items.len());
        Self::print_tags(&items[..shown]);
        if shown < items.len() {
            ui::info(&format!("... and {} more", items.len() - shown));
        }

        tracing::info!("");
        ui::tip("Use `tagpick get --tag <tag>` to download the release asset of a tag");
        Ok(())
    }

    fn print_tags(items: &[TagItem]) {
        let width = items.iter().map(|item| item.raw.len()).max().unwrap_or(0);
        for item in items {
            let latest = if item.is_latest {
                " (latest)".green()
            } else {
                "".normal()
            };
            let prerelease = if item.key.as_ref().is_some_and(|key| key.is_prerelease()) {
                " (pre-release)".yellow()
            } else {
                "".normal()
            };
            ui::info(format!("{:width$}{}{}", item.raw, latest, prerelease, width = width).trim_end());
        }
    }
}
