use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagpick_lib::config::Config;
use tagpick_lib::logging::initialize_logging;

use crate::commands::{get::GetCommand, tags::TagsCommand};
use crate::tui;

#[derive(Parser)]
#[command(name = "tagpick")]
#[command(about = "Pick a release tag of a GitHub repository and download one of its assets")]
#[command(version)]
pub struct Cli {
    /// Starts the interactive picker when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Config file to use instead of ./tagpick.toml or the user config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository owner on GitHub
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name on GitHub
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Release asset file name
    #[arg(long, global = true)]
    pub asset: Option<String>,

    /// GitHub token for API requests (defaults to GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,
}

impl GlobalArgs {
    /// Loads the config file and applies the command line overrides.
    pub fn load_config(&self) -> Result<Config> {
        self.apply_overrides(Config::load(self.config.as_deref())?)
    }

    fn apply_overrides(&self, config: Config) -> Result<Config> {
        config.with_overrides(
            self.owner.clone(),
            self.repo.clone(),
            self.asset.clone(),
            self.token.clone(),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the repository's tags, newest first
    #[command(alias = "ls")]
    Tags(TagsCommand),

    /// Download the release asset of a tag
    Get(GetCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            None => tui::run(self.global_args).await,
            Some(command) => {
                initialize_logging();
                match command {
                    Commands::Tags(cmd) => cmd.run(self.global_args).await,
                    Commands::Get(cmd) => cmd.run(self.global_args).await,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_starts_picker() {
        let cli = Cli::try_parse_from(["tagpick", "--owner", "octo"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.global_args.owner.as_deref(), Some("octo"));
    }

    #[test]
    fn test_get_arguments() {
        let cli = Cli::try_parse_from([
            "tagpick", "get", "--tag", "v0.6.5", "-o", "out.zip", "--asset", "x.zip",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Get(cmd)) => {
                assert_eq!(cmd.tag, "v0.6.5");
                assert_eq!(cmd.output, Some(PathBuf::from("out.zip")));
            }
            _ => panic!("expected the get command"),
        }
        assert_eq!(cli.global_args.asset.as_deref(), Some("x.zip"));
    }

    #[test]
    fn test_global_args_override_config() {
        let args = GlobalArgs {
            repo: Some("Other".to_string()),
            ..GlobalArgs::default()
        };
        let config = args.apply_overrides(Config::default()).unwrap();
        assert_eq!(config.repo, "Other");
        assert_eq!(config.owner, tagpick_lib::config::DEFAULT_OWNER);
    }
}
