use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OWNER: &str = "LavaGang";
pub const DEFAULT_REPO: &str = "MelonLoader";
pub const DEFAULT_ASSET: &str = "MelonLoader.x64.zip";
pub const CONFIG_FILE_NAME: &str = "tagpick.toml";

/// Fixed repository and asset settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Repository owner on GitHub
    pub owner: String,

    /// Repository name on GitHub
    pub repo: String,

    /// Release asset file name to download
    pub asset: String,

    /// Directory used when no explicit output path is given
    pub output_dir: PathBuf,

    /// GitHub token from the config file or command line
    pub token: Option<String>,
}

/// `tagpick.toml` file contents. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ConfigToml {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub asset: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            asset: DEFAULT_ASSET.to_string(),
            output_dir: PathBuf::from("downloads"),
            token: None,
        }
    }
}

impl Config {
    /// Loads settings from `path` if given, otherwise from the first config file found.
    /// See also [Self::search_paths].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::search_paths().into_iter().find(|p| p.exists()),
        };

        match file {
            Some(file) => {
                tracing::debug!("Loading config from {}", file.display());
                let content = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read config file {}", file.display()))?;
                Self::from_toml_str(&content)
                    .with_context(|| format!("Invalid config file {}", file.display()))
            }
            None => {
                tracing::debug!("No config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let toml = toml::from_str::<ConfigToml>(content)?;
        let defaults = Self::default();
        let config = Self {
            owner: toml.owner.unwrap_or(defaults.owner),
            repo: toml.repo.unwrap_or(defaults.repo),
            asset: toml.asset.unwrap_or(defaults.asset),
            output_dir: toml.output_dir.unwrap_or(defaults.output_dir),
            token: toml.token.filter(|t| !t.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Candidate config files, in order of precedence.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tagpick").join("config.toml"));
        }
        paths
    }

    /// Applies command line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        owner: Option<String>,
        repo: Option<String>,
        asset: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        if let Some(owner) = owner {
            self.owner = owner;
        }
        if let Some(repo) = repo {
            self.repo = repo;
        }
        if let Some(asset) = asset {
            self.asset = asset;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            bail!("Repository owner must not be empty");
        }
        if self.repo.trim().is_empty() {
            bail!("Repository name must not be empty");
        }
        if self.asset.trim().is_empty() {
            bail!("Asset name must not be empty");
        }
        Ok(())
    }

    /// Output path used when the user does not provide one.
    pub fn default_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.asset)
    }

    /// Token from the config or command line, falling back to `GITHUB_TOKEN`.
    pub fn resolve_token(&self) -> Option<String> {
        self.token.clone().or_else(|| {
            std::env::var("GITHUB_TOKEN")
                .ok()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        })
    }

    /// Directory for the interactive session log file.
    pub fn default_log_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"))
            .join("tagpick")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_toml_full() -> Result<()> {
        let config = Config::from_toml_str(
            r#"
owner = "octo"
repo = "tools"
asset = "tools-linux.tar.gz"
output_dir = "./out"
token = "abc"
            "#,
        )?;
        assert_eq!(
            config,
            Config {
                owner: "octo".to_string(),
                repo: "tools".to_string(),
                asset: "tools-linux.tar.gz".to_string(),
                output_dir: PathBuf::from("./out"),
                token: Some("abc".to_string()),
            }
        );
        assert_eq!(
            config.default_output_path(),
            PathBuf::from("./out/tools-linux.tar.gz")
        );
        Ok(())
    }

    #[test]
    fn test_config_toml_empty_uses_defaults() -> Result<()> {
        let config = Config::from_toml_str("")?;
        assert_eq!(config, Config::default());
        assert_eq!(
            config.default_output_path(),
            PathBuf::from("downloads").join(DEFAULT_ASSET)
        );
        Ok(())
    }

    #[test]
    fn test_config_toml_rejects_empty_values() {
        assert!(Config::from_toml_str(r#"owner = """#).is_err());
        assert!(Config::from_toml_str(r#"asset = "  ""#).is_err());
        assert!(Config::from_toml_str("owner = 5").is_err());
    }

    #[test]
    fn test_config_load_explicit_path() -> Result<()> {
        let tmp_dir = TempDir::new()?;
        let path = tmp_dir.path().join("custom.toml");
        std::fs::write(&path, "repo = \"other\"\n")?;

        let config = Config::load(Some(&path))?;
        assert_eq!(config.repo, "other");
        assert_eq!(config.owner, DEFAULT_OWNER);

        let missing = tmp_dir.path().join("missing.toml");
        assert!(Config::load(Some(&missing)).is_err());
        Ok(())
    }

    #[test]
    fn test_config_overrides() -> Result<()> {
        let config = Config::default().with_overrides(
            Some("me".to_string()),
            None,
            Some("app.zip".to_string()),
            Some(" ".to_string()),
        )?;
        assert_eq!(config.owner, "me");
        assert_eq!(config.repo, DEFAULT_REPO);
        assert_eq!(config.asset, "app.zip");
        assert_eq!(config.token, None);

        assert!(
            Config::default()
                .with_overrides(None, Some(String::new()), None, None)
                .is_err()
        );
        Ok(())
    }
}
