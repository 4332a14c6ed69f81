use anyhow::Result;
use std::fmt;
use std::path::Path;

/// A GitHub repository, `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into().trim().to_string(),
            name: name.into().trim().to_string(),
        }
    }

    pub fn git_remote_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.name)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A release of a repository, identified by its raw tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRef {
    pub repository: Repository,
    pub tag: String,
}

/// Where tags come from and where release assets are downloaded from.
///
/// Both operations stop when their future is dropped, which is how a
/// cancelled task abandons its I/O.
pub trait ReleaseSource {
    /// Lists the tag names of `repository`.
    fn list_tags(
        &self,
        repository: &Repository,
        token: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Downloads the asset named `asset_name` of `release` to `destination`.
    ///
    /// The destination is either fully written or left untouched.
    fn download_asset(
        &self,
        release: &ReleaseRef,
        asset_name: &str,
        destination: &Path,
        token: Option<&str>,
    ) -> impl Future<Output = Result<()>> + Send;
}
