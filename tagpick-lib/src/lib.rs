pub mod config;
pub mod error;
pub mod github;
pub mod jobs;
pub mod logging;
pub mod persist;
pub mod retry;
pub mod session;
pub mod source;
pub mod version;

#[cfg(test)]
pub mod test_helpers;
