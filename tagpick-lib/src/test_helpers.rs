mod mock_release_source;

pub use mock_release_source::MockReleaseSource;
