//! Shared test helpers

mod mock_platform;

pub use mock_platform::{Call, MockPlatformService, make_pr};

use renovate_pilot::types::PlatformConfig;

/// Platform config for `acme/widgets` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        host: None,
    }
}

/// Mock service for `acme/widgets`
pub fn acme_widgets() -> MockPlatformService {
    MockPlatformService::with_config(github_config())
}
