//! Repository reference parsing

use crate::error::{Error, Result};
use crate::types::PlatformConfig;

/// Parse an `owner/name` repository reference
///
/// Exactly two non-empty, `/`-separated parts are accepted. Surrounding
/// whitespace is ignored.
pub fn parse_repo_spec(spec: &str, host: Option<String>) -> Result<PlatformConfig> {
    let parts: Vec<&str> = spec.trim().split('/').collect();

    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(PlatformConfig {
            owner: (*owner).to_string(),
            repo: (*repo).to_string(),
            host,
        }),
        _ => Err(Error::Config(format!(
            "repository must be in the form \"owner/name\", got \"{spec}\""
        ))),
    }
}
