//! renovate-pilot: land labeled dependency-update pull requests on GitHub
//!
//! For every open PR carrying the marker label, the lifecycle brings the
//! branch up to date, approves it, waits for checks, posts the comment that
//! triggers the downstream merge automation and waits for the merge.

pub mod error;
pub mod lifecycle;
pub mod platform;
pub mod types;
