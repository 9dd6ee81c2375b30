//! CLI command implementations

pub mod context;
mod progress;
mod run;
pub mod style;

pub use context::RunArgs;
pub use progress::CliProgress;
pub use run::run_pilot;
