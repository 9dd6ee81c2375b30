//! Terminal progress output for the lifecycle

use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use async_trait::async_trait;
use indicatif::ProgressBar;
use renovate_pilot::lifecycle::{LifecycleStage, ProgressCallback};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Prints lifecycle progress and shows a spinner while polling
pub struct CliProgress {
    /// Also print discovery and filter decisions
    verbose: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Compact output: skip per-PR discovery lines
    pub const fn compact() -> Self {
        Self {
            verbose: false,
            spinner: Mutex::new(None),
        }
    }

    /// Verbose output: include discovery and filter decisions
    pub const fn verbose() -> Self {
        Self {
            verbose: true,
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));

        let mut slot = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(spinner) {
            previous.finish_and_clear();
        }
    }

    fn finish_spinner(&self, message: String) {
        let spinner = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match spinner {
            Some(spinner) => spinner.finish_with_message(message),
            None => println!("{message}"),
        }
    }

    fn print(&self, message: &str) {
        let slot = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(spinner) => spinner.println(message),
            None => println!("{message}"),
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_stage(&self, pr_number: u64, stage: LifecycleStage) {
        let pr = format!("PR #{pr_number}").accent();
        match stage {
            LifecycleStage::Discovered => {}
            LifecycleStage::FilteredOut | LifecycleStage::Labeled => {
                if self.verbose {
                    self.print(&format!("  {pr} {}", stage.muted()));
                }
            }
            LifecycleStage::UpToDate => {
                self.print(&format!("{} {pr} is up to date", check()));
            }
            LifecycleStage::NeedsUpdate => {
                self.print(&format!("{} {pr} is not up to date", "↻".warn()));
            }
            LifecycleStage::Approved => {
                self.print(&format!("{} Approved {pr}", check()));
            }
            LifecycleStage::AwaitingChecks => {
                self.start_spinner(format!("Waiting for checks on {pr}..."));
            }
            LifecycleStage::ChecksGreen => {
                self.finish_spinner(format!("{} Checks green on {pr}", check()));
            }
            LifecycleStage::AwaitingMerge => {
                self.start_spinner(format!("Waiting for {pr} to be merged..."));
            }
            LifecycleStage::Merged => {
                self.finish_spinner(format!("{} {pr} has been merged", check()));
            }
        }
    }

    async fn on_poll(&self, pr_number: u64, attempt: u32, observed: &str) {
        let slot = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(spinner) = slot.as_ref() {
            spinner.set_message(format!(
                "Waiting on {} ({observed}, poll {attempt})",
                format!("PR #{pr_number}").accent()
            ));
        }
    }

    async fn on_message(&self, message: &str) {
        self.print(message);
    }
}
