//! Run command - land every labeled PR

use crate::cli::CliProgress;
use crate::cli::context::{CommandContext, RunArgs};
use crate::cli::style::{CHECK, Stylize, arrow};
use anstream::println;
use dialoguer::Confirm;
use renovate_pilot::error::{Error, Result};
use renovate_pilot::lifecycle::{LifecyclePlan, LifecycleReport, plan_lifecycle, run_lifecycle};

/// Run the lifecycle
pub async fn run_pilot(args: RunArgs, verbose: bool) -> Result<()> {
    let ctx = CommandContext::new(&args)?;
    let progress = if verbose {
        CliProgress::verbose()
    } else {
        CliProgress::compact()
    };

    println!(
        "{} {} labeled {}",
        "Landing PRs in".emphasis(),
        ctx.platform.config().to_string().accent(),
        ctx.options.label.accent()
    );

    if args.dry_run || args.confirm {
        let plans = plan_lifecycle(ctx.platform.as_ref(), &ctx.options, &progress).await?;
        report_plan(&plans);

        if args.dry_run {
            println!("{}", "Run without --dry-run to execute.".muted());
            return Ok(());
        }

        if !Confirm::new()
            .with_prompt("Proceed?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    let report = run_lifecycle(ctx.platform.as_ref(), &ctx.options, &progress).await?;
    print_summary(&report);
    Ok(())
}

/// Report what would be done (dry run / confirm preview)
fn report_plan(plans: &[LifecyclePlan]) {
    println!();
    println!("{}:", "Plan".emphasis());
    println!();

    for plan in plans {
        println!(
            "  {} {} ({} base)",
            format!("PR #{}:", plan.pr_number).accent(),
            plan.pr_title,
            plan.comparison.status.to_string().muted()
        );
        if !plan.pr_url.is_empty() {
            println!("    {}", plan.pr_url.muted());
        }
        for step in &plan.steps {
            println!("    {} {step}", arrow());
        }
    }

    println!();
    println!(
        "{}",
        "Freshness is re-checked as each PR comes up, so later steps may change.".muted()
    );
}

/// Print run summary
fn print_summary(report: &LifecycleReport) {
    println!();
    println!(
        "{} {} PR(s) merged",
        format!("{CHECK} Done:").success(),
        report.merged.len().accent()
    );

    let updated: Vec<String> = report
        .merged
        .iter()
        .filter(|o| o.update_requested)
        .map(|o| format!("#{}", o.pr_number))
        .collect();
    if !updated.is_empty() {
        println!("   Updated from base: {}", updated.join(", ").accent());
    }

    let failed_updates: Vec<String> = report
        .merged
        .iter()
        .filter(|o| o.update_failed)
        .map(|o| format!("#{}", o.pr_number))
        .collect();
    if !failed_updates.is_empty() {
        println!(
            "   {} {}",
            "Update request failed (ignored):".warn(),
            failed_updates.join(", ")
        );
    }

    if !report.filtered_out.is_empty() {
        println!(
            "   {}",
            format!("{} PR(s) without the label left alone", report.filtered_out.len()).muted()
        );
    }
}
