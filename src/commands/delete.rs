//! `reslug plan-delete` and `reslug delete` commands

use std::fs;
use std::path::Path;

use chrono::Utc;

use super::dispatch::CommandContext;
use crate::cli::{Cli, DeleteArgs, IdListArgs, OutputFormat};
use reslug_core::bail_usage;
use reslug_core::collisions::CollisionQuery;
use reslug_core::deletion::{
    execute_deletion, plan_deletion, Authorization, DeletionMode, DeletionReport, DeletionRequest,
    EntryStatus,
};
use reslug_core::error::{ReslugError, Result};
use reslug_core::records::{escape_quotes, or_dash, record_fields};

/// Read ids from an id file: one per line, `#` comments and blanks skipped
fn read_ids_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        ReslugError::UsageError(format!("cannot read ids file {}: {}", path.display(), e))
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn build_request(args: &IdListArgs) -> Result<DeletionRequest> {
    let (kind_a, kind_b) = match args.kinds.as_slice() {
        [a, b] => (a, b),
        _ => bail_usage!("--kinds takes exactly two kinds"),
    };
    if kind_a == kind_b {
        bail_usage!(format!(
            "--kinds needs two different kinds (got {} twice)",
            kind_a
        ));
    }

    let mut ids = args.ids.clone();
    if let Some(path) = &args.ids_file {
        ids.extend(read_ids_file(path)?);
    }

    let request = DeletionRequest::new(ids, CollisionQuery::new(kind_a, kind_b));
    if request.ids().is_empty() {
        bail_usage!("no ids given; pass --id or --ids-file");
    }
    Ok(request)
}

pub fn execute_plan(ctx: &CommandContext, args: &IdListArgs) -> Result<()> {
    let request = build_request(args)?;
    let report = {
        let store = ctx.open_read_only()?;
        plan_deletion(&store, &request)?
    };
    write_report(ctx.cli, &report)
}

pub fn execute_delete(ctx: &CommandContext, args: &DeleteArgs) -> Result<()> {
    let request = build_request(&args.list)?;
    let authorization = Authorization::from_flag(args.authorize);

    let report = match authorization {
        Authorization::Authorized => {
            let mut store = ctx.open_writable()?;
            execute_deletion(&mut store, &request, authorization)?
        }
        Authorization::DryRun => {
            let mut store = ctx.open_read_only()?;
            execute_deletion(&mut store, &request, authorization)?
        }
    };
    write_report(ctx.cli, &report)
}

/// Print a report that came back attached to an error
pub fn output_report(cli: &Cli, report: &DeletionReport) {
    if let Err(e) = write_report(cli, report) {
        tracing::warn!(error = %e, "failed to print partial deletion report");
    }
}

fn write_report(cli: &Cli, report: &DeletionReport) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(report)?;
            if let Some(obj) = output.as_object_mut() {
                obj.insert(
                    "generated_at".to_string(),
                    serde_json::Value::String(Utc::now().to_rfc3339()),
                );
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => output_human(cli, report),
        OutputFormat::Records => output_records(report),
    }
    Ok(())
}

fn output_human(cli: &Cli, report: &DeletionReport) {
    let counts = &report.counts;
    match report.mode {
        DeletionMode::Planned => println!(
            "Plan: {} of {} requested id(s) would be deleted",
            counts.present, counts.requested
        ),
        DeletionMode::Unauthorized => {
            println!("unauthorized: nothing was deleted (re-run with --authorize)");
            println!(
                "{} of {} requested id(s) would be deleted",
                counts.present, counts.requested
            );
        }
        DeletionMode::Executed => println!(
            "Deleted {} of {} requested id(s)",
            counts.deleted, counts.requested
        ),
    }
    if let Some(query) = &report.justification {
        println!("Justification: {} collisions", query);
    }
    println!();

    for entry in &report.entries {
        let details = entry
            .record
            .as_ref()
            .map(|r| {
                format!(
                    " [{}] slug={} version={} {}",
                    r.kind,
                    or_dash(r.canonical_slug.as_deref()),
                    or_dash(r.version_ref.as_deref()),
                    or_dash(r.title.as_deref())
                )
            })
            .unwrap_or_default();
        let reason = match &entry.status {
            EntryStatus::Rejected(reason) | EntryStatus::Failed(reason) => {
                format!(" ({})", reason)
            }
            _ => String::new(),
        };
        println!(
            "  {:<9} {}{}{}",
            entry.status.to_string(),
            entry.id,
            details,
            reason
        );
    }

    // Counts and the re-verified collision total are printed even with --quiet
    if !cli.quiet {
        println!();
    }
    if report.mode.mutated() || counts.pending > 0 {
        println!(
            "Summary: {} deleted, {} not found, {} rejected, {} failed, {} pending",
            counts.deleted, counts.not_found, counts.rejected, counts.failed, counts.pending
        );
    }
    if let Some(before) = report.collisions_before {
        match report.collisions_after {
            Some(after) => println!("Collisions: {} before, {} after", before, after),
            None => println!("Collisions: {}", before),
        }
    }
}

fn output_records(report: &DeletionReport) {
    let counts = &report.counts;
    let kinds = report
        .justification
        .as_ref()
        .map(|q| q.to_string())
        .unwrap_or_else(|| "-".to_string());
    let before = report
        .collisions_before
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let after = report
        .collisions_after
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "H reslug=1 records=1 mode={} kinds={} requested={} present={} deleted={} not_found={} rejected={} failed={} pending={} collisions_before={} collisions_after={}",
        report.mode,
        kinds,
        counts.requested,
        counts.present,
        counts.deleted,
        counts.not_found,
        counts.rejected,
        counts.failed,
        counts.pending,
        before,
        after
    );
    for entry in &report.entries {
        match &entry.record {
            Some(record) => println!("R status={} {}", entry.status, record_fields(record)),
            None => println!("R status={} id={}", entry.status, entry.id),
        }
        match &entry.status {
            EntryStatus::Rejected(reason) | EntryStatus::Failed(reason) => println!(
                "D {} id={} \"{}\"",
                entry.status,
                entry.id,
                escape_quotes(reason)
            ),
            _ => {}
        }
    }
}
