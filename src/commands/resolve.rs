//! `reslug resolve` command

use super::dispatch::CommandContext;
use crate::cli::{OutputFormat, ResolveArgs};
use reslug_core::error::Result;
use reslug_core::records::{escape_quotes, or_dash, record_fields};
use reslug_core::resolve::{resolve, Resolution};

pub fn execute(ctx: &CommandContext, args: &ResolveArgs) -> Result<()> {
    let store = ctx.open_read_only()?;
    let resolution = resolve(&store, &args.slug_or_id)?;
    output_resolution(ctx, &resolution)
}

fn output_resolution(ctx: &CommandContext, resolution: &Resolution) -> Result<()> {
    match ctx.cli.format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(resolution)?;
            if let Some(obj) = output.as_object_mut() {
                obj.insert(
                    "ambiguous".to_string(),
                    serde_json::Value::Bool(resolution.is_ambiguous()),
                );
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => output_human(ctx, resolution),
        OutputFormat::Records => {
            println!(
                "H reslug=1 records=1 mode=resolve input=\"{}\" hash={} convention={} candidates={} ambiguous={}",
                escape_quotes(&resolution.input),
                if resolution.parsed.hash.is_empty() {
                    "-"
                } else {
                    &resolution.parsed.hash
                },
                resolution.parsed.convention,
                resolution.candidates.len(),
                resolution.is_ambiguous()
            );
            for record in &resolution.candidates {
                let exact = resolution.exact_matches.contains(&record.id);
                println!("R {} exact={}", record_fields(record), exact);
            }
            println!("D note \"{}\"", escape_quotes(resolution.note));
        }
    }

    Ok(())
}

fn output_human(ctx: &CommandContext, resolution: &Resolution) {
    let parsed = &resolution.parsed;
    println!(
        "Resolving '{}' (hash '{}', {} convention)",
        resolution.input, parsed.hash, parsed.convention
    );
    if !resolution.suffix_matching {
        println!("No hash fragment; only exact id/slug matches were considered.");
    }
    println!();

    if resolution.candidates.is_empty() {
        println!("No candidates found.");
    } else {
        println!("Found {} candidate(s):", resolution.candidates.len());
        for record in &resolution.candidates {
            let marker = if resolution.exact_matches.contains(&record.id) {
                "*"
            } else {
                " "
            };
            println!(
                " {} {} [{}] slug={} version={} {}",
                marker,
                record.id,
                record.kind,
                or_dash(record.canonical_slug.as_deref()),
                or_dash(record.version_ref.as_deref()),
                or_dash(record.title.as_deref())
            );
        }
    }

    if resolution.is_ambiguous() {
        println!();
        println!(
            "Ambiguous: {} records match. Review them before acting on this slug.",
            resolution.candidates.len()
        );
    }

    if !ctx.cli.quiet {
        println!();
        if !resolution.exact_matches.is_empty() {
            println!("(* exact id or slug match)");
        }
        println!("Note: {}", resolution.note);
    }
}
