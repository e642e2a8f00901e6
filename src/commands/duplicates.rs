//! `reslug duplicates` command

use super::dispatch::CommandContext;
use crate::cli::{DuplicatesArgs, OutputFormat};
use reslug_core::collisions::find_kind_duplicates;
use reslug_core::error::Result;
use reslug_core::records::{or_dash, quoted, record_fields};

pub fn execute(ctx: &CommandContext, args: &DuplicatesArgs) -> Result<()> {
    let groups = {
        let store = ctx.open_read_only()?;
        find_kind_duplicates(&store, &args.kind)?
    };

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "kind": args.kind,
                "total": groups.len(),
                "groups": groups,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if groups.is_empty() {
                if !ctx.cli.quiet {
                    println!("No duplicate slugs among {} records", args.kind);
                }
                return Ok(());
            }

            println!(
                "Found {} slug(s) held by more than one {} record:",
                groups.len(),
                args.kind
            );
            for group in &groups {
                println!();
                println!("  {} ({} records)", group.slug, group.records.len());
                for record in &group.records {
                    println!(
                        "    {} version={} {}",
                        record.id,
                        or_dash(record.version_ref.as_deref()),
                        or_dash(record.title.as_deref())
                    );
                }
            }
        }
        OutputFormat::Records => {
            println!(
                "H reslug=1 records=1 mode=duplicates kind={} groups={}",
                args.kind,
                groups.len()
            );
            for group in &groups {
                println!(
                    "C slug={} count={}",
                    quoted(Some(group.slug.as_str())),
                    group.records.len()
                );
                for record in &group.records {
                    println!("R {}", record_fields(record));
                }
            }
        }
    }

    Ok(())
}
