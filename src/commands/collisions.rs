//! `reslug collisions` command

use serde::Serialize;

use super::dispatch::CommandContext;
use crate::cli::{CollisionsArgs, OutputFormat};
use reslug_core::collisions::{stale_ids, CollisionQuery, StaleSelection};
use reslug_core::error::Result;
use reslug_core::record::{Collision, ContentRecord};
use reslug_core::records::{or_dash, quoted, record_fields};

#[derive(Serialize)]
struct CollisionListing<'a> {
    query: &'a CollisionQuery,
    total: usize,
    shown: usize,
    collisions: &'a [Collision],
}

pub fn execute(ctx: &CommandContext, args: &CollisionsArgs) -> Result<()> {
    let query = CollisionQuery::new(&args.kind_a, &args.kind_b);
    let collisions = {
        let store = ctx.open_read_only()?;
        query.run(&store)?
    };

    if args.stale_ids {
        output_stale_ids(ctx, &query, &collisions, &stale_ids(&collisions))
    } else {
        output_collisions(ctx, args, &query, &collisions)
    }
}

fn output_collisions(
    ctx: &CommandContext,
    args: &CollisionsArgs,
    query: &CollisionQuery,
    collisions: &[Collision],
) -> Result<()> {
    let total = collisions.len();

    match ctx.cli.format {
        OutputFormat::Json => {
            let shown = &collisions[..args.limit.unwrap_or(total).min(total)];
            let listing = CollisionListing {
                query,
                total,
                shown: shown.len(),
                collisions: shown,
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Human => {
            let limit = args.limit.unwrap_or(ctx.config.display.sample_limit);
            let shown = &collisions[..limit.min(total)];

            if total == 0 {
                println!("No collisions between {} and {}", query.kind_a, query.kind_b);
                return Ok(());
            }

            println!(
                "Found {} collision(s) between {} and {}:",
                total, query.kind_a, query.kind_b
            );
            println!();
            for collision in shown {
                println!("  {}", collision.slug);
                print_side(&collision.a, collision.stale_side());
                print_side(&collision.b, collision.stale_side());
            }

            if shown.len() < total {
                println!();
                println!(
                    "Showing {} of {} (use --limit to see more)",
                    shown.len(),
                    total
                );
            }
        }
        OutputFormat::Records => {
            let shown = &collisions[..args.limit.unwrap_or(total).min(total)];
            println!(
                "H reslug=1 records=1 mode=collisions kinds={} total={} shown={}",
                query,
                total,
                shown.len()
            );
            for collision in shown {
                println!(
                    "C slug={} a={} b={}",
                    quoted(Some(collision.slug.as_str())),
                    collision.a.id,
                    collision.b.id
                );
                println!("R {}", record_fields(&collision.a));
                println!("R {}", record_fields(&collision.b));
            }
        }
    }

    Ok(())
}

fn print_side(record: &ContentRecord, stale: Option<&ContentRecord>) {
    let stale_marker = match stale {
        Some(s) if s.id == record.id => " (stale)",
        _ => "",
    };
    println!(
        "    {} [{}] version={} {}{}",
        record.id,
        record.kind,
        or_dash(record.version_ref.as_deref()),
        or_dash(record.title.as_deref()),
        stale_marker
    );
}

/// Stale ids go to stdout one per line so the output can be reviewed and
/// handed to `--ids-file`; summary lines are `#` comments.
fn output_stale_ids(
    ctx: &CommandContext,
    query: &CollisionQuery,
    collisions: &[Collision],
    selection: &StaleSelection,
) -> Result<()> {
    match ctx.cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "query": query,
                "total": collisions.len(),
                "ids": selection.ids,
                "undecided": selection.undecided,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!(
                    "# {} stale id(s) from {} {} collision(s)",
                    selection.ids.len(),
                    collisions.len(),
                    query
                );
                if selection.undecided > 0 {
                    println!(
                        "# {} collision(s) undecided (both or neither side migrated); review manually",
                        selection.undecided
                    );
                }
            }
            for id in &selection.ids {
                println!("{}", id);
            }
        }
        OutputFormat::Records => {
            println!(
                "H reslug=1 records=1 mode=stale-ids kinds={} total={} ids={} undecided={}",
                query,
                collisions.len(),
                selection.ids.len(),
                selection.undecided
            );
            for id in &selection.ids {
                println!("R id={}", id);
            }
        }
    }

    Ok(())
}
