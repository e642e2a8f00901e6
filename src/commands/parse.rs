//! `reslug parse` command

use crate::cli::{Cli, OutputFormat};
use reslug_core::error::Result;
use reslug_core::records::{escape_quotes, or_dash, quoted};
use reslug_core::slug;

/// Split a slug and print its parts. Runs without loading any config.
pub fn execute(cli: &Cli, input: &str) -> Result<()> {
    let parsed = slug::parse(input);

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input": input,
                "base": parsed.base,
                "hash": parsed.hash,
                "convention": parsed.convention,
                "suffix_matching": parsed.has_fragment(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("input:      {}", input);
            println!("base:       {}", or_dash(parsed.base.as_deref()));
            println!("hash:       {}", parsed.hash);
            println!("convention: {}", parsed.convention);
            if !parsed.has_fragment() && !cli.quiet {
                println!();
                println!("No hash fragment: only exact id/slug matches will be considered.");
            }
        }
        OutputFormat::Records => {
            println!(
                "H reslug=1 records=1 mode=parse input=\"{}\" base={} hash={} convention={}",
                escape_quotes(input),
                quoted(parsed.base.as_deref()),
                if parsed.hash.is_empty() { "-" } else { &parsed.hash },
                parsed.convention
            );
        }
    }

    Ok(())
}
