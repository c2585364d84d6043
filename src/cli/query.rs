//! Query command implementation.
//!
//! Prints the same month-grouped listing `build` writes, without touching
//! the output directory. `--flat` drops the month sections.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};

use crate::archive::flatten;
use crate::cli::args::QueryArgs;
use crate::cli::build::collect_months;
use crate::config::SiteConfig;
use crate::generator::archive::{Archive, PostSummary, to_json};
use crate::log;

pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let formatted = render_query(args, config)?;

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        writeln!(file, "{}", formatted)?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// JSON text for the query, grouped or flat.
fn render_query(args: &QueryArgs, config: &SiteConfig) -> Result<String> {
    let months = collect_months(config)?;
    let archive = Archive::new(config, &months);
    let pretty = config.build.pretty;

    if args.flat {
        let posts: Vec<PostSummary<'_>> = flatten(archive.months);
        to_json(&posts, pretty)
    } else {
        to_json(&archive, pretty)
    }
}
