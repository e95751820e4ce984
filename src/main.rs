use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use docfold::identity::ScopeIdentity;
use docfold::logging::init_logging;
use docfold::parser::parse_source;
use docfold::resolver::resolve_ranges;

/// Print the docstring fold regions of a Python source file.
///
/// Each region is reported as its scope identity plus the inclusive 1-based
/// line span of the docstring, which is exactly what an editor integration
/// needs to create and track the folds.
#[derive(Parser, Debug)]
#[command(name = "docfold", version)]
struct Args {
    /// Python source file to inspect
    file: PathBuf,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,

    /// Override log level (otherwise RUST_LOG or "info")
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Serialize)]
struct FoldRegion {
    identity: ScopeIdentity,
    start: usize,
    end: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.no_color, args.log_level.as_deref());

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let tree = parse_source(&source)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let parents = tree.parent_index();

    let mut regions: Vec<FoldRegion> = resolve_ranges(&tree)
        .into_iter()
        .map(|range| FoldRegion {
            identity: ScopeIdentity::of(range.scope, &parents),
            start: range.start,
            end: range.end,
        })
        .collect();
    regions.sort_by_key(|region| region.start);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&regions)?);
    } else {
        for region in &regions {
            println!("{}\t{}\t{}", region.start, region.end, region.identity);
        }
    }
    Ok(())
}
