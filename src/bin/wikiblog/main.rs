use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use spdlog::warn;

use wikiblog::config::Config;
use wikiblog::generator::{generate, GenerateOptions, Summary};
use wikiblog::logger::configure_logger;
use wikiblog::splice::SpliceMode;

use crate::config::{generate_cfg, open_config};

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "wikiblog.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. If empty, wikiblog.toml is searched next to the executable,
    /// in the current dir and in the user config dir
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Directory with the wiki pages
    #[arg(short, long)]
    scan_root: Option<PathBuf>,

    /// File receiving the blog index
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Prefix of the generated links
    #[arg(short, long)]
    base_url: Option<String>,

    /// Heading that starts the generated section
    #[arg(long)]
    sentinel: Option<String>,

    #[arg(short, long, value_enum)]
    mode: Option<SpliceMode>,

    /// Fail if the destination is not up to date. Nothing is written
    #[arg(long)]
    check: bool,

    /// Do everything but writing the destination
    #[arg(long)]
    dry_run: bool,

    /// Print the resulting document to stdout instead of writing it
    #[arg(short, long)]
    print: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Write a sample configuration (to --config-path or the user config dir) and exit
    #[arg(long)]
    generate_cfg: bool,
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(ref scan_root) = args.scan_root {
        config.paths.scan_root = scan_root.clone();
    }
    if let Some(ref destination) = args.destination {
        config.paths.destination_path = destination.clone();
    }
    if let Some(ref base_url) = args.base_url {
        config.index.base_url = base_url.clone();
    }
    if let Some(ref sentinel) = args.sentinel {
        config.index.sentinel_heading = sentinel.clone();
    }
    if let Some(mode) = args.mode {
        config.index.mode = mode;
    }
}

fn action_for(summary: &Summary, mode: SpliceMode) -> &'static str {
    match (summary.changed, summary.written, mode) {
        (false, _, _) => "Unchanged",
        (true, false, _) => "Would update",
        (true, true, SpliceMode::Section) => "Updated",
        (true, true, SpliceMode::WholeDocument) => "Recreated",
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_cfg {
        let path = generate_cfg(&args.config_path)?;
        println!("Sample config written to {}", path.display());
        return Ok(());
    }

    let mut config = open_config(args.config_path.clone())?;
    apply_overrides(&mut config, &args);
    config.index.validate()?;

    if let Err(err) = configure_logger(&config, args.verbose) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let options = GenerateOptions {
        dry_run: args.dry_run || args.check || args.print,
    };
    let summary = generate(&config, options).context("Could not update the blog index")?;

    if args.print {
        print!("{}", summary.document);
        return Ok(());
    }

    let destination = summary.destination.display();
    if args.check {
        if summary.changed {
            bail!("{} is out of date ({} blog posts found)", destination, summary.post_count);
        }
        println!("Found {} blog posts. {} is up to date.", summary.post_count, destination);
        return Ok(());
    }

    let action = action_for(&summary, config.index.mode);
    println!("Found {} blog posts. {} {}.", summary.post_count, action, destination);

    Ok(())
}
