// src/cli.rs
//
// The merge step:
//   merge                                  # sources/master from nickboard.toml or defaults
//   merge --data-dir data --source a.csv --source b.csv --out master.csv

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::{Config, consts::CONFIG_ENV, options::MergeOptions};
use crate::error::Result;
use crate::progress::Progress;

#[derive(Debug, Parser)]
#[command(name = "merge", version, about = "Merge per-source nickname CSVs into one master table")]
pub struct Args {
    /// Config file (defaults to ./nickboard.toml when present)
    #[arg(long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Directory relative source and output paths resolve against
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Per-source input file, in priority order (repeatable)
    #[arg(long = "source", value_name = "FILE")]
    pub sources: Vec<PathBuf>,

    /// Master file to write
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl Args {
    /// File config first, flags on top.
    pub fn merge_options(&self) -> Result<MergeOptions> {
        let mut merge = Config::load(self.config.as_deref())?.into_options().merge;
        if let Some(d) = &self.data_dir { merge.data_dir = d.clone(); }
        if !self.sources.is_empty() { merge.sources = self.sources.clone(); }
        if let Some(o) = &self.out { merge.master = o.clone(); }
        Ok(merge)
    }
}

/// Prints one line per source to stdout.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn source_done(&mut self, path: &Path, rows: usize) {
        println!("Merging: {} ({} rows)", path.display(), rows);
    }
    fn source_skipped(&mut self, path: &Path) {
        println!("Skipping missing file: {}", path.display());
    }
}

pub fn run() -> Result<()> {
    crate::log::init_stderr();
    let args = Args::parse();
    let opts = args.merge_options()?;

    let mut progress = ConsoleProgress;
    let report = crate::merge::run(&opts, Some(&mut progress))?;

    println!();
    println!("Saved master file to: {}", report.output.display());
    if report.duplicates_removed > 0 {
        println!("Duplicates removed: {}", report.duplicates_removed);
    }
    println!("Total nicknames: {}", report.total);
    Ok(())
}
