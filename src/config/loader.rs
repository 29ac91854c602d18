// src/config/loader.rs
//
// Optional `nickboard.toml`. Every key has a default, so an empty file
// (or no file at all) yields `AppOptions::default()`.
//
//   data_dir = "data"
//   sources  = ["nicknames_wiki.csv", "nicknames_media.csv", "nicknames_reddit.csv"]
//   master   = "nicknames_master.csv"
//
//   [dashboard]
//   page_size = 20
//   top_n     = 10
//   log_file  = ".store/debug.log"

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::consts::{CONFIG_ENV, CONFIG_FILE};
use super::options::{AppOptions, DashboardOptions, MergeOptions};
use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub sources: Option<Vec<PathBuf>>,
    pub master: Option<PathBuf>,
    pub dashboard: DashboardSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardSection {
    pub page_size: Option<usize>,
    pub top_n: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(origin, e.to_string()))
    }

    /// Resolve the config file:
    /// - explicit path (CLI flag or env var) must exist;
    /// - otherwise `./nickboard.toml` if present;
    /// - otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let explicit = explicit.map(Path::to_path_buf).or(from_env);

        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config(&p, "file does not exist"));
                }
                p
            }
            None => {
                let p = PathBuf::from(CONFIG_FILE);
                if !p.exists() {
                    logd!("Config: no {} found, using defaults", CONFIG_FILE);
                    return Ok(Self::default());
                }
                p
            }
        };

        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let cfg = Self::parse(&text, &path)?;
        logf!("Config: loaded {}", path.display());
        Ok(cfg)
    }

    pub fn into_options(self) -> AppOptions {
        let mut opts = AppOptions::default();
        apply_merge(&mut opts.merge, self.data_dir, self.sources, self.master);
        apply_dashboard(&mut opts.dashboard, self.dashboard);
        opts
    }
}

fn apply_merge(
    merge: &mut MergeOptions,
    data_dir: Option<PathBuf>,
    sources: Option<Vec<PathBuf>>,
    master: Option<PathBuf>,
) {
    if let Some(d) = data_dir { merge.data_dir = d; }
    if let Some(s) = sources { merge.sources = s; }
    if let Some(m) = master { merge.master = m; }
}

fn apply_dashboard(dash: &mut DashboardOptions, sec: DashboardSection) {
    // Zero keeps the default.
    if let Some(n) = sec.page_size.filter(|&n| n > 0) { dash.page_size = n; }
    if let Some(n) = sec.top_n.filter(|&n| n > 0) { dash.top_n = n; }
    if let Some(p) = sec.log_file { dash.log_file = p; }
}
