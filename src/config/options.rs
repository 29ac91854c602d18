// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub merge: MergeOptions,
    pub dashboard: DashboardOptions,
    pub export: ExportOptions,
}

/* ---------------- Merge ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOptions {
    pub data_dir: PathBuf,
    /// Producer order: earlier sources win identity-key ties.
    pub sources: Vec<PathBuf>,
    pub master: PathBuf,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            sources: DEFAULT_SOURCES.iter().map(PathBuf::from).collect(),
            master: PathBuf::from(DEFAULT_MASTER_FILE),
        }
    }
}

impl MergeOptions {
    /// Relative names resolve against `data_dir`; absolute paths are kept.
    pub fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() { p.to_path_buf() } else { self.data_dir.join(p) }
    }

    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn master_path(&self) -> PathBuf {
        self.resolve(&self.master)
    }
}

/* ---------------- Dashboard ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardOptions {
    pub page_size: usize,
    pub top_n: usize,
    pub log_file: PathBuf,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            top_n: DEFAULT_TOP_N,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

/// Which rows the download writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportScope {
    /// Rows matching the active filters, in the current sort order.
    Filtered,
    /// The whole master table in master order.
    All,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub scope: ExportScope,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            scope: ExportScope::Filtered,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; the extension always follows `format`.
    pub fn out_path(&self) -> PathBuf {
        let stem = self.out_path.file_stem.to_string_lossy();
        self.out_path.dir.join(join!(stem, ".", self.format.ext()))
    }

    /// Parse GUI text into dir + stem. Ignores pasted extension; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }

    pub fn delim(&self) -> char {
        self.format.delim()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_EXPORT_STEM),
        }
    }
}
