// src/store.rs
//
// The master table: one deduplicated, normalized snapshot, read-only once
// built. Cloning a `MasterTable` clones an `Arc`, so the dashboard and any
// request handler can share it freely; reloading builds a new table with a
// higher version instead of mutating the old one.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    csv,
    error::{Error, Result},
    file,
    normalize,
    record::NicknameRecord,
    schema,
};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
struct TableInner {
    version: u64,
    extra_columns: Vec<String>,
    records: Vec<NicknameRecord>,
    /// Lowercased concatenation of every column value, one per record.
    haystacks: Vec<String>,
    source_types: Vec<String>,
    tags: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct MasterTable {
    inner: Arc<TableInner>,
}

impl Default for MasterTable {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl MasterTable {
    pub fn new(records: Vec<NicknameRecord>, extra_columns: Vec<String>) -> Self {
        let haystacks = records.iter().map(|r| haystack(r, &extra_columns)).collect();

        let mut source_types: Vec<String> = Vec::new();
        let mut tags: Vec<String> = Vec::new();
        for r in &records {
            if !r.source_type.is_empty() && !source_types.contains(&r.source_type) {
                source_types.push(r.source_type.clone());
            }
            for t in r.tag_list() {
                if !tags.iter().any(|x| x == t) {
                    tags.push(s!(t));
                }
            }
        }

        Self {
            inner: Arc::new(TableInner {
                version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
                extra_columns,
                records,
                haystacks,
                source_types,
                tags,
            }),
        }
    }

    pub fn version(&self) -> u64 { self.inner.version }
    pub fn records(&self) -> &[NicknameRecord] { &self.inner.records }
    pub fn record(&self, ix: usize) -> Option<&NicknameRecord> { self.inner.records.get(ix) }
    pub fn len(&self) -> usize { self.inner.records.len() }
    pub fn is_empty(&self) -> bool { self.inner.records.is_empty() }
    pub fn extra_columns(&self) -> &[String] { &self.inner.extra_columns }

    /// Distinct `Source Type` values, first-seen order.
    pub fn source_types(&self) -> &[String] { &self.inner.source_types }

    /// Distinct tags, first-seen order.
    pub fn tags(&self) -> &[String] { &self.inner.tags }

    pub(crate) fn haystack(&self, ix: usize) -> &str {
        &self.inner.haystacks[ix]
    }

    /// Canonical header followed by the extra columns.
    pub fn headers(&self) -> Vec<String> {
        let mut h = schema::canonical_headers();
        h.extend(self.inner.extra_columns.iter().cloned());
        h
    }

    pub fn row(&self, ix: usize) -> Option<Vec<String>> {
        self.record(ix).map(|r| r.to_row(self.extra_columns()))
    }

    pub fn same_snapshot(&self, other: &MasterTable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn haystack(r: &NicknameRecord, extra_columns: &[String]) -> String {
    r.to_row(extra_columns).concat().to_lowercase()
}

/* ---------------- Master file I/O ---------------- */

/// Render the master file contents (header + all rows, CSV).
pub fn to_csv_string(table: &MasterTable) -> String {
    let rows: Vec<Vec<String>> = (0..table.len()).filter_map(|i| table.row(i)).collect();
    let headers = table.headers();
    csv::rows_to_string(Some(&headers), &rows, ',')
}

/// Replace the snapshot at `path` (never appends). Atomic: a failed write
/// leaves the previous snapshot untouched.
pub fn save_master(path: &Path, table: &MasterTable) -> Result<()> {
    file::write_atomic(path, to_csv_string(table).as_bytes())?;
    logf!("Store: saved master ({} rows) → {}", table.len(), path.display());
    Ok(())
}

pub fn load_master(path: &Path) -> Result<MasterTable> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse_master(&text, path))
}

fn parse_master(text: &str, path: &Path) -> MasterTable {
    let (headers, rows) = csv::parse_table(text, ',');
    let (records, extras) = normalize::normalize_table(&headers, &rows);
    let table = MasterTable::new(records, extras);
    logf!(
        "Store: loaded master v{} (rows={}, extra columns={}) from {}",
        table.version(),
        table.len(),
        table.extra_columns().len(),
        path.display()
    );
    table
}

/// Serve-time load: a missing master is `None`, not an error. A master that
/// exists but cannot be read still is.
pub fn load_master_if_present(path: &Path) -> Result<Option<MasterTable>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(parse_master(&text, path))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logw!("Store: no master table at {}", path.display());
            Ok(None)
        }
        Err(e) => Err(Error::io(path, e)),
    }
}
