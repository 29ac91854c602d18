// src/merge.rs
//! Merger: read per-source files in producer order, normalize, concatenate,
//! drop later duplicates of an identity key, write the master snapshot.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{
    config::options::MergeOptions,
    csv,
    error::{Error, Result},
    normalize,
    progress::Progress,
    record::NicknameRecord,
    store::{self, MasterTable},
};

/// One producer's normalized records.
#[derive(Clone, Debug, Default)]
pub struct SourceTable {
    pub path: PathBuf,
    pub records: Vec<NicknameRecord>,
    pub extra_columns: Vec<String>,
}

/// Read one per-source file. First row is the header.
pub fn read_source(path: &Path) -> Result<SourceTable> {
    // Only a genuinely absent file is skippable; any other failure aborts.
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingSourceFile(path.to_path_buf()),
        _ => Error::io(path, e),
    })?;
    let (headers, rows) = csv::parse_table(&text, ',');
    let (records, extra_columns) = normalize::normalize_table(&headers, &rows);
    logd!(
        "Merge: read {} (rows={}, headers={}, extras={})",
        path.display(), records.len(), headers.len(), extra_columns.len()
    );
    Ok(SourceTable { path: path.to_path_buf(), records, extra_columns })
}

/// Keep the first record per (`Nickname`, `Specific Source Name`), scanning
/// in input order. Later records with a seen key are dropped.
pub fn dedup_first_wins(records: Vec<NicknameRecord>) -> Vec<NicknameRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert((r.nickname.clone(), r.specific_source.clone())))
        .collect()
}

/// Concatenate sources in order, dedup, and build the table. The union of
/// extra columns keeps first-seen order across sources.
pub fn merge_tables(sources: Vec<SourceTable>) -> (MasterTable, usize) {
    let mut extras: Vec<String> = Vec::new();
    let mut all: Vec<NicknameRecord> = Vec::new();

    for src in sources {
        for name in src.extra_columns {
            if !extras.contains(&name) {
                extras.push(name);
            }
        }
        all.extend(src.records);
    }

    let before = all.len();
    let kept = dedup_first_wins(all);
    let removed = before - kept.len();
    (MasterTable::new(kept, extras), removed)
}

#[derive(Clone, Debug, Default)]
pub struct MergeReport {
    /// (path, rows read) per merged source, producer order
    pub merged: Vec<(PathBuf, usize)>,
    pub skipped: Vec<PathBuf>,
    pub duplicates_removed: usize,
    pub total: usize,
    pub output: PathBuf,
}

/// The merge step. Missing sources are skipped with a diagnostic; any other
/// I/O failure aborts before the master file is touched.
pub fn run(opts: &MergeOptions, mut progress: Option<&mut dyn Progress>) -> Result<MergeReport> {
    let paths = opts.source_paths();
    let output = opts.master_path();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(paths.len());
    }

    let mut report = MergeReport { output: output.clone(), ..MergeReport::default() };
    let mut tables = Vec::with_capacity(paths.len());

    for path in &paths {
        match read_source(path) {
            Ok(t) => {
                logf!("Merge: merging {} ({} rows)", path.display(), t.records.len());
                if let Some(p) = progress.as_deref_mut() {
                    p.source_done(path, t.records.len());
                }
                report.merged.push((path.clone(), t.records.len()));
                tables.push(t);
            }
            Err(Error::MissingSourceFile(missing)) => {
                logw!("Merge: skipping missing file {}", missing.display());
                if let Some(p) = progress.as_deref_mut() {
                    p.source_skipped(&missing);
                }
                report.skipped.push(missing);
            }
            Err(e) => {
                loge!("Merge: aborted: {}", e);
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Aborted, master file left unchanged: {e}"));
                    p.finish();
                }
                return Err(e);
            }
        }
    }

    let (table, removed) = merge_tables(tables);
    report.duplicates_removed = removed;
    report.total = table.len();

    let saved = store::save_master(&output, &table);
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    saved?;

    logf!(
        "Merge: done total={} duplicates_removed={} skipped={} → {}",
        report.total, report.duplicates_removed, report.skipped.len(), output.display()
    );
    Ok(report)
}
