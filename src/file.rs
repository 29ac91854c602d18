// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::{ExportOptions, ExportScope};
use crate::csv::rows_to_string;
use crate::data::TableView;
use crate::error::{Error, Result};
use crate::store::MasterTable;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// `<dir>/.<name>.tmp` next to the target, so the rename stays on one filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!("out"));
    path.with_file_name(join!(".", &name, ".tmp"))
}

/// Write `bytes` to `path` via a sibling temp file + rename.
/// Either the new contents land completely or `path` is left as it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let tmp = temp_sibling(path);

    let written = (|| -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(&tmp)?);
        out.write_all(bytes)?;
        out.flush()?;
        out.get_ref().sync_all()
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(Error::io(&tmp, e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::io(path, e));
    }
    Ok(())
}

/// Rows the export would write, honoring `ExportScope`.
/// `view` is the active (filtered, sorted) view of `table`.
pub fn export_rows(export: &ExportOptions, table: &MasterTable, view: &TableView<'_>) -> Vec<Vec<String>> {
    match export.scope {
        ExportScope::Filtered => view.to_owned_rows(),
        ExportScope::All => TableView::all(table).to_owned_rows(),
    }
}

/// Full export string (Copy/Export) from a view and the export toggles.
pub fn to_export_string(export: &ExportOptions, table: &MasterTable, view: &TableView<'_>) -> String {
    let rows = export_rows(export, table, view);
    let headers = table.headers();
    let h = export.include_headers.then_some(headers.as_slice());
    rows_to_string(h, &rows, export.delim())
}

/// Write the export file described by `export`. Returns the path written to.
pub fn write_export(export: &ExportOptions, table: &MasterTable, view: &TableView<'_>) -> Result<PathBuf> {
    let path = export.out_path();
    let contents = to_export_string(export, table, view);
    write_atomic(&path, contents.as_bytes())?;
    Ok(path)
}
