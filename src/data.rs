// src/data.rs
//
// View-layer helpers over the master table.
//
// - TableView: zero-copy projection (row indices into a `MasterTable`),
//              produced by `query::query` and consumed by the table widget,
//              the charts and the export path.
// - SortSpec:  stable column sort applied to a view's indices.
// - Pagination: page math for the table widget.

use std::cmp::Ordering;

use crate::record::{FirstUse, NicknameRecord};
use crate::schema::Column;
use crate::store::MasterTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(column: Column) -> Self { Self { column, order: SortOrder::Ascending } }
    pub fn desc(column: Column) -> Self { Self { column, order: SortOrder::Descending } }

    /// Header click cycle: none → ascending → descending → none.
    pub fn cycle(current: Option<SortSpec>, column: Column) -> Option<SortSpec> {
        match current {
            Some(s) if s.column == column => match s.order {
                SortOrder::Ascending => Some(Self::desc(column)),
                SortOrder::Descending => None,
            },
            _ => Some(Self::asc(column)),
        }
    }
}

/// Compare two records on one column. Empty/unknown values sort last in
/// ascending order.
pub fn compare(a: &NicknameRecord, b: &NicknameRecord, col: Column) -> Ordering {
    match col {
        Column::SentimentScore => cmp_missing_last(a.sentiment_score, b.sentiment_score, |x, y| x.total_cmp(y)),
        Column::Popularity => cmp_missing_last(a.popularity, b.popularity, |x, y| x.cmp(y)),
        Column::Sentiment => cmp_missing_last(a.sentiment, b.sentiment, |x, y| x.cmp(y)),
        Column::FirstUse => cmp_first_use(&a.first_use, &b.first_use),
        _ => cmp_text(&a.get(col), &b.get(col)),
    }
}

fn cmp_missing_last<T>(a: Option<T>, b: Option<T>, f: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => f(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Dates first (chronological), then free-text dates, then unknown.
fn cmp_first_use(a: &FirstUse, b: &FirstUse) -> Ordering {
    fn rank(f: &FirstUse) -> u8 {
        match f {
            FirstUse::Date(_) => 0,
            FirstUse::Text(_) => 1,
            FirstUse::Unknown => 2,
        }
    }
    match (a, b) {
        (FirstUse::Date(x), FirstUse::Date(y)) => x.cmp(y),
        (FirstUse::Text(x), FirstUse::Text(y)) => cmp_text(x, y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Zero-copy filtered view for display/export.
/// Holds a list of row indexes into the master table.
#[derive(Clone, Debug)]
pub struct TableView<'a> {
    /// Positions of kept rows in the master table
    pub row_ix: Vec<usize>,
    table: &'a MasterTable,
}

impl<'a> TableView<'a> {
    pub fn from_indices(table: &'a MasterTable, row_ix: Vec<usize>) -> Self {
        Self { row_ix, table }
    }

    /// Every row, master order.
    pub fn all(table: &'a MasterTable) -> Self {
        Self { row_ix: (0..table.len()).collect(), table }
    }

    pub fn table(&self) -> &'a MasterTable { self.table }
    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    /// Borrow a single record by projected index (no cloning).
    pub fn record(&self, i: usize) -> Option<&'a NicknameRecord> {
        self.row_ix.get(i).and_then(|&ix| self.table.record(ix))
    }

    pub fn records(&self) -> impl Iterator<Item = &'a NicknameRecord> + '_ {
        self.row_ix.iter().filter_map(|&ix| self.table.record(ix))
    }

    /// Stable: equal keys keep their master order.
    pub fn sort(&mut self, spec: SortSpec) {
        let table = self.table;
        self.row_ix.sort_by(|&a, &b| {
            let (ra, rb) = (&table.records()[a], &table.records()[b]);
            let ord = compare(ra, rb, spec.column);
            match spec.order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    /// Materialize owned rows (canonical + extra columns) for export/copy.
    pub fn to_owned_rows(&self) -> Vec<Vec<String>> {
        self.row_ix.iter().filter_map(|&ix| self.table.row(ix)).collect()
    }
}

/// Pagination metadata for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages (at least 1, even for no rows)
    pub total_pages: usize,
    /// Index of the first row on this page
    pub offset: usize,
    /// Rows on this page
    pub len: usize,
}

/// Clamp `requested_page` into `[1, total_pages]` and compute the slice.
pub fn paginate(total_rows: usize, page_size: usize, requested_page: usize) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = total_rows.div_ceil(page_size).max(1);
    let page = requested_page.clamp(1, total_pages);
    let offset = (page - 1) * page_size;
    let len = total_rows.saturating_sub(offset).min(page_size);
    Pagination { page, total_pages, offset, len }
}
