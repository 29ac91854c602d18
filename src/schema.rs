// src/schema.rs
//! Canonical column set of a nickname record.
//!
//! The master file header is `Column::ALL` in this exact order, followed by
//! any extra (non-canonical) columns the sources carried.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Nickname,
    SourceType,
    SpecificSource,
    Context,
    MediaFormat,
    Region,
    Language,
    Tags,
    SentimentScore,
    Sentiment,
    FirstUse,
    Popularity,
    UsedBy,
}

use Column::*;

impl Column {
    pub const ALL: [Column; 13] = [
        Nickname, SourceType, SpecificSource, Context, MediaFormat, Region,
        Language, Tags, SentimentScore, Sentiment, FirstUse, Popularity, UsedBy,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn name(&self) -> &'static str {
        match self {
            Nickname       => "Nickname",
            SourceType     => "Source Type",
            SpecificSource => "Specific Source Name",
            Context        => "Context",
            MediaFormat    => "Media Format",
            Region         => "Region",
            Language       => "Language",
            Tags           => "Tags",
            SentimentScore => "Sentiment Score",
            Sentiment      => "Sentiment",
            FirstUse       => "Date of First Use",
            Popularity     => "Popularity",
            UsedBy         => "Used By",
        }
    }

    /// Position in the canonical order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Header names older scrapers wrote for the same column.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Context    => &["Context / Explanation"],
            Region     => &["Region / Country"],
            Popularity => &["Popularity (1-5)"],
            _ => &[],
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SentimentScore | Popularity)
    }

    /// Exact canonical match (trimmed, case-insensitive).
    pub fn from_name(name: &str) -> Option<Column> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|c| c.name().eq_ignore_ascii_case(name))
    }

    fn from_alias(name: &str) -> Option<Column> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.aliases().iter().any(|a| a.eq_ignore_ascii_case(name)))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical header row.
pub fn canonical_headers() -> Vec<String> {
    Column::ALL.iter().map(|c| s!(c.name())).collect()
}

/// Where each source header cell lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Canonical(Column),
    Extra(String),
}

/// Map a source header row onto canonical columns.
///
/// - canonical names match first, trimmed and case-insensitive;
/// - an alias maps only when its canonical column is not present itself;
/// - a second cell naming an already-taken column is kept as an extra;
/// - blank header cells become `Column N` (1-based position).
pub fn resolve_headers(headers: &[String]) -> Vec<Slot> {
    let direct: Vec<Option<Column>> = headers.iter().map(|h| Column::from_name(h)).collect();
    let mut taken = [false; Column::COUNT];
    for c in direct.iter().flatten() {
        taken[c.index()] = true;
    }

    let mut claimed = [false; Column::COUNT];
    let mut slots = Vec::with_capacity(headers.len());

    for (i, h) in headers.iter().enumerate() {
        let col = direct[i].or_else(|| {
            Column::from_alias(h).filter(|c| !taken[c.index()])
        });
        match col {
            Some(c) if !claimed[c.index()] => {
                claimed[c.index()] = true;
                slots.push(Slot::Canonical(c));
            }
            _ => slots.push(Slot::Extra(extra_name(h, i))),
        }
    }
    slots
}

pub fn extra_name(header: &str, position: usize) -> String {
    let h = header.trim();
    if h.is_empty() { format!("Column {}", position + 1) } else { s!(h) }
}
