// src/normalize.rs
//! Schema normalizer: every row leaving here carries the full canonical
//! column set. Missing columns default to empty; unknown columns pass through.
//! Nothing in this module fails: absence is not an error.

use crate::record::{FirstUse, NicknameRecord, format_score};
use crate::schema::{self, Column, Slot};
use crate::sentiment::{self, Sentiment};

/// A record as a source file presents it: ordered (column name, value) pairs.
pub type RawRecord = Vec<(String, String)>;

/// Map-level normalization: canonical columns first (in canonical order,
/// `""` where absent), then every non-canonical column unchanged.
pub fn fill_missing(record: RawRecord) -> RawRecord {
    let headers: Vec<String> = record.iter().map(|(k, _)| k.clone()).collect();
    let slots = schema::resolve_headers(&headers);

    let mut canonical: Vec<Option<String>> = vec![None; Column::COUNT];
    let mut extras = Vec::new();
    for (slot, (_, value)) in slots.into_iter().zip(record) {
        match slot {
            Slot::Canonical(c) => canonical[c.index()] = Some(value),
            Slot::Extra(name) => extras.push((name, value)),
        }
    }

    let mut out: RawRecord = Column::ALL
        .iter()
        .zip(canonical)
        .map(|(c, v)| (s!(c.name()), v.unwrap_or_default()))
        .collect();
    out.extend(extras);
    out
}

/// Header row → slots, with a pass over the row width so surplus cells
/// (rows longer than the header) get a synthetic `Column N` slot.
pub struct RowShape {
    slots: Vec<Slot>,
}

impl RowShape {
    pub fn new(headers: &[String]) -> Self {
        Self { slots: schema::resolve_headers(headers) }
    }

    fn slot(&self, i: usize) -> Slot {
        self.slots
            .get(i)
            .cloned()
            .unwrap_or_else(|| Slot::Extra(schema::extra_name("", i)))
    }

    /// Extra column names in header order.
    pub fn extra_columns(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|s| match s {
            Slot::Extra(n) => Some(n.as_str()),
            Slot::Canonical(_) => None,
        })
    }

    /// Build a typed record from one data row. Short rows are padded.
    pub fn normalize(&self, row: &[String]) -> NicknameRecord {
        let mut rec = NicknameRecord::default();
        let mut sentiment_label = None;

        let width = row.len().max(self.slots.len());
        for i in 0..width {
            let value = row.get(i).map(String::as_str).unwrap_or("");
            match self.slot(i) {
                Slot::Canonical(c) => set_field(&mut rec, c, value, &mut sentiment_label),
                Slot::Extra(name) => {
                    // Padding cells past the end of the row only matter for declared columns.
                    if i < self.slots.len() || !value.is_empty() {
                        rec.extras.push((name, s!(value)));
                    }
                }
            }
        }

        rec.sentiment = match rec.sentiment_score {
            Some(score) => {
                let derived = Sentiment::bucket(score);
                if let Some(given) = sentiment_label {
                    if given != derived {
                        logd!(
                            "Normalize: '{}' label {} disagrees with score {}; using {}",
                            rec.nickname, given, score, derived
                        );
                    }
                }
                Some(derived)
            }
            None => sentiment_label,
        };
        rec
    }
}

fn set_field(rec: &mut NicknameRecord, col: Column, value: &str, label: &mut Option<Sentiment>) {
    match col {
        Column::Nickname       => rec.nickname = s!(value),
        Column::SourceType     => rec.source_type = s!(value),
        Column::SpecificSource => rec.specific_source = s!(value),
        Column::Context        => rec.context = s!(value),
        Column::MediaFormat    => rec.media_format = s!(value),
        Column::Region         => rec.region = s!(value),
        Column::Language       => rec.language = s!(value),
        Column::Tags           => rec.tags = s!(value),
        Column::UsedBy         => rec.used_by = s!(value),
        Column::SentimentScore => {
            rec.sentiment_score = parse_score(value);
            rec.score_text = source_text(value, rec.sentiment_score.map(format_score));
        }
        Column::Sentiment      => {
            *label = Sentiment::parse(value);
            if label.is_none() && !value.trim().is_empty() {
                logd!("Normalize: unknown sentiment label '{}'", value);
            }
        }
        Column::FirstUse   => rec.first_use = FirstUse::parse(value),
        Column::Popularity => {
            rec.popularity = parse_popularity(value);
            rec.popularity_text = source_text(value, rec.popularity.map(|p| p.to_string()));
        }
    }
}

/// The cell text, unless the typed value already renders back to it.
fn source_text(value: &str, rendered: Option<String>) -> Option<String> {
    match rendered {
        Some(r) if r == value => None,
        None if value.is_empty() => None,
        _ => Some(s!(value)),
    }
}

/// Empty → None. Unparseable → None (logged). Out of range → clamped.
/// The cell text itself is kept on the record; see `NicknameRecord::get`.
pub fn parse_score(value: &str) -> Option<f64> {
    let t = value.trim();
    if t.is_empty() {
        return None;
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => {
            let c = sentiment::clamp_score(v);
            if c != v {
                logd!("Normalize: score {} clamped to {}", v, c);
            }
            Some(c)
        }
        _ => {
            logw!("Normalize: unparseable sentiment score '{}'", t);
            None
        }
    }
}

/// Small integer rating; "3" and "3.0" both read as 3.
pub fn parse_popularity(value: &str) -> Option<u8> {
    let t = value.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(n) = t.parse::<u8>() {
        return Some(n);
    }
    match t.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && (0.0..=255.0).contains(&v) => Some(v as u8),
        _ => {
            logw!("Normalize: unparseable popularity '{}'", t);
            None
        }
    }
}

/// Normalize a whole parsed table. Returns the records and the extra
/// column names of this table in header order.
pub fn normalize_table(headers: &[String], rows: &[Vec<String>]) -> (Vec<NicknameRecord>, Vec<String>) {
    let shape = RowShape::new(headers);
    let mut extras: Vec<String> = shape.extra_columns().map(String::from).collect();

    let records: Vec<NicknameRecord> = rows.iter().map(|r| shape.normalize(r)).collect();

    // Surplus cells beyond the header width introduce extra columns too.
    for rec in &records {
        for (name, _) in &rec.extras {
            if !extras.contains(name) {
                extras.push(name.clone());
            }
        }
    }
    (records, extras)
}
