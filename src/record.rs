// src/record.rs
use std::borrow::Cow;

use chrono::NaiveDate;

use crate::schema::Column;
use crate::sentiment::Sentiment;

/// `Date of First Use`. ISO dates are parsed; anything else
/// ("2015", "mid-2016") is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FirstUse {
    #[default]
    Unknown,
    Date(NaiveDate),
    Text(String),
}

impl FirstUse {
    pub fn parse(s: &str) -> FirstUse {
        let t = s.trim();
        if t.is_empty() {
            return FirstUse::Unknown;
        }
        match NaiveDate::parse_from_str(t, "%Y-%m-%d") {
            Ok(d) => FirstUse::Date(d),
            Err(_) => {
                logd!("Record: first-use '{}' is not an ISO date, kept as text", t);
                FirstUse::Text(s!(t))
            }
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            FirstUse::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FirstUse::Unknown => Cow::Borrowed(""),
            FirstUse::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            FirstUse::Text(t) => Cow::Borrowed(t),
        }
    }
}

/// One observed nickname usage, after normalization.
///
/// Every canonical column is present (text columns may be empty; typed
/// columns use `None`/`Unknown`). Columns outside the canonical schema ride
/// along in `extras`, in source header order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NicknameRecord {
    pub nickname: String,
    pub source_type: String,
    pub specific_source: String,
    pub context: String,
    pub media_format: String,
    pub region: String,
    pub language: String,
    /// Comma-separated, as stored. See `tag_list()`.
    pub tags: String,
    pub sentiment_score: Option<f64>,
    /// Source text of the score when it does not render back from
    /// `sentiment_score` ("n/a", "1.7" clamped to 1, "0.40").
    pub score_text: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub first_use: FirstUse,
    pub popularity: Option<u8>,
    /// Source text of the popularity, same rule as `score_text`.
    pub popularity_text: Option<String>,
    pub used_by: String,
    pub extras: Vec<(String, String)>,
}

/// Duplicate detection key: (`Nickname`, `Specific Source Name`).
pub type IdentityKey<'a> = (&'a str, &'a str);

impl NicknameRecord {
    pub fn identity(&self) -> IdentityKey<'_> {
        (&self.nickname, &self.specific_source)
    }

    /// Comma-split, whitespace-trimmed, empties dropped.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        split_tags(&self.tags)
    }

    /// Textual value of a canonical column, as written to the master file.
    /// Score and popularity keep their source text; the typed values only
    /// drive filtering and sorting.
    pub fn get(&self, col: Column) -> Cow<'_, str> {
        match col {
            Column::Nickname       => Cow::Borrowed(&self.nickname),
            Column::SourceType     => Cow::Borrowed(&self.source_type),
            Column::SpecificSource => Cow::Borrowed(&self.specific_source),
            Column::Context        => Cow::Borrowed(&self.context),
            Column::MediaFormat    => Cow::Borrowed(&self.media_format),
            Column::Region         => Cow::Borrowed(&self.region),
            Column::Language       => Cow::Borrowed(&self.language),
            Column::Tags           => Cow::Borrowed(&self.tags),
            Column::SentimentScore => match (&self.score_text, self.sentiment_score) {
                (Some(t), _) => Cow::Borrowed(t.as_str()),
                (None, Some(v)) => Cow::Owned(format_score(v)),
                (None, None) => Cow::Borrowed(""),
            },
            Column::Sentiment => Cow::Borrowed(self.sentiment.map(|s| s.label()).unwrap_or("")),
            Column::FirstUse => self.first_use.to_text(),
            Column::Popularity => match (&self.popularity_text, self.popularity) {
                (Some(t), _) => Cow::Borrowed(t.as_str()),
                (None, Some(p)) => Cow::Owned(p.to_string()),
                (None, None) => Cow::Borrowed(""),
            },
            Column::UsedBy => Cow::Borrowed(&self.used_by),
        }
    }

    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extras.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Canonical columns in order, then `extra_columns` (missing → "").
    pub fn to_row(&self, extra_columns: &[String]) -> Vec<String> {
        let mut row: Vec<String> = Column::ALL.iter().map(|c| self.get(*c).into_owned()).collect();
        row.extend(extra_columns.iter().map(|name| s!(self.extra(name).unwrap_or(""))));
        row
    }
}

pub fn split_tags(tags: &str) -> impl Iterator<Item = &str> {
    tags.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Shortest form that parses back to the same value ("-0.3", "0", "0.4404").
pub fn format_score(v: f64) -> String {
    // `Display` for f64 already yields the shortest round-trip form.
    let v = if v == 0.0 { 0.0 } else { v }; // no "-0"
    v.to_string()
}
