// src/query.rs
//! Query engine: filter the master table and aggregate the matches.
//!
//! All predicates of a [`FilterSpec`] are optional and combine with AND.
//! A query never mutates the table; it returns row indices in master order
//! plus aggregates computed over the matching rows only.

use std::collections::{HashMap, HashSet};

use crate::config::consts::DEFAULT_TOP_N;
use crate::data::TableView;
use crate::record::NicknameRecord;
use crate::sentiment::{Sentiment, SentimentRange};
use crate::store::MasterTable;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive substring over all column values. Blank = no constraint.
    pub text: Option<String>,
    /// Allowed `Source Type` values. Empty = no constraint.
    pub source_types: HashSet<String>,
    /// Inclusive score interval. Full range = no constraint.
    pub sentiment_range: SentimentRange,
    /// Row matches if ANY of its tags is in the set. Empty = no constraint.
    pub tags: HashSet<String>,
}

impl FilterSpec {
    pub fn is_unconstrained(&self) -> bool {
        self.needle().is_none()
            && self.source_types.is_empty()
            && self.sentiment_range.is_full()
            && self.tags.is_empty()
    }

    /// Blank text is no constraint; otherwise the text is matched as typed,
    /// surrounding spaces included.
    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_lowercase)
    }
}

/// Count of one distinct `Sentiment Score` value (`None` = no score).
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreCount {
    pub score: Option<f64>,
    pub count: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregates {
    pub matched: usize,
    /// One entry per distinct score, first-encountered order.
    pub score_distribution: Vec<ScoreCount>,
    /// Positive, Neutral, Negative, then unlabelled.
    pub sentiment_breakdown: Vec<(Option<Sentiment>, usize)>,
    /// Most frequent `Specific Source Name` values, count descending,
    /// ties in first-encountered order.
    pub top_sources: Vec<(String, usize)>,
}

impl Aggregates {
    /// Share of `count` in the matched set, 0.0 when nothing matched.
    pub fn share(&self, count: usize) -> f64 {
        if self.matched == 0 { 0.0 } else { count as f64 / self.matched as f64 }
    }
}

#[derive(Clone, Debug)]
pub struct QueryResult<'a> {
    pub view: TableView<'a>,
    pub aggregates: Aggregates,
}

pub fn query<'a>(table: &'a MasterTable, spec: &FilterSpec) -> QueryResult<'a> {
    query_top_n(table, spec, DEFAULT_TOP_N)
}

pub fn query_top_n<'a>(table: &'a MasterTable, spec: &FilterSpec, top_n: usize) -> QueryResult<'a> {
    let row_ix = filter_indices(table, spec);
    let view = TableView::from_indices(table, row_ix);
    let aggregates = aggregate(view.records(), top_n);
    QueryResult { view, aggregates }
}

/// Indices of matching rows, master order.
pub fn filter_indices(table: &MasterTable, spec: &FilterSpec) -> Vec<usize> {
    if spec.is_unconstrained() {
        return (0..table.len()).collect();
    }
    let needle = spec.needle();

    table
        .records()
        .iter()
        .enumerate()
        .filter(|(ix, rec)| {
            needle.as_deref().is_none_or(|n| table.haystack(*ix).contains(n))
                && matches_source_type(rec, &spec.source_types)
                && spec.sentiment_range.contains(rec.sentiment_score)
                && matches_tags(rec, &spec.tags)
        })
        .map(|(ix, _)| ix)
        .collect()
}

fn matches_source_type(rec: &NicknameRecord, allowed: &HashSet<String>) -> bool {
    allowed.is_empty() || allowed.contains(&rec.source_type)
}

fn matches_tags(rec: &NicknameRecord, wanted: &HashSet<String>) -> bool {
    wanted.is_empty() || rec.tag_list().any(|t| wanted.contains(t))
}

/// Aggregates over the given rows. Well-defined for no rows (all empty).
pub fn aggregate<'r>(rows: impl Iterator<Item = &'r NicknameRecord>, top_n: usize) -> Aggregates {
    let mut matched = 0usize;

    let mut score_distribution: Vec<ScoreCount> = Vec::new();
    let mut score_slot: HashMap<Option<u64>, usize> = HashMap::new();

    let mut labels = [0usize; 4]; // Positive, Neutral, Negative, None

    let mut sources: Vec<(String, usize)> = Vec::new();
    let mut source_slot: HashMap<&'r str, usize> = HashMap::new();

    for rec in rows {
        matched += 1;

        let key = rec.sentiment_score.map(score_key);
        match score_slot.get(&key) {
            Some(&i) => score_distribution[i].count += 1,
            None => {
                score_slot.insert(key, score_distribution.len());
                score_distribution.push(ScoreCount { score: rec.sentiment_score, count: 1 });
            }
        }

        let li = match rec.sentiment {
            Some(Sentiment::Positive) => 0,
            Some(Sentiment::Neutral) => 1,
            Some(Sentiment::Negative) => 2,
            None => 3,
        };
        labels[li] += 1;

        let src = rec.specific_source.as_str();
        if !src.is_empty() {
            match source_slot.get(src) {
                Some(&i) => sources[i].1 += 1,
                None => {
                    source_slot.insert(src, sources.len());
                    sources.push((s!(src), 1));
                }
            }
        }
    }

    // Stable sort keeps first-encountered order among equal counts.
    sources.sort_by(|a, b| b.1.cmp(&a.1));
    sources.truncate(top_n);

    let sentiment_breakdown = vec![
        (Some(Sentiment::Positive), labels[0]),
        (Some(Sentiment::Neutral), labels[1]),
        (Some(Sentiment::Negative), labels[2]),
        (None, labels[3]),
    ];

    Aggregates { matched, score_distribution, sentiment_breakdown, top_sources: sources }
}

/// Hashable identity of a score; -0.0 and 0.0 are the same value.
fn score_key(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}
