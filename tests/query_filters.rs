// tests/query_filters.rs
use std::collections::HashSet;

use nickboard::Error;
use nickboard::query::{self, FilterSpec, ScoreCount};
use nickboard::record::NicknameRecord;
use nickboard::sentiment::{Sentiment, SentimentRange};
use nickboard::store::MasterTable;

fn rec(nick: &str, source_type: &str, source: &str, score: Option<f64>, tags: &str) -> NicknameRecord {
    NicknameRecord {
        nickname: nick.into(),
        source_type: source_type.into(),
        specific_source: source.into(),
        tags: tags.into(),
        sentiment_score: score,
        sentiment: score.map(Sentiment::bucket),
        ..Default::default()
    }
}

fn sample() -> MasterTable {
    MasterTable::new(
        vec![
            rec("Sleepy Joe", "Social Media", "r/politics", Some(-0.3), "Mean, Funny"),
            rec("Crooked Hillary", "Social Media", "Twitter", Some(-0.6), "Mean"),
            rec("The Donald", "News", "CNN", Some(0.2), "Funny"),
            rec("Uncle Joe", "Wiki", "Wikipedia", Some(0.5), "Affectionate"),
            rec("Mystery", "News", "", None, ""),
        ],
        Vec::new(),
    )
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn nicknames(table: &MasterTable, spec: &FilterSpec) -> Vec<String> {
    let res = query::query(table, spec);
    res.view.records().map(|r| r.nickname.clone()).collect()
}

#[test]
fn unconstrained_query_returns_whole_table_in_master_order() {
    let t = sample();
    let spec = FilterSpec::default();
    assert!(spec.is_unconstrained());

    let res = query::query(&t, &spec);
    assert_eq!(res.view.row_ix, vec![0, 1, 2, 3, 4]);
    assert_eq!(res.aggregates.matched, 5);
}

#[test]
fn blank_search_text_imposes_no_constraint() {
    let t = sample();
    let spec = FilterSpec { text: Some("   ".into()), ..Default::default() };
    assert!(spec.is_unconstrained());
    assert_eq!(query::filter_indices(&t, &spec).len(), 5);
}

#[test]
fn text_search_is_case_insensitive_over_all_columns() {
    let t = sample();
    let by_nick = FilterSpec { text: Some("joe".into()), ..Default::default() };
    assert_eq!(nicknames(&t, &by_nick), vec!["Sleepy Joe", "Uncle Joe"]);

    let by_source = FilterSpec { text: Some("TWITTER".into()), ..Default::default() };
    assert_eq!(nicknames(&t, &by_source), vec!["Crooked Hillary"]);

    let by_tag = FilterSpec { text: Some("affection".into()), ..Default::default() };
    assert_eq!(nicknames(&t, &by_tag), vec!["Uncle Joe"]);
}

#[test]
fn source_type_filter_keeps_only_selected_types() {
    let t = sample();
    let spec = FilterSpec { source_types: set(&["News", "Wiki"]), ..Default::default() };
    assert_eq!(nicknames(&t, &spec), vec!["The Donald", "Uncle Joe", "Mystery"]);
}

#[test]
fn narrowing_the_range_never_adds_matches() {
    let t = sample();
    let wide = FilterSpec { sentiment_range: SentimentRange::new(-0.5, 1.0).unwrap(), ..Default::default() };
    let narrow = FilterSpec { sentiment_range: SentimentRange::new(0.0, 0.3).unwrap(), ..Default::default() };

    let wide_ix: HashSet<usize> = query::filter_indices(&t, &wide).into_iter().collect();
    let narrow_ix: HashSet<usize> = query::filter_indices(&t, &narrow).into_iter().collect();

    assert!(narrow_ix.is_subset(&wide_ix));
    assert_eq!(nicknames(&t, &narrow), vec!["The Donald"]);
    // Bounds are inclusive; unscored rows fail a narrowed range.
    let edge = FilterSpec { sentiment_range: SentimentRange::new(-0.6, -0.3).unwrap(), ..Default::default() };
    assert_eq!(nicknames(&t, &edge), vec!["Sleepy Joe", "Crooked Hillary"]);
}

#[test]
fn full_range_keeps_unscored_rows() {
    let t = sample();
    let spec = FilterSpec { sentiment_range: SentimentRange::FULL, ..Default::default() };
    assert!(nicknames(&t, &spec).contains(&"Mystery".to_string()));
}

#[test]
fn tags_match_when_any_tag_is_selected() {
    let t = MasterTable::new(
        vec![
            rec("A", "", "", None, "Mean, Funny"),
            rec("B", "", "", None, ""),
        ],
        Vec::new(),
    );

    let funny = FilterSpec { tags: set(&["Funny"]), ..Default::default() };
    assert_eq!(nicknames(&t, &funny), vec!["A"]);

    let serious = FilterSpec { tags: set(&["Serious"]), ..Default::default() };
    assert!(nicknames(&t, &serious).is_empty());

    // Empty tag string never matches a non-empty selection.
    let both = FilterSpec { tags: set(&["Mean", "Serious"]), ..Default::default() };
    assert_eq!(nicknames(&t, &both), vec!["A"]);
}

#[test]
fn predicates_combine_with_and() {
    let t = sample();
    let spec = FilterSpec {
        text: Some("joe".into()),
        source_types: set(&["Social Media"]),
        sentiment_range: SentimentRange::new(-1.0, 0.0).unwrap(),
        tags: set(&["Funny"]),
    };
    assert_eq!(nicknames(&t, &spec), vec!["Sleepy Joe"]);
}

#[test]
fn malformed_range_is_rejected_or_matches_nothing() {
    match SentimentRange::new(0.5, -0.5) {
        Err(Error::MalformedFilterRange { lo, hi }) => assert_eq!((lo, hi), (0.5, -0.5)),
        other => panic!("expected MalformedFilterRange, got {other:?}"),
    }

    let t = sample();
    let spec = FilterSpec { sentiment_range: SentimentRange::unchecked(0.5, -0.5), ..Default::default() };
    let res = query::query(&t, &spec);
    assert!(res.view.is_empty());
    assert_eq!(res.aggregates.matched, 0);
}

#[test]
fn top_sources_is_limited_and_ties_keep_first_seen_order() {
    // Counts 5,4,3,3,2,2,1,1,1,1,1 over eleven sources s0..s10.
    let counts = [5usize, 4, 3, 3, 2, 2, 1, 1, 1, 1, 1];
    let mut records = Vec::new();
    for (i, n) in counts.iter().enumerate() {
        for k in 0..*n {
            records.push(rec(&format!("nick{i}-{k}"), "Forum", &format!("s{i}"), Some(0.0), ""));
        }
    }
    let t = MasterTable::new(records, Vec::new());
    let agg = query::query(&t, &FilterSpec::default()).aggregates;

    assert_eq!(agg.top_sources.len(), 10);
    let names: Vec<&str> = agg.top_sources.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(names, vec!["s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9"]);
    assert!(!names.contains(&"s10"));
    assert_eq!(agg.top_sources[0], ("s0".to_string(), 5));
    assert_eq!(agg.top_sources[9], ("s9".to_string(), 1));

    let narrow = query::query_top_n(&t, &FilterSpec::default(), 3).aggregates;
    assert_eq!(narrow.top_sources.len(), 3);
}

#[test]
fn aggregates_describe_only_the_matching_rows() {
    let t = sample();
    let spec = FilterSpec { source_types: set(&["Social Media"]), ..Default::default() };
    let agg = query::query(&t, &spec).aggregates;

    assert_eq!(agg.matched, 2);
    assert_eq!(
        agg.score_distribution,
        vec![
            ScoreCount { score: Some(-0.3), count: 1 },
            ScoreCount { score: Some(-0.6), count: 1 },
        ]
    );
    assert_eq!(agg.top_sources, vec![("r/politics".to_string(), 1), ("Twitter".to_string(), 1)]);
    assert!(agg.sentiment_breakdown.contains(&(Some(Sentiment::Negative), 2)));
    assert!((agg.share(1) - 0.5).abs() < 1e-12);
}

#[test]
fn score_distribution_groups_equal_scores_and_missing_ones() {
    let t = MasterTable::new(
        vec![
            rec("a", "", "x", Some(0.0), ""),
            rec("b", "", "x", None, ""),
            rec("c", "", "x", Some(-0.0), ""),
            rec("d", "", "x", None, ""),
        ],
        Vec::new(),
    );
    let agg = query::query(&t, &FilterSpec::default()).aggregates;
    assert_eq!(agg.score_distribution.len(), 2);
    assert_eq!(agg.score_distribution[0].count, 2);
    assert_eq!(agg.score_distribution[1], ScoreCount { score: None, count: 2 });
    assert!(agg.sentiment_breakdown.contains(&(None, 2)));
}

#[test]
fn empty_result_yields_empty_aggregates() {
    let t = sample();
    let spec = FilterSpec { text: Some("no such nickname".into()), ..Default::default() };
    let agg = query::query(&t, &spec).aggregates;

    assert_eq!(agg.matched, 0);
    assert!(agg.score_distribution.is_empty());
    assert!(agg.top_sources.is_empty());
    assert!(agg.sentiment_breakdown.iter().all(|(_, n)| *n == 0));
    assert_eq!(agg.share(0), 0.0);
}

#[test]
fn query_does_not_touch_the_table() {
    let t = sample();
    let before = t.records().to_vec();
    let spec = FilterSpec { text: Some("joe".into()), tags: set(&["Mean"]), ..Default::default() };
    let _ = query::query(&t, &spec);
    assert_eq!(t.records(), before.as_slice());
}

#[test]
fn search_text_matches_the_row_concatenation_as_typed() {
    let t = sample();
    let spaced = FilterSpec { text: Some(" donald".into()), ..Default::default() };
    assert_eq!(nicknames(&t, &spaced), vec!["The Donald"]);

    // Surrounding spaces are part of the needle.
    let padded = FilterSpec { text: Some("  donald".into()), ..Default::default() };
    assert!(!padded.is_unconstrained());
    assert!(nicknames(&t, &padded).is_empty());

    // Adjacent column values run together.
    let across = FilterSpec { text: Some("joesocial".into()), ..Default::default() };
    assert_eq!(nicknames(&t, &across), vec!["Sleepy Joe"]);
}
