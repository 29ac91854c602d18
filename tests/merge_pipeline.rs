// tests/merge_pipeline.rs
use std::fs;
use std::path::{Path, PathBuf};

use nickboard::config::options::MergeOptions;
use nickboard::merge::{self, SourceTable};
use nickboard::progress::Progress;
use nickboard::schema::{self, Column};
use nickboard::store;
use nickboard::Error;

const HEADER: &str = "Nickname,Specific Source Name,Sentiment Score\n";

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, body).unwrap();
    p
}

fn opts(dir: &Path, sources: &[&str]) -> MergeOptions {
    MergeOptions {
        data_dir: dir.to_path_buf(),
        sources: sources.iter().map(PathBuf::from).collect(),
        master: PathBuf::from("master.csv"),
    }
}

/// Records progress callbacks for assertions.
#[derive(Default)]
struct Recorder {
    begun: Option<usize>,
    done: Vec<(PathBuf, usize)>,
    skipped: Vec<PathBuf>,
    lines: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.begun = Some(total); }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn source_done(&mut self, path: &Path, rows: usize) { self.done.push((path.to_path_buf(), rows)); }
    fn source_skipped(&mut self, path: &Path) { self.skipped.push(path.to_path_buf()); }
    fn finish(&mut self) { self.finished = true; }
}

fn write_example_sources(dir: &Path) {
    write(dir, "a.csv", &format!("{HEADER}Sleepy Joe,TV,-0.3\n"));
    write(dir, "b.csv", &format!("{HEADER}Sleepy Joe,TV,0.0\nCrooked Hillary,Twitter,-0.6\n"));
}

#[test]
fn first_source_wins_on_identity_key() {
    let tmp = tempfile::tempdir().unwrap();
    write_example_sources(tmp.path());

    let mut rec = Recorder::default();
    let report = merge::run(&opts(tmp.path(), &["a.csv", "b.csv"]), Some(&mut rec)).unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.duplicates_removed, 1);
    assert!(report.skipped.is_empty());
    assert_eq!(rec.begun, Some(2));
    assert_eq!(rec.done.iter().map(|(_, n)| *n).collect::<Vec<_>>(), vec![1, 2]);
    assert!(rec.finished);

    let master = store::load_master(&report.output).unwrap();
    assert_eq!(master.len(), 2);
    // Every canonical column present on every row.
    let text = fs::read_to_string(&report.output).unwrap();
    let (header, rows) = nickboard::csv::parse_table(&text, ',');
    assert_eq!(header, schema::canonical_headers());
    assert!(rows.iter().all(|r| r.len() == Column::COUNT));

    let joe = master.record(0).unwrap();
    assert_eq!(joe.identity(), ("Sleepy Joe", "TV"));
    assert_eq!(joe.sentiment_score, Some(-0.3));
    let hillary = master.record(1).unwrap();
    assert_eq!(hillary.identity(), ("Crooked Hillary", "Twitter"));
    assert_eq!(hillary.sentiment_score, Some(-0.6));
}

#[test]
fn source_order_decides_which_duplicate_survives() {
    let tmp = tempfile::tempdir().unwrap();
    write_example_sources(tmp.path());

    let report = merge::run(&opts(tmp.path(), &["b.csv", "a.csv"]), None).unwrap();
    let master = store::load_master(&report.output).unwrap();

    assert_eq!(master.len(), 2);
    let joe = master.record(0).unwrap();
    assert_eq!(joe.nickname, "Sleepy Joe");
    assert_eq!(joe.sentiment_score, Some(0.0));
}

#[test]
fn merging_the_same_source_twice_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    write_example_sources(tmp.path());

    let once = merge::run(&opts(tmp.path(), &["b.csv"]), None).unwrap();
    let once_text = fs::read_to_string(&once.output).unwrap();

    let twice = merge::run(&opts(tmp.path(), &["b.csv", "b.csv"]), None).unwrap();
    let twice_text = fs::read_to_string(&twice.output).unwrap();

    assert_eq!(twice.duplicates_removed, 2);
    assert_eq!(once_text, twice_text);
}

#[test]
fn dedup_keeps_rows_that_differ_in_either_key_column() {
    let tmp = tempfile::tempdir().unwrap();
    let p = write(
        tmp.path(),
        "s.csv",
        &format!("{HEADER}Sleepy Joe,TV,-0.3\nSleepy Joe,Twitter,-0.2\nsleepy joe,TV,-0.1\n"),
    );
    let table = merge::read_source(&p).unwrap();
    let (master, removed) = merge::merge_tables(vec![table]);
    // Key comparison is exact.
    assert_eq!(removed, 0);
    assert_eq!(master.len(), 3);
}

#[test]
fn missing_source_is_skipped_and_the_rest_merged() {
    let tmp = tempfile::tempdir().unwrap();
    write_example_sources(tmp.path());

    let mut rec = Recorder::default();
    let report = merge::run(&opts(tmp.path(), &["a.csv", "nope.csv", "b.csv"]), Some(&mut rec)).unwrap();

    assert_eq!(report.skipped, vec![tmp.path().join("nope.csv")]);
    assert_eq!(rec.skipped, vec![tmp.path().join("nope.csv")]);
    assert_eq!(report.merged.len(), 2);
    assert_eq!(report.total, 2);
}

#[test]
fn all_sources_missing_writes_header_only_master() {
    let tmp = tempfile::tempdir().unwrap();

    let report = merge::run(&opts(tmp.path(), &["x.csv", "y.csv"]), None).unwrap();
    assert_eq!(report.total, 0);
    assert_eq!(report.skipped.len(), 2);

    let text = fs::read_to_string(&report.output).unwrap();
    let expected = format!("{}\n", schema::canonical_headers().join(","));
    assert_eq!(text, expected);

    assert!(store::load_master(&report.output).unwrap().is_empty());
}

#[test]
fn master_is_replaced_not_appended() {
    let tmp = tempfile::tempdir().unwrap();
    write_example_sources(tmp.path());

    merge::run(&opts(tmp.path(), &["b.csv"]), None).unwrap();
    let report = merge::run(&opts(tmp.path(), &["a.csv"]), None).unwrap();

    let master = store::load_master(&report.output).unwrap();
    assert_eq!(master.len(), 1);
    assert_eq!(master.record(0).unwrap().sentiment_score, Some(-0.3));
}

#[test]
fn extra_columns_survive_in_first_seen_order() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "a.csv", "Nickname,Specific Source Name,Upvotes\nDopey,Forum,7\n");
    write(tmp.path(), "b.csv", "Nickname,Subreddit,Upvotes\nRocket Man,r/politics,19\n");

    let report = merge::run(&opts(tmp.path(), &["a.csv", "b.csv"]), None).unwrap();
    let master = store::load_master(&report.output).unwrap();

    assert_eq!(master.extra_columns(), &["Upvotes".to_string(), "Subreddit".to_string()]);
    let headers = master.headers();
    assert_eq!(headers.len(), Column::COUNT + 2);

    let rocket = master.row(1).unwrap();
    assert_eq!(rocket[Column::Nickname.index()], "Rocket Man");
    assert_eq!(rocket[Column::COUNT], "19");
    assert_eq!(rocket[Column::COUNT + 1], "r/politics");
    // Absent in its source → empty in the master.
    assert_eq!(master.row(0).unwrap()[Column::COUNT + 1], "");
}

#[test]
fn unreadable_source_aborts_and_leaves_master_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    write_example_sources(tmp.path());
    merge::run(&opts(tmp.path(), &["a.csv"]), None).unwrap();
    let before = fs::read_to_string(tmp.path().join("master.csv")).unwrap();

    // A directory exists but cannot be read as a file.
    fs::create_dir(tmp.path().join("dir.csv")).unwrap();

    let mut rec = Recorder::default();
    let err = merge::run(&opts(tmp.path(), &["b.csv", "dir.csv"]), Some(&mut rec)).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "got {err:?}");
    assert!(rec.finished);
    assert_eq!(rec.lines.len(), 1);

    let after = fs::read_to_string(tmp.path().join("master.csv")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn read_source_reports_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("gone.csv");
    match merge::read_source(&missing) {
        Err(Error::MissingSourceFile(p)) => assert_eq!(p, missing),
        other => panic!("expected MissingSourceFile, got {other:?}"),
    }
}

#[test]
fn merge_tables_counts_removed_duplicates_across_sources() {
    let a = SourceTable {
        records: vec![
            nickboard::record::NicknameRecord { nickname: "A".into(), specific_source: "X".into(), ..Default::default() },
        ],
        ..Default::default()
    };
    let b = SourceTable {
        records: vec![
            nickboard::record::NicknameRecord { nickname: "A".into(), specific_source: "X".into(), context: "later".into(), ..Default::default() },
            nickboard::record::NicknameRecord { nickname: "B".into(), specific_source: "X".into(), ..Default::default() },
        ],
        ..Default::default()
    };
    let (master, removed) = merge::merge_tables(vec![a, b]);
    assert_eq!(removed, 1);
    assert_eq!(master.len(), 2);
    assert_eq!(master.record(0).unwrap().context, "");
}

#[test]
fn unparseable_and_clamped_numbers_keep_their_source_text() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "s.csv",
        "Nickname,Specific Source Name,Sentiment Score,Popularity\nDopey,Forum,n/a,High\nRocket,Forum,1.7,4.5\n",
    );

    let report = merge::run(&opts(tmp.path(), &["s.csv"]), None).unwrap();
    let text = fs::read_to_string(&report.output).unwrap();
    let (_, rows) = nickboard::csv::parse_table(&text, ',');
    let score = Column::SentimentScore.index();
    let pop = Column::Popularity.index();
    assert_eq!((rows[0][score].as_str(), rows[0][pop].as_str()), ("n/a", "High"));
    assert_eq!((rows[1][score].as_str(), rows[1][pop].as_str()), ("1.7", "4.5"));

    // Typed values only feed filters and sort.
    let master = store::load_master(&report.output).unwrap();
    let dopey = master.record(0).unwrap();
    assert_eq!((dopey.sentiment_score, dopey.popularity), (None, None));
    let rocket = master.record(1).unwrap();
    assert_eq!((rocket.sentiment_score, rocket.popularity), (Some(1.0), None));

    // Saving the reloaded table changes nothing.
    store::save_master(&report.output, &master).unwrap();
    assert_eq!(fs::read_to_string(&report.output).unwrap(), text);
}

#[cfg(unix)]
#[test]
fn only_an_absent_source_counts_as_missing() {
    let tmp = tempfile::tempdir().unwrap();
    write_example_sources(tmp.path());

    // A path under a regular file exists nowhere but is not "not found".
    let under_file = tmp.path().join("a.csv").join("inner.csv");
    assert!(matches!(merge::read_source(&under_file), Err(Error::Io { .. })));
    let err = merge::run(&opts(tmp.path(), &["b.csv", "a.csv/inner.csv"]), None).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "got {err:?}");
    assert!(!tmp.path().join("master.csv").exists());

    // A dangling link points at nothing and is skipped like any absent file.
    let link = tmp.path().join("link.csv");
    std::os::unix::fs::symlink(tmp.path().join("gone.csv"), &link).unwrap();
    assert!(matches!(merge::read_source(&link), Err(Error::MissingSourceFile(_))));
    let report = merge::run(&opts(tmp.path(), &["b.csv", "link.csv"]), None).unwrap();
    assert_eq!(report.skipped, vec![link]);
}
