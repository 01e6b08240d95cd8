use std::fs;

use chrono::NaiveDate;
use digest_core::config::RunContext;
use digest_core::history::{commit, HistoryFile, HistoryStore};
use digest_core::types::{Category, Item, NormalizedKey, Pick, PickKind, Selection};
use tempfile::tempdir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn selection_of(picks: &[(Category, &str, &str)]) -> Selection {
    Selection {
        picks: picks
            .iter()
            .map(|(category, title, url)| Pick {
                category: *category,
                kind: PickKind::Fresh,
                item: Item::new(*category, *title, *url),
            })
            .collect(),
        outcomes: Vec::new(),
    }
}

/// A store holding one news pick on each given date.
fn store_with_days(dates: &[NaiveDate]) -> HistoryStore {
    let mut store = HistoryStore::new();
    for (i, date) in dates.iter().enumerate() {
        let ctx = RunContext::new(*date, 0, 3650).unwrap();
        let title = format!("Story {i}");
        let url = format!("https://example.com/{i}");
        let picks = selection_of(&[(Category::News, title.as_str(), url.as_str())]);
        store = commit(store, &ctx, *date, &picks);
    }
    store
}

#[test]
fn load_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let file = HistoryFile::new(dir.path().join("history.json"));
    assert!(file.load().is_empty());
}

#[test]
fn load_corrupt_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, b"{ \"selections\": { not json").unwrap();

    let store = HistoryFile::new(&path).load();
    assert!(store.is_empty());
}

#[test]
fn load_drops_only_bad_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(
        &path,
        br#"{"selections": {
            "2024-03-01": {"news": {"title": "Kept", "url": "https://n/1"}},
            "2024-03-02": {"news": null},
            "2024-03-03": {
                "ai_news": {"title": "Legacy key", "url": ""},
                "paper": {"title": "Also kept", "url": ""}
            },
            "2024-03-04": "not a day"
        }}"#,
    )
    .unwrap();

    let store = HistoryFile::new(&path).load();

    assert_eq!(store.dates().collect::<Vec<_>>(), vec!["2024-03-01", "2024-03-03"]);
    assert_eq!(store.day("2024-03-01").unwrap()[&Category::News].title, "Kept");
    let salvaged = store.day("2024-03-03").unwrap();
    assert_eq!(salvaged.len(), 1);
    assert_eq!(salvaged[&Category::Paper].title, "Also kept");

    let exclusions = store.exclusion_set(day(2024, 3, 5), 7);
    assert!(exclusions.contains(&NormalizedKey::new("kept")));
    assert!(!exclusions.contains(&NormalizedKey::new("legacy key")));
}

#[test]
fn load_tolerates_missing_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(
        &path,
        br#"{"selections": {"2024-03-01": {"paper": {"title": "Only a title"}}}}"#,
    )
    .unwrap();

    let store = HistoryFile::new(&path).load();
    let record = &store.day("2024-03-01").unwrap()[&Category::Paper];
    assert_eq!(record.title, "Only a title");
    assert_eq!(record.url, "");

    let empty_doc = dir.path().join("empty.json");
    fs::write(&empty_doc, b"{}").unwrap();
    assert!(HistoryFile::new(&empty_doc).load().is_empty());
}

#[test]
fn save_then_load_preserves_store() {
    let dir = tempdir().unwrap();
    let file = HistoryFile::new(dir.path().join("nested").join("history.json"));
    let store = store_with_days(&[day(2024, 3, 1), day(2024, 3, 2)]);

    file.save(&store).unwrap();

    assert_eq!(file.load(), store);
    assert!(!dir.path().join("nested").join("history.json.tmp").exists());
}

#[test]
fn save_failure_is_reported() {
    let dir = tempdir().unwrap();
    // The target path is an existing directory, so the rename must fail.
    let target = dir.path().join("history.json");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("occupant"), b"x").unwrap();

    let result = HistoryFile::new(&target).save(&HistoryStore::new());
    assert!(result.is_err());
}

#[test]
fn golden_history_document() {
    let dir = tempdir().unwrap();
    let file = HistoryFile::new(dir.path().join("history.json"));
    let ctx = RunContext::with_defaults(day(2024, 3, 5));
    let selection = selection_of(&[
        (Category::Paper, "Sparse Mixtures", "https://arxiv.org/abs/2"),
        (Category::News, "Model X launches", "https://news.example/x"),
    ]);

    let store = commit(HistoryStore::new(), &ctx, ctx.today(), &selection);
    file.save(&store).unwrap();

    let expected = r#"{
  "selections": {
    "2024-03-05": {
      "news": {
        "title": "Model X launches",
        "url": "https://news.example/x"
      },
      "paper": {
        "title": "Sparse Mixtures",
        "url": "https://arxiv.org/abs/2"
      }
    }
  }
}"#;
    let written = fs::read_to_string(file.path()).unwrap();
    assert_eq!(written.trim(), expected.trim());
}

#[test]
fn exclusion_window_includes_cutoff_day() {
    let today = day(2024, 3, 10);
    let store = store_with_days(&[day(2024, 3, 2), day(2024, 3, 3), day(2024, 3, 9)]);

    let exclusions = store.exclusion_set(today, 7);

    // 2024-03-03 is exactly today - 7 and still counts
    assert!(!exclusions.contains(&NormalizedKey::new("Story 0")));
    assert!(exclusions.contains(&NormalizedKey::new("story 1")));
    assert!(exclusions.contains(&NormalizedKey::new("STORY 2")));
    assert!(exclusions.contains(&NormalizedKey::new("https://example.com/2")));
    assert_eq!(exclusions.len(), 4);
}

#[test]
fn exclusion_set_skips_empty_urls() {
    let ctx = RunContext::with_defaults(day(2024, 3, 10));
    let store = commit(
        HistoryStore::new(),
        &ctx,
        ctx.today(),
        &selection_of(&[(Category::Funding, " Seed Round ", "")]),
    );

    let exclusions = store.recent_exclusions(&ctx);

    assert_eq!(exclusions.len(), 1);
    assert!(exclusions.contains(&NormalizedKey::new("seed round")));
    assert!(!exclusions.contains(&NormalizedKey::new("")));
}

#[test]
fn zero_day_window_covers_only_today() {
    let store = store_with_days(&[day(2024, 3, 9), day(2024, 3, 10)]);
    let exclusions = store.exclusion_set(day(2024, 3, 10), 0);
    assert!(exclusions.contains(&NormalizedKey::new("story 1")));
    assert!(!exclusions.contains(&NormalizedKey::new("story 0")));
}
