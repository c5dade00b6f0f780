use std::sync::Arc;

use chrono::Utc;
use tempfile::tempdir;

use super::log::PredictionLog;
use super::record::{LogRecord, CSV_HEADER};
use crate::risk::RiskLabel;

fn record(stress: f32, label: RiskLabel) -> LogRecord {
    LogRecord {
        timestamp: Utc::now(),
        sleep: 7.0,
        study: 3.0,
        stress,
        screen_time: 4.0,
        activity: 30.0,
        appetite: 3.0,
        social: 5.0,
        rested: "Yes".to_string(),
        relaxed: "No".to_string(),
        predicted_risk: label,
    }
}

#[test]
fn test_first_append_creates_file_with_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("user_predictions_log.csv");
    let log = PredictionLog::open(path.clone()).unwrap();

    assert!(!path.exists());
    log.append(&record(5.0, RiskLabel::Low)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], CSV_HEADER);
}

#[test]
fn test_header_written_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let log = PredictionLog::open(path.clone()).unwrap();

    for i in 0..3 {
        log.append(&record(i as f32, RiskLabel::Low)).unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let header_count = content.lines().filter(|l| *l == CSV_HEADER).count();
    assert_eq!(header_count, 1);
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_append_then_read_last_one() {
    let dir = tempdir().unwrap();
    let log = PredictionLog::open(dir.path().join("log.csv")).unwrap();

    let appended = record(8.0, RiskLabel::High);
    log.append(&appended).unwrap();

    let recent = log.read_last(1).unwrap();
    assert_eq!(recent.len(), 1);
    // Stored verbatim: original textual categoricals, not encoded codes.
    assert_eq!(recent[0].rested, "Yes");
    assert_eq!(recent[0].relaxed, "No");
    assert_eq!(recent[0].stress, 8.0);
    assert_eq!(recent[0].predicted_risk, RiskLabel::High);
}

#[test]
fn test_read_last_fewer_records_than_requested() {
    let dir = tempdir().unwrap();
    let log = PredictionLog::open(dir.path().join("log.csv")).unwrap();

    log.append(&record(1.0, RiskLabel::Low)).unwrap();
    log.append(&record(2.0, RiskLabel::Moderate)).unwrap();

    let recent = log.read_last(10).unwrap();
    assert_eq!(recent.len(), 2);
    // Insertion order: oldest of the n first.
    assert_eq!(recent[0].stress, 1.0);
    assert_eq!(recent[1].stress, 2.0);
}

#[test]
fn test_read_last_returns_suffix_in_order() {
    let dir = tempdir().unwrap();
    let log = PredictionLog::open(dir.path().join("log.csv")).unwrap();

    for i in 0..15 {
        log.append(&record(i as f32 / 2.0, RiskLabel::Low)).unwrap();
    }

    let recent = log.read_last(10).unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].stress, 2.5); // record #5
    assert_eq!(recent[9].stress, 7.0); // record #14
}

#[test]
fn test_read_last_zero() {
    let dir = tempdir().unwrap();
    let log = PredictionLog::open(dir.path().join("log.csv")).unwrap();
    log.append(&record(1.0, RiskLabel::Low)).unwrap();
    assert!(log.read_last(0).unwrap().is_empty());
}

#[test]
fn test_reopen_appends_to_same_sequence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.csv");

    {
        let log = PredictionLog::open(path.clone()).unwrap();
        log.append(&record(1.0, RiskLabel::Low)).unwrap();
        log.append(&record(2.0, RiskLabel::Moderate)).unwrap();
    }

    let log = PredictionLog::open(path.clone()).unwrap();
    assert_eq!(log.len(), 2);
    log.append(&record(3.0, RiskLabel::High)).unwrap();

    let recent = log.read_last(10).unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[2].stress, 3.0);

    // Still exactly one header after the second process run.
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().filter(|l| *l == CSV_HEADER).count(), 1);
}

#[test]
fn test_beyond_tail_cache_falls_back_to_file() {
    let dir = tempdir().unwrap();
    let log = PredictionLog::open(dir.path().join("log.csv")).unwrap();

    // More records than the tail cache holds.
    for i in 0..40 {
        log.append(&record((i % 10) as f32, RiskLabel::Low)).unwrap();
    }

    let all = log.read_last(40).unwrap();
    assert_eq!(all.len(), 40);
    assert_eq!(all[0].stress, 0.0);
    assert_eq!(all[39].stress, 9.0);
}

#[test]
fn test_malformed_row_skipped_on_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.csv");

    {
        let log = PredictionLog::open(path.clone()).unwrap();
        log.append(&record(1.0, RiskLabel::Low)).unwrap();
    }

    // Simulate a damaged row from an interrupted writer.
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("2025-08-25T10:00:00Z,7,3\n");
    std::fs::write(&path, content).unwrap();

    let log = PredictionLog::open(path).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.read_last(10).unwrap().len(), 1);
}

#[test]
fn test_empty_store_reads_empty() {
    let dir = tempdir().unwrap();
    let log = PredictionLog::open(dir.path().join("log.csv")).unwrap();
    assert!(log.is_empty());
    assert!(log.read_last(10).unwrap().is_empty());
}

#[test]
fn test_export_path_points_at_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("user_predictions_log.csv");
    let log = PredictionLog::open(path.clone()).unwrap();
    assert_eq!(log.export_path(), path.as_path());
}

#[test]
fn test_concurrent_appends_lose_nothing() {
    let dir = tempdir().unwrap();
    let log = Arc::new(PredictionLog::open(dir.path().join("log.csv")).unwrap());

    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for i in 0..PER_THREAD {
                    log.append(&record(((t * PER_THREAD + i) % 10) as f32, RiskLabel::Low))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(log.len(), (THREADS * PER_THREAD) as u64);

    // Every row on disk parses cleanly: no interleaving inside a record.
    let all = log.read_last(THREADS * PER_THREAD).unwrap();
    assert_eq!(all.len(), THREADS * PER_THREAD);
}
