use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use cptu_sbt::chart::{build_chart, SeriesKind, CD70_SERIES, DATA_SERIES};
use cptu_sbt::config::ChartConfig;
use cptu_sbt::data::loader::{load_file, LoadTask};
use cptu_sbt::error::SbtError;
use cptu_sbt::state::{AppState, LOAD_FAILED_NOTICE};
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

const THREE_ROWS: &str = "depth,qt,fs,u2,sigma_vo_eff
1.0,100,2,10,50
2.0,1000,10,20,100
3.0,5000,150,30,125
";

/// (Fr, Qtn) expected for `THREE_ROWS`.
const EXPECTED: [(f64, f64); 3] = [(2.0, 2.0), (1.0, 10.0), (3.0, 40.0)];

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
    assert!(
        (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn test_three_row_csv_to_chart() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sounding.csv", THREE_ROWS);

    let dataset = load_file(&path).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.source.as_deref(), Some("sounding.csv"));

    let chart = build_chart(Some(&dataset), &ChartConfig::default()).unwrap();
    assert_eq!(chart.series.len(), 4);

    let data = chart.series(DATA_SERIES).unwrap();
    assert!(matches!(data.kind, SeriesKind::Markers { .. }));
    assert_eq!(data.points.len(), 3);
    for (actual, expected) in data.points.iter().zip(EXPECTED) {
        assert_close(*actual, expected);
    }

    // 49 grid samples; IB = 22 keeps Fr < 100/22, IB = 32 keeps Fr < 100/32.
    assert_eq!(chart.series(CD70_SERIES).unwrap().points.len(), 49);
    assert_eq!(chart.series("IB = 22").unwrap().points.len(), 41);
    assert_eq!(chart.series("IB = 32").unwrap().points.len(), 37);

    let ib22 = &chart.series("IB = 22").unwrap().points;
    assert!(ib22.iter().all(|&(fr, qtn)| fr < 100.0 / 22.0 && qtn > 0.0));
}

#[test]
fn test_json_and_parquet_match_csv() {
    let dir = TempDir::new().unwrap();

    let json = r#"[
        {"depth": 1.0, "qt": 100, "fs": 2, "u2": 10, "sigma_vo_eff": 50},
        {"depth": 2.0, "qt": 1000, "fs": 10, "u2": 20, "sigma_vo_eff": 100},
        {"depth": 3.0, "qt": 5000, "fs": 150, "u2": 30, "sigma_vo_eff": 125}
    ]"#;
    let json_path = write_file(&dir, "sounding.json", json);

    let parquet_path = dir.path().join("sounding.parquet");
    let schema = Arc::new(Schema::new(vec![
        Field::new("depth", DataType::Float64, false),
        Field::new("qt", DataType::Int64, false),
        Field::new("fs", DataType::Float64, false),
        Field::new("u2", DataType::Utf8, false),
        Field::new("sigma_vo_eff", DataType::Float64, false),
        Field::new("site", DataType::Utf8, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])),
        Arc::new(Int64Array::from(vec![100, 1000, 5000])),
        Arc::new(Float64Array::from(vec![2.0, 10.0, 150.0])),
        Arc::new(StringArray::from(vec!["10", "20", "30"])),
        Arc::new(Float64Array::from(vec![50.0, 100.0, 125.0])),
        Arc::new(StringArray::from(vec!["A", "A", "A"])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = fs::File::create(&parquet_path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let csv_path = write_file(&dir, "sounding.csv", THREE_ROWS);
    let from_csv = load_file(&csv_path).unwrap();
    let from_json = load_file(&json_path).unwrap();
    let from_parquet = load_file(&parquet_path).unwrap();

    assert_eq!(from_json.records, from_csv.records);
    assert_eq!(from_parquet.records, from_csv.records);
}

#[test]
fn test_zero_stress_row_is_kept_but_unplottable() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "surface.csv",
        "depth,qt,fs,u2,sigma_vo_eff\n0.0,100,2,0,0\n0.0,0,0,0,0\n",
    );
    let dataset = load_file(&path).unwrap();
    let chart = build_chart(Some(&dataset), &ChartConfig::default()).unwrap();
    let data = chart.series(DATA_SERIES).unwrap();
    assert_eq!(data.points.len(), 2);
    assert_eq!(data.points[0].1, f64::INFINITY);
    assert!(data.points[1].0.is_nan());
    assert!(data.points[1].1.is_nan());
}

#[test]
fn test_background_load() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sounding.csv", THREE_ROWS);

    let task = LoadTask::spawn(path.clone());
    assert_eq!(task.path(), path.as_path());
    let dataset = task.wait().unwrap();
    assert_eq!(dataset.len(), 3);

    let task = LoadTask::spawn(dir.path().join("missing.csv"));
    assert!(matches!(task.wait(), Err(SbtError::LoadFailure { .. })));
}

#[test]
fn test_failed_reload_keeps_dataset() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "good.csv", THREE_ROWS);
    let bad = write_file(&dir, "bad.json", "{ not json");

    let mut state = AppState::default();
    state.install_dataset(load_file(&good).unwrap());

    match load_file(&bad) {
        Ok(_) => panic!("broken JSON loaded"),
        Err(e) => state.load_failed(e),
    }
    assert_eq!(state.notice.as_deref(), Some(LOAD_FAILED_NOTICE));
    assert_eq!(state.dataset.as_ref().unwrap().len(), 3);

    state.request_plot();
    let chart = state.chart.as_ref().unwrap();
    assert_eq!(chart.series(DATA_SERIES).unwrap().points.len(), 3);
}

#[test]
fn test_state_polls_background_load() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sounding.csv", THREE_ROWS);

    let mut state = AppState::default();
    state.begin_load(path);
    assert!(state.is_loading());

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
    while !state.poll_load() {
        assert!(std::time::Instant::now() < deadline, "load did not finish");
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    assert!(!state.is_loading());
    assert_eq!(state.dataset.as_ref().unwrap().len(), 3);
}

#[test]
fn test_config_file_changes_grid() {
    let dir = TempDir::new().unwrap();
    let config_path = write_file(
        &dir,
        "chart.json",
        r#"{ "grid": { "start": 1.0, "end": 8.0, "ratio": 2.0 } }"#,
    );
    let config = ChartConfig::load(&config_path).unwrap();

    let data_path = write_file(&dir, "sounding.csv", THREE_ROWS);
    let dataset = load_file(&data_path).unwrap();
    let chart = build_chart(Some(&dataset), &config).unwrap();

    let frs: Vec<f64> = chart
        .series(CD70_SERIES)
        .unwrap()
        .points
        .iter()
        .map(|p| p.0)
        .collect();
    assert_eq!(frs, vec![1.0, 2.0, 4.0, 8.0]);

    let bad = write_file(&dir, "bad.json", r#"{ "grid": { "ratio": 0.5 } }"#);
    assert!(matches!(ChartConfig::load(&bad), Err(SbtError::Config(_))));
}
