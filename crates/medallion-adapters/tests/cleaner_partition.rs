use std::fs;

use chrono::NaiveDate;
use medallion_adapters::{CsvCleaner, PartitionStore};
use medallion_core::{PipelineError, RecordCleaner};
use tempfile::TempDir;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn setup(raw_csv: &str) -> (TempDir, CsvCleaner) {
    let dir = TempDir::new().unwrap();
    let raw_path = dir.path().join("raw_orders.csv");
    fs::write(&raw_path, raw_csv).unwrap();
    let store = PartitionStore::new(dir.path().join("silver"));
    let cleaner = CsvCleaner::new(raw_path, store);
    (dir, cleaner)
}

fn partition_rows(cleaner: &CsvCleaner, date: NaiveDate) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(cleaner.partition_path(date)).unwrap();
    reader.records()
          .map(|r| r.unwrap().iter().map(str::to_string).collect())
          .collect()
}

#[test]
fn writes_partition_at_the_canonical_path() {
    let (_dir, cleaner) = setup("id,user_id,order_date,status\n1,u1,2024-01-05,placed\n");
    let outcome = cleaner.clean(d("2024-01-05")).unwrap();
    assert_eq!(outcome.csv_path, cleaner.partition_path(d("2024-01-05")));
    assert!(outcome.csv_path.ends_with("silver/2024-01-05/orders_clean_2024-01-05.csv"));
    assert_eq!(outcome.rows_written, 1);
    assert!(outcome.csv_path.exists());
}

#[test]
fn messy_status_lands_normalized_in_the_partition() {
    let (_dir, cleaner) = setup("id,user_id,order_date,status\n1,u1,2024-01-05, Placed \n");
    cleaner.clean(d("2024-01-05")).unwrap();
    let rows = partition_rows(&cleaner, d("2024-01-05"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][3], "placed");
}

#[test]
fn duplicate_id_is_absent_from_the_later_dates_partition() {
    let raw = "id,user_id,order_date,status\n7,u1,2024-01-02,completed\n7,u1,2024-01-01,completed\n";
    let (_dir, cleaner) = setup(raw);
    let outcome = cleaner.clean(d("2024-01-02")).unwrap();
    assert_eq!(outcome.rows_written, 0);
    assert!(partition_rows(&cleaner, d("2024-01-02")).is_empty());
}

#[test]
fn disallowed_status_is_excluded_from_every_partition() {
    let raw = "id,user_id,order_date,status\n1,u1,2024-01-05,cancelled\n2,u2,2024-01-05,shipped\n";
    let (_dir, cleaner) = setup(raw);
    cleaner.clean(d("2024-01-05")).unwrap();
    let rows = partition_rows(&cleaner, d("2024-01-05"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "2");
}

#[test]
fn extra_columns_survive_untouched() {
    let raw = "id,user_id,order_date,status,amount\n1,u1,2024-01-05,placed,19.90\n";
    let (_dir, cleaner) = setup(raw);
    cleaner.clean(d("2024-01-05")).unwrap();
    let rows = partition_rows(&cleaner, d("2024-01-05"));
    assert_eq!(rows[0][4], "19.90");
}

#[test]
fn rerunning_the_same_date_is_byte_for_byte_idempotent() {
    let raw = "id,user_id,order_date,status\n2,u2,2024-01-05,shipped\n1,u1,2024-01-05,placed\n3,u3,2024-01-04,returned\n";
    let (_dir, cleaner) = setup(raw);
    let first = cleaner.clean(d("2024-01-05")).unwrap();
    let bytes_first = fs::read(&first.csv_path).unwrap();
    let second = cleaner.clean(d("2024-01-05")).unwrap();
    let bytes_second = fs::read(&second.csv_path).unwrap();
    assert_eq!(bytes_first, bytes_second);
    assert_eq!(first.content_hash, second.content_hash);
}

#[test]
fn no_matching_rows_produce_a_valid_empty_partition() {
    let (_dir, cleaner) = setup("id,user_id,order_date,status\n1,u1,2024-01-05,placed\n");
    let outcome = cleaner.clean(d("2030-12-31")).unwrap();
    assert_eq!(outcome.rows_written, 0);
    // el archivo existe, con header y sin filas
    let content = fs::read_to_string(&outcome.csv_path).unwrap();
    assert!(content.starts_with("id,user_id,order_date,status"));
    assert!(partition_rows(&cleaner, d("2030-12-31")).is_empty());
}

#[test]
fn missing_required_column_is_a_raw_input_error() {
    let (_dir, cleaner) = setup("id,user_id,status\n1,u1,placed\n");
    let err = cleaner.clean(d("2024-01-05")).unwrap_err();
    assert!(matches!(err, PipelineError::RawInput(_)));
    // no se escribió partición alguna
    assert!(!cleaner.partition_path(d("2024-01-05")).exists());
}

#[test]
fn missing_raw_file_is_a_raw_input_error() {
    let dir = TempDir::new().unwrap();
    let cleaner = CsvCleaner::new(dir.path().join("missing.csv"), PartitionStore::new(dir.path().join("silver")));
    let err = cleaner.clean(d("2024-01-05")).unwrap_err();
    assert!(matches!(err, PipelineError::RawInput(_)));
}

#[test]
fn no_temp_files_remain_at_the_canonical_dir() {
    let (_dir, cleaner) = setup("id,user_id,order_date,status\n1,u1,2024-01-05,placed\n");
    let outcome = cleaner.clean(d("2024-01-05")).unwrap();
    let dir = outcome.csv_path.parent().unwrap().to_path_buf();
    let leftovers: Vec<_> = fs::read_dir(dir).unwrap()
                                             .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                                             .filter(|n| n.ends_with(".tmp"))
                                             .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn failed_publish_removes_the_temp_file() {
    let (_dir, cleaner) = setup("id,user_id,order_date,status\n1,u1,2024-01-05,placed\n");
    // un directorio en la ruta canónica hace fallar el rename de publicación
    let final_path = cleaner.partition_path(d("2024-01-05"));
    fs::create_dir_all(final_path.join("ocupado")).unwrap();

    let err = cleaner.clean(d("2024-01-05")).unwrap_err();
    assert!(matches!(err, PipelineError::Clean(_)));

    let leftovers: Vec<_> = fs::read_dir(final_path.parent().unwrap()).unwrap()
                                                                      .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                                                                      .filter(|n| n.ends_with(".tmp"))
                                                                      .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}
