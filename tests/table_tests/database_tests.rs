//! Tests for Database
//!
//! These tests verify:
//! - Table loading from files and replacement of the loaded table
//! - Index creation and removal, with their error conditions
//! - Select through an index and through a full scan
//! - Errors leave existing state intact

use std::fs;
use std::path::PathBuf;

use tabula::config::Config;
use tabula::database::Database;
use tabula::table::{AccessPath, Table};
use tabula::TabulaError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const STUDENTS: &str = "name,id,grade\nAlice,a1234,HD\nBob,a7654,D\nCarol,a1111,HD\n";

fn write_table(dir: &TempDir, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(file_name);
    fs::write(&path, contents).unwrap();
    path
}

fn setup_students() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_table(&temp_dir, "students.csv", STUDENTS);

    let mut db = Database::new(Config::default()).unwrap();
    db.load_table("students", &path).unwrap();
    (temp_dir, db)
}

fn names(db: &Database, column: &str, value: &str) -> Vec<String> {
    db.select_rows("students", column, value)
        .unwrap()
        .rows
        .iter()
        .map(|row| row[0].clone())
        .collect()
}

// =============================================================================
// Loading Tests
// =============================================================================

#[test]
fn test_new_database_has_no_table() {
    let db = Database::new(Config::default()).unwrap();

    assert_eq!(db.table_name(), None);
    assert!(db.table().is_none());
    assert!(db.indexed_columns().is_empty());
}

#[test]
fn test_invalid_index_order_rejected() {
    let config = Config::builder().index_order(2).build();
    assert!(matches!(
        Database::new(config),
        Err(TabulaError::InvalidOrder(2))
    ));
}

#[test]
fn test_load_table_reads_header_and_rows() {
    let (_temp, db) = setup_students();

    let table = db.table().unwrap();
    assert_eq!(db.table_name(), Some("students"));
    assert_eq!(table.header(), &["name", "id", "grade"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.row(2).unwrap(), &vec!["Carol", "a1111", "HD"]);
}

#[test]
fn test_load_missing_file_keeps_previous_table() {
    let (temp, mut db) = setup_students();
    db.create_index("grade").unwrap();

    let result = db.load_table("other", &temp.path().join("missing.csv"));

    assert!(matches!(result, Err(TabulaError::FileNotFound(_))));
    assert_eq!(db.table_name(), Some("students"));
    assert_eq!(db.indexed_columns(), vec!["grade"]);
}

#[test]
fn test_load_new_table_drops_old_indexes() {
    let (temp, mut db) = setup_students();
    db.create_index("grade").unwrap();

    let path = write_table(&temp, "courses.csv", "code,grade\nC1,HD\n");
    db.load_table("courses", &path).unwrap();

    assert_eq!(db.table_name(), Some("courses"));
    assert!(db.indexed_columns().is_empty());
    assert!(matches!(
        db.select_rows("students", "grade", "HD"),
        Err(TabulaError::TableNotFound(_))
    ));

    // Same column name on the new table can be indexed afresh
    db.create_index("grade").unwrap();
    let selection = db.select_rows("courses", "grade", "HD").unwrap();
    assert_eq!(selection.rows, vec![&vec!["C1".to_string(), "HD".to_string()]]);
}

#[test]
fn test_custom_delimiter() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_table(&temp_dir, "t.tsv", "a\tb\n1\t2\n3\t4\n");

    let config = Config::builder().delimiter('\t').build();
    let mut db = Database::new(config).unwrap();
    db.load_table("t", &path).unwrap();

    let selection = db.select_rows("t", "b", "4").unwrap();
    assert_eq!(selection.rows, vec![&vec!["3".to_string(), "4".to_string()]]);
}

// =============================================================================
// Index Lifecycle Tests
// =============================================================================

#[test]
fn test_index_operations_without_table() {
    let mut db = Database::default();

    assert!(matches!(db.create_index("grade"), Err(TabulaError::NoTableLoaded)));
    assert!(matches!(db.drop_index("grade"), Err(TabulaError::NoTableLoaded)));
    assert!(matches!(
        db.select_rows("students", "grade", "HD"),
        Err(TabulaError::NoTableLoaded)
    ));
}

#[test]
fn test_create_index_twice_fails() {
    let (_temp, mut db) = setup_students();

    db.create_index("grade").unwrap();
    assert!(matches!(
        db.create_index("grade"),
        Err(TabulaError::IndexAlreadyExists(c)) if c == "grade"
    ));

    // The first index is still there and still answers selects
    assert_eq!(db.indexed_columns(), vec!["grade"]);
    assert_eq!(names(&db, "grade", "HD"), vec!["Alice", "Carol"]);
}

#[test]
fn test_drop_index_twice_fails() {
    let (_temp, mut db) = setup_students();

    db.create_index("grade").unwrap();
    db.drop_index("grade").unwrap();
    assert!(matches!(
        db.drop_index("grade"),
        Err(TabulaError::IndexNotFound(c)) if c == "grade"
    ));
    assert!(db.indexed_columns().is_empty());
}

#[test]
fn test_unknown_column_errors() {
    let (_temp, mut db) = setup_students();

    assert!(matches!(db.create_index("age"), Err(TabulaError::ColumnNotFound(_))));
    assert!(matches!(db.drop_index("age"), Err(TabulaError::ColumnNotFound(_))));
    assert!(matches!(
        db.select_rows("students", "age", "20"),
        Err(TabulaError::ColumnNotFound(_))
    ));
}

#[test]
fn test_create_index_reports_stats() {
    let (_temp, mut db) = setup_students();

    let stats = db.create_index("id").unwrap();
    assert_eq!(stats.key_count, 3);
    assert_eq!(stats.row_count, 3);

    let index = db.indexes().unwrap().get("id").unwrap();
    assert_eq!(index.order(), 4);
    index.check_invariants().unwrap();
}

// =============================================================================
// Select Tests
// =============================================================================

#[test]
fn test_select_with_index_matches_scan() {
    let (_temp, mut db) = setup_students();

    let scanned = db.select_rows("students", "grade", "HD").unwrap();
    assert_eq!(scanned.access, AccessPath::FullScan);
    let scanned_rows: Vec<Vec<String>> = scanned.rows.into_iter().cloned().collect();

    db.create_index("grade").unwrap();
    let indexed = db.select_rows("students", "grade", "HD").unwrap();
    assert_eq!(indexed.access, AccessPath::IndexLookup);
    assert_eq!(indexed.header, &["name", "id", "grade"]);

    let indexed_rows: Vec<Vec<String>> = indexed.rows.into_iter().cloned().collect();
    assert_eq!(indexed_rows, scanned_rows);
    assert_eq!(indexed_rows.len(), 2);
    assert_eq!(indexed_rows[0][0], "Alice");
    assert_eq!(indexed_rows[1][0], "Carol");
}

#[test]
fn test_select_no_match_returns_header_only() {
    let (_temp, mut db) = setup_students();

    let scanned = db.select_rows("students", "grade", "P").unwrap();
    assert!(scanned.is_empty());
    assert_eq!(scanned.header.len(), 3);

    db.create_index("grade").unwrap();
    let indexed = db.select_rows("students", "grade", "P").unwrap();
    assert!(indexed.is_empty());
    assert_eq!(indexed.access, AccessPath::IndexLookup);
}

#[test]
fn test_select_after_drop_falls_back_to_scan() {
    let (_temp, mut db) = setup_students();

    db.create_index("grade").unwrap();
    db.drop_index("grade").unwrap();

    let selection = db.select_rows("students", "grade", "D").unwrap();
    assert_eq!(selection.access, AccessPath::FullScan);
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.rows[0][0], "Bob");
}

#[test]
fn test_select_matches_exact_text_only() {
    let (_temp, mut db) = setup_students();
    db.create_index("grade").unwrap();

    assert!(names(&db, "grade", "hd").is_empty());
    assert!(names(&db, "grade", "H").is_empty());
    assert!(names(&db, "grade", "HD ").is_empty());
}

#[test]
fn test_index_and_scan_agree_on_larger_table() {
    let mut rows = Vec::new();
    for i in 0..400usize {
        rows.push(vec![format!("r{}", i), format!("{}", (i * 7) % 23)]);
    }
    let table = Table::new("big", vec!["id".to_string(), "bucket".to_string()], rows);

    let config = Config::builder().index_order(3).build();
    let mut db = Database::new(config).unwrap();
    db.load(table);

    let scans: Vec<Vec<Vec<String>>> = (0..23)
        .map(|b| {
            db.select_rows("big", "bucket", &b.to_string())
                .unwrap()
                .rows
                .into_iter()
                .cloned()
                .collect()
        })
        .collect();

    db.create_index("bucket").unwrap();
    db.indexes()
        .unwrap()
        .get("bucket")
        .unwrap()
        .check_invariants()
        .unwrap();

    for (b, scanned) in scans.iter().enumerate() {
        let indexed: Vec<Vec<String>> = db
            .select_rows("big", "bucket", &b.to_string())
            .unwrap()
            .rows
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(&indexed, scanned, "bucket {}", b);
        assert!(!indexed.is_empty());
    }
}

#[test]
fn test_ragged_rows_are_skipped_by_both_paths() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_table(&temp_dir, "ragged.csv", "a,b\n1,x\n2\n3,x\n");

    let mut db = Database::default();
    db.load_table("ragged", &path).unwrap();

    let scanned = db.select_rows("ragged", "b", "x").unwrap().len();
    db.create_index("b").unwrap();
    let indexed = db.select_rows("ragged", "b", "x").unwrap();

    assert_eq!(scanned, 2);
    assert_eq!(indexed.len(), 2);
    assert_eq!(indexed.rows[1][0], "3");
}
