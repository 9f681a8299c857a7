//! Integration tests for typed reads from files on disk
//!
//! Each test stages its input in a fresh temporary directory and reads it
//! back through the public API.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;
use typed_columns::config::ReadJob;
use typed_columns::filter::{CompareOp, FilterRule};
use typed_columns::output::{OutputFormat, write_columns};
use typed_columns::{Column, ColumnReader, ReaderError, Row, read_typed_columns};

fn stage(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("test.csv");
    std::fs::write(&path, content).expect("Failed to write fixture");
    (dir, path)
}

#[test]
fn test_csv_normal() {
    let (_dir, path) = stage("a,b,10,-9.3\nabc,def,-100000,30.24\n");
    let columns =
        read_typed_columns(&path, "string,string,int,float", None).expect("valid file");

    assert_eq!(
        columns.get(0),
        Some(&Column::Text(vec!["a".to_owned(), "abc".to_owned()]))
    );
    assert_eq!(
        columns.get(1),
        Some(&Column::Text(vec!["b".to_owned(), "def".to_owned()]))
    );
    assert_eq!(columns.get(2), Some(&Column::Int(vec![10, -100_000])));
    assert_eq!(columns.get(3), Some(&Column::Float(vec![-9.3, 30.24])));
}

#[test]
fn test_csv_one_line() {
    let (_dir, path) = stage("9998.8,-0\n");
    let columns = read_typed_columns(&path, "pos_float,int", None).expect("valid file");
    assert_eq!(columns.floats(0), Some(&[9998.8][..]));
    assert_eq!(columns.ints(1), Some(&[0][..]));
}

#[test]
fn test_csv_empty_line() {
    let (_dir, path) = stage("\n");
    let columns = read_typed_columns(&path, "string", None).expect("one empty line");
    assert_eq!(columns.texts(0), Some(&[String::new()][..]));
}

#[test]
fn test_csv_empty_file() {
    let (_dir, path) = stage("");
    let columns = read_typed_columns(&path, "string", None).expect("no lines");
    assert_eq!(columns.num_rows(), 0);
    assert_eq!(columns.texts(0), Some(&[][..]));
}

#[test]
fn test_csv_big() {
    let mut rng = SmallRng::seed_from_u64(99_999_999);
    let mut expected: (Vec<i64>, Vec<i64>, Vec<f64>, Vec<String>, Vec<i64>, Vec<f64>) =
        Default::default();
    let mut content = String::new();

    for i in 0..100_000_i64 {
        let int: i64 = rng.gen_range(-99_999..=999_999);
        let float = rng.r#gen::<f64>() * 10_000_000.0 - 5_000_000.0;
        let text = "a".repeat(rng.gen_range(0..=30));
        let pos_int: i64 = rng.gen_range(0..=999_999);
        let pos_float = rng.r#gen::<f64>() * 10_000_000.0;

        writeln!(
            content,
            "{i},{int},{float:?},{text},{pos_int},{pos_float:?}"
        )
        .expect("write to string");

        expected.0.push(i);
        expected.1.push(int);
        expected.2.push(float);
        expected.3.push(text);
        expected.4.push(pos_int);
        expected.5.push(pos_float);
    }

    let (_dir, path) = stage(&content);
    let columns = read_typed_columns(&path, "idx_int,int,float,string,pos_int,pos_float", None)
        .expect("valid file");

    assert_eq!(columns.num_rows(), 100_000);
    assert_eq!(columns.ints(0), Some(&expected.0[..]));
    assert_eq!(columns.ints(1), Some(&expected.1[..]));
    assert_eq!(columns.floats(2), Some(&expected.2[..]));
    assert_eq!(columns.texts(3), Some(&expected.3[..]));
    assert_eq!(columns.ints(4), Some(&expected.4[..]));
    assert_eq!(columns.floats(5), Some(&expected.5[..]));
}

#[test]
fn test_negative_cases() {
    let cases: &[(&str, &str, fn(&ReaderError) -> bool)] = &[
        ("\n", "int", |e| matches!(e, ReaderError::Parse(_))),
        ("\n", "string,int", |e| matches!(e, ReaderError::RowShape { .. })),
        ("-9.3,56", "int,int", |e| matches!(e, ReaderError::Parse(_))),
        ("-9.3,56,abc", "string,int,float", |e| {
            matches!(e, ReaderError::Parse(_))
        }),
        ("-0.00001", "pos_float", |e| matches!(e, ReaderError::Range(_))),
        ("-1", "pos_int", |e| matches!(e, ReaderError::Range(_))),
        ("1", "idx_int", |e| {
            matches!(e, ReaderError::IndexMismatch { .. })
        }),
        ("-9.3,56,abc,9", "float,int,string", |e| {
            matches!(e, ReaderError::RowShape { .. })
        }),
        ("-9.3,56", "float,int,int", |e| {
            matches!(e, ReaderError::RowShape { .. })
        }),
        ("-9.4", "float,int", |e| matches!(e, ReaderError::RowShape { .. })),
        ("-9.4", "floatint", |e| {
            matches!(e, ReaderError::InvalidSchema { .. })
        }),
        ("-9.4,8", "floatint", |e| {
            matches!(e, ReaderError::InvalidSchema { .. })
        }),
        ("-9.4,8", "string,tsring", |e| {
            matches!(e, ReaderError::InvalidSchema { .. })
        }),
        ("-9.4,8", "string,", |e| {
            matches!(e, ReaderError::InvalidSchema { .. })
        }),
        ("-9.4,8", "float,in", |e| {
            matches!(e, ReaderError::InvalidSchema { .. })
        }),
        ("-9.4", "", |e| matches!(e, ReaderError::InvalidSchema { .. })),
    ];

    for (content, descriptor, is_expected) in cases {
        let (_dir, path) = stage(content);
        let err = read_typed_columns(&path, descriptor, None)
            .expect_err(&format!("{content:?} with {descriptor:?} must fail"));
        assert!(
            is_expected(&err),
            "{content:?} with {descriptor:?} failed with unexpected error: {err}"
        );
    }
}

#[test]
fn test_filter_keeps_matching_rows_in_order() {
    let (_dir, path) = stage("a,b,10,-9.3\nabc,def,-100001,30.24\nx,y,-100000,1.5\n");
    let keep = |row: &Row| row.int(2).is_some_and(|v| v >= -100_000);
    let columns =
        read_typed_columns(&path, "string,string,int,float", Some(&keep)).expect("valid file");

    assert_eq!(columns.num_rows(), 2);
    assert!(columns.iter().all(|c| c.len() == 2));
    assert_eq!(columns.ints(2), Some(&[10, -100_000][..]));
    assert_eq!(
        columns.texts(0),
        Some(&["a".to_owned(), "x".to_owned()][..])
    );
}

#[test]
fn test_failure_after_filtered_rows_still_fails() {
    let (_dir, path) = stage("0,1\n1,2\n2,oops\n");
    let keep_none = |_: &Row| false;
    let err = read_typed_columns(&path, "idx_int,int", Some(&keep_none))
        .expect_err("conversion errors are fatal even when every row is filtered");
    assert!(matches!(err, ReaderError::Parse(_)));
}

#[test]
fn test_csv_output_round_trip() {
    let (_dir, path) = stage("run-a,3,0.25\nrun-b,7,1.0\nrun-c,0,0.0\n");
    let reader = ColumnReader::from_descriptor("string,pos_int,pos_float").expect("descriptor");
    let columns = reader.read_path(&path).expect("valid file");

    let mut out = Vec::new();
    write_columns(&mut out, &columns, OutputFormat::Csv).expect("write csv");
    let (_dir2, copy) = stage(&String::from_utf8(out).expect("utf-8"));

    assert_eq!(reader.read_path(&copy).expect("re-read"), columns);
}

#[test]
fn test_job_file_with_relative_input() {
    let (dir, _path) = stage("0,a,10,-9.3\n1,abc,-100001,30.24\n2,x,-100000,1.5\n");
    let mut job = ReadJob::new("test.csv", "idx_int,string,int,float");
    job.filters.push(FilterRule::new(2, CompareOp::Ge, -100_000));
    job.output = OutputFormat::Json;
    let job_path = dir.path().join("job.json");
    job.to_file(&job_path).expect("write job");

    let loaded = ReadJob::from_file(&job_path).expect("load job");
    assert_eq!(loaded.input, dir.path().join("test.csv"));
    assert_eq!(loaded.output, OutputFormat::Json);

    let columns = loaded.run().expect("run job");
    assert_eq!(columns.ints(0), Some(&[0, 2][..]));
    assert_eq!(columns.floats(3), Some(&[-9.3, 1.5][..]));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = read_typed_columns(dir.path().join("absent.csv"), "int", None)
        .expect_err("missing file");
    assert!(matches!(err, ReaderError::Io(_)));
}
