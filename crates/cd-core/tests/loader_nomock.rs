//! Loader tests against real files on disk.

use cd_common::{Error, Sex, ValueField};
use cd_core::loader;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_dataset(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp dataset");
    file.write_all(json.as_bytes()).expect("write temp dataset");
    file
}

#[test]
fn loads_activity_dataset_from_disk() {
    let file = write_dataset(
        r#"[
            { "id": "m1", "time": 1, "act": 54.0, "sex": "male" },
            { "id": "f1", "time": 1, "act": 12.0, "sex": "female" },
            { "id": "f1", "time": 2, "act": 30.0, "sex": "female", "estrus": true }
        ]"#,
    );

    let observations = loader::load_path(file.path(), ValueField::Activity).unwrap();
    assert_eq!(observations.len(), 3);
    assert_eq!(observations[0].sex, Sex::Male);
    assert_eq!(observations[2].estrus, Some(true));
}

#[test]
fn temperature_selection_skips_activity_only_records() {
    let file = write_dataset(
        r#"[
            { "id": "m1", "time": 1, "act": 54.0, "sex": "male" },
            { "id": "f1", "time": 1, "act": 12.0, "temp": 37.2, "sex": "female" }
        ]"#,
    );

    let observations = loader::load_path(file.path(), ValueField::Temperature).unwrap();
    assert_eq!(observations.len(), 1);
    assert_eq!(observations[0].value, 37.2);
}

#[test]
fn wrong_field_for_whole_file_errors() {
    let file = write_dataset(r#"[ { "id": "m1", "time": 1, "act": 5.0, "sex": "male" } ]"#);

    let err = loader::load_path(file.path(), ValueField::Temperature).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset { .. }));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let file = write_dataset("{ definitely not a dataset");

    let err = loader::load_path(file.path(), ValueField::Activity).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error_with_path() {
    let err = loader::load_path(
        std::path::Path::new("/no/such/dataset.json"),
        ValueField::Activity,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("/no/such/dataset.json"));
}
