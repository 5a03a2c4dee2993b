//! Integration tests for the administrative JSON import.

use assert_matches::assert_matches;
use std::io::Write;

use omnibus::catalog::Catalog;
use omnibus::import::import_file;
use omnibus_common::{EntityKind, Error, FieldValue};
use omnibus_db::pool::init_memory_pool;

fn catalog() -> Catalog {
    Catalog::new(init_memory_pool().unwrap())
}

fn write_json(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn import_creates_entries_across_kinds() {
    let catalog = catalog();
    let file = write_json(
        r#"{
            "character": [
                {"title": "Superman", "alignment": "hero", "aliases": ["Kal-El"]},
                {"title": "Lex Luthor", "alignment": "villain"}
            ],
            "movie": [
                {"title": "Man of Steel", "release_date": "2013-06-14"}
            ]
        }"#,
    );

    let summary = import_file(&catalog, file.path()).unwrap();
    assert_eq!(summary.created, 3);
    assert_eq!(summary.skipped, 0);

    let superman = catalog.get(EntityKind::Character, "Superman").unwrap();
    assert_eq!(superman["aliases"], FieldValue::list(["Kal-El"]));
    assert_eq!(catalog.count(EntityKind::Movie).unwrap(), 1);
}

#[test]
fn import_skips_existing_titles() {
    let catalog = catalog();
    catalog
        .create(
            EntityKind::Character,
            "Superman",
            &Default::default(),
        )
        .unwrap();

    let file = write_json(r#"{"character": [{"title": "Superman"}, {"title": "Batman"}]}"#);

    let summary = import_file(&catalog, file.path()).unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn import_rejects_unknown_kind() {
    let catalog = catalog();
    let file = write_json(r#"{"villain": [{"title": "Darkseid"}]}"#);

    let err = import_file(&catalog, file.path()).unwrap_err();
    assert_matches!(err, Error::Validation { ref field, .. } if field == "kind");
}

#[test]
fn import_rejects_entries_without_a_title() {
    let catalog = catalog();
    let file = write_json(r#"{"comic": [{"release_date": "1986-09-01"}]}"#);

    let err = import_file(&catalog, file.path()).unwrap_err();
    assert_matches!(err, Error::Validation { ref field, .. } if field == "title");
}

#[test]
fn import_rejects_malformed_json() {
    let catalog = catalog();
    let file = write_json("not json");

    assert_matches!(
        import_file(&catalog, file.path()),
        Err(Error::Validation { .. })
    );
}

#[test]
fn import_missing_file_is_an_io_error() {
    let catalog = catalog();
    let err = import_file(&catalog, std::path::Path::new("/nonexistent/import.json")).unwrap_err();
    assert_matches!(err, Error::Io(_));
}
