//! Descriptor-driven catalog record persistence.
//!
//! All six entity tables share the same shape: `title TEXT PRIMARY KEY`,
//! scalar attributes as plain text, multi-valued attributes as JSON arrays of
//! strings, plus row timestamps. One set of CRUD operations therefore serves
//! every kind, with the SQL assembled from the kind's
//! [`EntityDescriptor`](omnibus_common::EntityDescriptor).

use chrono::{DateTime, Utc};
use rusqlite::{params_from_iter, Connection};

use omnibus_common::{EntityDescriptor, Error, FieldSpec, FieldValue, Representation, Result};

/// A stored row: the externally visible representation plus row metadata.
///
/// The timestamps are internal bookkeeping and never appear in the
/// representation itself.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub representation: Representation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Encode one field of a representation into its column text.
///
/// Absent fields become their shape's empty value; a value of the wrong
/// shape is a validation error naming the field.
fn encode_field(spec: &FieldSpec, rep: &Representation) -> Result<String> {
    match rep.get(spec.name) {
        None => Ok(if spec.multi {
            "[]".to_string()
        } else {
            String::new()
        }),
        Some(FieldValue::Text(value)) if !spec.multi => Ok(value.clone()),
        Some(FieldValue::List(items)) if spec.multi => {
            serde_json::to_string(items).map_err(|e| Error::internal(e.to_string()))
        }
        Some(FieldValue::Text(_)) => Err(Error::validation(spec.name, "Expected a list of strings")),
        Some(FieldValue::List(_)) => Err(Error::validation(spec.name, "Expected a string")),
    }
}

fn select_columns(desc: &EntityDescriptor) -> String {
    let mut columns = vec!["title"];
    columns.extend(desc.fields.iter().map(|spec| spec.name));
    columns.push("created_at");
    columns.push("updated_at");
    columns.join(", ")
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// Parse a record from a database row laid out by [`select_columns`].
fn parse_row(desc: &EntityDescriptor, row: &rusqlite::Row) -> rusqlite::Result<StoredRecord> {
    let mut rep = Representation::new();
    rep.insert("title".to_string(), FieldValue::Text(row.get(0)?));

    for (i, spec) in desc.fields.iter().enumerate() {
        let raw: String = row.get(i + 1)?;
        let value = if spec.multi {
            FieldValue::List(serde_json::from_str(&raw).unwrap_or_default())
        } else {
            FieldValue::Text(raw)
        };
        rep.insert(spec.name.to_string(), value);
    }

    let created_at: String = row.get(desc.fields.len() + 1)?;
    let updated_at: String = row.get(desc.fields.len() + 2)?;

    Ok(StoredRecord {
        representation: rep,
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}

/// Insert a new record.
///
/// Fails with the key-collision error when the title already exists for this
/// kind; the existing row is never overwritten.
pub fn insert(
    conn: &Connection,
    desc: &EntityDescriptor,
    title: &str,
    rep: &Representation,
) -> Result<()> {
    let now = Utc::now().to_rfc3339();

    let mut columns: Vec<&str> = vec!["title"];
    let mut values: Vec<String> = vec![title.to_string()];
    for spec in desc.fields {
        columns.push(spec.name);
        values.push(encode_field(spec, rep)?);
    }
    columns.push("created_at");
    values.push(now.clone());
    columns.push("updated_at");
    values.push(now);

    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        desc.table,
        columns.join(", "),
        placeholders
    );

    conn.execute(&sql, params_from_iter(values.iter()))
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::conflict(desc.kind, title)
            } else {
                Error::database(e.to_string())
            }
        })?;

    Ok(())
}

/// Fetch a record by title.
///
/// # Returns
///
/// * `Ok(Some(StoredRecord))` - The record if found
/// * `Ok(None)` - If no row with this title exists
/// * `Err(Error)` - If a database error occurs
pub fn fetch(conn: &Connection, desc: &EntityDescriptor, title: &str) -> Result<Option<StoredRecord>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE title = :title",
        select_columns(desc),
        desc.table
    );

    let result = conn.query_row(&sql, rusqlite::named_params! { ":title": title }, |row| {
        parse_row(desc, row)
    });

    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Fetch every record of a kind, ordered by title.
pub fn fetch_all(conn: &Connection, desc: &EntityDescriptor) -> Result<Vec<StoredRecord>> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY title ASC",
        select_columns(desc),
        desc.table
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let records = stmt
        .query_map([], |row| parse_row(desc, row))
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(records)
}

/// Replace a record's mutable fields wholesale.
///
/// Every declared field is written; fields absent from `rep` are reset to
/// their empty value. The title itself is immutable.
///
/// # Returns
///
/// * `Ok(true)` - If the record was replaced
/// * `Ok(false)` - If no row with this title exists
/// * `Err(Error)` - If a database error occurs
pub fn replace(
    conn: &Connection,
    desc: &EntityDescriptor,
    title: &str,
    rep: &Representation,
) -> Result<bool> {
    let mut assignments: Vec<String> = Vec::with_capacity(desc.fields.len() + 1);
    let mut values: Vec<String> = Vec::with_capacity(desc.fields.len() + 2);

    for spec in desc.fields {
        assignments.push(format!("{} = ?", spec.name));
        values.push(encode_field(spec, rep)?);
    }
    assignments.push("updated_at = ?".to_string());
    values.push(Utc::now().to_rfc3339());
    values.push(title.to_string());

    let sql = format!(
        "UPDATE {} SET {} WHERE title = ?",
        desc.table,
        assignments.join(", ")
    );

    let rows_affected = conn
        .execute(&sql, params_from_iter(values.iter()))
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}

/// Delete a record by title.
///
/// # Returns
///
/// * `Ok(true)` - If the record was deleted
/// * `Ok(false)` - If no row with this title exists
/// * `Err(Error)` - If a database error occurs
pub fn remove(conn: &Connection, desc: &EntityDescriptor, title: &str) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE title = :title", desc.table);

    let rows_affected = conn
        .execute(&sql, rusqlite::named_params! { ":title": title })
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}

/// Search records by title substring, ordered by title.
pub fn search(conn: &Connection, desc: &EntityDescriptor, term: &str) -> Result<Vec<StoredRecord>> {
    let pattern = format!("%{}%", term);
    let sql = format!(
        "SELECT {} FROM {} WHERE title LIKE :pattern ORDER BY title ASC",
        select_columns(desc),
        desc.table
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let records = stmt
        .query_map(rusqlite::named_params! { ":pattern": &pattern }, |row| {
            parse_row(desc, row)
        })
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(records)
}

/// Count the records of a kind.
pub fn count(conn: &Connection, desc: &EntityDescriptor) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", desc.table);

    let total: i64 = conn
        .query_row(&sql, [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(total as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{get_conn, init_memory_pool};
    use omnibus_common::EntityKind;

    fn character_descriptor() -> &'static EntityDescriptor {
        EntityDescriptor::for_kind(EntityKind::Character)
    }

    fn sample_fields() -> Representation {
        let mut rep = Representation::new();
        rep.insert("real_name".to_string(), FieldValue::text("Bruce Wayne"));
        rep.insert("alignment".to_string(), FieldValue::text("hero"));
        rep.insert(
            "aliases".to_string(),
            FieldValue::list(["Dark Knight", "Caped Crusader"]),
        );
        rep
    }

    #[test]
    fn test_insert_and_fetch() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = character_descriptor();

        insert(&conn, desc, "Batman", &sample_fields()).unwrap();

        let record = fetch(&conn, desc, "Batman").unwrap().unwrap();
        let rep = &record.representation;
        assert_eq!(rep["title"], FieldValue::text("Batman"));
        assert_eq!(rep["real_name"], FieldValue::text("Bruce Wayne"));
        assert_eq!(
            rep["aliases"],
            FieldValue::list(["Dark Knight", "Caped Crusader"])
        );
        assert_eq!(rep["gender"], FieldValue::text(""));
        assert_eq!(rep["universes"], FieldValue::List(Vec::new()));
    }

    #[test]
    fn test_fetch_missing_returns_none() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let found = fetch(&conn, character_descriptor(), "Nonexistent").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_duplicate_insert_is_a_conflict() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = character_descriptor();

        insert(&conn, desc, "Batman", &sample_fields()).unwrap();
        let err = insert(&conn, desc, "Batman", &Representation::new()).unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        // The first row is untouched.
        let record = fetch(&conn, desc, "Batman").unwrap().unwrap();
        assert_eq!(
            record.representation["real_name"],
            FieldValue::text("Bruce Wayne")
        );
    }

    #[test]
    fn test_same_title_across_kinds_is_allowed() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let comic = EntityDescriptor::for_kind(EntityKind::Comic);
        let movie = EntityDescriptor::for_kind(EntityKind::Movie);
        insert(&conn, comic, "Watchmen", &Representation::new()).unwrap();
        insert(&conn, movie, "Watchmen", &Representation::new()).unwrap();

        assert!(fetch(&conn, comic, "Watchmen").unwrap().is_some());
        assert!(fetch(&conn, movie, "Watchmen").unwrap().is_some());
    }

    #[test]
    fn test_replace_resets_omitted_fields() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = character_descriptor();

        insert(&conn, desc, "Batman", &sample_fields()).unwrap();

        let mut update = Representation::new();
        update.insert("alignment".to_string(), FieldValue::text("vigilante"));
        assert!(replace(&conn, desc, "Batman", &update).unwrap());

        let rep = fetch(&conn, desc, "Batman").unwrap().unwrap().representation;
        assert_eq!(rep["alignment"], FieldValue::text("vigilante"));
        assert_eq!(rep["real_name"], FieldValue::text(""));
        assert_eq!(rep["aliases"], FieldValue::List(Vec::new()));
    }

    #[test]
    fn test_replace_missing_returns_false() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let replaced = replace(
            &conn,
            character_descriptor(),
            "Nonexistent",
            &Representation::new(),
        )
        .unwrap();
        assert!(!replaced);
    }

    #[test]
    fn test_remove() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = character_descriptor();

        insert(&conn, desc, "Batman", &sample_fields()).unwrap();
        assert!(remove(&conn, desc, "Batman").unwrap());
        assert!(!remove(&conn, desc, "Batman").unwrap());
        assert!(fetch(&conn, desc, "Batman").unwrap().is_none());
    }

    #[test]
    fn test_fetch_all_orders_by_title() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = character_descriptor();

        insert(&conn, desc, "Zatanna", &Representation::new()).unwrap();
        insert(&conn, desc, "Aquaman", &Representation::new()).unwrap();
        insert(&conn, desc, "Flash", &Representation::new()).unwrap();

        let titles: Vec<FieldValue> = fetch_all(&conn, desc)
            .unwrap()
            .into_iter()
            .map(|record| record.representation["title"].clone())
            .collect();
        assert_eq!(
            titles,
            vec![
                FieldValue::text("Aquaman"),
                FieldValue::text("Flash"),
                FieldValue::text("Zatanna"),
            ]
        );
    }

    #[test]
    fn test_search_matches_substring() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = EntityDescriptor::for_kind(EntityKind::Comic);

        insert(&conn, desc, "The Dark Knight Returns", &Representation::new()).unwrap();
        insert(&conn, desc, "Batman: Year One", &Representation::new()).unwrap();
        insert(&conn, desc, "Kingdom Come", &Representation::new()).unwrap();

        let results = search(&conn, desc, "knight").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].representation["title"],
            FieldValue::text("The Dark Knight Returns")
        );
    }

    #[test]
    fn test_count() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = EntityDescriptor::for_kind(EntityKind::Show);

        assert_eq!(count(&conn, desc).unwrap(), 0);
        insert(&conn, desc, "Titans", &Representation::new()).unwrap();
        insert(&conn, desc, "Smallville", &Representation::new()).unwrap();
        assert_eq!(count(&conn, desc).unwrap(), 2);
    }

    #[test]
    fn test_encode_rejects_wrong_shapes() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = character_descriptor();

        let mut rep = Representation::new();
        rep.insert("aliases".to_string(), FieldValue::text("not a list"));
        let err = insert(&conn, desc, "Batman", &rep).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_timestamps_are_set_on_insert() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let desc = character_descriptor();

        insert(&conn, desc, "Batman", &sample_fields()).unwrap();
        let record = fetch(&conn, desc, "Batman").unwrap().unwrap();
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.created_at > DateTime::<Utc>::default());
    }
}
