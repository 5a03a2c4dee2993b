//! Store facade over the six catalog collections.
//!
//! [`Catalog`] is the boundary the web layer consumes: every operation takes
//! an entity kind and a title key, borrows one pooled connection, and speaks
//! representations on the way in and out. The pool is injected at
//! construction; opening and closing it is the outer application's job.

use omnibus_common::{EntityKind, Error, FieldValue, Representable, Representation, Result};
use omnibus_db::pool::{get_conn, DbPool};
use omnibus_db::records;

use crate::schema::Schema;

/// Entry point for catalog reads and writes.
#[derive(Clone)]
pub struct Catalog {
    pool: DbPool,
}

impl Catalog {
    /// Wrap an initialized connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create an entity from caller-supplied mutable fields.
    ///
    /// The title is the record key: it must be non-empty, and a title already
    /// present for this kind fails with the key-collision error rather than
    /// overwriting.
    pub fn create(
        &self,
        kind: EntityKind,
        title: &str,
        fields: &Representation,
    ) -> Result<Representation> {
        if title.trim().is_empty() {
            return Err(Error::missing_field("title"));
        }

        let schema = Schema::for_kind(kind);
        let record = schema.load(fields)?;

        let conn = get_conn(&self.pool)?;
        records::insert(&conn, schema.descriptor(), title, &record)?;
        tracing::debug!(%kind, title, "created catalog entry");

        Ok(with_title(schema, record, title))
    }

    /// Persist a typed entity.
    pub fn insert<E: Representable>(&self, entity: &E) -> Result<Representation> {
        if entity.title().trim().is_empty() {
            return Err(Error::missing_field("title"));
        }

        let schema = Schema::for_kind(entity.kind());
        let rep = entity.to_representation();

        let conn = get_conn(&self.pool)?;
        records::insert(&conn, schema.descriptor(), entity.title(), &rep)?;
        tracing::debug!(kind = %entity.kind(), title = entity.title(), "created catalog entry");

        Ok(schema.dump(&rep))
    }

    /// Fetch one entity by key.
    pub fn get(&self, kind: EntityKind, title: &str) -> Result<Representation> {
        let schema = Schema::for_kind(kind);
        let conn = get_conn(&self.pool)?;

        let record = records::fetch(&conn, schema.descriptor(), title)?
            .ok_or_else(|| Error::not_found(kind, title))?;

        Ok(schema.dump(&record.representation))
    }

    /// List every entity of a kind, ordered by title.
    pub fn list(&self, kind: EntityKind) -> Result<Vec<Representation>> {
        let schema = Schema::for_kind(kind);
        let conn = get_conn(&self.pool)?;

        let reps: Vec<Representation> = records::fetch_all(&conn, schema.descriptor())?
            .into_iter()
            .map(|record| record.representation)
            .collect();

        Ok(schema.dump_many(&reps))
    }

    /// Replace an entity's mutable fields wholesale.
    ///
    /// Fields absent from `fields` are reset to empty; the title is
    /// immutable and travels only as the key.
    pub fn update(
        &self,
        kind: EntityKind,
        title: &str,
        fields: &Representation,
    ) -> Result<Representation> {
        let schema = Schema::for_kind(kind);
        let record = schema.load(fields)?;

        let conn = get_conn(&self.pool)?;
        if !records::replace(&conn, schema.descriptor(), title, &record)? {
            return Err(Error::not_found(kind, title));
        }
        tracing::debug!(%kind, title, "replaced catalog entry");

        Ok(with_title(schema, record, title))
    }

    /// Delete an entity by key.
    pub fn delete(&self, kind: EntityKind, title: &str) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        let descriptor = Schema::for_kind(kind).descriptor();

        if !records::remove(&conn, descriptor, title)? {
            return Err(Error::not_found(kind, title));
        }
        tracing::debug!(%kind, title, "deleted catalog entry");

        Ok(())
    }

    /// Search a kind by title substring, ordered by title.
    pub fn search(&self, kind: EntityKind, term: &str) -> Result<Vec<Representation>> {
        let schema = Schema::for_kind(kind);
        let conn = get_conn(&self.pool)?;

        let reps: Vec<Representation> = records::search(&conn, schema.descriptor(), term)?
            .into_iter()
            .map(|record| record.representation)
            .collect();

        Ok(schema.dump_many(&reps))
    }

    /// Count the entities of a kind.
    pub fn count(&self, kind: EntityKind) -> Result<u64> {
        let conn = get_conn(&self.pool)?;
        records::count(&conn, Schema::for_kind(kind).descriptor())
    }
}

fn with_title(schema: Schema, mut record: Representation, title: &str) -> Representation {
    record.insert("title".to_string(), FieldValue::text(title));
    schema.dump(&record)
}
