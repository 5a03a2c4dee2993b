//! Administrative JSON import.
//!
//! The import file maps kind names to arrays of entries; each entry is an
//! object carrying a `title` plus any mutable fields, in the same shape the
//! serialization layer emits:
//!
//! ```json
//! {
//!   "character": [
//!     {"title": "Superman", "alignment": "hero", "aliases": ["Kal-El"]}
//!   ],
//!   "movie": [
//!     {"title": "Man of Steel", "release_date": "2013-06-14"}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use omnibus_common::{EntityKind, Error, FieldValue, Representation, Result};

use crate::catalog::Catalog;

/// Outcome of an import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub skipped: usize,
}

/// Import entities from a JSON file.
///
/// Entries whose title already exists for their kind are skipped with a
/// warning; any other failure aborts the run.
pub fn import_file(catalog: &Catalog, path: &Path) -> Result<ImportSummary> {
    let raw = std::fs::read_to_string(path)?;
    let document: BTreeMap<String, Vec<Representation>> =
        serde_json::from_str(&raw).map_err(|e| Error::validation("import", e.to_string()))?;

    let mut summary = ImportSummary::default();

    for (kind_name, entries) in &document {
        let kind: EntityKind = kind_name
            .parse()
            .map_err(|e: String| Error::validation("kind", e))?;

        for entry in entries {
            let title = match entry.get("title") {
                Some(FieldValue::Text(title)) if !title.trim().is_empty() => title.clone(),
                _ => return Err(Error::missing_field("title")),
            };

            let mut fields = entry.clone();
            fields.remove("title");

            match catalog.create(kind, &title, &fields) {
                Ok(_) => summary.created += 1,
                Err(Error::Conflict { .. }) => {
                    tracing::warn!(%kind, %title, "skipping existing entry");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        "import finished"
    );

    Ok(summary)
}
