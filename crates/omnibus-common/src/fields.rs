//! Field descriptors and the representation mapping.
//!
//! Every entity kind declares its externally visible fields once, in an
//! [`EntityDescriptor`]. The persistence and serialization layers are both
//! driven by these tables, so adding a field to a kind is a single edit here
//! plus a schema migration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::kinds::EntityKind;

/// A single externally visible field value.
///
/// Values crossing the system boundary are always strings or ordered
/// sequences of strings; the untagged serde form maps them onto plain JSON
/// strings and arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A scalar string value.
    Text(String),
    /// An ordered sequence of strings. Empty means "no data", not an error.
    List(Vec<String>),
}

impl FieldValue {
    /// Scalar value from anything string-like.
    pub fn text<S: Into<String>>(value: S) -> Self {
        Self::Text(value.into())
    }

    /// List value from an iterator of string-likes.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Whether the value carries no data (empty string or empty list).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// The flat, externally visible field-to-value mapping of one entity.
///
/// A `BTreeMap` keeps iteration deterministic, so the same stored state
/// always yields the same output mapping.
pub type Representation = BTreeMap<String, FieldValue>;

/// Declaration of one mutable field on an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column and representation key.
    pub name: &'static str,
    /// Whether the field holds an ordered sequence rather than a scalar.
    pub multi: bool,
}

impl FieldSpec {
    /// The empty value matching this field's shape.
    pub fn empty_value(&self) -> FieldValue {
        if self.multi {
            FieldValue::List(Vec::new())
        } else {
            FieldValue::Text(String::new())
        }
    }
}

const fn scalar(name: &'static str) -> FieldSpec {
    FieldSpec { name, multi: false }
}

const fn multi(name: &'static str) -> FieldSpec {
    FieldSpec { name, multi: true }
}

/// Field table for one entity kind.
///
/// The `title` key is deliberately absent: it is the record key, supplied at
/// creation time and immutable afterwards, never a mutable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    /// Backing table name.
    pub table: &'static str,
    /// Mutable fields, in column order.
    pub fields: &'static [FieldSpec],
}

pub const CHARACTER: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Character,
    table: "characters",
    fields: &[
        scalar("image"),
        scalar("gender"),
        scalar("identity"),
        scalar("real_name"),
        scalar("debut"),
        scalar("alignment"),
        multi("universes"),
        multi("aliases"),
        multi("creators"),
        multi("affiliation"),
    ],
};

pub const TEAM: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Team,
    table: "teams",
    fields: &[
        scalar("image"),
        scalar("debut"),
        scalar("identity"),
        scalar("status"),
        multi("creators"),
        multi("universes"),
        multi("team_leaders"),
        multi("enemies"),
    ],
};

pub const COMIC: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Comic,
    table: "comics",
    fields: &[
        scalar("image"),
        scalar("release_date"),
        multi("locations"),
        multi("featured_characters"),
        multi("creators"),
    ],
};

pub const MOVIE: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Movie,
    table: "movies",
    fields: &[
        scalar("image"),
        scalar("release_date"),
        scalar("running_time"),
        scalar("budget"),
        multi("creators"),
        multi("featured_characters"),
    ],
};

pub const SHOW: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Show,
    table: "shows",
    fields: &[
        scalar("image"),
        scalar("first_air_date"),
        scalar("last_air_date"),
        scalar("running_time"),
        multi("creators"),
    ],
};

pub const CREATOR: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Creator,
    table: "creators",
    fields: &[
        scalar("image"),
        scalar("gender"),
        scalar("birth_date"),
        scalar("first_publication"),
        multi("job_titles"),
        multi("employers"),
    ],
};

impl EntityDescriptor {
    /// Look up the descriptor for a kind.
    pub fn for_kind(kind: EntityKind) -> &'static EntityDescriptor {
        match kind {
            EntityKind::Character => &CHARACTER,
            EntityKind::Team => &TEAM,
            EntityKind::Comic => &COMIC,
            EntityKind::Movie => &MOVIE,
            EntityKind::Show => &SHOW,
            EntityKind::Creator => &CREATOR,
        }
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

/// Capability shared by the six entity kinds: a record keyed by title that
/// can project itself into its externally visible representation.
pub trait Representable {
    /// The kind this record belongs to.
    fn kind(&self) -> EntityKind;

    /// The record key.
    fn title(&self) -> &str;

    /// The flat field-to-value projection, containing exactly the declared
    /// fields for this kind plus `title`.
    fn to_representation(&self) -> Representation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_lookup_matches_kind() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityDescriptor::for_kind(kind).kind, kind);
        }
    }

    #[test]
    fn test_field_counts() {
        assert_eq!(CHARACTER.fields.len(), 10);
        assert_eq!(TEAM.fields.len(), 8);
        assert_eq!(COMIC.fields.len(), 5);
        assert_eq!(MOVIE.fields.len(), 6);
        assert_eq!(SHOW.fields.len(), 5);
        assert_eq!(CREATOR.fields.len(), 6);
    }

    #[test]
    fn test_title_is_never_a_declared_field() {
        for kind in EntityKind::ALL {
            assert!(EntityDescriptor::for_kind(kind).field("title").is_none());
        }
    }

    #[test]
    fn test_field_lookup() {
        let aliases = CHARACTER.field("aliases").unwrap();
        assert!(aliases.multi);
        let budget = MOVIE.field("budget").unwrap();
        assert!(!budget.multi);
        assert!(COMIC.field("alignment").is_none());
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(scalar("x").empty_value(), FieldValue::Text(String::new()));
        assert_eq!(multi("x").empty_value(), FieldValue::List(Vec::new()));
    }

    #[test]
    fn test_field_value_serde_untagged() {
        let text = FieldValue::text("Gotham");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"Gotham\"");

        let list = FieldValue::list(["Kal-El", "Superman"]);
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            "[\"Kal-El\",\"Superman\"]"
        );

        let parsed: FieldValue = serde_json::from_str("[\"Metropolis\"]").unwrap();
        assert_eq!(parsed, FieldValue::list(["Metropolis"]));
    }

    #[test]
    fn test_field_value_is_empty() {
        assert!(FieldValue::text("").is_empty());
        assert!(FieldValue::List(Vec::new()).is_empty());
        assert!(!FieldValue::text("hero").is_empty());
    }
}
