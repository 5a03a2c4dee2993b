//! Omnibus: persistence models and serialization schemas for a media
//! franchise catalog.
//!
//! The catalog holds six independent entity kinds (characters, teams, comics,
//! movies, shows, creators), each keyed by a unique human-readable title and
//! carrying scalar and list-valued string attributes. Two layers cooperate:
//!
//! - the **entity store** ([`catalog::Catalog`]) persists records and
//!   exposes create, read-by-key, list, update, and delete per kind
//! - the **serialization layer** ([`schema::Schema`]) shapes data crossing
//!   the boundary: dump projects stored state into flat field mappings, load
//!   validates caller-supplied input
//!
//! # Example
//!
//! ```
//! use omnibus::catalog::Catalog;
//! use omnibus_common::{EntityKind, FieldValue, Representation};
//! use omnibus_db::pool::init_memory_pool;
//!
//! let catalog = Catalog::new(init_memory_pool().unwrap());
//!
//! let mut fields = Representation::new();
//! fields.insert("alignment".to_string(), FieldValue::text("hero"));
//! fields.insert("aliases".to_string(), FieldValue::list(["Kal-El"]));
//!
//! let rep = catalog
//!     .create(EntityKind::Character, "Superman", &fields)
//!     .unwrap();
//! assert_eq!(rep["title"], FieldValue::text("Superman"));
//! ```

pub mod catalog;
pub mod config;
pub mod import;
pub mod schema;
