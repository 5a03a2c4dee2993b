//! Omnibus-DB: database schema, migrations, and catalog record persistence.
//!
//! This crate owns the stored state of the catalog, using SQLite with
//! rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Embedded schema migrations
//! - `pool` - Connection pool management
//! - `models` - Typed entity models for the six catalog kinds
//! - `records` - Descriptor-driven CRUD shared by every kind
//!
//! # Example
//!
//! ```
//! use omnibus_common::{EntityDescriptor, EntityKind, Representable};
//! use omnibus_db::pool::{get_conn, init_memory_pool};
//! use omnibus_db::{models::Character, records};
//!
//! let pool = init_memory_pool().unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let character = Character::new("Superman").unwrap();
//! let descriptor = EntityDescriptor::for_kind(EntityKind::Character);
//! records::insert(&conn, descriptor, character.title(), &character.to_representation()).unwrap();
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod records;

pub use records::StoredRecord;
