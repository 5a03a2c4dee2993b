//! Omnibus-Common: shared types for the catalog data-access layer.
//!
//! This crate provides the vocabulary used across omnibus:
//!
//! - **Entity Kinds**: the six catalog categories (characters, teams, comics,
//!   movies, shows, creators)
//! - **Field Descriptors**: the per-kind table of externally visible fields
//!   and their shapes
//! - **Representations**: the flat field-to-value mapping entities are
//!   projected into at the system boundary
//! - **Error Handling**: common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use omnibus_common::{EntityDescriptor, EntityKind, Error, Result};
//!
//! let descriptor = EntityDescriptor::for_kind(EntityKind::Character);
//! assert_eq!(descriptor.table, "characters");
//!
//! fn example() -> Result<()> {
//!     Err(Error::missing_field("title"))
//! }
//! ```

pub mod error;
pub mod fields;
pub mod kinds;

pub use error::{Error, Result};
pub use fields::*;
pub use kinds::EntityKind;
