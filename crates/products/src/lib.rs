//! Products domain module.
//!
//! This crate contains the catalog aggregate, its store-level decomposition, and the
//! validation rules applied to feed records, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod mapping;
pub mod product;
pub mod query;
pub mod record;
pub mod validation;

pub use product::{Dimensions, Metadata, Product, Review};
pub use query::SortOrder;
pub use record::{DependentRecord, ImageRecord, ProductRecord, ReviewRecord, TagRecord, WriteMode};
pub use validation::{ProductValidator, RuleValidator, Violation, missing_required};
