//! Core business logic module
//!
//! This module contains the core aggregation and filtering components:
//! - `cache` - Deduplicating per-entity record store
//! - `contact_importer` - Contact block resolution and field merging
//! - `ledger_importer` - Ledger row parsing and payment folding
//! - `filter` - Criteria parsing and record predicates

pub mod cache;
pub mod contact_importer;
pub mod filter;
pub mod ledger_importer;

pub use cache::SupporterCache;
pub use contact_importer::{ContactImporter, EntityResolver, FieldResolver};
pub use filter::{CriterionKind, FilterSet};
