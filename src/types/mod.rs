//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `contact`: Contact-feed block type
//! - `payment`: Ledger row and payment snapshot types
//! - `supporter`: Per-entity aggregate record
//! - `error`: Error types for the supporter report

pub mod contact;
pub mod error;
pub mod payment;
pub mod supporter;

pub use contact::ContactBlock;
pub use error::ReportError;
pub use payment::{LedgerEntry, LedgerRow, PaymentSnapshot};
pub use supporter::{ContactField, SupporterRecord};
