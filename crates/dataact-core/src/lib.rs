//! # dataact-core — Foundational Types for the Compliance Checker
//!
//! Leaf crate of the workspace. It defines the primitives every other
//! crate shares and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Single `ContractCategory` enum.** The closed set of contract
//!    categories (B2C, B2B, B2G, plus `Unknown`) lives here once. Every
//!    `match` on it is exhaustive, so the rule registry, the classifier and
//!    the renderers cannot silently disagree about which categories exist.
//!
//! 2. **UTC-only timestamps.** [`Timestamp`] always carries UTC and renders
//!    as ISO 8601 with a `Z` suffix in serialized reports.
//!
//! 3. **Vocabulary in one place.** The namespaces used by contracts, rule
//!    queries and the classifier queries are defined in [`vocab`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dataact-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod category;
pub mod error;
pub mod temporal;
pub mod vocab;

// Re-export primary types for ergonomic imports.
pub use category::{ContractCategory, CONTRACT_CATEGORY_COUNT};
pub use error::{CoreError, CoreResult};
pub use temporal::Timestamp;
