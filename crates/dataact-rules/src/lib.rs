//! # dataact-rules — Rule Registry and Query Sources
//!
//! Decides *which* Data Act articles apply to a contract category and
//! *where* each article's violation query comes from.
//!
//! - [`RuleRegistry`]: category → ordered [`RuleDescriptor`]s, either the
//!   built-in Data Act table or a validated YAML file.
//! - [`QuerySource`]: resolves a descriptor's query reference to text.
//!   [`DirectoryQuerySource`] reads a directory of `.sparql` files,
//!   [`InMemoryQuerySource`] holds text directly.

pub mod error;
pub mod registry;
pub mod source;

pub use error::{RuleError, RuleResult};
pub use registry::{RuleDescriptor, RuleRegistry};
pub use source::{DirectoryQuerySource, InMemoryQuerySource, QuerySource};
