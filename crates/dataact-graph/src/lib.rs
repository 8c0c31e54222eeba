//! # dataact-graph — RDF Graph Store
//!
//! Loads contract and rule-definition graphs and answers the queries that
//! compliance rules are written in.
//!
//! The checker only ever talks to [`GraphStore`]. [`MemoryStore`] backs
//! it with oxigraph: RDF/XML, Turtle and N-Triples parsing, and full
//! SPARQL 1.1 query evaluation. Swapping in another engine means
//! implementing that trait.

pub mod error;
pub mod store;

pub use error::{GraphError, GraphResult};
pub use oxigraph::io::RdfFormat;
pub use store::{format_for_path, Graph, GraphStore, MemoryStore, Row};
