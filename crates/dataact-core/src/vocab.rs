//! Vocabulary namespaces shared by contracts, rule queries and the
//! classifier queries.

/// Data Act ontology namespace.
pub const DATAACT: &str = "http://www.semanticweb.org/dataact#";
/// W3C Data Privacy Vocabulary.
pub const DPV: &str = "https://w3c.github.io/dpv/2.2/dpv/#";
/// ODRL information model.
pub const ODRL: &str = "https://www.w3.org/ns/odrl/2/";
/// RDF syntax namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDF Schema namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// Prefix bindings installed on every graph the checker loads, so rule
/// queries may use them without declaring them.
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("dataact", DATAACT),
    ("dpv", DPV),
    ("odrl", ODRL),
    ("rdf", RDF),
    ("rdfs", RDFS),
];

/// Expand a `dataact:` local name into a full IRI.
pub fn dataact_iri(local: &str) -> String {
    format!("{DATAACT}{local}")
}
