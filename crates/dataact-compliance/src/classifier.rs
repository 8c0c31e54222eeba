//! # Contract Classification
//!
//! Decides which [`ContractCategory`] a contract belongs to, in strict
//! precedence:
//!
//! 1. **Locator hint.** The lower-cased file stem is searched for `b2c`,
//!    `b2b`, `b2g` in that order. The first token found wins and the graph
//!    is never consulted.
//! 2. **Declared instances.** One `ASK` per category, same order, for an IRI
//!    typed with the category's instance class. The `isIRI` filter keeps
//!    blank pattern nodes in the rule-definition graph from counting as
//!    declared contracts.
//! 3. Otherwise [`ContractCategory::Unknown`].
//!
//! A name without a hint token falls through to the graph queries.

use std::path::Path;

use dataact_core::vocab::DATAACT;
use dataact_core::ContractCategory;
use dataact_graph::GraphStore;

/// Category named by a locator's file stem, if any.
pub fn category_from_locator(locator: &Path) -> Option<ContractCategory> {
    let stem = locator.file_stem()?.to_string_lossy().to_lowercase();
    ContractCategory::classifiable()
        .iter()
        .copied()
        .find(|category| {
            category
                .hint_token()
                .is_some_and(|token| stem.contains(token))
        })
}

/// The `ASK` query that detects a declared instance of `category`.
pub fn detection_query(category: ContractCategory) -> Option<String> {
    let class = category.instance_class()?;
    Some(format!(
        "PREFIX dataact: <{DATAACT}> ASK {{ ?s a dataact:{class} . FILTER(isIRI(?s)) }}"
    ))
}

/// Classify a merged contract graph.
pub fn classify<S: GraphStore>(
    store: &S,
    graph: &S::Graph,
    locator: Option<&Path>,
) -> ContractCategory {
    if let Some(category) = locator.and_then(category_from_locator) {
        tracing::debug!(%category, "classified by file name");
        return category;
    }

    for &category in ContractCategory::classifiable() {
        let Some(query) = detection_query(category) else {
            continue;
        };
        match store.ask(graph, &query) {
            Ok(true) => {
                tracing::debug!(%category, "classified by declared instance");
                return category;
            }
            Ok(false) => {}
            Err(e) => tracing::warn!(%category, error = %e, "classification query failed"),
        }
    }
    ContractCategory::Unknown
}
