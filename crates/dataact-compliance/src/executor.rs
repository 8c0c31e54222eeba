//! Runs one rule against one graph.
//!
//! [`execute_check`] never fails outward: a missing query or a query
//! error is recorded on the returned [`CheckResult`] and the caller moves
//! on to the next rule. Timing covers the whole attempt, error or not.

use std::time::Instant;

use dataact_graph::GraphStore;
use dataact_rules::{QuerySource, RuleDescriptor, RuleError};

use crate::report::{CheckResult, ViolationRecord};

/// Evaluate `rule` against `graph`. Every query row is one violation.
pub fn execute_check<S, Q>(
    store: &S,
    queries: &Q,
    graph: &S::Graph,
    rule: &RuleDescriptor,
) -> CheckResult
where
    S: GraphStore,
    Q: QuerySource + ?Sized,
{
    let start = Instant::now();
    let mut result = CheckResult::new(&rule.id, &rule.name);

    match run(store, queries, graph, rule) {
        Ok(rows) => {
            for row in rows {
                result.add_violation(row);
            }
        }
        Err(message) => {
            tracing::warn!(rule = %rule.id, error = %message, "rule could not be evaluated");
            result.error = Some(message);
        }
    }

    result.execution_time = start.elapsed();
    tracing::debug!(
        rule = %rule.id,
        violations = result.violation_count(),
        elapsed_ms = result.execution_time_ms(),
        "rule evaluated"
    );
    result
}

fn run<S, Q>(
    store: &S,
    queries: &Q,
    graph: &S::Graph,
    rule: &RuleDescriptor,
) -> Result<Vec<ViolationRecord>, String>
where
    S: GraphStore,
    Q: QuerySource + ?Sized,
{
    let text = queries.resolve(&rule.query).map_err(|e| match e {
        RuleError::QueryNotFound { .. } => format!("Query file not found: {}", rule.query),
        other => format!("Error executing query: {other}"),
    })?;

    let rows = store
        .select(graph, &text)
        .map_err(|e| format!("Error executing query: {e}"))?;

    Ok(rows.into_iter().map(|row| row.into_iter().collect()).collect())
}
