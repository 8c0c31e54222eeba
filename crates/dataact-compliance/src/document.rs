//! # Report Documents
//!
//! Plain serde mirrors of the report model: what gets exported as JSON
//! and what can be read back. Field names and order are part of the
//! export format:
//!
//! ```json
//! {
//!   "contract_name": "sample-b2c",
//!   "contract_path": "contracts/sample-b2c.ttl",
//!   "contract_type": "B2C",
//!   "timestamp": "2026-01-15T12:00:00Z",
//!   "total_triples": 214,
//!   "overall_compliant": false,
//!   "total_violations": 1,
//!   "checks": {
//!     "4.1": {
//!       "article_id": "4.1",
//!       "article_name": "User Access Rights",
//!       "compliant": false,
//!       "violation_count": 1,
//!       "violations": [{"violationType": "NoAccessPath", "details": "..."}],
//!       "execution_time_ms": 3.14,
//!       "error": null
//!     }
//!   },
//!   "load_error": null
//! }
//! ```
//!
//! Documents carry derived fields (`compliant`, counts, verdicts) for
//! readers. Converting a document back into a report recomputes them and
//! rejects documents whose stored values disagree.

use std::time::Duration;

use dataact_core::{ContractCategory, Timestamp};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::report::{
    BatchReport, CheckResult, ContractReport, UnevaluatedRulePolicy, ViolationRecord,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDocument {
    pub article_id: String,
    pub article_name: String,
    pub compliant: bool,
    pub violation_count: usize,
    pub violations: Vec<ViolationRecord>,
    pub execution_time_ms: f64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDocument {
    pub contract_name: String,
    pub contract_path: String,
    pub contract_type: Option<ContractCategory>,
    pub timestamp: Timestamp,
    pub total_triples: usize,
    pub overall_compliant: bool,
    pub total_violations: usize,
    pub checks: IndexMap<String, CheckDocument>,
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDocument {
    pub timestamp: Timestamp,
    pub total_contracts: usize,
    pub compliant_contracts: usize,
    pub total_violations: usize,
    pub reports: Vec<ContractDocument>,
}

// ---------------------------------------------------------------------------
// Report -> document
// ---------------------------------------------------------------------------

impl CheckResult {
    pub fn to_document(&self) -> CheckDocument {
        CheckDocument {
            article_id: self.article_id.clone(),
            article_name: self.article_name.clone(),
            compliant: self.compliant(),
            violation_count: self.violation_count(),
            violations: self.violations().to_vec(),
            execution_time_ms: self.execution_time_ms(),
            error: self.error.clone(),
        }
    }
}

impl ContractReport {
    pub fn to_document(&self) -> ContractDocument {
        ContractDocument {
            contract_name: self.contract_name.clone(),
            contract_path: self.contract_path.clone(),
            contract_type: self.contract_type,
            timestamp: self.timestamp,
            total_triples: self.total_triples,
            overall_compliant: self.overall_compliant(),
            total_violations: self.total_violations(),
            checks: self
                .checks()
                .iter()
                .map(|(id, check)| (id.clone(), check.to_document()))
                .collect(),
            load_error: self.load_error.clone(),
        }
    }

    /// The report as a JSON value with stable key order.
    pub fn to_value(&self) -> ReportResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_document())?)
    }
}

impl BatchReport {
    pub fn to_document(&self) -> BatchDocument {
        BatchDocument {
            timestamp: self.timestamp,
            total_contracts: self.total_contracts(),
            compliant_contracts: self.compliant_contracts(),
            total_violations: self.total_violations(),
            reports: self.reports().iter().map(ContractReport::to_document).collect(),
        }
    }

    pub fn to_value(&self) -> ReportResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_document())?)
    }

    /// Pretty-printed JSON, two-space indented.
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Parse an exported batch document back into a report.
    pub fn from_json(text: &str) -> ReportResult<Self> {
        let document: BatchDocument = serde_json::from_str(text)?;
        Self::from_document(document)
    }
}

// ---------------------------------------------------------------------------
// Document -> report
// ---------------------------------------------------------------------------

impl CheckResult {
    pub fn from_document(document: CheckDocument) -> ReportResult<Self> {
        let id = &document.article_id;
        if document.compliant != document.violations.is_empty() {
            return Err(ReportError::Inconsistent(format!(
                "check {id}: compliant is {} with {} violation(s)",
                document.compliant,
                document.violations.len()
            )));
        }
        if document.violation_count != document.violations.len() {
            return Err(ReportError::Inconsistent(format!(
                "check {id}: violation_count {} but {} violation(s) listed",
                document.violation_count,
                document.violations.len()
            )));
        }
        let execution_time = Duration::try_from_secs_f64(document.execution_time_ms / 1000.0)
            .map_err(|e| {
                ReportError::Inconsistent(format!("check {id}: execution_time_ms: {e}"))
            })?;

        let mut result = CheckResult::new(document.article_id, document.article_name);
        for violation in document.violations {
            result.add_violation(violation);
        }
        result.execution_time = execution_time;
        result.error = document.error;
        Ok(result)
    }
}

impl ContractReport {
    /// Rebuild a report. The unevaluated-rule policy is not exported, so
    /// it is inferred as the one that reproduces `overall_compliant`,
    /// preferring the default.
    pub fn from_document(document: ContractDocument) -> ReportResult<Self> {
        let name = document.contract_name.clone();
        let mut report = ContractReport::new(document.contract_name, document.contract_path);
        report.contract_type = document.contract_type;
        report.timestamp = document.timestamp;
        report.total_triples = document.total_triples;
        report.load_error = document.load_error;

        for (id, check) in document.checks {
            if id != check.article_id {
                return Err(ReportError::Inconsistent(format!(
                    "contract {name}: check keyed {id} has article_id {}",
                    check.article_id
                )));
            }
            report.add_check(id, CheckResult::from_document(check)?);
        }

        if report.total_violations() != document.total_violations {
            return Err(ReportError::Inconsistent(format!(
                "contract {name}: total_violations {} but checks sum to {}",
                document.total_violations,
                report.total_violations()
            )));
        }

        let policy = [UnevaluatedRulePolicy::Exclude, UnevaluatedRulePolicy::Fail]
            .into_iter()
            .find(|&p| report.clone().with_policy(p).overall_compliant() == document.overall_compliant)
            .ok_or_else(|| {
                ReportError::Inconsistent(format!(
                    "contract {name}: overall_compliant {} contradicts its checks",
                    document.overall_compliant
                ))
            })?;
        Ok(report.with_policy(policy))
    }
}

impl BatchReport {
    pub fn from_document(document: BatchDocument) -> ReportResult<Self> {
        let reports = document
            .reports
            .into_iter()
            .map(ContractReport::from_document)
            .collect::<ReportResult<Vec<_>>>()?;
        let mut batch = BatchReport::new(reports);
        batch.timestamp = document.timestamp;

        let stored = (
            document.total_contracts,
            document.compliant_contracts,
            document.total_violations,
        );
        let computed = (
            batch.total_contracts(),
            batch.compliant_contracts(),
            batch.total_violations(),
        );
        if stored != computed {
            return Err(ReportError::Inconsistent(format!(
                "batch totals (contracts, compliant, violations) {stored:?} but reports give {computed:?}"
            )));
        }
        Ok(batch)
    }
}
