//! # Compliance Reports
//!
//! The result model of a check run.
//!
//! - [`CheckResult`]: one rule evaluated against one contract.
//! - [`ContractReport`]: every check run for one contract, plus what was
//!   learned while loading and classifying it.
//! - [`BatchReport`]: the reports of one run, in input order.
//!
//! ## Derived Predicates
//!
//! Nothing that can be computed is stored. `CheckResult::compliant` is
//! `violations.is_empty()`; a report's overall verdict and violation total
//! are recomputed from its checks on every call, so no sequence of
//! mutations can leave them stale.
//!
//! ## Unevaluated Rules
//!
//! A check with an error was not evaluated. Under
//! [`UnevaluatedRulePolicy::Exclude`] it drops out of the overall verdict
//! (a report whose checks all errored is vacuously compliant); under
//! [`UnevaluatedRulePolicy::Fail`] it makes the contract non-compliant.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use dataact_core::{ContractCategory, Timestamp};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One query row: variable name → string value, in projection order.
pub type ViolationRecord = IndexMap<String, String>;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// How checks that could not be evaluated count toward a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnevaluatedRulePolicy {
    /// Errored checks are left out of the conjunction.
    #[default]
    Exclude,
    /// Any errored check makes the contract non-compliant.
    Fail,
}

impl UnevaluatedRulePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exclude => "exclude",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for UnevaluatedRulePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnevaluatedRulePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exclude" => Ok(Self::Exclude),
            "fail" => Ok(Self::Fail),
            other => Err(format!(
                "unknown unevaluated-rule policy {other:?} (expected \"exclude\" or \"fail\")"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// CheckResult
// ---------------------------------------------------------------------------

/// Outcome of evaluating one rule against one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub article_id: String,
    pub article_name: String,
    violations: Vec<ViolationRecord>,
    /// Wall-clock time spent on the check, whatever its outcome.
    pub execution_time: Duration,
    /// Why the rule could not be evaluated, if it could not.
    pub error: Option<String>,
}

impl CheckResult {
    /// A fresh, compliant result with no violations.
    pub fn new(article_id: impl Into<String>, article_name: impl Into<String>) -> Self {
        Self {
            article_id: article_id.into(),
            article_name: article_name.into(),
            violations: Vec::new(),
            execution_time: Duration::ZERO,
            error: None,
        }
    }

    /// Record a violation. The result is non-compliant from then on.
    pub fn add_violation(&mut self, violation: ViolationRecord) {
        self.violations.push(violation);
    }

    pub fn compliant(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[ViolationRecord] {
        &self.violations
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Whether the rule was actually evaluated.
    pub fn is_evaluated(&self) -> bool {
        self.error.is_none()
    }

    /// Execution time in milliseconds, rounded to two decimals.
    pub fn execution_time_ms(&self) -> f64 {
        (self.execution_time.as_secs_f64() * 100_000.0).round() / 100.0
    }
}

// ---------------------------------------------------------------------------
// ContractReport
// ---------------------------------------------------------------------------

/// Everything learned about one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractReport {
    pub contract_name: String,
    pub contract_path: String,
    /// `None` when loading failed before classification.
    pub contract_type: Option<ContractCategory>,
    checks: IndexMap<String, CheckResult>,
    pub timestamp: Timestamp,
    /// Triple count of the merged base + contract graph.
    pub total_triples: usize,
    pub load_error: Option<String>,
    policy: UnevaluatedRulePolicy,
}

impl ContractReport {
    pub fn new(contract_name: impl Into<String>, contract_path: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
            contract_path: contract_path.into(),
            contract_type: None,
            checks: IndexMap::new(),
            timestamp: Timestamp::now(),
            total_triples: 0,
            load_error: None,
            policy: UnevaluatedRulePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnevaluatedRulePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnevaluatedRulePolicy {
        self.policy
    }

    /// Add a check under `article_id`. An existing check with the same id
    /// is replaced and keeps its position.
    pub fn add_check(&mut self, article_id: impl Into<String>, result: CheckResult) {
        self.checks.insert(article_id.into(), result);
    }

    pub fn checks(&self) -> &IndexMap<String, CheckResult> {
        &self.checks
    }

    pub fn check(&self, article_id: &str) -> Option<&CheckResult> {
        self.checks.get(article_id)
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// False when loading failed; otherwise every counted check is
    /// compliant. Which checks count depends on the report's policy.
    pub fn overall_compliant(&self) -> bool {
        if self.load_error.is_some() {
            return false;
        }
        match self.policy {
            UnevaluatedRulePolicy::Exclude => self
                .checks
                .values()
                .filter(|c| c.is_evaluated())
                .all(CheckResult::compliant),
            UnevaluatedRulePolicy::Fail => self
                .checks
                .values()
                .all(|c| c.is_evaluated() && c.compliant()),
        }
    }

    pub fn total_violations(&self) -> usize {
        self.checks.values().map(CheckResult::violation_count).sum()
    }
}

// ---------------------------------------------------------------------------
// BatchReport
// ---------------------------------------------------------------------------

/// The reports of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub timestamp: Timestamp,
    reports: Vec<ContractReport>,
}

impl BatchReport {
    pub fn new(reports: Vec<ContractReport>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            reports,
        }
    }

    pub fn reports(&self) -> &[ContractReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<ContractReport> {
        self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn total_contracts(&self) -> usize {
        self.reports.len()
    }

    pub fn compliant_contracts(&self) -> usize {
        self.reports.iter().filter(|r| r.overall_compliant()).count()
    }

    pub fn non_compliant_contracts(&self) -> usize {
        self.total_contracts() - self.compliant_contracts()
    }

    pub fn total_checks(&self) -> usize {
        self.reports.iter().map(ContractReport::check_count).sum()
    }

    pub fn total_violations(&self) -> usize {
        self.reports.iter().map(ContractReport::total_violations).sum()
    }

    /// Share of compliant contracts in percent; 0 for an empty batch.
    pub fn compliance_percentage(&self) -> f64 {
        if self.reports.is_empty() {
            0.0
        } else {
            self.compliant_contracts() as f64 / self.reports.len() as f64 * 100.0
        }
    }

    /// Whether every contract that loaded is overall compliant. Contracts
    /// with a load error do not count against the run.
    pub fn all_loaded_compliant(&self) -> bool {
        self.reports
            .iter()
            .filter(|r| r.load_error.is_none())
            .all(ContractReport::overall_compliant)
    }
}
