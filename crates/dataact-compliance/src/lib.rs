//! # dataact-compliance — Contract Compliance Engine
//!
//! Evaluates data-sharing contracts against the Data Act articles that
//! apply to their category and reports the outcome.
//!
//! ## Pipeline
//!
//! 1. [`ComplianceChecker`] loads the base rule-definition graph once and
//!    merges each contract into it.
//! 2. [`classifier`] decides the contract's category from its file name or
//!    its declared instances.
//! 3. The [`RuleRegistry`](dataact_rules::RuleRegistry) supplies the
//!    category's rules; [`executor`] runs each rule's query and turns every
//!    row into a violation.
//! 4. Results accumulate in a [`ContractReport`]; batches in a
//!    [`BatchReport`].
//! 5. [`document`] and [`render`] turn reports into JSON documents and
//!    text.
//!
//! ## Failure Model
//!
//! Only construction ([`ComplianceError`]) and export ([`ReportError`])
//! fail outward. A contract that cannot be loaded carries a `load_error`;
//! a rule that cannot be evaluated carries an `error` on its check. A
//! batch always completes.

pub mod checker;
pub mod classifier;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod executor;
pub mod render;
pub mod report;

pub use checker::{default_contract_name, ComplianceChecker, UNKNOWN_CATEGORY_ERROR};
pub use classifier::classify;
pub use config::CheckerConfig;
pub use discovery::{find_contracts, wildcard_match};
pub use document::{BatchDocument, CheckDocument, ContractDocument};
pub use error::{ComplianceError, ComplianceResult, ReportError, ReportResult};
pub use executor::execute_check;
pub use render::{
    export_json, export_to_dir, render_report, render_summary, report_file_name, ReportView,
    SummaryView,
};
pub use report::{BatchReport, CheckResult, ContractReport, UnevaluatedRulePolicy, ViolationRecord};
