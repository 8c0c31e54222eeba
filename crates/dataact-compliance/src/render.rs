//! # Text Rendering and Export
//!
//! Human-readable views of reports, and the JSON export. Rendering only
//! reads reports: errors are shown where they occurred, never resolved.
//!
//! [`ReportView`] and [`SummaryView`] implement `Display`, so callers can
//! stream them into any writer; [`render_report`] and [`render_summary`]
//! are the `String` shorthands.

use std::fmt;
use std::path::{Path, PathBuf};

use dataact_core::Timestamp;

use crate::error::{ReportError, ReportResult};
use crate::report::{BatchReport, CheckResult, ContractReport};

const HEAVY_RULE: &str =
    "================================================================================";
const LIGHT_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Violation fields rendered first, ahead of the rest.
const VIOLATION_TYPE: &str = "violationType";
const VIOLATION_DETAILS: &str = "details";

/// One contract report as text. In verbose mode every violation is listed
/// under its check.
pub struct ReportView<'a> {
    pub report: &'a ContractReport,
    pub verbose: bool,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f)?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f, "COMPLIANCE REPORT: {}", report.contract_name)?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f, "Contract Path: {}", report.contract_path)?;
        writeln!(f, "Contract Type: {}", category_label(report))?;
        writeln!(f, "Timestamp: {}", report.timestamp.to_display_string())?;
        writeln!(f, "Total Triples: {}", group_thousands(report.total_triples))?;

        if let Some(error) = &report.load_error {
            writeln!(f)?;
            return writeln!(f, "❌ ERROR: {error}");
        }

        writeln!(f)?;
        writeln!(f, "📊 Compliance Status:")?;
        writeln!(f, "   Overall: {}", verdict(report.overall_compliant()))?;
        writeln!(f, "   Total Checks: {}", report.check_count())?;
        writeln!(f, "   Total Violations: {}", report.total_violations())?;

        writeln!(f)?;
        writeln!(f, "📋 Article Checks:")?;
        writeln!(f, "{LIGHT_RULE}")?;
        for (id, check) in report.checks().iter() {
            self.fmt_check(f, id, check)?;
        }

        writeln!(f)?;
        writeln!(f, "{HEAVY_RULE}")
    }
}

impl ReportView<'_> {
    fn fmt_check(&self, f: &mut fmt::Formatter<'_>, id: &str, check: &CheckResult) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{} Article {id}: {}", icon(check.compliant()), check.article_name)?;
        if check.compliant() {
            writeln!(f, "   Status: PASS")?;
        } else {
            writeln!(f, "   Status: FAIL ({} violations)", check.violation_count())?;
        }
        writeln!(f, "   Execution Time: {:.2}ms", check.execution_time_ms())?;
        if let Some(error) = &check.error {
            writeln!(f, "   ⚠️  Error: {error}")?;
        }

        if !self.verbose || check.compliant() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "   Violations:")?;
        for (i, violation) in check.violations().iter().enumerate() {
            let kind = violation.get(VIOLATION_TYPE).map_or("UNKNOWN", String::as_str);
            let details = violation
                .get(VIOLATION_DETAILS)
                .map_or("No details", String::as_str);
            writeln!(f, "   [{}] {kind}", i + 1)?;
            writeln!(f, "       {details}")?;
            for (key, value) in violation.iter() {
                if key != VIOLATION_TYPE && key != VIOLATION_DETAILS {
                    writeln!(f, "       {key}: {value}")?;
                }
            }
        }
        Ok(())
    }
}

/// Statistics and per-contract lines for a whole batch.
pub struct SummaryView<'a> {
    pub batch: &'a BatchReport,
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let batch = self.batch;
        writeln!(f)?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f, "COMPLIANCE SUMMARY - ALL CONTRACTS")?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f, "Report Generated: {}", batch.timestamp.to_display_string())?;
        writeln!(f)?;

        writeln!(f, "📊 Statistics:")?;
        writeln!(f, "   • Total Contracts: {}", batch.total_contracts())?;
        writeln!(
            f,
            "   • Compliant: {} ({:.1}%)",
            batch.compliant_contracts(),
            batch.compliance_percentage()
        )?;
        writeln!(f, "   • Non-Compliant: {}", batch.non_compliant_contracts())?;
        writeln!(f, "   • Total Article Checks: {}", batch.total_checks())?;
        writeln!(f, "   • Total Violations: {}", batch.total_violations())?;
        writeln!(f)?;

        writeln!(f, "📋 Contract Details:")?;
        writeln!(f, "{LIGHT_RULE}")?;
        for report in batch.reports() {
            writeln!(f)?;
            writeln!(f, "{} {}", icon(report.overall_compliant()), report.contract_name)?;
            writeln!(f, "   Type: {}", category_label(report))?;
            writeln!(f, "   Violations: {}", report.total_violations())?;
            if let Some(error) = &report.load_error {
                writeln!(f, "   ⚠️  Error: {error}")?;
                continue;
            }
            for (id, check) in report.checks().iter() {
                if check.compliant() {
                    writeln!(f, "      Article {id}: ✅")?;
                } else {
                    writeln!(f, "      Article {id}: ❌ ({})", check.violation_count())?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "{LIGHT_RULE}")?;
        writeln!(f)?;
        match batch.non_compliant_contracts() {
            0 => writeln!(f, "🎯 OVERALL STATUS: ✅ ALL CONTRACTS COMPLIANT"),
            n => writeln!(f, "🎯 OVERALL STATUS: ⚠️  {n} CONTRACT(S) NEED ATTENTION"),
        }
    }
}

pub fn render_report(report: &ContractReport, verbose: bool) -> String {
    ReportView { report, verbose }.to_string()
}

pub fn render_summary(batch: &BatchReport) -> String {
    SummaryView { batch }.to_string()
}

/// `compliance-report-YYYY-MM-DD.json`
pub fn report_file_name(timestamp: &Timestamp) -> String {
    format!("compliance-report-{}.json", timestamp.date_stamp())
}

/// Write the batch document to `path`, creating missing parent
/// directories.
pub fn export_json(batch: &BatchReport, path: &Path) -> ReportResult<()> {
    let json = batch.to_json()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, json).map_err(|e| ReportError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), reports = batch.total_contracts(), "report exported");
    Ok(())
}

/// Export into `dir` under the dated file name. Returns the written path.
pub fn export_to_dir(batch: &BatchReport, dir: &Path) -> ReportResult<PathBuf> {
    let path = dir.join(report_file_name(&batch.timestamp));
    export_json(batch, &path)?;
    Ok(path)
}

fn icon(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "✅ COMPLIANT"
    } else {
        "❌ NON-COMPLIANT"
    }
}

fn category_label(report: &ContractReport) -> &'static str {
    report
        .contract_type
        .map_or("NOT DETERMINED", |category| category.as_str())
}

/// `1234567` → `1,234,567`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
