//! # Check Subcommand
//!
//! Discovers contracts, evaluates them, prints the per-contract reports
//! and the batch summary, and exports the batch as
//! `compliance-report-YYYY-MM-DD.json` in the output directory.
//!
//! Contracts come from the positional paths when any are given, otherwise
//! from every file in the contracts directory matching the pattern.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use dataact_compliance::{
    export_to_dir, find_contracts, CheckerConfig, ComplianceChecker, ReportView, SummaryView,
    UnevaluatedRulePolicy,
};

use crate::display_name;

/// Arguments for the check subcommand. Flags override the configuration
/// file.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Contract files to check. When empty, the contracts directory is
    /// scanned instead.
    pub paths: Vec<PathBuf>,

    /// Directory scanned for contracts.
    #[arg(long)]
    pub contracts_dir: Option<PathBuf>,

    /// Wildcard pattern for contract file names (`*` and `?`).
    #[arg(long)]
    pub pattern: Option<String>,

    /// Base rule-definition graph merged under every contract.
    #[arg(long)]
    pub base_graph: Option<PathBuf>,

    /// Directory holding the rule queries.
    #[arg(long)]
    pub queries_dir: Option<PathBuf>,

    /// Rule registry file (YAML). Defaults to the built-in Data Act rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Count rules that could not be evaluated as failures.
    #[arg(long)]
    pub fail_unevaluated: bool,

    /// Print only progress and the summary, not each full report.
    #[arg(long, short)]
    pub quiet: bool,

    /// Skip writing the JSON report.
    #[arg(long)]
    pub no_export: bool,
}

impl CheckArgs {
    /// Fold the flags into `config`.
    pub fn apply(&self, mut config: CheckerConfig, output_dir: Option<&Path>) -> CheckerConfig {
        if let Some(dir) = &self.contracts_dir {
            config.contracts_dir = dir.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.contract_pattern = pattern.clone();
        }
        if let Some(path) = &self.base_graph {
            config.base_graph = path.clone();
        }
        if let Some(dir) = &self.queries_dir {
            config.queries_dir = dir.clone();
        }
        if let Some(path) = &self.rules {
            config.rules_file = Some(path.clone());
        }
        if self.fail_unevaluated {
            config.unevaluated_rules = UnevaluatedRulePolicy::Fail;
        }
        if let Some(dir) = output_dir {
            config.output_dir = dir.to_path_buf();
        }
        config
    }
}

/// Execute the check subcommand, writing human-readable output to `out`.
pub fn run_check(args: &CheckArgs, config: &CheckerConfig, out: &mut impl Write) -> Result<u8> {
    let heavy = "=".repeat(80);
    writeln!(out, "{heavy}")?;
    writeln!(out, "EU DATA ACT COMPLIANCE CHECKER")?;
    writeln!(out, "{heavy}")?;
    writeln!(out)?;

    let checker = ComplianceChecker::from_config(config)
        .context("failed to initialize compliance checker")?;
    writeln!(out, "✅ Compliance checker initialized successfully")?;

    let paths = if args.paths.is_empty() {
        find_contracts(&config.contracts_dir, &config.contract_pattern)?
    } else {
        args.paths.clone()
    };
    if paths.is_empty() {
        writeln!(
            out,
            "⚠️  No contract files matching {} found in {}",
            config.contract_pattern,
            config.contracts_dir.display()
        )?;
        return Ok(0);
    }
    writeln!(out)?;
    writeln!(out, "📁 Found {} contract(s) to check", paths.len())?;
    writeln!(out)?;

    let batch = checker.check_contracts_named(&paths, display_name);

    for report in batch.reports() {
        writeln!(out, "🔍 Checked: {}", report.contract_name)?;
        writeln!(out, "   Path: {}", report.contract_path)?;
        match &report.load_error {
            Some(error) => writeln!(out, "   ❌ Error: {error}")?,
            None => {
                let status = if report.overall_compliant() {
                    "✅ COMPLIANT"
                } else {
                    "❌ NON-COMPLIANT"
                };
                writeln!(out, "   {status} ({} violations)", report.total_violations())?;
            }
        }
        writeln!(out)?;
    }

    if !args.quiet {
        writeln!(out)?;
        writeln!(out, "{heavy}")?;
        writeln!(out, "DETAILED REPORTS")?;
        writeln!(out, "{heavy}")?;
        for report in batch.reports() {
            write!(out, "{}", ReportView { report, verbose: true })?;
        }
    }

    write!(out, "{}", SummaryView { batch: &batch })?;

    if !args.no_export {
        // The verdict stands whether or not the export lands.
        match export_to_dir(&batch, &config.output_dir) {
            Ok(path) => {
                writeln!(out)?;
                writeln!(out, "📤 Report exported to: {}", path.display())?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "report export failed");
                writeln!(out, "⚠️  Could not export JSON: {e}")?;
            }
        }
    }

    Ok(if batch.all_loaded_compliant() { 0 } else { 1 })
}
