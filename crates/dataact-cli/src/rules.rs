//! # Rules Subcommand
//!
//! Lists the rule registry in effect: category, article id, article name
//! and query reference, in evaluation order.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use dataact_compliance::CheckerConfig;
use dataact_rules::RuleRegistry;

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Rule registry file (YAML). Defaults to the configured registry.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Print the registry as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RuleRow<'a> {
    category: &'a str,
    id: &'a str,
    name: &'a str,
    query: &'a str,
}

pub fn run_rules(args: &RulesArgs, config: &CheckerConfig, out: &mut impl Write) -> Result<u8> {
    let registry = match &args.rules {
        Some(path) => RuleRegistry::from_yaml_file(path)
            .with_context(|| format!("failed to load rule registry {}", path.display()))?,
        None => config.registry()?,
    };

    if args.json {
        let rows: Vec<RuleRow<'_>> = registry
            .iter()
            .map(|(category, rule)| RuleRow {
                category: category.as_str(),
                id: &rule.id,
                name: &rule.name,
                query: &rule.query,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(0);
    }

    for category in registry.categories() {
        writeln!(out, "{category}: {}", category.description())?;
        for rule in registry.rules_for(category) {
            writeln!(out, "   Article {:<8} {:<32} {}", rule.id, rule.name, rule.query)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{} rule(s)", registry.len())?;
    Ok(0)
}
