//! # Checker Configuration
//!
//! Where the checker finds its inputs and where reports go. Every field
//! has a default matching the standard repository layout:
//!
//! ```yaml
//! base_graph: data_act_ontology.owl
//! queries_dir: compliance-checks/queries
//! # rules_file: rules.yaml        # omit for the built-in Data Act table
//! contracts_dir: compliance-checks/contracts
//! contract_pattern: "*.owl"
//! output_dir: compliance-checks/compliance-reports
//! unevaluated_rules: exclude      # or: fail
//! ```
//!
//! Relative paths in a configuration file resolve against the directory
//! containing that file.
//!
//! Graph files are parsed by extension: `.owl`, `.rdf` and `.xml` as
//! RDF/XML, `.ttl` as Turtle, `.nt` as N-Triples. Point `contract_pattern`
//! at `*.ttl` to check Turtle contracts.

use std::path::{Path, PathBuf};

use dataact_rules::RuleRegistry;
use serde::{Deserialize, Serialize};

use crate::error::{ComplianceError, ComplianceResult};
use crate::report::UnevaluatedRulePolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    /// Base rule-definition graph merged under every contract.
    pub base_graph: PathBuf,
    /// Directory the rule query references resolve in.
    pub queries_dir: PathBuf,
    /// Registry file; `None` selects the built-in table.
    pub rules_file: Option<PathBuf>,
    pub contracts_dir: PathBuf,
    /// Wildcard pattern for contract file names.
    pub contract_pattern: String,
    pub output_dir: PathBuf,
    pub unevaluated_rules: UnevaluatedRulePolicy,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            base_graph: PathBuf::from("data_act_ontology.owl"),
            queries_dir: PathBuf::from("compliance-checks/queries"),
            rules_file: None,
            contracts_dir: PathBuf::from("compliance-checks/contracts"),
            contract_pattern: "*.owl".to_string(),
            output_dir: PathBuf::from("compliance-checks/compliance-reports"),
            unevaluated_rules: UnevaluatedRulePolicy::Exclude,
        }
    }
}

impl CheckerConfig {
    /// Load a configuration file.
    pub fn from_yaml_file(path: &Path) -> ComplianceResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ComplianceError::MissingResource {
                    kind: "Configuration file",
                    path: path.to_path_buf(),
                }
            } else {
                ComplianceError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_yaml_str(&text, base_dir).map_err(|e| match e {
            ComplianceError::Config { message, .. } => ComplianceError::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse configuration text, resolving relative paths against
    /// `base_dir`.
    pub fn from_yaml_str(text: &str, base_dir: &Path) -> ComplianceResult<Self> {
        // An empty document is a valid, all-defaults configuration.
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text).map_err(|e| ComplianceError::Config {
                path: base_dir.to_path_buf(),
                message: e.to_string(),
            })?
        };
        Ok(config.resolved_against(base_dir))
    }

    /// Make every relative path relative to `dir` instead.
    pub fn resolved_against(mut self, dir: &Path) -> Self {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        resolve(&mut self.base_graph);
        resolve(&mut self.queries_dir);
        resolve(&mut self.contracts_dir);
        resolve(&mut self.output_dir);
        if let Some(rules) = self.rules_file.as_mut() {
            resolve(rules);
        }
        self
    }

    /// The registry this configuration selects.
    pub fn registry(&self) -> ComplianceResult<RuleRegistry> {
        match &self.rules_file {
            Some(path) => Ok(RuleRegistry::from_yaml_file(path)?),
            None => Ok(RuleRegistry::builtin()),
        }
    }
}
