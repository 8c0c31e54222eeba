//! # Rule Registry
//!
//! Maps each [`ContractCategory`] to the ordered list of Data Act articles
//! checked for contracts of that category. The order of a category's rules
//! is the order its checks appear in every report.
//!
//! The registry is an immutable value. Build it once with
//! [`RuleRegistry::builtin`] or [`RuleRegistry::from_yaml_file`] and hand
//! it to the checker.
//!
//! ## Registry Files
//!
//! ```yaml
//! categories:
//!   B2C:
//!     - id: "4.1"
//!       name: User Access Rights
//!       query: query-4.1.sparql
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use dataact_core::ContractCategory;
use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};

/// One regulatory rule: an article id, its display name, and the
/// reference of the query that finds violations of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDescriptor {
    pub id: String,
    pub name: String,
    pub query: String,
}

impl RuleDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            query: query.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in Data Act table
// ---------------------------------------------------------------------------

struct BuiltinRule {
    category: ContractCategory,
    id: &'static str,
    name: &'static str,
    query: &'static str,
}

const DATA_ACT_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        category: ContractCategory::B2c,
        id: "4.1",
        name: "User Access Rights",
        query: "query-4.1.sparql",
    },
    BuiltinRule {
        category: ContractCategory::B2b,
        id: "8.6",
        name: "Trade Secret Exception",
        query: "query-8.6.sparql",
    },
    BuiltinRule {
        category: ContractCategory::B2g,
        id: "19.2a",
        name: "Competitive Use Prohibition",
        query: "query-19.2.a.sparql",
    },
];

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Category → ordered rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRegistry {
    rules: BTreeMap<ContractCategory, Vec<RuleDescriptor>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    categories: BTreeMap<String, Vec<RuleDescriptor>>,
}

impl RuleRegistry {
    /// The Data Act articles the checker ships with.
    pub fn builtin() -> Self {
        let mut rules: BTreeMap<ContractCategory, Vec<RuleDescriptor>> = BTreeMap::new();
        for rule in DATA_ACT_RULES {
            rules
                .entry(rule.category)
                .or_default()
                .push(RuleDescriptor::new(rule.id, rule.name, rule.query));
        }
        Self { rules }
    }

    /// Build a registry from explicit rule lists, validating them.
    pub fn new(rules: BTreeMap<ContractCategory, Vec<RuleDescriptor>>) -> RuleResult<Self> {
        for (category, list) in &rules {
            if !category.is_known() && !list.is_empty() {
                return Err(RuleError::Validation(format!(
                    "{category} cannot carry rules"
                )));
            }
            let mut seen = HashSet::new();
            for rule in list {
                if rule.id.trim().is_empty() {
                    return Err(RuleError::Validation(format!(
                        "rule with empty id under {category}"
                    )));
                }
                if rule.query.trim().is_empty() {
                    return Err(RuleError::Validation(format!(
                        "rule {:?} under {category} has no query",
                        rule.id
                    )));
                }
                if !seen.insert(rule.id.as_str()) {
                    return Err(RuleError::Validation(format!(
                        "duplicate rule id {:?} under {category}",
                        rule.id
                    )));
                }
            }
        }
        Ok(Self { rules })
    }

    /// Parse a registry from YAML text. `path` names the source in errors.
    pub fn from_yaml_str(text: &str, path: &Path) -> RuleResult<Self> {
        let file: RegistryFile =
            serde_yaml::from_str(text).map_err(|e| RuleError::YamlParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        let mut rules = BTreeMap::new();
        for (name, list) in file.categories {
            let category = ContractCategory::from_str(&name)
                .map_err(|_| RuleError::UnknownCategory { name: name.clone() })?;
            rules.insert(category, list);
        }
        let registry = Self::new(rules)?;
        tracing::debug!(path = %path.display(), rules = registry.len(), "loaded rule registry");
        Ok(registry)
    }

    /// Load a registry file.
    pub fn from_yaml_file(path: &Path) -> RuleResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuleError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                RuleError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_yaml_str(&text, path)
    }

    /// Rules for `category` in check order. Categories without rules,
    /// `Unknown` included, yield an empty slice.
    pub fn rules_for(&self, category: ContractCategory) -> &[RuleDescriptor] {
        self.rules.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories that have at least one rule, in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = ContractCategory> + '_ {
        self.rules
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(category, _)| *category)
    }

    /// Every (category, rule) pair in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ContractCategory, &RuleDescriptor)> + '_ {
        self.rules
            .iter()
            .flat_map(|(category, list)| list.iter().map(move |rule| (*category, rule)))
    }

    /// Total number of rules across all categories.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
