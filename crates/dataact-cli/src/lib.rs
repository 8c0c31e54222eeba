//! # dataact-cli — Compliance Check Runner
//!
//! Provides the `dataact` command-line interface.
//!
//! ## Subcommands
//!
//! - `dataact check` — evaluate contracts, print reports and a summary,
//!   export the batch as JSON.
//! - `dataact rules` — list the rule registry.
//!
//! ```bash
//! dataact check                                   # every *.owl in the contracts dir
//! dataact check contracts/sample-b2c.owl --quiet
//! dataact check --pattern '*.ttl'                 # Turtle contracts
//! dataact --config checker.yaml check --fail-unevaluated
//! dataact rules --rules rules.yaml --json
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Every contract that loaded is compliant (or nothing to check) |
//! | 1 | At least one loaded contract is non-compliant |
//! | 2 | The run could not start (missing inputs, bad configuration) |

pub mod check;
pub mod rules;

use std::path::Path;

use anyhow::Result;
use dataact_compliance::CheckerConfig;

/// Exit code for a run that could not start.
pub const EXIT_OPERATIONAL_ERROR: u8 = 2;

/// The configuration in `path`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<CheckerConfig> {
    match path {
        Some(path) => {
            let config = CheckerConfig::from_yaml_file(path)?;
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(CheckerConfig::default()),
    }
}

/// Display name for a contract file: the stem with dashes turned into
/// spaces, title-cased. `sample-b2c.owl` becomes `Sample B2C`.
/// Underscores are kept.
pub fn display_name(path: &Path) -> String {
    let stem = dataact_compliance::default_contract_name(path).replace('-', " ");
    let mut out = String::with_capacity(stem.len());
    let mut after_letter = false;
    for c in stem.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    out
}
