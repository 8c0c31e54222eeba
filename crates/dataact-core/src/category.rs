//! # Contract Category — Single Source of Truth
//!
//! Defines the [`ContractCategory`] enum. The category of a contract
//! decides which Data Act articles apply to it. Every `match` on the enum
//! must be exhaustive, so adding a category forces the registry, the
//! classifier and the renderers to handle it at compile time.
//!
//! | Category | Relationship | Declared instance class |
//! |----------|--------------|-------------------------|
//! | `B2C` | Business-to-consumer (user access to product data) | `dataact:B2CDataSharing` |
//! | `B2B` | Business-to-business (data holder to third party) | `dataact:B2BDataSharing` |
//! | `B2G` | Business-to-government (exceptional need) | `dataact:B2GDataSharing` |
//! | `UNKNOWN` | No category could be determined | — |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// Category of a data-sharing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractCategory {
    /// Business-to-consumer data sharing.
    #[serde(rename = "B2C")]
    B2c,
    /// Business-to-business data sharing.
    #[serde(rename = "B2B")]
    B2b,
    /// Business-to-government data sharing.
    #[serde(rename = "B2G")]
    B2g,
    /// The category could not be determined.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Total number of category variants, `Unknown` included.
pub const CONTRACT_CATEGORY_COUNT: usize = 4;

impl ContractCategory {
    /// All variants in canonical order.
    pub fn all() -> &'static [ContractCategory] {
        &[Self::B2c, Self::B2b, Self::B2g, Self::Unknown]
    }

    /// The categories a contract can actually be classified into, in
    /// classification precedence order.
    pub fn classifiable() -> &'static [ContractCategory] {
        &[Self::B2c, Self::B2b, Self::B2g]
    }

    /// Returns the identifier used in reports and registry files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B2c => "B2C",
            Self::B2b => "B2B",
            Self::B2g => "B2G",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Lower-case token that identifies the category inside a contract
    /// file name. `Unknown` has no token.
    pub fn hint_token(&self) -> Option<&'static str> {
        match self {
            Self::B2c => Some("b2c"),
            Self::B2b => Some("b2b"),
            Self::B2g => Some("b2g"),
            Self::Unknown => None,
        }
    }

    /// Local name of the vocabulary class whose instances declare this
    /// category in a contract graph.
    pub fn instance_class(&self) -> Option<&'static str> {
        match self {
            Self::B2c => Some("B2CDataSharing"),
            Self::B2b => Some("B2BDataSharing"),
            Self::B2g => Some("B2GDataSharing"),
            Self::Unknown => None,
        }
    }

    /// Human-readable description of the sharing relationship.
    pub fn description(&self) -> &'static str {
        match self {
            Self::B2c => "Business-to-consumer",
            Self::B2b => "Business-to-business",
            Self::B2g => "Business-to-government",
            Self::Unknown => "Undetermined",
        }
    }

    /// Whether this is one of the classifiable categories.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractCategory {
    type Err = CoreError;

    /// Parse a category from the identifiers produced by
    /// [`ContractCategory::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B2C" => Ok(Self::B2c),
            "B2B" => Ok(Self::B2b),
            "B2G" => Ok(Self::B2g),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}
