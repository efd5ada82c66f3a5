//! The per-item POS availability flag.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use posflag_core::DomainError;

/// Tri-state availability marker stored on each catalog item.
///
/// Persisted as item metadata: absent or `""` is `Unset`, `"yes"` is
/// `Allowed`, `"no"` is `Disallowed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFlag {
    #[default]
    Unset,
    Allowed,
    Disallowed,
}

impl AvailabilityFlag {
    /// The flag the initializer materializes for a given global default.
    pub fn from_default(sell_by_default: bool) -> Self {
        if sell_by_default {
            Self::Allowed
        } else {
            Self::Disallowed
        }
    }

    /// Decode a stored metadata value.
    pub fn from_meta(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::Unset),
            Some("yes") => Ok(Self::Allowed),
            Some("no") => Ok(Self::Disallowed),
            Some(other) => Err(DomainError::validation(format!(
                "unrecognized pos flag value {other:?}"
            ))),
        }
    }

    /// Encode for storage. `Unset` is represented by the absence of the field.
    pub fn as_meta(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Allowed => Some("yes"),
            Self::Disallowed => Some("no"),
        }
    }

    pub fn is_set(self) -> bool {
        self != Self::Unset
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Allowed => "allowed",
            Self::Disallowed => "disallowed",
        }
    }
}

impl core::fmt::Display for AvailabilityFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the admin-facing keywords (`allowed`, `disallowed`, `unset`) as well
/// as the stored `yes`/`no` form.
impl FromStr for AvailabilityFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unset" | "" => Ok(Self::Unset),
            "allowed" | "allow" | "yes" => Ok(Self::Allowed),
            "disallowed" | "disallow" | "no" => Ok(Self::Disallowed),
            other => Err(DomainError::validation(format!(
                "expected allowed, disallowed or unset, got {other:?}"
            ))),
        }
    }
}
