//! Semantic versions and the constrained-pattern grammar used to look them up (C1).
//!
//! A constraint is always `M.m.p[-pre]` where `M` is a literal major version,
//! `m` is a literal minor version or `*`, and `p` must literally be `*`
//! (patch is never constrained). A version matches a constraint only if the
//! major/minor line up and its prerelease string equals the constraint's
//! post-hyphen suffix exactly (both empty counts as a match).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ConstraintError;

/// A parsed `major.minor.patch[-prerelease]` version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub prerelease: Option<String>,
}

impl SemanticVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = ConstraintError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let re = regex::Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z\-\.]+))?$").unwrap();
        let captures = re
            .captures(s)
            .ok_or_else(|| ConstraintError::InvalidSemver(s.to_string()))?;
        Ok(Self {
            major: captures[1]
                .parse()
                .map_err(|_| ConstraintError::InvalidSemver(s.to_string()))?,
            minor: captures[2]
                .parse()
                .map_err(|_| ConstraintError::InvalidSemver(s.to_string()))?,
            patch: captures[3]
                .parse()
                .map_err(|_| ConstraintError::InvalidSemver(s.to_string()))?,
            prerelease: captures.get(4).map(|m| m.as_str().to_string()),
        })
    }
}

/// Ordering used to pick the "highest" version satisfying a constraint.
/// A release (no prerelease) outranks a prerelease with the same numeric
/// triple; ties within prereleases are broken lexically.
impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then(match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

/// A parsed version-constraint pattern (C1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    major: u32,
    minor: Option<u32>,
    prerelease: Option<String>,
    source: String,
}

impl Constraint {
    /// Parse a constraint string per the grammar in §4.1.
    pub fn parse(s: &str) -> std::result::Result<Self, ConstraintError> {
        if s.is_empty() {
            return Err(ConstraintError::EmptyConstraint);
        }

        let (base, prerelease) = match s.split_once('-') {
            Some((base, pre)) => (base, Some(pre.to_string())),
            None => (s, None),
        };

        let parts: Vec<&str> = base.split('.').collect();
        if parts.len() != 3 {
            return Err(ConstraintError::ThreeComponentsRequired(s.to_string()));
        }

        if parts[0] == "*" {
            return Err(ConstraintError::MajorWildcardDisallowed(s.to_string()));
        }
        let major: u32 = parts[0]
            .parse()
            .map_err(|_| ConstraintError::InvalidSemver(s.to_string()))?;

        let minor = if parts[1] == "*" {
            None
        } else {
            Some(
                parts[1]
                    .parse::<u32>()
                    .map_err(|_| ConstraintError::InvalidSemver(s.to_string()))?,
            )
        };

        if parts[2] != "*" {
            return Err(ConstraintError::PatchMustBeWildcard(s.to_string()));
        }

        Ok(Self {
            major,
            minor,
            prerelease,
            source: s.to_string(),
        })
    }

    /// Whether `version` satisfies this constraint, including the strict
    /// prerelease check from §4.1.
    pub fn matches(&self, version: &SemanticVersion) -> bool {
        if version.major != self.major {
            return false;
        }
        if let Some(minor) = self.minor {
            if version.minor != minor {
                return false;
            }
        }
        version.prerelease == self.prerelease
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
