//! Versioned collection (C2): holds either one versionless entry or N
//! versioned entries for a logical name, never both.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::semver::{Constraint, SemanticVersion};

/// Implemented by asset types that can live inside a [`VersionedCollection`].
pub trait VersionedAsset {
    fn logical_name(&self) -> &str;
    fn semantic_version(&self) -> Option<&SemanticVersion>;
}

#[derive(Debug, Clone)]
enum State<T> {
    Empty,
    Versionless(T),
    Versioned(BTreeMap<SemanticVersion, T>),
}

/// Either a versionless entry or a set of versioned entries sharing one
/// logical name (§3, §4.2).
#[derive(Debug, Clone)]
pub struct VersionedCollection<T> {
    state: State<T>,
}

impl<T: VersionedAsset> Default for VersionedCollection<T> {
    fn default() -> Self {
        Self { state: State::Empty }
    }
}

impl<T: VersionedAsset> VersionedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry`, obeying the mode-exclusivity and duplicate rules of
    /// §4.2. `overwrite` permits replacing an entry that already occupies the
    /// same slot (same name for versionless, same exact version otherwise).
    pub fn add(&mut self, entry: T, overwrite: bool) -> Result<()> {
        match &mut self.state {
            State::Empty => {
                self.state = match entry.semantic_version() {
                    None => State::Versionless(entry),
                    Some(v) => {
                        let mut map = BTreeMap::new();
                        map.insert(v.clone(), entry);
                        State::Versioned(map)
                    }
                };
                Ok(())
            }
            State::Versionless(existing) => {
                if entry.semantic_version().is_some() {
                    return Err(Error::MixVersionedAndVersionless {
                        name: entry.logical_name().to_string(),
                    });
                }
                if existing.logical_name() != entry.logical_name() {
                    return Err(Error::NameDiffersFromExisting {
                        expected: existing.logical_name().to_string(),
                        actual: entry.logical_name().to_string(),
                    });
                }
                if !overwrite {
                    return Err(Error::DuplicateVersion {
                        name: entry.logical_name().to_string(),
                        version: "versionless".to_string(),
                    });
                }
                *existing = entry;
                Ok(())
            }
            State::Versioned(map) => {
                let version = entry.semantic_version().ok_or_else(|| {
                    Error::MixVersionedAndVersionless {
                        name: entry.logical_name().to_string(),
                    }
                })?;
                if let Some((_, existing)) = map.iter().next() {
                    if existing.logical_name() != entry.logical_name() {
                        return Err(Error::NameDiffersFromExisting {
                            expected: existing.logical_name().to_string(),
                            actual: entry.logical_name().to_string(),
                        });
                    }
                }
                if map.contains_key(version) && !overwrite {
                    return Err(Error::DuplicateVersion {
                        name: entry.logical_name().to_string(),
                        version: version.to_string(),
                    });
                }
                map.insert(version.clone(), entry);
                Ok(())
            }
        }
    }

    /// Look up an entry by constraint, per the rules in §3/§4.2.
    pub fn get(&self, constraint: Option<&str>) -> Result<&T> {
        match (&self.state, constraint) {
            (State::Empty, _) => Err(Error::NoVersionMatchesConstraint {
                name: String::new(),
                constraint: constraint.unwrap_or("<none>").to_string(),
            }),
            (State::Versionless(entry), None) => Ok(entry),
            (State::Versionless(entry), Some(c)) => {
                // No version exists to match against; only an empty
                // constraint is a distinct error, anything else is simply
                // unsatisfiable.
                if c.is_empty() {
                    return Err(Error::ConstraintInvalid(
                        crate::error::ConstraintError::EmptyConstraint,
                    ));
                }
                Err(Error::NoVersionMatchesConstraint {
                    name: entry.logical_name().to_string(),
                    constraint: c.to_string(),
                })
            }
            (State::Versioned(map), None) => {
                // The implicit nil constraint carries an empty post-hyphen
                // suffix (§4.1), so it only matches non-prerelease versions;
                // fall back to the raw maximum only if every entry is a
                // prerelease.
                map.iter()
                    .rev()
                    .find(|(v, _)| !v.is_prerelease())
                    .or_else(|| map.iter().next_back())
                    .map(|(_, v)| v)
                    .ok_or_else(|| Error::NoVersionMatchesConstraint {
                        name: String::new(),
                        constraint: "<none>".to_string(),
                    })
            }
            (State::Versioned(map), Some(c)) => {
                if c.is_empty() {
                    return Err(Error::ConstraintInvalid(
                        crate::error::ConstraintError::EmptyConstraint,
                    ));
                }
                let constraint = Constraint::parse(c)?;
                map.iter()
                    .rev()
                    .find(|(v, _)| constraint.matches(v))
                    .map(|(_, entry)| entry)
                    .ok_or_else(|| {
                        let name = map
                            .values()
                            .next()
                            .map(|e| e.logical_name().to_string())
                            .unwrap_or_default();
                        Error::NoVersionMatchesConstraint {
                            name,
                            constraint: c.to_string(),
                        }
                    })
            }
        }
    }

    /// Whether an entry exists. An invalid version string returns `false`
    /// rather than propagating an error (§9, Open Question a).
    pub fn exists(&self, exact_version: Option<&str>) -> bool {
        match (&self.state, exact_version) {
            (State::Empty, _) => false,
            (State::Versionless(_), None) => true,
            (State::Versionless(_), Some(_)) => false,
            (State::Versioned(map), None) => !map.is_empty(),
            (State::Versioned(map), Some(v)) => match v.parse::<SemanticVersion>() {
                Ok(version) => map.contains_key(&version),
                Err(_) => {
                    tracing::debug!(version = v, "exists() received an unparseable version string");
                    false
                }
            },
        }
    }

    /// Merge `other` into `self` per the upsert rules of §4.2.
    pub fn upsert(&mut self, other: Self, overwrite: bool) -> Result<()> {
        match other.state {
            State::Empty => Ok(()),
            State::Versionless(entry) => match &self.state {
                State::Empty => {
                    self.state = State::Versionless(entry);
                    Ok(())
                }
                State::Versionless(existing) => {
                    if existing.logical_name() != entry.logical_name() && !overwrite {
                        return Err(Error::DuplicateVersion {
                            name: entry.logical_name().to_string(),
                            version: "versionless".to_string(),
                        });
                    }
                    self.state = State::Versionless(entry);
                    Ok(())
                }
                State::Versioned(_) => Err(Error::MixVersionedAndVersionless {
                    name: entry.logical_name().to_string(),
                }),
            },
            State::Versioned(other_map) => {
                if matches!(self.state, State::Versionless(_)) {
                    let name = other_map
                        .values()
                        .next()
                        .map(|e| e.logical_name().to_string())
                        .unwrap_or_default();
                    return Err(Error::MixVersionedAndVersionless { name });
                }
                for (_, entry) in other_map {
                    self.add(entry, overwrite)?;
                }
                Ok(())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    /// Iterate all entries, in ascending version order for versioned
    /// collections (order is irrelevant for versionless ones).
    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match &self.state {
            State::Empty => Box::new(std::iter::empty()),
            State::Versionless(entry) => Box::new(std::iter::once(entry)),
            State::Versioned(map) => Box::new(map.values()),
        }
    }

    pub fn len(&self) -> usize {
        match &self.state {
            State::Empty => 0,
            State::Versionless(_) => 1,
            State::Versioned(map) => map.len(),
        }
    }
}
