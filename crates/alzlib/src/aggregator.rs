use std::collections::BTreeMap;

use alzlib_core::{
    Archetype, ArchetypeOverride, Architecture, DefaultPolicyValue, Error, LibraryMetadata,
    PolicyAssignment, PolicyDefinition, PolicySetDefinition, Result, RoleDefinition,
    VersionedCollection,
};
use alzlib_library::{process, MemoryFilesystem, ProcessResult};
use tracing::instrument;

/// The aggregator (C7): owns every asset contributed by a set of library
/// members after merging, and the derived archetype set.
#[derive(Debug, Default)]
pub struct AlzLib {
    policy_definitions: BTreeMap<String, VersionedCollection<PolicyDefinition>>,
    policy_set_definitions: BTreeMap<String, VersionedCollection<PolicySetDefinition>>,
    policy_assignments: BTreeMap<String, PolicyAssignment>,
    role_definitions: BTreeMap<String, RoleDefinition>,
    archetypes: BTreeMap<String, Archetype>,
    archetype_overrides: BTreeMap<String, ArchetypeOverride>,
    // Definition order (§4.7) of `archetype_overrides`, by first appearance
    // across merged members. A later member redefining an existing override
    // updates its entry in place rather than moving it to the end.
    archetype_override_order: Vec<String>,
    architectures: BTreeMap<String, Architecture>,
    defaults: BTreeMap<String, DefaultPolicyValue>,
    last_member_metadata: Option<LibraryMetadata>,
}

impl AlzLib {
    /// Runs the processor on each filesystem in the given order (leaf-first)
    /// and merges the results (§4.7). Returns on the first hard error.
    #[instrument(skip(filesystems))]
    pub fn init(filesystems: &[MemoryFilesystem], cache_dir_name: &str) -> Result<Self> {
        let mut lib = Self::default();
        for fs in filesystems {
            let outcome = process(fs, cache_dir_name);
            if let Some(first) = outcome.errors.into_iter().next() {
                return Err(first);
            }
            lib.merge(outcome.result)?;
        }
        lib.resolve_archetypes()?;
        Ok(lib)
    }

    /// Like [`init`](Self::init) but accumulates every error across every
    /// member instead of failing on the first one found.
    #[instrument(skip(filesystems))]
    pub fn validate_library(filesystems: &[MemoryFilesystem], cache_dir_name: &str) -> (Self, Vec<Error>) {
        let mut lib = Self::default();
        let mut errors = Vec::new();
        for fs in filesystems {
            let outcome = process(fs, cache_dir_name);
            errors.extend(outcome.errors);
            if let Err(e) = lib.merge(outcome.result) {
                errors.push(e);
            }
        }
        if let Err(e) = lib.resolve_archetypes() {
            errors.push(e);
        }
        (lib, errors)
    }

    fn merge(&mut self, member: ProcessResult) -> Result<()> {
        for (name, collection) in member.policy_definitions {
            self.policy_definitions
                .entry(name)
                .or_default()
                .upsert(collection, true)?;
        }
        for (name, collection) in member.policy_set_definitions {
            self.policy_set_definitions
                .entry(name)
                .or_default()
                .upsert(collection, true)?;
        }
        for (name, assignment) in member.policy_assignments {
            self.policy_assignments.insert(name, assignment);
        }
        for (name, role) in member.role_definitions {
            self.role_definitions.insert(name, role);
        }
        for (name, archetype) in member.archetypes {
            self.archetypes.insert(name, archetype);
        }
        for (name, over) in member.archetype_overrides {
            if !self.archetype_overrides.contains_key(&name) {
                self.archetype_override_order.push(name.clone());
            }
            self.archetype_overrides.insert(name, over);
        }
        for (name, architecture) in member.architectures {
            self.architectures.insert(name, architecture);
        }
        if let Some(defaults) = member.defaults {
            for default in defaults {
                self.defaults.insert(default.default_name.clone(), default);
            }
        }
        if let Some(meta) = member.metadata {
            self.last_member_metadata = Some(meta);
        }
        Ok(())
    }

    /// Applies every override in order of definition (§4.7), producing
    /// `archetypes[o.name]` from `archetypes[o.baseArchetype]`. Definition
    /// order lets one override's output become a later override's base.
    fn resolve_archetypes(&mut self) -> Result<()> {
        let overrides: Vec<ArchetypeOverride> = self
            .archetype_override_order
            .iter()
            .map(|name| self.archetype_overrides[name].clone())
            .collect();
        for over in overrides {
            let base = self
                .archetypes
                .get(&over.base_archetype)
                .ok_or_else(|| Error::UnknownBaseArchetype {
                    name: over.base_archetype.clone(),
                })?
                .clone();
            let (resolved, _diff) = over.apply(&base);
            self.archetypes.insert(resolved.name.clone(), resolved);
        }
        Ok(())
    }

    pub fn archetype(&self, name: &str) -> Option<&Archetype> {
        self.archetypes.get(name)
    }

    pub fn archetypes(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.values()
    }

    pub fn policy_definition(&self, name: &str, constraint: Option<&str>) -> Result<&PolicyDefinition> {
        self.policy_definitions
            .get(name)
            .ok_or_else(|| Error::NoVersionMatchesConstraint {
                name: name.to_string(),
                constraint: constraint.unwrap_or("<none>").to_string(),
            })?
            .get(constraint)
    }

    pub fn policy_set_definition(&self, name: &str, constraint: Option<&str>) -> Result<&PolicySetDefinition> {
        self.policy_set_definitions
            .get(name)
            .ok_or_else(|| Error::NoVersionMatchesConstraint {
                name: name.to_string(),
                constraint: constraint.unwrap_or("<none>").to_string(),
            })?
            .get(constraint)
    }

    pub fn policy_assignment(&self, name: &str) -> Option<&PolicyAssignment> {
        self.policy_assignments.get(name)
    }

    pub fn role_definition(&self, name: &str) -> Option<&RoleDefinition> {
        self.role_definitions.get(name)
    }

    pub fn architecture(&self, name: &str) -> Option<&Architecture> {
        self.architectures.get(name)
    }

    pub fn architectures(&self) -> impl Iterator<Item = &Architecture> {
        self.architectures.values()
    }

    pub fn default_value(&self, name: &str) -> Option<&DefaultPolicyValue> {
        self.defaults.get(name)
    }

    pub fn defaults(&self) -> impl Iterator<Item = &DefaultPolicyValue> {
        self.defaults.values()
    }

    pub fn defaults_map(&self) -> &BTreeMap<String, DefaultPolicyValue> {
        &self.defaults
    }

    pub fn policy_definitions(&self) -> impl Iterator<Item = (&String, &VersionedCollection<PolicyDefinition>)> {
        self.policy_definitions.iter()
    }

    pub fn policy_set_definitions(&self) -> impl Iterator<Item = (&String, &VersionedCollection<PolicySetDefinition>)> {
        self.policy_set_definitions.iter()
    }

    pub fn policy_assignments(&self) -> impl Iterator<Item = &PolicyAssignment> {
        self.policy_assignments.values()
    }

    pub fn role_definitions(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.role_definitions.values()
    }

    pub fn last_member_metadata(&self) -> Option<&LibraryMetadata> {
        self.last_member_metadata.as_ref()
    }
}
