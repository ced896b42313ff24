use std::collections::BTreeMap;

use alzlib_core::{
    AssetKind, Archetype, ArchetypeOverride, Architecture, DefaultPolicyValue, Error,
    LibraryMetadata, MemoryFilesystem, PolicyAssignment, PolicyDefinition, PolicySetDefinition,
    RoleDefinition, VersionedCollection,
};
use tracing::instrument;

use crate::classifier::{self, FileKind};
use crate::unmarshal::unmarshal;

/// Everything one library member contributed (C5).
#[derive(Debug, Default)]
pub struct ProcessResult {
    pub policy_definitions: BTreeMap<String, VersionedCollection<PolicyDefinition>>,
    pub policy_set_definitions: BTreeMap<String, VersionedCollection<PolicySetDefinition>>,
    pub policy_assignments: BTreeMap<String, PolicyAssignment>,
    pub role_definitions: BTreeMap<String, RoleDefinition>,
    pub archetypes: BTreeMap<String, Archetype>,
    pub archetype_overrides: BTreeMap<String, ArchetypeOverride>,
    pub architectures: BTreeMap<String, Architecture>,
    pub defaults: Option<Vec<DefaultPolicyValue>>,
    pub metadata: Option<LibraryMetadata>,
}

/// The outcome of walking one member's filesystem: everything that parsed
/// cleanly, plus the local errors accumulated along the way (§7).
#[derive(Debug, Default)]
pub struct ProcessOutcome {
    pub result: ProcessResult,
    pub errors: Vec<Error>,
}

/// Walks `fs` once, in directory order, classifying and unmarshaling each
/// recognized file (§4.5). `cache_dir_name` is skipped wherever it appears
/// in a path, per §6.
#[instrument(skip(fs))]
pub fn process(fs: &MemoryFilesystem, cache_dir_name: &str) -> ProcessOutcome {
    let mut outcome = ProcessOutcome::default();
    let paths: Vec<_> = fs.paths().map(|p| p.to_path_buf()).collect();

    for path in paths {
        if classifier::is_under_cache_dir(&path, cache_dir_name) {
            continue;
        }
        let Some(kind) = classifier::classify(&path) else {
            continue;
        };
        let bytes = match fs.read(&path) {
            Ok(b) => b,
            Err(e) => {
                outcome.errors.push(e);
                continue;
            }
        };

        if let Err(e) = ingest(kind, &path, bytes, &mut outcome.result) {
            outcome.errors.push(e);
        }
    }

    outcome
}

fn ingest(
    kind: FileKind,
    path: &std::path::Path,
    bytes: &[u8],
    result: &mut ProcessResult,
) -> Result<(), Error> {
    match kind {
        FileKind::Metadata => {
            let meta: LibraryMetadata = unmarshal(path, bytes)?;
            meta.validate()?;
            result.metadata = Some(meta);
        }
        FileKind::Defaults => {
            if result.defaults.is_some() {
                return Err(Error::MultipleDefaults);
            }
            let defaults: Vec<DefaultPolicyValue> = unmarshal(path, bytes)?;
            for d in &defaults {
                d.validate()?;
            }
            result.defaults = Some(defaults);
        }
        FileKind::PolicyDefinition => {
            let mut def: PolicyDefinition = unmarshal(path, bytes)?;
            if def.name.trim().is_empty() {
                return Err(Error::NoNameProvided {
                    kind: AssetKind::PolicyDefinition,
                });
            }
            def.validate()?;
            let name = def.name.clone();
            let collection = result.policy_definitions.entry(name.clone()).or_default();
            collection.add(def, false).map_err(|e| remap_duplicate(e, AssetKind::PolicyDefinition, &name))?;
        }
        FileKind::PolicySetDefinition => {
            let mut def: PolicySetDefinition = unmarshal(path, bytes)?;
            if def.name.trim().is_empty() {
                return Err(Error::NoNameProvided {
                    kind: AssetKind::PolicySetDefinition,
                });
            }
            def.validate()?;
            let name = def.name.clone();
            let collection = result.policy_set_definitions.entry(name.clone()).or_default();
            collection.add(def, false).map_err(|e| remap_duplicate(e, AssetKind::PolicySetDefinition, &name))?;
        }
        FileKind::PolicyAssignment => {
            let mut assignment: PolicyAssignment = unmarshal(path, bytes)?;
            assignment.validate()?;
            insert_unique(
                &mut result.policy_assignments,
                assignment.name.clone(),
                assignment,
                AssetKind::PolicyAssignment,
            )?;
        }
        FileKind::RoleDefinition => {
            let role: RoleDefinition = unmarshal(path, bytes)?;
            role.validate()?;
            insert_unique(
                &mut result.role_definitions,
                role.logical_name().to_string(),
                role,
                AssetKind::RoleDefinition,
            )?;
        }
        FileKind::Archetype => {
            let archetype: Archetype = unmarshal(path, bytes)?;
            archetype.validate()?;
            insert_unique(
                &mut result.archetypes,
                archetype.name.clone(),
                archetype,
                AssetKind::Archetype,
            )?;
        }
        FileKind::ArchetypeOverride => {
            let over: ArchetypeOverride = unmarshal(path, bytes)?;
            over.validate()?;
            insert_unique(
                &mut result.archetype_overrides,
                over.name.clone(),
                over,
                AssetKind::ArchetypeOverride,
            )?;
        }
        FileKind::Architecture => {
            let arch: Architecture = unmarshal(path, bytes)?;
            arch.validate()?;
            insert_unique(
                &mut result.architectures,
                arch.name.clone(),
                arch,
                AssetKind::Architecture,
            )?;
        }
    }
    Ok(())
}

fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    name: String,
    value: T,
    kind: AssetKind,
) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::NoNameProvided { kind });
    }
    if map.contains_key(&name) {
        return Err(Error::ResourceAlreadyExists { kind, name });
    }
    map.insert(name, value);
    Ok(())
}

fn remap_duplicate(e: Error, kind: AssetKind, name: &str) -> Error {
    match e {
        Error::DuplicateVersion { .. } => Error::ResourceAlreadyExists {
            kind,
            name: name.to_string(),
        },
        other => other,
    }
}
