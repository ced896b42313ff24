use std::path::Path;

use alzlib_core::{Error, MemoryFilesystem};
use alzlib_library::classifier::{self, FileKind};

use crate::aggregator::AlzLib;

/// A composable check over an aggregator (C10). Checks accumulate errors
/// rather than failing fast, per §7's propagation policy for checker
/// checks.
pub trait Check {
    fn name(&self) -> &'static str;
    fn run(&self, lib: &AlzLib) -> Vec<Error>;
}

/// Runs every check in order and flattens their findings.
pub fn run_all(lib: &AlzLib, checks: &[&dyn Check]) -> Vec<Error> {
    checks.iter().flat_map(|c| c.run(lib)).collect()
}

/// Every policy, policy-set, and role definition must appear in at least
/// one archetype's reference set.
pub struct AllDefinitionsAreReferenced;

impl Check for AllDefinitionsAreReferenced {
    fn name(&self) -> &'static str {
        "AllDefinitionsAreReferenced"
    }

    fn run(&self, lib: &AlzLib) -> Vec<Error> {
        let mut referenced_policies = std::collections::BTreeSet::new();
        let mut referenced_sets = std::collections::BTreeSet::new();
        let mut referenced_roles = std::collections::BTreeSet::new();
        for archetype in lib.archetypes() {
            referenced_policies.extend(archetype.policy_definitions.iter().cloned());
            referenced_sets.extend(archetype.policy_set_definitions.iter().cloned());
            referenced_roles.extend(archetype.role_definitions.iter().cloned());
        }

        let mut errors = Vec::new();
        for (name, _) in lib.policy_definitions() {
            if !referenced_policies.contains(name) {
                errors.push(Error::Other(anyhow::anyhow!(
                    "policy definition '{name}' is not referenced by any archetype"
                )));
            }
        }
        for (name, _) in lib.policy_set_definitions() {
            if !referenced_sets.contains(name) {
                errors.push(Error::Other(anyhow::anyhow!(
                    "policy set definition '{name}' is not referenced by any archetype"
                )));
            }
        }
        for role in lib.role_definitions() {
            if !referenced_roles.contains(role.logical_name()) {
                errors.push(Error::Other(anyhow::anyhow!(
                    "role definition '{}' is not referenced by any archetype",
                    role.logical_name()
                )));
            }
        }
        errors
    }
}

/// The last-merged member's metadata `path` must match the caller's
/// expectation. Unset `expected` disables the check (§6: `LIBRARY_PATH`).
pub struct LibraryMemberPath {
    pub expected: Option<String>,
}

impl Check for LibraryMemberPath {
    fn name(&self) -> &'static str {
        "LibraryMemberPath"
    }

    fn run(&self, lib: &AlzLib) -> Vec<Error> {
        let Some(expected) = &self.expected else {
            return Vec::new();
        };
        match lib.last_member_metadata() {
            Some(meta) if &meta.path == expected => Vec::new(),
            Some(meta) => vec![Error::Other(anyhow::anyhow!(
                "library member path '{}' does not match expected '{expected}'",
                meta.path
            ))],
            None => vec![Error::Other(anyhow::anyhow!(
                "no library member metadata available to check against '{expected}'"
            ))],
        }
    }
}

/// Every default must name an existing assignment, and every listed
/// parameter must be present on the referenced definition.
pub struct DefaultsCheck;

impl Check for DefaultsCheck {
    fn name(&self) -> &'static str {
        "Defaults"
    }

    fn run(&self, lib: &AlzLib) -> Vec<Error> {
        let mut errors = Vec::new();
        for default in lib.defaults() {
            for target in &default.assignments {
                let Some(assignment) = lib.policy_assignment(&target.assignment_name) else {
                    errors.push(Error::DefaultTargetsUnknownAssignment {
                        default_name: default.default_name.clone(),
                        assignment: target.assignment_name.clone(),
                    });
                    continue;
                };
                let definition_name = strip_definition_name(&assignment.policy_definition_id);
                for parameter_name in &target.parameter_names {
                    let found = if let Ok(definition) = lib.policy_definition(definition_name, None) {
                        definition.is_parameter_optional(parameter_name)
                    } else if let Ok(set_definition) = lib.policy_set_definition(definition_name, None) {
                        set_definition.is_parameter_optional(parameter_name)
                    } else {
                        // Neither kind of definition is known here; that's
                        // `unresolvedDefinitionReference` territory elsewhere,
                        // not this check's concern.
                        continue;
                    };
                    if found.is_none() {
                        errors.push(Error::ParameterNotOnDefinition {
                            assignment: target.assignment_name.clone(),
                            parameter: parameter_name.clone(),
                        });
                    }
                }
            }
        }
        errors
    }
}

fn strip_definition_name(policy_definition_id: &str) -> &str {
    policy_definition_id.rsplit('/').next().unwrap_or(policy_definition_id)
}

/// For each asset file, the `{name, type, properties.version?}` inside the
/// document must match the `{name, type, version?}` segmentation of the
/// file's basename.
pub struct FileNamesConsistent;

impl FileNamesConsistent {
    pub fn check(&self, fs: &MemoryFilesystem) -> Vec<Error> {
        let mut errors = Vec::new();
        for path in fs.paths() {
            let Some(kind) = classifier::classify(path) else {
                continue;
            };
            if !matches!(
                kind,
                FileKind::PolicyDefinition | FileKind::PolicySetDefinition | FileKind::RoleDefinition
            ) {
                continue;
            }
            let Ok(bytes) = fs.read(path) else { continue };
            let Ok(doc) = parse_document(path, bytes) else {
                continue;
            };
            if let Some(err) = check_one(path, kind, &doc) {
                errors.push(err);
            }
        }
        errors
    }
}

fn parse_document(path: &Path, bytes: &[u8]) -> Result<serde_json::Value, Error> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "json" => serde_json::from_slice(bytes).map_err(|e| Error::Unmarshaling {
            path: path.display().to_string(),
            source: e.into(),
        }),
        "yaml" | "yml" => serde_yaml_to_json(bytes, path),
        _ => Err(Error::UnsupportedExtension {
            path: path.display().to_string(),
        }),
    }
}

fn serde_yaml_to_json(bytes: &[u8], path: &Path) -> Result<serde_json::Value, Error> {
    serde_yaml::from_slice::<serde_json::Value>(bytes).map_err(|e| Error::Unmarshaling {
        path: path.display().to_string(),
        source: e.into(),
    })
}

fn check_one(path: &Path, kind: FileKind, doc: &serde_json::Value) -> Option<Error> {
    let basename = path.file_name()?.to_str()?;
    let (expected_name, expected_version) = split_basename(basename, kind)?;

    let doc_name_key = if matches!(kind, FileKind::RoleDefinition) {
        "roleName"
    } else {
        "name"
    };
    let doc_name = doc.get(doc_name_key)?.as_str()?;
    if doc_name != expected_name.as_str() {
        return Some(Error::Other(anyhow::anyhow!(
            "file '{}' name segment '{expected_name}' does not match document {doc_name_key} '{doc_name}'",
            path.display()
        )));
    }

    if let Some(expected_version) = expected_version {
        let doc_version = doc.get("version").and_then(|v| v.as_str());
        if doc_version != Some(expected_version.as_str()) {
            return Some(Error::Other(anyhow::anyhow!(
                "file '{}' version segment '{expected_version}' does not match document version '{:?}'",
                path.display(),
                doc_version
            )));
        }
    }

    None
}

/// Splits `{name}[.{version}].alz_<kind>.{ext}` into `(name, version)`. The
/// version, when present, is itself dot-separated (e.g. `1.0.0`), so the
/// suffix is stripped by known kind first rather than by naive `.` splitting.
fn split_basename(basename: &str, kind: FileKind) -> Option<(String, Option<String>)> {
    let suffix = match kind {
        FileKind::PolicyDefinition => "alz_policy_definition",
        FileKind::PolicySetDefinition => "alz_policy_set_definition",
        FileKind::RoleDefinition => "alz_role_definition",
        _ => return None,
    };
    let lower = basename.to_lowercase();
    let marker = format!(".{suffix}.");
    let prefix = &basename[..lower.find(&marker)?];

    if !matches!(kind, FileKind::PolicyDefinition | FileKind::PolicySetDefinition) {
        return Some((prefix.to_string(), None));
    }

    match prefix.split_once('.') {
        Some((name, version)) if is_semver_like(version) => {
            Some((name.to_string(), Some(version.to_string())))
        }
        _ => Some((prefix.to_string(), None)),
    }
}

fn is_semver_like(s: &str) -> bool {
    let parts: Vec<&str> = s.splitn(2, '-').collect();
    parts[0].split('.').count() == 3 && parts[0].split('.').all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
