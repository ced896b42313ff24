use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// The kind of asset a file's name identifies it as (C4, §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Architecture,
    Archetype,
    ArchetypeOverride,
    PolicyAssignment,
    PolicyDefinition,
    PolicySetDefinition,
    RoleDefinition,
    Defaults,
    Metadata,
}

struct Rule {
    regex: &'static str,
    kind: FileKind,
}

const RULES: &[Rule] = &[
    Rule {
        regex: r".+\.alz_architecture_definition\.(json|yaml|yml)$",
        kind: FileKind::Architecture,
    },
    Rule {
        regex: r".+\.alz_archetype_definition\.(json|yaml|yml)$",
        kind: FileKind::Archetype,
    },
    Rule {
        regex: r".+\.alz_archetype_override\.(json|yaml|yml)$",
        kind: FileKind::ArchetypeOverride,
    },
    Rule {
        regex: r".+\.alz_policy_assignment\.(json|yaml|yml)$",
        kind: FileKind::PolicyAssignment,
    },
    Rule {
        regex: r".+\.alz_policy_definition\.(json|yaml|yml)$",
        kind: FileKind::PolicyDefinition,
    },
    Rule {
        regex: r".+\.alz_policy_set_definition\.(json|yaml|yml)$",
        kind: FileKind::PolicySetDefinition,
    },
    Rule {
        regex: r".+\.alz_role_definition\.(json|yaml|yml)$",
        kind: FileKind::RoleDefinition,
    },
    Rule {
        regex: r"^alz_policy_default_values\.(json|yaml|yml)$",
        kind: FileKind::Defaults,
    },
];

fn compiled() -> &'static Vec<(Regex, FileKind)> {
    static CACHE: OnceLock<Vec<(Regex, FileKind)>> = OnceLock::new();
    CACHE.get_or_init(|| {
        RULES
            .iter()
            .map(|r| (Regex::new(r.regex).expect("static regex is valid"), r.kind))
            .collect()
    })
}

/// Classifies `path` by its lowercased basename. Returns `None` for files
/// that match no recognized pattern; those are silently ignored (§4.4).
pub fn classify(path: &Path) -> Option<FileKind> {
    let basename = path.file_name()?.to_str()?.to_lowercase();
    if basename == "alz_library_metadata.json" {
        return Some(FileKind::Metadata);
    }
    compiled()
        .iter()
        .find(|(re, _)| re.is_match(&basename))
        .map(|(_, kind)| *kind)
}

/// True if `path` lives under a directory named `cache_dir_name` anywhere
/// in its components, used to skip the fetch-cache base directory (§6).
pub fn is_under_cache_dir(path: &Path, cache_dir_name: &str) -> bool {
    path.components()
        .any(|c| c.as_os_str() == cache_dir_name)
}
