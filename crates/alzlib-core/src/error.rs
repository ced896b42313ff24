//! Error taxonomy shared by every alzlib crate.
//!
//! Each variant is type-matchable so callers branch on the taxonomy kind
//! (§7) rather than on message text. Contextual fields (file path, logical
//! name, kind) are carried on the variant itself.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a constraint string (C1).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("version constraint must not be empty")]
    EmptyConstraint,
    #[error("version constraint '{0}' must have exactly three dot-separated components")]
    ThreeComponentsRequired(String),
    #[error("version constraint '{0}' cannot wildcard the major component")]
    MajorWildcardDisallowed(String),
    #[error("version constraint '{0}' must wildcard the patch component")]
    PatchMustBeWildcard(String),
    #[error("version constraint '{0}' has an invalid semver component")]
    InvalidSemver(String),
}

/// The kind of asset a naming/uniqueness error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    PolicyDefinition,
    PolicySetDefinition,
    PolicyAssignment,
    RoleDefinition,
    Archetype,
    ArchetypeOverride,
    Architecture,
    Defaults,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssetKind::PolicyDefinition => "policy definition",
            AssetKind::PolicySetDefinition => "policy set definition",
            AssetKind::PolicyAssignment => "policy assignment",
            AssetKind::RoleDefinition => "role definition",
            AssetKind::Archetype => "archetype",
            AssetKind::ArchetypeOverride => "archetype override",
            AssetKind::Architecture => "architecture",
            AssetKind::Defaults => "defaults",
        };
        write!(f, "{s}")
    }
}

/// Main error type for alzlib operations.
#[derive(Error, Debug)]
pub enum Error {
    // --- Parse ---
    #[error("failed to unmarshal {path}: {source}")]
    Unmarshaling {
        path: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("unsupported file extension for {path}")]
    UnsupportedExtension { path: String },
    #[error("error processing file {path}: {source}")]
    ProcessingFile {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    // --- Validation ---
    #[error("property must not be nil: {path}")]
    PropertyMustNotBeNil { path: String },
    #[error("property {path} must be between {min} and {max} characters, got {actual}")]
    PropertyLength {
        path: String,
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("resource type incorrect, expected {expected}")]
    ResourceTypeIncorrect { expected: String },

    // --- Naming / uniqueness ---
    #[error("no name provided for {kind}")]
    NoNameProvided { kind: AssetKind },
    #[error("{kind} '{name}' already exists")]
    ResourceAlreadyExists { kind: AssetKind, name: String },

    // --- Versioning ---
    #[error("invalid version constraint")]
    ConstraintInvalid(#[from] ConstraintError),
    #[error("no version of '{name}' matches constraint '{constraint}'")]
    NoVersionMatchesConstraint { name: String, constraint: String },
    #[error("cannot mix versioned and versionless entries for '{name}'")]
    MixVersionedAndVersionless { name: String },
    #[error("duplicate version '{version}' for '{name}'")]
    DuplicateVersion { name: String, version: String },
    #[error("name '{actual}' differs from collection name '{expected}'")]
    NameDiffersFromExisting { expected: String, actual: String },
    #[error("invalid version string '{value}'")]
    InvalidVersion { value: String },

    // --- Dependencies ---
    #[error("invalid dependency metadata: {reason}")]
    MetadataDependencyInvalid { reason: String },
    #[error("failed to fetch '{reference}': {cause}")]
    FetchFailure { reference: String, cause: String },
    #[error("dependency cycle detected: {}", .chain.join(" -> "))]
    DependencyCycle { chain: Vec<String> },

    // --- Resolution ---
    #[error("unknown base archetype '{name}'")]
    UnknownBaseArchetype { name: String },
    #[error("assignment '{assignment}' references unresolved definition '{target}'")]
    UnresolvedDefinitionReference { assignment: String, target: String },
    #[error("assignment '{assignment}' sets parameter '{parameter}' not defined on its policy (set) definition")]
    ParameterNotOnDefinition { assignment: String, parameter: String },
    #[error("architecture '{architecture}' must have exactly one root management group")]
    MultipleRoots { architecture: String },
    #[error("parent cycle detected: {}", .chain.join(" -> "))]
    ParentCycle { chain: Vec<String> },
    #[error("management group '{id}' references unknown parent '{parent_id}'")]
    UnknownParentManagementGroup { id: String, parent_id: String },
    #[error("node '{node_id}' references unknown {kind} '{name}'")]
    UnresolvedAssetReference {
        node_id: String,
        kind: AssetKind,
        name: String,
    },

    // --- Defaults ---
    #[error("more than one defaults file in a single library member")]
    MultipleDefaults,
    #[error("default '{default_name}' targets unknown assignment '{assignment}'")]
    DefaultTargetsUnknownAssignment {
        default_name: String,
        assignment: String,
    },

    // --- Wrapped / transport ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// True for any error in the versioning taxonomy (§7).
    pub fn is_versioning_error(&self) -> bool {
        matches!(
            self,
            Error::ConstraintInvalid(_)
                | Error::NoVersionMatchesConstraint { .. }
                | Error::MixVersionedAndVersionless { .. }
                | Error::DuplicateVersion { .. }
                | Error::NameDiffersFromExisting { .. }
                | Error::InvalidVersion { .. }
        )
    }

    /// True for any error in the resolution taxonomy (§7).
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownBaseArchetype { .. }
                | Error::UnresolvedDefinitionReference { .. }
                | Error::ParameterNotOnDefinition { .. }
                | Error::MultipleRoots { .. }
                | Error::ParentCycle { .. }
                | Error::UnknownParentManagementGroup { .. }
                | Error::UnresolvedAssetReference { .. }
        )
    }
}
