//! Shared vocabulary for alzlib: the semver constraint gate (C1), versioned
//! collections (C2), the asset model (C3), and the error taxonomy every
//! other alzlib crate builds on.

pub mod assets;
pub mod collection;
pub mod error;
pub mod filesystem;
pub mod metadata;
pub mod semver;

pub use assets::*;
pub use collection::{VersionedAsset, VersionedCollection};
pub use error::{AssetKind, ConstraintError, Error, Result};
pub use filesystem::MemoryFilesystem;
pub use metadata::{Dependency, LibraryMetadata};
pub use semver::{Constraint, SemanticVersion};
