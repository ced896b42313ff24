//! Library composition and hierarchy resolution for Azure Landing Zones.
//!
//! This is the crate external tooling depends on: it aggregates library
//! members into an [`AlzLib`](aggregator::AlzLib), binds default policy
//! values, and checks the result for consistency. Hierarchy building lives
//! in the separate `alzlib-hierarchy` crate, which depends on this one.

pub mod aggregator;
pub mod checker;
pub mod config;
pub mod defaults_binder;

pub use aggregator::AlzLib;
pub use checker::{AllDefinitionsAreReferenced, Check, DefaultsCheck, FileNamesConsistent, LibraryMemberPath};
pub use config::EngineConfig;
pub use defaults_binder::bind_defaults;

/// Re-export of the asset model, error taxonomy, and versioned collection
/// (C1–C3) for downstream tooling that only needs the data model.
pub mod core {
    pub use alzlib_core::*;
}

/// Re-export of the unmarshaler, classifier, and processor (C4–C5).
pub mod library {
    pub use alzlib_library::*;
}

/// Re-export of the library reference and fetcher (C6).
pub mod fetch {
    pub use alzlib_fetch::*;
}
