//! Library reference resolution and dependency fetching (C6).

pub mod fetcher;
pub mod reference;

pub use fetcher::{fetch_with_dependencies, Fetcher};
pub use reference::{CustomLocation, Fingerprint, LibraryReference};
