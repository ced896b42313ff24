use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use alzlib_core::{Dependency, Error, LibraryMetadata, MemoryFilesystem, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::reference::{CustomLocation, Fingerprint, LibraryReference};

/// Materializes a [`LibraryReference`] into an in-memory filesystem rooted
/// at the member's directory (§4.6). `index` is a monotonic counter used by
/// implementations to name a unique cache subdirectory.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, reference: &LibraryReference, index: u64) -> Result<MemoryFilesystem>;
}

impl From<&Dependency> for LibraryReference {
    fn from(dep: &Dependency) -> Self {
        match dep {
            Dependency::Catalog { path, tag } => LibraryReference::Catalog {
                path: path.clone(),
                tag: tag.clone(),
            },
            Dependency::Custom { custom_url } => {
                LibraryReference::Custom(CustomLocation::Url(custom_url.clone()))
            }
        }
    }
}

const METADATA_FILE: &str = "alz_library_metadata.json";

/// Breadth-first walk of a reference's dependency graph, returning
/// filesystems in leaf-first order: dependencies precede dependents so
/// that merging (§4.7) lets the downstream consumer win (§4.6).
///
/// Duplicate references (same fingerprint) are coalesced: a dependency
/// already fetched on another branch is not re-fetched. A fingerprint
/// reappearing on the *current* ancestor chain, by contrast, is a genuine
/// cycle (§9) and fails with [`Error::DependencyCycle`] rather than being
/// silently swallowed. Fetches within one BFS level run concurrently,
/// bounded by `concurrency`; any single fetch failure fails the whole
/// resolution.
#[instrument(skip(fetcher, cancel))]
pub async fn fetch_with_dependencies(
    fetcher: &dyn Fetcher,
    root: LibraryReference,
    concurrency: usize,
    cancel: &CancellationToken,
) -> Result<Vec<MemoryFilesystem>> {
    let concurrency = concurrency.max(1);
    let mut visited: HashSet<Fingerprint> = HashSet::new();
    let root_fingerprint = root.fingerprint();
    visited.insert(root_fingerprint.clone());

    // Each frontier entry carries the chain of fingerprints from the root
    // down to (and including) itself, so a revisit can be told apart from
    // "seen on another branch" (fine) vs. "seen on this branch" (a cycle).
    let root_chain = Arc::new(vec![root_fingerprint]);
    let mut frontier: Vec<(LibraryReference, Arc<Vec<Fingerprint>>)> = vec![(root, root_chain)];
    let mut levels: Vec<Vec<MemoryFilesystem>> = Vec::new();
    let mut next_index: u64 = 0;

    while !frontier.is_empty() {
        if cancel.is_cancelled() {
            return Err(Error::Other(anyhow::anyhow!(
                "fetch cancelled before resolution completed"
            )));
        }

        let fetches: Vec<_> = frontier
            .drain(..)
            .map(|(reference, chain)| {
                let index = next_index;
                next_index += 1;
                async move {
                    let result = fetcher.fetch(&reference, index).await;
                    (reference, chain, result)
                }
            })
            .collect();

        let results: Vec<(LibraryReference, Arc<Vec<Fingerprint>>, Result<MemoryFilesystem>)> =
            stream::iter(fetches).buffer_unordered(concurrency).collect().await;

        let mut level_filesystems = Vec::with_capacity(results.len());
        let mut next_frontier = Vec::new();

        for (reference, chain, result) in results {
            let fs = result.map_err(|cause| Error::FetchFailure {
                reference: reference.fingerprint().to_string(),
                cause: cause.to_string(),
            })?;

            for child in dependency_references(&fs)? {
                let fingerprint = child.fingerprint();
                if chain.contains(&fingerprint) {
                    let mut chain_strings: Vec<String> = chain.iter().map(Fingerprint::to_string).collect();
                    chain_strings.push(fingerprint.to_string());
                    return Err(Error::DependencyCycle { chain: chain_strings });
                }
                if visited.insert(fingerprint.clone()) {
                    let mut child_chain = (*chain).clone();
                    child_chain.push(fingerprint);
                    next_frontier.push((child, Arc::new(child_chain)));
                }
            }

            level_filesystems.push(fs);
        }

        levels.push(level_filesystems);
        frontier = next_frontier;
    }

    let mut result = Vec::new();
    for level in levels.into_iter().rev() {
        result.extend(level);
    }
    Ok(result)
}

fn dependency_references(fs: &MemoryFilesystem) -> Result<Vec<LibraryReference>> {
    let bytes = match fs.read(Path::new(METADATA_FILE)) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(Vec::new()),
    };
    let meta: LibraryMetadata = serde_json::from_slice(bytes).map_err(|e| Error::Unmarshaling {
        path: METADATA_FILE.to_string(),
        source: e.into(),
    })?;
    Ok(meta.dependencies.iter().map(LibraryReference::from).collect())
}
