//! Feeding a fetcher's leaf-first filesystem list straight into `AlzLib`
//! exercises the full fetch → process → aggregate path: a dependency's
//! assignment is present, and the root member's own copy of the same
//! definition wins the merge.

use alzlib::AlzLib;
use alzlib_core::{Error, MemoryFilesystem};
use alzlib_fetch::{fetch_with_dependencies, Fetcher, LibraryReference};
use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;

struct TwoMemberFetcher;

#[async_trait]
impl Fetcher for TwoMemberFetcher {
    async fn fetch(&self, reference: &LibraryReference, _index: u64) -> alzlib_core::Result<MemoryFilesystem> {
        let mut fs = MemoryFilesystem::new();
        match reference {
            LibraryReference::Catalog { path, .. } if path == "root" => {
                fs.insert(
                    "alz_library_metadata.json",
                    json!({
                        "name": "root",
                        "path": "root",
                        "dependencies": [{"path": "dep", "ref": "v1"}]
                    })
                    .to_string(),
                );
                fs.insert(
                    "shared.alz_policy_definition.json",
                    json!({
                        "name": "shared",
                        "policyRule": {"then": {"effect": "deny"}},
                        "parameters": {"origin": {"type": "String", "defaultValue": "root"}}
                    })
                    .to_string(),
                );
            }
            LibraryReference::Catalog { path, .. } if path == "dep" => {
                fs.insert(
                    "alz_library_metadata.json",
                    json!({"name": "dep", "path": "dep", "dependencies": []}).to_string(),
                );
                fs.insert(
                    "shared.alz_policy_definition.json",
                    json!({
                        "name": "shared",
                        "policyRule": {"then": {"effect": "deny"}},
                        "parameters": {"origin": {"type": "String", "defaultValue": "dep"}}
                    })
                    .to_string(),
                );
                fs.insert(
                    "from-dep.alz_policy_assignment.json",
                    json!({
                        "name": "from-dep",
                        "displayName": "From dependency",
                        "description": "contributed by the dependency member",
                        "policyDefinitionId": "shared"
                    })
                    .to_string(),
                );
            }
            _ => {}
        }
        Ok(fs)
    }
}

#[tokio::test]
async fn fetched_members_merge_leaf_first_with_the_consumer_winning() {
    let root_ref = LibraryReference::Catalog {
        path: "root".to_string(),
        tag: "v1".to_string(),
    };
    let filesystems = fetch_with_dependencies(&TwoMemberFetcher, root_ref, 5, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(filesystems.len(), 2);

    let lib = AlzLib::init(&filesystems, ".alzlib").unwrap();
    assert!(lib.policy_assignment("from-dep").is_some());

    let shared = lib.policy_definition("shared", None).unwrap();
    let origin = shared.parameters.get("origin").unwrap().default_value.as_ref().unwrap();
    assert_eq!(origin, "root");
}

struct CyclicFetcher;

#[async_trait]
impl Fetcher for CyclicFetcher {
    async fn fetch(&self, reference: &LibraryReference, _index: u64) -> alzlib_core::Result<MemoryFilesystem> {
        let mut fs = MemoryFilesystem::new();
        match reference {
            LibraryReference::Catalog { path, .. } if path == "a" => {
                fs.insert(
                    "alz_library_metadata.json",
                    json!({
                        "name": "a",
                        "path": "a",
                        "dependencies": [{"path": "b", "ref": "v1"}]
                    })
                    .to_string(),
                );
            }
            LibraryReference::Catalog { path, .. } if path == "b" => {
                fs.insert(
                    "alz_library_metadata.json",
                    json!({
                        "name": "b",
                        "path": "b",
                        "dependencies": [{"path": "a", "ref": "v1"}]
                    })
                    .to_string(),
                );
            }
            _ => {}
        }
        Ok(fs)
    }
}

#[tokio::test]
async fn a_dependency_cycle_surfaces_as_an_error_not_a_coalesced_shared_dependency() {
    let root_ref = LibraryReference::Catalog {
        path: "a".to_string(),
        tag: "v1".to_string(),
    };
    let err = fetch_with_dependencies(&CyclicFetcher, root_ref, 5, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DependencyCycle { .. }));
}
