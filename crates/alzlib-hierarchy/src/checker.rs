use std::collections::BTreeMap;

use alzlib::{AlzLib, Check};
use alzlib_core::Error;

use crate::build::build;

const SENTINEL_EXTERNAL_PARENT: &str = "00000000-0000-0000-0000-000000000000";
const SENTINEL_LOCATION: &str = "eastus";

/// §4.9 build must succeed for every architecture in the library, given a
/// sentinel external parent and default location (§4.10).
pub struct AllArchitecturesBuildable;

impl Check for AllArchitecturesBuildable {
    fn name(&self) -> &'static str {
        "AllArchitecturesBuildable"
    }

    fn run(&self, lib: &AlzLib) -> Vec<Error> {
        let empty = BTreeMap::new();
        lib.architectures()
            .filter_map(|architecture| {
                build(lib, &architecture.name, SENTINEL_EXTERNAL_PARENT, SENTINEL_LOCATION, &empty).err()
            })
            .collect()
    }
}
