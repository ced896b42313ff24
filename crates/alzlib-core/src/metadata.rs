use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `alz_library_metadata.json` for a library member (§6): identity plus the
/// dependency list the fetcher walks breadth-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryMetadata {
    pub name: String,
    #[serde(rename = "display_name", default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// One dependency entry: exactly one of a catalog reference (`path`+`ref`)
/// or a custom reference (`custom_url`), never both (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Catalog {
        path: String,
        #[serde(rename = "ref")]
        tag: String,
    },
    Custom {
        custom_url: String,
    },
}

impl LibraryMetadata {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MetadataDependencyInvalid {
                reason: "metadata name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
