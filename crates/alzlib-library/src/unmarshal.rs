use std::path::Path;

use alzlib_core::Error;
use serde::de::DeserializeOwned;

/// Dispatches to JSON or YAML unmarshaling by extension, as §4.5 requires.
pub fn unmarshal<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, Error> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("json") => serde_json::from_slice(bytes).map_err(|e| Error::Unmarshaling {
            path: path.display().to_string(),
            source: e.into(),
        }),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_slice(bytes).map_err(|e| Error::Unmarshaling {
                path: path.display().to_string(),
                source: e.into(),
            })
        }
        _ => Err(Error::UnsupportedExtension {
            path: path.display().to_string(),
        }),
    }
}
