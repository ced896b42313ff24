//! Ambient engine configuration (§9). A plain struct, not a layered
//! `config`-crate document: only the settings §9 enumerates exist, so there
//! is no multi-source file+env+CLI story to model.

const DEFAULT_ALZLIB_DIR: &str = ".alzlib";
const DEFAULT_LIBRARY_GIT_URL: &str = "https://github.com/Azure/alzlibrary.git";
const DEFAULT_FETCH_CONCURRENCY: usize = 5;

/// Engine-wide configuration: where libraries are cached, where the default
/// catalog lives, how many fetches run concurrently, and whether a fetch may
/// overwrite an existing cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub alzlib_dir: String,
    pub library_git_url: String,
    pub library_path: Option<String>,
    pub fetch_concurrency: usize,
    pub overwrite: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alzlib_dir: DEFAULT_ALZLIB_DIR.to_string(),
            library_git_url: DEFAULT_LIBRARY_GIT_URL.to_string(),
            library_path: None,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            overwrite: false,
        }
    }
}

impl EngineConfig {
    /// Layers `ALZLIB_DIR`, `ALZLIB_LIBRARY_GIT_URL`, and `LIBRARY_PATH` over
    /// [`EngineConfig::default`].
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("ALZLIB_DIR") {
            self.alzlib_dir = dir;
        }
        if let Ok(url) = std::env::var("ALZLIB_LIBRARY_GIT_URL") {
            self.library_git_url = url;
        }
        if let Ok(path) = std::env::var("LIBRARY_PATH") {
            self.library_path = Some(path);
        }
        self
    }
}
