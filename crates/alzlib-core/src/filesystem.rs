use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// An in-memory view of a library member's files, rooted at the member's
/// directory. The fetcher (C6) materializes references into this shape;
/// the processor (C5) walks it once.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Reads an entire real directory tree into memory, for tests and for
    /// local (`localPath`) custom references.
    pub fn from_dir(root: &Path) -> std::io::Result<Self> {
        let mut fs = Self::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                    let bytes = std::fs::read(&path)?;
                    fs.files.insert(relative, bytes);
                }
            }
        }
        Ok(fs)
    }

    /// Paths in directory order (lexicographic, since entries are stored in
    /// a `BTreeMap`), matching §4.5's "walks the filesystem once, in
    /// directory order".
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(|p| p.as_path())
    }

    pub fn read(&self, path: &Path) -> Result<&[u8], Error> {
        self.files
            .get(path)
            .map(|v| v.as_slice())
            .ok_or_else(|| Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string())))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Overlays `other` atop `self`; entries in `other` win (used by the
    /// fetcher to compose a member's own files over fetched dependency
    /// trees is NOT what this does — each library member keeps its own
    /// filesystem; this helper exists for tests that synthesize fixtures).
    pub fn merge(&mut self, other: Self) {
        self.files.extend(other.files);
    }
}
