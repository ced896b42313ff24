use std::fmt;

/// One way of locating a library member's contents (§4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryReference {
    /// A well-known upstream library at a release tag, resolved to a URL
    /// through a configurable template.
    Catalog { path: String, tag: String },
    /// An opaque fetchable location: a URL or a local filesystem path.
    Custom(CustomLocation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomLocation {
    Url(String),
    LocalPath(String),
}

/// The `(kind, normalized-url, tag-or-path)` triple used to dedup and break
/// cycles in dependency fetching (§4.6).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint {
    kind: &'static str,
    location: String,
    tag_or_path: String,
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.location, self.tag_or_path)
    }
}

impl LibraryReference {
    pub fn fingerprint(&self) -> Fingerprint {
        match self {
            LibraryReference::Catalog { path, tag } => Fingerprint {
                kind: "catalog",
                location: normalize(path),
                tag_or_path: tag.clone(),
            },
            LibraryReference::Custom(CustomLocation::Url(url)) => Fingerprint {
                kind: "custom-url",
                location: normalize(url),
                tag_or_path: String::new(),
            },
            LibraryReference::Custom(CustomLocation::LocalPath(path)) => Fingerprint {
                kind: "custom-path",
                location: normalize(path),
                tag_or_path: String::new(),
            },
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().trim_end_matches('/').to_lowercase()
}
