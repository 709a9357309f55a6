use std::fmt;

use serde::Serialize;

/// One unit of probing work.
///
/// Identity (equality and hashing) is the whole value, so the same port, path
/// or subdomain is never probed twice within a job.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum WorkItem {
    /// A TCP port, 1-65535.
    Port(u16),
    /// A path segment appended to the canonical base, without leading slash.
    Path(String),
    /// A subdomain: a full name for liveness checks, a label for dictionary scans.
    Subdomain(String),
}

impl WorkItem {
    /// Builds a path item, stripping leading slashes.
    pub fn path(segment: &str) -> Self {
        WorkItem::Path(segment.trim().trim_start_matches('/').to_string())
    }

    /// Builds a subdomain item, case-normalized.
    pub fn subdomain(name: &str) -> Self {
        WorkItem::Subdomain(name.trim().to_ascii_lowercase())
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkItem::Port(port) => write!(f, "{port}"),
            WorkItem::Path(path) => write!(f, "/{path}"),
            WorkItem::Subdomain(name) => write!(f, "{name}"),
        }
    }
}
