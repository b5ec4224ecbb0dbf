//! Query identities usable across crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of remote resource a query fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Descriptive, rarely-changing asset metadata.
    Metadata,
    /// Live market ticker data.
    Ticker,
}

impl ResourceKind {
    /// Stable label used in key rendering and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "info",
            Self::Ticker => "tickers",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one cacheable query: `(resource kind, identifier)`.
///
/// Equality is by value on both components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    kind: ResourceKind,
    id: String,
}

impl QueryKey {
    /// Construct a key from a resource kind and identifier.
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Key of the metadata query for `id`.
    pub fn metadata(id: impl Into<String>) -> Self {
        Self::new(ResourceKind::Metadata, id)
    }

    /// Key of the ticker query for `id`.
    pub fn ticker(id: impl Into<String>) -> Self {
        Self::new(ResourceKind::Ticker, id)
    }

    /// Resource kind component.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Identifier component.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}
