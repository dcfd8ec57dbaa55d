//! Entity ids and document paths as they arrive from a request.

use std::fmt;

use thiserror::Error;

/// Reasons an entity id is refused before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidId {
    #[error("entity id is empty")]
    Empty,

    #[error("entity id `{0}` is a relative directory reference")]
    DotSegment(String),

    #[error("entity id `{0}` may not start with '.'")]
    Hidden(String),

    #[error("entity id contains forbidden character {1:?}")]
    ForbiddenChar(String, char),
}

/// Opaque identifier of a stored document, safe to use as a filename stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidId::Empty);
        }
        if raw == "." || raw == ".." {
            return Err(InvalidId::DotSegment(raw));
        }
        if raw.starts_with('.') {
            return Err(InvalidId::Hidden(raw));
        }
        if let Some(c) = raw.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(InvalidId::ForbiddenChar(raw, c));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the file holding this entity's document.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered key segments locating a value inside a document.
///
/// Segments are kept verbatim, including empty ones produced by doubled or
/// trailing slashes. Only a path with no segments, or exactly one empty
/// segment, addresses the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a request tail such as `courses/calculus` on `/`.
    pub fn parse(raw: &str) -> Self {
        Self {
            segments: raw.split('/').map(str::to_string).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        match self.segments.as_slice() {
            [] => true,
            [only] => only.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}
