//! Error types for the navigation core.
//!
//! Malformed-but-plausible input never errors; missing metadata degrades to
//! fallback values. The only fatal condition is a structurally invalid
//! content tree, surfaced as [`MalformedTreeError`] by the recursion-depth
//! guard instead of exhausting the stack.

use crate::normalize::MAX_DEPTH;

/// The content tree nests deeper than any well-formed site can.
///
/// Collectors guarantee an acyclic tree; when that guarantee is broken
/// (typically a cyclic `children` reference) the walk would otherwise recurse
/// forever. The guard aborts at [`MAX_DEPTH`] levels and reports the route it
/// was under.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("content tree exceeds {max_depth} nesting levels under {route}")]
pub struct MalformedTreeError {
    route: String,
    max_depth: usize,
}

impl MalformedTreeError {
    /// Create an error for the route the walk was under when it gave up.
    pub(crate) fn at(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            max_depth: MAX_DEPTH,
        }
    }

    /// Route the walk was under when the guard tripped.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }
}
