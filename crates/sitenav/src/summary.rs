//! Flat page summaries.

use serde::Serialize;

use sitenav_pagemap::FrontMatter;

/// A navigable page in a flattened view or query result.
///
/// Carries just enough for pagination links, breadcrumbs, and page listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// Slug segment.
    pub name: String,
    /// Absolute route.
    pub route: String,
    /// Resolved display title.
    pub title: String,
    /// The page's front matter.
    #[serde(skip_serializing_if = "FrontMatter::is_empty")]
    pub front_matter: FrontMatter,
}
