//! Navigation index core for documentation sites.
//!
//! This crate provides:
//! - [`normalize_pages`]: the pure transform from a raw content tree plus a
//!   requested route into the normalized navigation tree, the flattened
//!   views for navigation UI, and the active-route resolution
//! - [`get_all_pages`] / [`get_current_level_pages`] /
//!   [`get_pages_under_route`]: page queries over a raw
//!   [`PageMap`](sitenav_pagemap::PageMap) snapshot
//! - [`PageMapIndex`]: a thread-safe handle to the current snapshot
//!
//! # Quick Start
//!
//! ```
//! use sitenav::{NormalizeOptions, normalize_pages};
//! use sitenav_pagemap::{PageEntry, PageMapItem};
//!
//! let items: Vec<PageMapItem> = vec![
//!     PageEntry::new("index", "/").into(),
//!     PageEntry::new("guide", "/guide").into(),
//! ];
//!
//! let normalized = normalize_pages(&items, &NormalizeOptions::for_route("/guide"))?;
//!
//! assert_eq!(normalized.active_index, Some(1));
//! assert_eq!(normalized.flat_directories[1].title, "Guide");
//! # Ok::<(), sitenav::MalformedTreeError>(())
//! ```

pub(crate) mod error;
pub(crate) mod index;
pub(crate) mod normalize;
pub(crate) mod query;
pub(crate) mod resolver;
pub(crate) mod summary;

pub use error::MalformedTreeError;
pub use index::PageMapIndex;
pub use normalize::{
    ActiveType, MAX_DEPTH, NavItem, NormalizeOptions, Normalized, normalize_pages,
};
pub use query::{get_all_pages, get_current_level_pages, get_pages_under_route};
pub use resolver::default_title;
pub use summary::PageSummary;
