//! Content tree data model for the sitenav navigation engine.
//!
//! This crate provides the raw page map as delivered by a content collector:
//! - [`PageMapItem`]: tagged node of the content forest (page, folder, or
//!   per-folder meta record)
//! - [`MetaRecord`]: ordered per-folder title/type/display overrides
//! - [`FrontMatter`]: loosely-typed page metadata with typed accessors
//! - [`ThemeSettings`] / [`ThemeOverrides`]: the cascading rendering options
//! - [`route`]: locale stripping and segment-aware route comparisons
//!
//! The types here are pure data. Ordering, title resolution, and the
//! normalized navigation views are built on top by the `sitenav` crate.

pub(crate) mod front_matter;
pub(crate) mod item;
pub(crate) mod meta;
pub mod route;
pub(crate) mod theme;

pub use front_matter::FrontMatter;
pub use item::{FolderEntry, MetaEntry, PageEntry, PageMap, PageMapItem};
pub use meta::{Display, ItemType, MetaRecord, MetaSpec, MetaValue, WILDCARD_KEY};
pub use theme::{ThemeOverrides, ThemeSettings};
