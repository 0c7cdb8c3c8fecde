//! Raw content tree nodes.
//!
//! The collector hands over an ordered forest of [`PageMapItem`]s: pages,
//! folders with nested children, and per-folder [`MetaEntry`] records. The
//! tree is immutable for the life of the process; the navigation core only
//! reads it and produces new owned output.

use serde::{Deserialize, Serialize};

use crate::front_matter::FrontMatter;
use crate::meta::MetaRecord;

/// One node of the raw content tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PageMapItem {
    /// A content page.
    Page(PageEntry),
    /// A folder with nested children.
    Folder(FolderEntry),
    /// The folder's metadata record, attached as a sibling of the children
    /// it describes.
    Meta(MetaEntry),
}

impl PageMapItem {
    /// Slug segment of the node, when it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Page(page) => Some(&page.name),
            Self::Folder(folder) => Some(&folder.name),
            Self::Meta(_) => None,
        }
    }

    /// Absolute route of the node, when it has one.
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        match self {
            Self::Page(page) => Some(&page.route),
            Self::Folder(folder) => Some(&folder.route),
            Self::Meta(_) => None,
        }
    }

    /// Locale variant of the node.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Page(page) => page.locale.as_deref(),
            Self::Folder(folder) => folder.locale.as_deref(),
            Self::Meta(meta) => meta.locale.as_deref(),
        }
    }
}

impl From<PageEntry> for PageMapItem {
    fn from(page: PageEntry) -> Self {
        Self::Page(page)
    }
}

impl From<FolderEntry> for PageMapItem {
    fn from(folder: FolderEntry) -> Self {
        Self::Folder(folder)
    }
}

impl From<MetaEntry> for PageMapItem {
    fn from(meta: MetaEntry) -> Self {
        Self::Meta(meta)
    }
}

/// A content page in the raw tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    /// Slug segment (file stem).
    pub name: String,
    /// Absolute route, forward-slash separated.
    pub route: String,
    /// Parsed front matter.
    #[serde(default, skip_serializing_if = "FrontMatter::is_empty")]
    pub front_matter: FrontMatter,
    /// Locale variant, `None` for locale-less sites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl PageEntry {
    /// Create a page entry.
    #[must_use]
    pub fn new(name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            front_matter: FrontMatter::new(),
            locale: None,
        }
    }

    /// Attach front matter.
    #[must_use]
    pub fn with_front_matter(mut self, front_matter: FrontMatter) -> Self {
        self.front_matter = front_matter;
        self
    }

    /// Attach a locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// A folder in the raw tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Slug segment (directory name).
    pub name: String,
    /// Absolute route, forward-slash separated.
    pub route: String,
    /// Ordered children, including the folder's own index page and meta
    /// record when present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageMapItem>,
    /// Locale variant, `None` for locale-less sites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl FolderEntry {
    /// Create a folder entry.
    #[must_use]
    pub fn new(name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            children: Vec::new(),
            locale: None,
        }
    }

    /// Attach children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<PageMapItem>) -> Self {
        self.children = children;
        self
    }

    /// Attach a locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// A folder's metadata record in the raw tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    /// The parsed record.
    #[serde(default, skip_serializing_if = "MetaRecord::is_empty")]
    pub record: MetaRecord,
    /// Locale variant, `None` for locale-less sites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl MetaEntry {
    /// Create a meta entry.
    #[must_use]
    pub fn new(record: MetaRecord) -> Self {
        Self {
            record,
            locale: None,
        }
    }

    /// Attach a locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// The raw content forest plus site-wide locale default.
///
/// This is the immutable value a snapshot index holds: replacing it is a
/// whole-reference swap, never an in-place mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMap {
    /// Root-level items.
    pub items: Vec<PageMapItem>,
    /// Site default locale, used as the fallback variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

impl PageMap {
    /// Create a page map from root items.
    #[must_use]
    pub fn new(items: Vec<PageMapItem>) -> Self {
        Self {
            items,
            default_locale: None,
        }
    }

    /// Attach the site default locale.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_page_entry_builder() {
        let page = PageEntry::new("guide", "/guide").with_locale("en");
        assert_eq!(page.name, "guide");
        assert_eq!(page.route, "/guide");
        assert_eq!(page.locale.as_deref(), Some("en"));
        assert!(page.front_matter.is_empty());
    }

    #[test]
    fn test_item_accessors() {
        let page: PageMapItem = PageEntry::new("guide", "/guide").into();
        assert_eq!(page.name(), Some("guide"));
        assert_eq!(page.route(), Some("/guide"));
        assert_eq!(page.locale(), None);

        let meta: PageMapItem = MetaEntry::new(MetaRecord::new()).with_locale("fr").into();
        assert_eq!(meta.name(), None);
        assert_eq!(meta.route(), None);
        assert_eq!(meta.locale(), Some("fr"));
    }

    #[test]
    fn test_tagged_serialization() {
        let item: PageMapItem = PageEntry::new("guide", "/guide").into();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "Page");
        assert_eq!(json["name"], "guide");
        assert_eq!(json["route"], "/guide");
    }

    #[test]
    fn test_tree_deserialization() {
        let json = r#"{
            "items": [
                {"kind": "Meta", "record": {"docs": "Documentation"}},
                {"kind": "Folder", "name": "docs", "route": "/docs", "children": [
                    {"kind": "Page", "name": "index", "route": "/docs",
                     "front_matter": {"title": "Overview"}}
                ]}
            ],
            "default_locale": "en"
        }"#;

        let map: PageMap = serde_json::from_str(json).unwrap();

        assert_eq!(map.default_locale.as_deref(), Some("en"));
        assert_eq!(map.items.len(), 2);
        let PageMapItem::Folder(folder) = &map.items[1] else {
            panic!("expected folder");
        };
        assert_eq!(folder.children.len(), 1);
        assert_eq!(folder.children[0].route(), Some("/docs"));
    }

    #[test]
    fn test_round_trip_preserves_child_order() {
        let map = PageMap::new(vec![
            PageEntry::new("b", "/b").into(),
            PageEntry::new("a", "/a").into(),
            FolderEntry::new("c", "/c")
                .with_children(vec![PageEntry::new("d", "/c/d").into()])
                .into(),
        ]);

        let json = serde_json::to_string(&map).unwrap();
        let parsed: PageMap = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, map);
    }
}
