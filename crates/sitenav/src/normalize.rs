//! Page map normalization.
//!
//! [`normalize_pages`] is the core transform: a recursive depth-first walk
//! over the raw content tree that produces the normalized navigation tree,
//! the flattened views used by navigation UI, and the active-route
//! resolution for the requested page. The transform is pure: it never
//! mutates the raw tree and recomputes from scratch per `(route, locale)`
//! pair.

use serde::Serialize;

use sitenav_pagemap::{
    Display, FolderEntry, FrontMatter, ItemType, MetaSpec, MetaValue, PageEntry, PageMapItem,
    ThemeSettings, route::route_is_under,
};

use crate::error::MalformedTreeError;
use crate::resolver::{OrderedEntry, order_children, resolve_display, resolve_title};
use crate::summary::PageSummary;

/// Maximum nesting depth before the walk reports a malformed tree.
///
/// Real sites nest a handful of levels; anything past this is a cyclic
/// `children` reference feeding back into itself.
pub const MAX_DEPTH: usize = 64;

/// Inputs for one normalize pass.
#[derive(Clone, Debug)]
pub struct NormalizeOptions {
    /// The locale-independent route of the current request (see
    /// [`sitenav_pagemap::route::fs_route`]).
    pub route: String,
    /// Requested locale.
    pub locale: Option<String>,
    /// Site default locale, the fallback variant.
    pub default_locale: Option<String>,
    /// Root ancestor theme context the cascade starts from.
    pub default_theme: ThemeSettings,
    /// Whether sidebar folders start collapsed; passed through unchanged.
    pub default_menu_collapsed: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            route: "/".to_owned(),
            locale: None,
            default_locale: None,
            default_theme: ThemeSettings::default(),
            default_menu_collapsed: false,
        }
    }
}

impl NormalizeOptions {
    /// Options for a request route, defaults elsewhere.
    #[must_use]
    pub fn for_route(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Default::default()
        }
    }

    /// Set the requested locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the site default locale.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Set the root theme context.
    #[must_use]
    pub fn with_default_theme(mut self, theme: ThemeSettings) -> Self {
        self.default_theme = theme;
        self
    }
}

/// Classification of the active page for layout selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveType {
    /// Top-level page: full-bleed body, no sidebar pagination.
    Page,
    /// Documentation page: sidebar, ToC, prev/next links.
    #[default]
    Doc,
}

/// One node of the normalized navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Slug segment.
    pub name: String,
    /// Absolute route. Empty for synthesized separators and link entries.
    pub route: String,
    /// Resolved display title.
    pub title: String,
    /// Resolved classification.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// True when the item has its own page content; false for folders
    /// without an index page and for separators.
    pub has_content: bool,
    /// Hidden from navigation views, still directly routable.
    pub hidden: bool,
    /// Redirect target for folders without their own page: the first
    /// navigable descendant in view order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_child_route: Option<String>,
    /// External link target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// The item's front matter (a folder's comes from its index page).
    #[serde(skip_serializing_if = "FrontMatter::is_empty")]
    pub front_matter: FrontMatter,
    /// Ordered children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Whether the item is a destination that pagination and flat views
    /// may point at: it has its own content, is visible, and navigates
    /// internally.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.has_content
            && !self.hidden
            && self.href.is_none()
            && self.item_type != ItemType::Separator
    }

    /// Flat-view summary of the item.
    #[must_use]
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            name: self.name.clone(),
            route: self.route.clone(),
            title: self.title.clone(),
            front_matter: self.front_matter.clone(),
        }
    }
}

/// Result of one normalize pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Normalized {
    /// The full normalized tree, locale-filtered, hidden items included.
    pub directories: Vec<NavItem>,
    /// Pre-order flatten of `directories`: navigable items only. Drives
    /// breadcrumb lookups and mirrors sidebar order.
    pub flat_directories: Vec<PageSummary>,
    /// The documentation sidebar: `doc`/`menu` nodes of `directories`, with
    /// children of `page`-typed nodes hoisted into their position.
    pub docs_directories: Vec<NavItem>,
    /// Pre-order flatten of `docs_directories`; prev/next pagination only
    /// traverses these.
    pub flat_docs_directories: Vec<PageSummary>,
    /// Direct children of the root classified `page`, for the navbar.
    pub top_level_page_items: Vec<NavItem>,
    /// Classification of the node matching the requested route; `doc` when
    /// nothing matches.
    pub active_type: ActiveType,
    /// Position of the requested route in `flat_docs_directories`; `None`
    /// when absent (hidden or unknown routes render no pagination).
    pub active_index: Option<usize>,
    /// Effective theme context of the active chain's leaf.
    pub active_theme: ThemeSettings,
    /// Routes of the active chain, root-first, ending at the matched node
    /// or the deepest matching ancestor.
    pub active_path: Vec<String>,
    /// Passed through from the options for the rendering layer.
    pub default_menu_collapsed: bool,
}

/// Exact-route match found during the walk.
struct ActiveMatch {
    item_type: ItemType,
    theme: ThemeSettings,
    path: Vec<String>,
}

/// Deepest folder whose route is an ancestor of the requested route.
struct PrefixMatch {
    depth: usize,
    theme: ThemeSettings,
    path: Vec<String>,
}

struct Walker<'a> {
    route: &'a str,
    locale: Option<&'a str>,
    default_locale: Option<&'a str>,
    active: Option<ActiveMatch>,
    prefix: Option<PrefixMatch>,
}

impl Walker<'_> {
    fn walk(
        &mut self,
        children: &[PageMapItem],
        parent_theme: ThemeSettings,
        depth: usize,
        ancestors: &mut Vec<String>,
    ) -> Result<Vec<NavItem>, MalformedTreeError> {
        if depth > MAX_DEPTH {
            let route = ancestors.last().map_or("/", String::as_str);
            return Err(MalformedTreeError::at(route));
        }

        let entries = order_children(children, self.locale, self.default_locale);
        let mut items = Vec::with_capacity(entries.len());

        for entry in entries {
            match entry {
                OrderedEntry::Synthetic { name, spec } => {
                    items.push(Self::synthetic_item(name, spec));
                }
                OrderedEntry::Node { item, meta } => match item {
                    PageMapItem::Page(page) => {
                        items.push(self.page_item(page, meta, parent_theme, ancestors));
                    }
                    PageMapItem::Folder(folder) => {
                        items.push(self.folder_item(
                            folder,
                            meta,
                            parent_theme,
                            depth,
                            ancestors,
                        )?);
                    }
                    // Meta records are consumed by the resolver.
                    PageMapItem::Meta(_) => {}
                },
            }
        }

        Ok(items)
    }

    /// Build an item for a record entry with no matching child.
    fn synthetic_item(name: &str, spec: &MetaSpec) -> NavItem {
        let item_type = spec.item_type.unwrap_or(if spec.href.is_some() {
            ItemType::Doc
        } else {
            ItemType::Separator
        });
        NavItem {
            name: name.to_owned(),
            route: String::new(),
            title: spec.title.clone().unwrap_or_default(),
            item_type,
            has_content: false,
            hidden: spec.display.is_some_and(Display::is_hidden),
            first_child_route: None,
            href: spec.href.clone(),
            front_matter: FrontMatter::new(),
            children: Vec::new(),
        }
    }

    fn page_item(
        &mut self,
        page: &PageEntry,
        meta: Option<&MetaValue>,
        parent_theme: ThemeSettings,
        ancestors: &[String],
    ) -> NavItem {
        let item_type = meta.and_then(MetaValue::item_type).unwrap_or_default();
        let hidden = resolve_display(meta, &page.front_matter).is_hidden();
        let theme = Self::effective_theme(parent_theme, &page.front_matter, meta);
        let title = resolve_title(meta, page.front_matter.title(), &page.name);

        if page.route == self.route {
            self.record_active(item_type, theme, ancestors, &page.route);
        }

        NavItem {
            name: page.name.clone(),
            route: page.route.clone(),
            title,
            item_type,
            has_content: true,
            hidden,
            first_child_route: None,
            href: meta.and_then(MetaValue::href).map(ToOwned::to_owned),
            front_matter: page.front_matter.clone(),
            children: Vec::new(),
        }
    }

    fn folder_item(
        &mut self,
        folder: &FolderEntry,
        meta: Option<&MetaValue>,
        parent_theme: ThemeSettings,
        depth: usize,
        ancestors: &mut Vec<String>,
    ) -> Result<NavItem, MalformedTreeError> {
        let item_type = meta.and_then(MetaValue::item_type).unwrap_or_default();

        // Theme overrides on the folder cascade into the whole subtree.
        let subtree_theme = match meta.and_then(MetaValue::theme) {
            Some(overrides) => parent_theme.apply(overrides),
            None => parent_theme,
        };

        ancestors.push(folder.route.clone());
        let mut children = self.walk(&folder.children, subtree_theme, depth + 1, ancestors)?;
        ancestors.pop();

        // A child page with the folder's own route is its index page: the
        // folder absorbs it instead of listing it twice.
        let index_page = children
            .iter()
            .position(|child| child.route == folder.route)
            .map(|pos| children.remove(pos));
        let has_content = index_page.is_some();
        let front_matter = index_page.map(|page| page.front_matter).unwrap_or_default();

        let own_theme = subtree_theme.apply(&front_matter.theme_overrides());
        let hidden = resolve_display(meta, &front_matter).is_hidden();
        let title = resolve_title(meta, front_matter.title(), &folder.name);
        let first_child_route = if has_content {
            None
        } else {
            first_navigable_route(&children)
        };

        if folder.route == self.route {
            self.record_active(item_type, own_theme, ancestors, &folder.route);
        } else if route_is_under(self.route, &folder.route) {
            self.record_prefix(depth, own_theme, ancestors, &folder.route);
        }

        Ok(NavItem {
            name: folder.name.clone(),
            route: folder.route.clone(),
            title,
            item_type,
            has_content,
            hidden,
            first_child_route,
            href: meta.and_then(MetaValue::href).map(ToOwned::to_owned),
            front_matter,
            children,
        })
    }

    /// Effective theme context at a node: ancestor settings, then
    /// front-matter overrides, then record overrides (the record wins).
    fn effective_theme(
        parent: ThemeSettings,
        front_matter: &FrontMatter,
        meta: Option<&MetaValue>,
    ) -> ThemeSettings {
        let mut theme = parent.apply(&front_matter.theme_overrides());
        if let Some(overrides) = meta.and_then(MetaValue::theme) {
            theme = theme.apply(overrides);
        }
        theme
    }

    fn record_active(
        &mut self,
        item_type: ItemType,
        theme: ThemeSettings,
        ancestors: &[String],
        route: &str,
    ) {
        self.active = Some(ActiveMatch {
            item_type,
            theme,
            path: chain_with(ancestors, route),
        });
    }

    fn record_prefix(
        &mut self,
        depth: usize,
        theme: ThemeSettings,
        ancestors: &[String],
        route: &str,
    ) {
        if self
            .prefix
            .as_ref()
            .is_none_or(|prefix| depth >= prefix.depth)
        {
            self.prefix = Some(PrefixMatch {
                depth,
                theme,
                path: chain_with(ancestors, route),
            });
        }
    }
}

/// Ancestor chain extended with a leaf route, without duplicating it.
fn chain_with(ancestors: &[String], route: &str) -> Vec<String> {
    let mut path = ancestors.to_vec();
    if path.last().map(String::as_str) != Some(route) {
        path.push(route.to_owned());
    }
    path
}

/// First navigable descendant in view order, skipping hidden subtrees.
fn first_navigable_route(items: &[NavItem]) -> Option<String> {
    for item in items {
        if item.hidden {
            continue;
        }
        if item.is_navigable() {
            return Some(item.route.clone());
        }
        if let Some(route) = first_navigable_route(&item.children) {
            return Some(route);
        }
    }
    None
}

/// Pre-order flatten: navigable items only, hidden subtrees skipped whole.
fn flatten(items: &[NavItem], out: &mut Vec<PageSummary>) {
    for item in items {
        if item.hidden {
            continue;
        }
        if item.is_navigable() {
            out.push(item.summary());
        }
        flatten(&item.children, out);
    }
}

/// Project the documentation sidebar out of the full tree.
///
/// Keeps `doc` and `menu` nodes; a `page`-typed node is dropped and its
/// qualifying children take its position. Separators and hidden subtrees
/// are excluded.
fn docs_view(items: &[NavItem]) -> Vec<NavItem> {
    let mut out = Vec::new();
    for item in items {
        if item.hidden {
            continue;
        }
        match item.item_type {
            ItemType::Separator => {}
            ItemType::Page => out.extend(docs_view(&item.children)),
            ItemType::Doc | ItemType::Menu => {
                let mut docs_item = item.clone();
                docs_item.children = docs_view(&item.children);
                out.push(docs_item);
            }
        }
    }
    out
}

/// Normalize a raw page map for one `(route, locale)` request.
///
/// Deterministic and pure: identical inputs produce structurally identical
/// output. Route-not-found is a normal outcome (`active_index` stays
/// `None`, `active_type` defaults to `doc`), never an error.
///
/// # Errors
///
/// Returns [`MalformedTreeError`] when the tree nests past [`MAX_DEPTH`]
/// levels, which only happens when the collector's acyclicity guarantee is
/// broken.
pub fn normalize_pages(
    items: &[PageMapItem],
    options: &NormalizeOptions,
) -> Result<Normalized, MalformedTreeError> {
    let mut walker = Walker {
        route: &options.route,
        locale: options.locale.as_deref(),
        default_locale: options.default_locale.as_deref(),
        active: None,
        prefix: None,
    };
    let mut ancestors = Vec::new();
    let directories = walker.walk(items, options.default_theme, 0, &mut ancestors)?;

    let mut flat_directories = Vec::new();
    flatten(&directories, &mut flat_directories);

    let docs_directories = docs_view(&directories);
    let mut flat_docs_directories = Vec::new();
    flatten(&docs_directories, &mut flat_docs_directories);

    let top_level_page_items: Vec<NavItem> = directories
        .iter()
        .filter(|item| item.item_type == ItemType::Page && !item.hidden)
        .cloned()
        .collect();

    let active_index = flat_docs_directories
        .iter()
        .position(|page| page.route == options.route);

    let (active_type, active_theme, active_path) = match (walker.active, walker.prefix) {
        (Some(active), _) => {
            let active_type = if active.item_type == ItemType::Page {
                ActiveType::Page
            } else {
                ActiveType::Doc
            };
            (active_type, active.theme, active.path)
        }
        (None, Some(prefix)) => (ActiveType::Doc, prefix.theme, prefix.path),
        (None, None) => (ActiveType::Doc, options.default_theme, Vec::new()),
    };

    tracing::debug!(
        route = %options.route,
        directory_count = directories.len(),
        flat_count = flat_directories.len(),
        active_index,
        "Page map normalized"
    );

    Ok(Normalized {
        directories,
        flat_directories,
        docs_directories,
        flat_docs_directories,
        top_level_page_items,
        active_type,
        active_index,
        active_theme,
        active_path,
        default_menu_collapsed: options.default_menu_collapsed,
    })
}
