//! Page queries over a raw page map.
//!
//! Pure read operations independent of any request's active-route state.
//! All three take the page map and route explicitly; there is no ambient
//! "current tree" or "current route". Callers hold a snapshot (usually via
//! [`PageMapIndex`](crate::PageMapIndex)) and pass what they mean.
//!
//! Queries are projections of a normalize pass with a neutral route, so
//! their ordering and filtering can never drift from the sidebar's.

use sitenav_pagemap::{PageMap, route::fs_route, route::route_is_under};

use crate::error::MalformedTreeError;
use crate::normalize::{NavItem, NormalizeOptions, Normalized, normalize_pages};
use crate::summary::PageSummary;

/// All navigable pages of the site in sidebar pre-order.
///
/// Locale-filtered (the argument overrides the map's default locale as the
/// requested locale), hidden pages excluded.
///
/// # Errors
///
/// Only [`MalformedTreeError`] from the depth guard; an empty site is an
/// empty vec.
pub fn get_all_pages(
    page_map: &PageMap,
    locale: Option<&str>,
) -> Result<Vec<PageSummary>, MalformedTreeError> {
    Ok(normalize_for_query(page_map, locale)?.flat_directories)
}

/// Pages at the same tree level as the node matching `route`.
///
/// Meta-record ordering is preserved. A route matching no node yields an
/// empty vec.
///
/// # Errors
///
/// Only [`MalformedTreeError`] from the depth guard.
pub fn get_current_level_pages(
    page_map: &PageMap,
    route: &str,
    locale: Option<&str>,
) -> Result<Vec<PageSummary>, MalformedTreeError> {
    let target = fs_route(route, effective_locale(page_map, locale));
    let normalized = normalize_for_query(page_map, locale)?;

    Ok(level_of(&normalized.directories, &target)
        .map(|siblings| {
            siblings
                .iter()
                .filter(|item| item.is_navigable())
                .map(NavItem::summary)
                .collect()
        })
        .unwrap_or_default())
}

/// All navigable pages whose route sits under `route`, in pre-order.
///
/// The prefix test is segment-aware: `/docs` covers `/docs/advanced` but
/// never `/docset/x`. No match yields an empty vec.
///
/// # Errors
///
/// Only [`MalformedTreeError`] from the depth guard.
pub fn get_pages_under_route(
    page_map: &PageMap,
    route: &str,
    locale: Option<&str>,
) -> Result<Vec<PageSummary>, MalformedTreeError> {
    let prefix = fs_route(route, effective_locale(page_map, locale));
    let mut pages = get_all_pages(page_map, locale)?;
    pages.retain(|page| route_is_under(&page.route, &prefix));
    Ok(pages)
}

/// The locale a query runs under: explicit override, else the map default.
fn effective_locale<'a>(page_map: &'a PageMap, locale: Option<&'a str>) -> Option<&'a str> {
    locale.or(page_map.default_locale.as_deref())
}

/// Normalize with a neutral route for query use.
fn normalize_for_query(
    page_map: &PageMap,
    locale: Option<&str>,
) -> Result<Normalized, MalformedTreeError> {
    let mut options = NormalizeOptions::for_route("/");
    options.locale = effective_locale(page_map, locale).map(ToOwned::to_owned);
    options.default_locale = page_map.default_locale.clone();
    normalize_pages(&page_map.items, &options)
}

/// Find the sibling list containing the node with the given route.
fn level_of<'a>(items: &'a [NavItem], route: &str) -> Option<&'a [NavItem]> {
    if items.iter().any(|item| item.route == route) {
        return Some(items);
    }
    items
        .iter()
        .find_map(|item| level_of(&item.children, route))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sitenav_pagemap::{FolderEntry, FrontMatter, MetaEntry, MetaRecord, MetaSpec, PageEntry};

    use super::*;

    fn docs_site() -> PageMap {
        let docs_meta: MetaRecord = [
            ("advanced", "Advanced"),
            ("getting-started", "Getting Started"),
        ]
        .into_iter()
        .collect();

        PageMap::new(vec![
            PageEntry::new("index", "/").into(),
            FolderEntry::new("docs", "/docs")
                .with_children(vec![
                    MetaEntry::new(docs_meta).into(),
                    PageEntry::new("index", "/docs").into(),
                    PageEntry::new("getting-started", "/docs/getting-started").into(),
                    FolderEntry::new("advanced", "/docs/advanced")
                        .with_children(vec![
                            PageEntry::new("index", "/docs/advanced").into(),
                            PageEntry::new("cache", "/docs/advanced/cache").into(),
                        ])
                        .into(),
                ])
                .into(),
            PageEntry::new("docset-notes", "/docset-notes").into(),
        ])
    }

    #[test]
    fn test_get_all_pages_pre_order() {
        let map = docs_site();

        let pages = get_all_pages(&map, None).unwrap();

        let routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(
            routes,
            vec![
                "/",
                "/docs",
                "/docs/advanced",
                "/docs/advanced/cache",
                "/docs/getting-started",
                "/docset-notes",
            ]
        );
    }

    #[test]
    fn test_get_all_pages_excludes_hidden() {
        let fm: FrontMatter = [("display", json!("hidden"))].into_iter().collect();
        let map = PageMap::new(vec![
            PageEntry::new("visible", "/visible").into(),
            PageEntry::new("secret", "/secret")
                .with_front_matter(fm)
                .into(),
        ]);

        let pages = get_all_pages(&map, None).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].route, "/visible");
    }

    #[test]
    fn test_get_all_pages_locale_fallback() {
        let map = PageMap::new(vec![
            PageEntry::new("guide", "/guide")
                .with_front_matter([("title", json!("Guide"))].into_iter().collect())
                .with_locale("en")
                .into(),
            PageEntry::new("only-german", "/only-german")
                .with_locale("de")
                .into(),
        ])
        .with_default_locale("en");

        let pages = get_all_pages(&map, Some("fr")).unwrap();

        // English default serves the missing French variant; the German-only
        // page does not exist for this request.
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].route, "/guide");
        assert_eq!(pages[0].title, "Guide");
    }

    #[test]
    fn test_get_pages_under_route_segment_aware() {
        let map = docs_site();

        let pages = get_pages_under_route(&map, "/docs", None).unwrap();

        let routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(
            routes,
            vec![
                "/docs",
                "/docs/advanced",
                "/docs/advanced/cache",
                "/docs/getting-started",
            ]
        );
        // "/docset-notes" shares the string prefix but not the segment
        assert!(!routes.contains(&"/docset-notes"));
    }

    #[test]
    fn test_get_pages_under_route_no_match_is_empty() {
        let map = docs_site();

        let pages = get_pages_under_route(&map, "/missing", None).unwrap();

        assert!(pages.is_empty());
    }

    #[test]
    fn test_get_current_level_pages_returns_ordered_siblings() {
        let map = docs_site();

        let pages = get_current_level_pages(&map, "/docs/getting-started", None).unwrap();

        // Meta record order: advanced before getting-started
        let routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(routes, vec!["/docs/advanced", "/docs/getting-started"]);
    }

    #[test]
    fn test_get_current_level_pages_unknown_route_is_empty() {
        let map = docs_site();

        let pages = get_current_level_pages(&map, "/nowhere", None).unwrap();

        assert!(pages.is_empty());
    }

    #[test]
    fn test_get_current_level_pages_strips_locale_prefix() {
        let map = PageMap::new(vec![
            PageEntry::new("a", "/a").with_locale("fr").into(),
            PageEntry::new("b", "/b").with_locale("fr").into(),
        ])
        .with_default_locale("fr");

        let pages = get_current_level_pages(&map, "/fr/a", Some("fr")).unwrap();

        let routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(routes, vec!["/a", "/b"]);
    }

    #[test]
    fn test_queries_exclude_menus_and_separators() {
        let meta: MetaRecord = [
            ("---", MetaSpec::typed(sitenav_pagemap::ItemType::Separator)),
        ]
        .into_iter()
        .collect();
        let map = PageMap::new(vec![
            MetaEntry::new(meta).into(),
            PageEntry::new("a", "/a").into(),
            // Folder without an index page is a pure menu, not a page
            FolderEntry::new("extras", "/extras")
                .with_children(vec![PageEntry::new("faq", "/extras/faq").into()])
                .into(),
        ]);

        let all = get_all_pages(&map, None).unwrap();
        let routes: Vec<&str> = all.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(routes, vec!["/a", "/extras/faq"]);

        let level = get_current_level_pages(&map, "/a", None).unwrap();
        let routes: Vec<&str> = level.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(routes, vec!["/a"]);
    }
}
