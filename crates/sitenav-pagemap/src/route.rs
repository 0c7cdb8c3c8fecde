//! Route utilities: locale stripping and segment-aware comparisons.
//!
//! Routes are absolute, forward-slash separated site paths. Requests may
//! carry a locale prefix segment (`/fr/docs/setup`), a fragment, or a query
//! string; tree lookups use the locale-independent filesystem route.

/// Derive the locale-independent filesystem route for a request path.
///
/// Strips a fragment or query suffix, trailing slashes, and a leading
/// `/{locale}` segment when it matches the requested locale.
///
/// # Examples
///
/// ```
/// use sitenav_pagemap::route::fs_route;
///
/// assert_eq!(fs_route("/fr/docs/setup", Some("fr")), "/docs/setup");
/// assert_eq!(fs_route("/docs/setup#install", None), "/docs/setup");
/// assert_eq!(fs_route("/fr/", Some("fr")), "/");
/// ```
#[must_use]
pub fn fs_route(route: &str, locale: Option<&str>) -> String {
    let mut path = match route.find(['#', '?']) {
        Some(pos) => &route[..pos],
        None => route,
    };
    if path.len() > 1 {
        path = path.trim_end_matches('/');
    }
    if path.is_empty() {
        return "/".to_owned();
    }

    if let Some(locale) = locale
        && !locale.is_empty()
        && let Some(rest) = path.strip_prefix('/').and_then(|p| p.strip_prefix(locale))
    {
        if rest.is_empty() {
            return "/".to_owned();
        }
        if rest.starts_with('/') {
            return rest.to_owned();
        }
    }

    path.to_owned()
}

/// Segment-aware prefix test.
///
/// `route` is under `prefix` when it equals the prefix or continues past it
/// at a segment boundary: `/docs/advanced` is under `/docs`, `/docset/x`
/// is not.
#[must_use]
pub fn route_is_under(route: &str, prefix: &str) -> bool {
    if prefix.is_empty() || prefix == "/" {
        return true;
    }
    let prefix = prefix.trim_end_matches('/');
    match route.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// Parent route of an absolute route, `None` at the root.
///
/// ```
/// use sitenav_pagemap::route::parent_route;
///
/// assert_eq!(parent_route("/docs/setup"), Some("/docs"));
/// assert_eq!(parent_route("/docs"), Some("/"));
/// assert_eq!(parent_route("/"), None);
/// ```
#[must_use]
pub fn parent_route(route: &str) -> Option<&str> {
    if route == "/" || route.is_empty() {
        return None;
    }
    match route.rsplit_once('/') {
        Some(("", _)) => Some("/"),
        Some((parent, _)) => Some(parent),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_route_plain() {
        assert_eq!(fs_route("/docs/setup", None), "/docs/setup");
    }

    #[test]
    fn test_fs_route_strips_fragment_and_query() {
        assert_eq!(fs_route("/docs/setup#install", None), "/docs/setup");
        assert_eq!(fs_route("/docs/setup?tab=2", None), "/docs/setup");
    }

    #[test]
    fn test_fs_route_strips_trailing_slash() {
        assert_eq!(fs_route("/docs/", None), "/docs");
        assert_eq!(fs_route("/", None), "/");
    }

    #[test]
    fn test_fs_route_strips_locale_prefix() {
        assert_eq!(fs_route("/fr/docs", Some("fr")), "/docs");
        assert_eq!(fs_route("/fr", Some("fr")), "/");
        assert_eq!(fs_route("/fr/", Some("fr")), "/");
    }

    #[test]
    fn test_fs_route_keeps_non_locale_segment() {
        // "france" starts with "fr" but is a different segment
        assert_eq!(fs_route("/france/docs", Some("fr")), "/france/docs");
        assert_eq!(fs_route("/docs/fr", Some("fr")), "/docs/fr");
    }

    #[test]
    fn test_fs_route_without_locale() {
        assert_eq!(fs_route("/fr/docs", None), "/fr/docs");
    }

    #[test]
    fn test_route_is_under_exact_and_descendant() {
        assert!(route_is_under("/docs", "/docs"));
        assert!(route_is_under("/docs/advanced", "/docs"));
        assert!(route_is_under("/docs/advanced/cache", "/docs"));
    }

    #[test]
    fn test_route_is_under_rejects_sibling_prefix() {
        assert!(!route_is_under("/docset/x", "/docs"));
        assert!(!route_is_under("/doc", "/docs"));
    }

    #[test]
    fn test_route_is_under_root_matches_all() {
        assert!(route_is_under("/anything", "/"));
        assert!(route_is_under("/", "/"));
    }

    #[test]
    fn test_parent_route_walks_up() {
        assert_eq!(parent_route("/a/b/c"), Some("/a/b"));
        assert_eq!(parent_route("/a"), Some("/"));
        assert_eq!(parent_route("/"), None);
    }
}
