//! Loosely-typed page front matter.
//!
//! Front matter arrives from the collector as an arbitrary string-keyed
//! mapping. [`FrontMatter`] keeps that shape but exposes typed accessors for
//! the keys the navigation core interprets (`title`, `display`, and the
//! theme override fields).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::meta::Display;
use crate::theme::ThemeOverrides;

/// Parsed front matter of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter(HashMap<String, Value>);

impl FrontMatter {
    /// Create empty front matter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Check whether no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The `title` key, when it is a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// The `display` key, when it is a string keyword.
    #[must_use]
    pub fn display(&self) -> Option<Display> {
        self.0
            .get("display")
            .and_then(Value::as_str)
            .map(Display::from_keyword)
    }

    /// Theme overrides declared directly in front matter.
    ///
    /// Only boolean values under the enumerated theme keys count; anything
    /// else is left to the embedding application.
    #[must_use]
    pub fn theme_overrides(&self) -> ThemeOverrides {
        let flag = |key: &str| self.0.get(key).and_then(Value::as_bool);
        ThemeOverrides {
            navbar: flag("navbar"),
            sidebar: flag("sidebar"),
            toc: flag("toc"),
            pagination: flag("pagination"),
            footer: flag("footer"),
            full: flag("full"),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FrontMatter
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
