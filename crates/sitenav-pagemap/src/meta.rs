//! Per-folder metadata records.
//!
//! A [`MetaRecord`] is the parsed contents of a folder's metadata sidecar
//! (`_meta.json`/`_meta.yaml`, parsed by the collector). Its key order is the
//! declared sidebar order, so the record preserves insertion order instead of
//! sorting keys. Each value is either a bare title string or a [`MetaSpec`]
//! with per-child overrides.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::theme::ThemeOverrides;

/// Classification of a navigation item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Top-level page rendered in the navbar, full-bleed body.
    Page,
    /// Documentation page rendered in the sidebar with ToC and pagination.
    #[default]
    Doc,
    /// Folder rendered as a flat dropdown instead of nested pages.
    Menu,
    /// Non-navigable visual divider.
    Separator,
}

/// Visibility of a navigation item.
///
/// Anything other than `hidden` reads as [`Display::Normal`] so unknown
/// keywords degrade to visible instead of failing the parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    /// Shown in navigation views.
    #[default]
    Normal,
    /// Removed from navigation views but still directly routable.
    Hidden,
}

impl Display {
    /// Parse a display keyword. Only `"hidden"` hides; everything else is
    /// visible.
    #[must_use]
    pub fn from_keyword(value: &str) -> Self {
        if value == "hidden" {
            Self::Hidden
        } else {
            Self::Normal
        }
    }

    /// Check whether the item is hidden from navigation.
    #[must_use]
    pub fn is_hidden(self) -> bool {
        self == Self::Hidden
    }
}

impl<'de> Deserialize<'de> for Display {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let keyword = String::deserialize(deserializer)?;
        Ok(Self::from_keyword(&keyword))
    }
}

/// Structured per-child overrides in a [`MetaRecord`].
///
/// All fields are optional; unknown keys are ignored for forward
/// compatibility.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaSpec {
    /// Display title override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Type reclassification, applied regardless of structural shape.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    /// Visibility override. Wins over the child's front matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    /// Theme overrides cascading into the child's subtree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeOverrides>,
    /// External link target. Entries with an `href` and no matching child
    /// become link items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Open the `href` in a new window.
    #[serde(rename = "newWindow", skip_serializing_if = "Option::is_none")]
    pub new_window: Option<bool>,
}

impl MetaSpec {
    /// Spec carrying only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Spec carrying only a type reclassification.
    #[must_use]
    pub fn typed(item_type: ItemType) -> Self {
        Self {
            item_type: Some(item_type),
            ..Default::default()
        }
    }
}

/// A single value in a [`MetaRecord`]: bare title or structured spec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Shorthand: the value is the child's title.
    Title(String),
    /// Structured overrides.
    Spec(MetaSpec),
}

impl MetaValue {
    /// Title declared by this entry, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Title(title) => Some(title),
            Self::Spec(spec) => spec.title.as_deref(),
        }
    }

    /// Structured spec, when the value is not a bare title.
    #[must_use]
    pub fn spec(&self) -> Option<&MetaSpec> {
        match self {
            Self::Title(_) => None,
            Self::Spec(spec) => Some(spec),
        }
    }

    /// Type override declared by this entry.
    #[must_use]
    pub fn item_type(&self) -> Option<ItemType> {
        self.spec().and_then(|spec| spec.item_type)
    }

    /// Display override declared by this entry.
    #[must_use]
    pub fn display(&self) -> Option<Display> {
        self.spec().and_then(|spec| spec.display)
    }

    /// Theme overrides declared by this entry.
    #[must_use]
    pub fn theme(&self) -> Option<&ThemeOverrides> {
        self.spec().and_then(|spec| spec.theme.as_ref())
    }

    /// External link target declared by this entry.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.spec().and_then(|spec| spec.href.as_deref())
    }
}

impl From<&str> for MetaValue {
    fn from(title: &str) -> Self {
        Self::Title(title.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(title: String) -> Self {
        Self::Title(title)
    }
}

impl From<MetaSpec> for MetaValue {
    fn from(spec: MetaSpec) -> Self {
        Self::Spec(spec)
    }
}

/// Key of the wildcard entry positioning unlisted children.
pub const WILDCARD_KEY: &str = "*";

/// Ordered per-folder override record.
///
/// Keys reference child slugs; key order is the declared child order.
/// Deserialization goes through a map visitor so insertion order survives
/// any self-describing format (JSON, YAML).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaRecord {
    entries: Vec<(String, MetaValue)>,
}

impl MetaRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, replacing an existing entry with the same key in
    /// place (the original position is the declared one).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// The wildcard entry, if declared.
    #[must_use]
    pub fn wildcard(&self) -> Option<&MetaValue> {
        self.get(WILDCARD_KEY)
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MetaRecord
where
    K: Into<String>,
    V: Into<MetaValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for MetaRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MetaRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = MetaRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of child slugs to titles or override specs")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, MetaValue>()? {
                    entries.push((key, value));
                }
                Ok(MetaRecord { entries })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
