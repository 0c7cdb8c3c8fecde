//! Cascading theme context for page rendering.
//!
//! Every node in the navigation tree carries an effective [`ThemeSettings`]:
//! the ancestor's settings with the node's own [`ThemeOverrides`] applied.
//! The merge is shallow and per-field; an override set on a child always wins
//! over the inherited value.

use serde::{Deserialize, Serialize};

/// Effective rendering options for a page.
///
/// The fields are a fixed, enumerated set rather than an open mapping so the
/// contract stays checkable at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Show the top navigation bar.
    pub navbar: bool,
    /// Show the sidebar.
    pub sidebar: bool,
    /// Show the table of contents.
    pub toc: bool,
    /// Show previous/next pagination links.
    pub pagination: bool,
    /// Show the footer.
    pub footer: bool,
    /// Render the page body full-bleed (no sidebar/ToC column).
    pub full: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            navbar: true,
            sidebar: true,
            toc: true,
            pagination: true,
            footer: true,
            full: false,
        }
    }
}

impl ThemeSettings {
    /// Apply overrides on top of these settings.
    ///
    /// Shallow per-field merge: a `Some` override replaces the inherited
    /// value, a `None` leaves it untouched.
    #[must_use]
    pub fn apply(&self, overrides: &ThemeOverrides) -> Self {
        Self {
            navbar: overrides.navbar.unwrap_or(self.navbar),
            sidebar: overrides.sidebar.unwrap_or(self.sidebar),
            toc: overrides.toc.unwrap_or(self.toc),
            pagination: overrides.pagination.unwrap_or(self.pagination),
            footer: overrides.footer.unwrap_or(self.footer),
            full: overrides.full.unwrap_or(self.full),
        }
    }
}

/// Per-node theme overrides.
///
/// All fields are optional. `None` means "inherit from the ancestor".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    /// Override for [`ThemeSettings::navbar`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar: Option<bool>,
    /// Override for [`ThemeSettings::sidebar`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<bool>,
    /// Override for [`ThemeSettings::toc`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<bool>,
    /// Override for [`ThemeSettings::pagination`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<bool>,
    /// Override for [`ThemeSettings::footer`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<bool>,
    /// Override for [`ThemeSettings::full`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<bool>,
}

impl ThemeOverrides {
    /// Check whether no field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.navbar.is_none()
            && self.sidebar.is_none()
            && self.toc.is_none()
            && self.pagination.is_none()
            && self.footer.is_none()
            && self.full.is_none()
    }

    /// Combine two override sets. Fields set in `other` win.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            navbar: other.navbar.or(self.navbar),
            sidebar: other.sidebar.or(self.sidebar),
            toc: other.toc.or(self.toc),
            pagination: other.pagination.or(self.pagination),
            footer: other.footer.or(self.footer),
            full: other.full.or(self.full),
        }
    }
}
