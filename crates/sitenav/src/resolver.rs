//! Per-folder metadata resolution.
//!
//! Turns a folder's raw children plus its locale-selected [`MetaRecord`]
//! into the effective child order with per-child overrides:
//!
//! - Mentioned children come first, in record insertion order.
//! - Unmentioned children keep collector order, appended at the end or at
//!   the `*` wildcard position when one is declared.
//! - Record entries matching no child synthesize a separator or external
//!   link item; any other unknown key is ignored.

use sitenav_pagemap::{
    Display, FrontMatter, ItemType, MetaRecord, MetaSpec, MetaValue, PageMapItem, WILDCARD_KEY,
};

/// An ordered child of a folder after meta resolution.
#[derive(Debug)]
pub(crate) enum OrderedEntry<'a> {
    /// A raw child node, with its record entry when mentioned.
    Node {
        item: &'a PageMapItem,
        meta: Option<&'a MetaValue>,
    },
    /// A record entry with no matching child: a declared separator or an
    /// external link.
    Synthetic { name: &'a str, spec: &'a MetaSpec },
}

/// Rank a node's locale against the request.
///
/// Lower is better; `None` means the variant does not exist for this
/// request. Preference order: exact locale match, then the default locale,
/// then a locale-less node.
fn variant_rank(
    item_locale: Option<&str>,
    locale: Option<&str>,
    default_locale: Option<&str>,
) -> Option<u8> {
    if item_locale == locale {
        return Some(0);
    }
    if item_locale.is_some() && item_locale == default_locale {
        return Some(1);
    }
    if item_locale.is_none() {
        return Some(2);
    }
    None
}

/// Select the folder's meta record for the requested locale.
///
/// Falls back to the default-locale record, then a locale-less record.
pub(crate) fn select_meta<'a>(
    children: &'a [PageMapItem],
    locale: Option<&str>,
    default_locale: Option<&str>,
) -> Option<&'a MetaRecord> {
    let mut best: Option<(u8, &MetaRecord)> = None;
    for child in children {
        let PageMapItem::Meta(meta) = child else {
            continue;
        };
        let Some(rank) = variant_rank(meta.locale.as_deref(), locale, default_locale) else {
            continue;
        };
        if best.is_none_or(|(best_rank, _)| rank < best_rank) {
            best = Some((rank, &meta.record));
        }
    }
    best.map(|(_, record)| record)
}

/// Produce the folder's effective child order with per-child overrides.
///
/// Same-name siblings are locale variants: only the best-ranked variant per
/// name survives. Children whose variant does not exist for this request are
/// excluded entirely.
pub(crate) fn order_children<'a>(
    children: &'a [PageMapItem],
    locale: Option<&str>,
    default_locale: Option<&str>,
) -> Vec<OrderedEntry<'a>> {
    let meta = select_meta(children, locale, default_locale);

    // Best locale variant per name, first-seen order preserved.
    let mut selected: Vec<(&str, u8, &PageMapItem)> = Vec::new();
    for child in children {
        let Some(name) = child.name() else {
            continue;
        };
        let Some(rank) = variant_rank(child.locale(), locale, default_locale) else {
            continue;
        };
        match selected.iter_mut().find(|(n, _, _)| *n == name) {
            Some(slot) => {
                if rank < slot.1 {
                    slot.1 = rank;
                    slot.2 = child;
                }
            }
            None => selected.push((name, rank, child)),
        }
    }

    let Some(meta) = meta else {
        return selected
            .into_iter()
            .map(|(_, _, item)| OrderedEntry::Node { item, meta: None })
            .collect();
    };

    let mut consumed = vec![false; selected.len()];
    let mut ordered: Vec<OrderedEntry<'a>> = Vec::with_capacity(selected.len());
    let mut wildcard_pos = None;

    for (key, value) in meta.iter() {
        if key == WILDCARD_KEY {
            wildcard_pos = Some(ordered.len());
            continue;
        }
        if let Some(pos) = selected
            .iter()
            .position(|(name, _, _)| *name == key)
            .filter(|&pos| !consumed[pos])
        {
            consumed[pos] = true;
            ordered.push(OrderedEntry::Node {
                item: selected[pos].2,
                meta: Some(value),
            });
        } else if let Some(spec) = value.spec()
            && (spec.item_type == Some(ItemType::Separator) || spec.href.is_some())
        {
            ordered.push(OrderedEntry::Synthetic { name: key, spec });
        }
        // Any other key without a matching child is ignored.
    }

    // Unmentioned children inherit the wildcard entry as fallback overrides.
    let wildcard_meta = meta.wildcard();
    let unmentioned = selected
        .iter()
        .enumerate()
        .filter(|(pos, _)| !consumed[*pos])
        .map(|(_, (_, _, item))| OrderedEntry::Node {
            item,
            meta: wildcard_meta,
        });

    match wildcard_pos {
        Some(pos) => {
            let tail: Vec<_> = unmentioned.collect();
            ordered.splice(pos..pos, tail);
        }
        None => ordered.extend(unmentioned),
    }

    ordered
}

/// Resolve a child's display title.
///
/// Precedence, highest first: record entry title, front-matter `title`,
/// slug-derived fallback.
pub(crate) fn resolve_title(
    meta: Option<&MetaValue>,
    front_matter_title: Option<&str>,
    name: &str,
) -> String {
    if let Some(title) = meta.and_then(MetaValue::title) {
        return title.to_owned();
    }
    if let Some(title) = front_matter_title {
        return title.to_owned();
    }
    default_title(name)
}

/// Resolve a child's visibility.
///
/// The record entry wins over front matter; the folder-level record is the
/// more specific authority.
pub(crate) fn resolve_display(meta: Option<&MetaValue>, front_matter: &FrontMatter) -> Display {
    meta.and_then(MetaValue::display)
        .or_else(|| front_matter.display())
        .unwrap_or_default()
}

/// Derive a display title from a slug.
///
/// Separators (`-`, `_`) become spaces and each word is capitalized:
/// `"getting-started"` → `"Getting Started"`.
#[must_use]
pub fn default_title(slug: &str) -> String {
    slug.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a word.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
