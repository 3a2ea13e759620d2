//! Shared types used across the plugindex crates.
//!
//! This module defines the platform tagged union, the resolved-source pair
//! produced by the URL resolver, the plugin record stored per listing URL,
//! and the deduplicated version-label set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The four hosting platforms a plugin listing URL can belong to.
///
/// This is a closed set: adding a platform means adding a variant here and
/// one arm per attribute extractor, never a new type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Modrinth — JSON REST API keyed by project slug.
    Modrinth,
    /// SpigotMC — server-rendered HTML, every attribute needs a page load.
    Spigot,
    /// Hangar — JSON REST API keyed by `author/project`.
    Hangar,
    /// CurseForge — JavaScript-challenge-protected pages.
    Curseforge,
}

impl Platform {
    /// Stable lowercase name, matching the serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modrinth => "modrinth",
            Self::Spigot => "spigot",
            Self::Hangar => "hangar",
            Self::Curseforge => "curseforge",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing URL classified into a platform plus its platform-specific
/// identifier.
///
/// The identifier shape depends on the platform: a project slug for
/// Modrinth, the original URL for SpigotMC and CurseForge (every attribute
/// needs page navigation), and `author/project` for Hangar. Ephemeral —
/// computed per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// The platform the URL belongs to.
    pub platform: Platform,
    /// Platform-specific identifier derived from the URL.
    pub identifier: String,
}

impl ResolvedSource {
    /// Build a resolved source for a platform.
    #[must_use]
    pub fn new(platform: Platform, identifier: impl Into<String>) -> Self {
        Self {
            platform,
            identifier: identifier.into(),
        }
    }
}

/// A deduplicated set of version-label strings in plain lexicographic order.
///
/// The ordering is a display convenience, not semantic versioning: "1.10"
/// sorts before "1.9" because this is a raw string sort. Downstream
/// consumers render the set as-is, so the ordering must not be "fixed" to
/// semver-aware comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionSet(BTreeSet<String>);

impl VersionSet {
    /// Create an empty version set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a version label, deduplicating.
    pub fn insert(&mut self, label: impl Into<String>) {
        let _ = self.0.insert(label.into());
    }

    /// Whether the set holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// All labels as a sorted vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Labels joined by a single space, the textual output form.
    #[must_use]
    pub fn join_spaced(&self) -> String {
        self.to_vec().join(" ")
    }
}

impl FromIterator<String> for VersionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<String> for VersionSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Metadata collected for one plugin listing URL.
///
/// The URL is the sole identity. Every other extraction-produced field is
/// replaced wholesale on each successful confirmed re-fetch; a failed
/// attribute extraction leaves an empty field, never a missing record.
/// `owner` is never produced by extraction — it is injected or preserved by
/// the callers that manage ownership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginRecord {
    /// Public listing URL, the unique record key.
    pub url: String,
    /// Plugin title, empty when extraction missed.
    #[serde(default)]
    pub title: String,
    /// Short description, empty when extraction missed.
    #[serde(default)]
    pub description: String,
    /// Author name(s), space-separated when a team, empty when missed.
    #[serde(default)]
    pub author: String,
    /// Absolute icon URL with query parameters stripped, empty when missed.
    #[serde(rename = "icon", default)]
    pub icon_url: String,
    /// Supported game versions, deduplicated and lexicographically sorted.
    #[serde(default)]
    pub versions: VersionSet,
    /// Owning user, managed by the store's callers, never by extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl PluginRecord {
    /// Create an empty record for a listing URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_display_matches_serialized_form() {
        assert_eq!(Platform::Modrinth.to_string(), "modrinth");
        let json = serde_json::to_string(&Platform::Curseforge).expect("serialize");
        assert_eq!(json, "\"curseforge\"");
    }

    #[test]
    fn version_set_dedups_and_sorts_lexicographically() {
        let mut set = VersionSet::new();
        set.insert("1.9");
        set.insert("1.10");
        set.insert("1.9");
        set.insert("1.20.1");

        // Raw string sort: "1.10" before "1.9".
        assert_eq!(set.to_vec(), vec!["1.10", "1.20.1", "1.9"]);
        assert_eq!(set.join_spaced(), "1.10 1.20.1 1.9");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn version_set_serializes_as_sorted_array() {
        let set: VersionSet = ["1.8", "1.21", "1.8"]
            .into_iter()
            .map(String::from)
            .collect();
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, "[\"1.21\",\"1.8\"]");
    }

    #[test]
    fn record_serializes_with_flat_keys() {
        let mut record = PluginRecord::new("https://example.com/p");
        record.icon_url = "https://cdn.example/icon.png".to_string();
        let value = serde_json::to_value(&record).expect("serialize");
        assert!(value.get("icon").is_some());
        assert!(value.get("icon_url").is_none());
        // Owner is omitted until a caller assigns one.
        assert!(value.get("owner").is_none());
    }
}
