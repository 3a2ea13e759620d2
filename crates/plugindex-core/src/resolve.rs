//! Pure classification of listing URLs into a platform and identifier.
//!
//! No network I/O happens here: classification looks only at the URL's host
//! and path. Malformed or unrecognized input yields `None`, which callers
//! must treat as invalid input rather than a transient failure.

use crate::types::{Platform, ResolvedSource};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn modrinth_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(plugin|mod|datapack)/([^/]+)/?").expect("valid regex"))
}

fn hangar_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/([^/]+)/([^/]+)/?$").expect("valid regex"))
}

fn spigot_resource_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/resources/[^/]+\.(\d+)/?").expect("valid regex"))
}

/// Map a CurseForge category path segment to its numeric class id.
///
/// Only two categories are recognized; anything else leaves the URL
/// unresolved.
#[must_use]
pub fn curseforge_class_id(category: &str) -> Option<u32> {
    match category {
        "mc-mods" => Some(6),
        "modpacks" => Some(4471),
        _ => None,
    }
}

/// Classify a listing URL into `(platform, identifier)`.
///
/// Host matching is case-insensitive and substring-based against the
/// registered domain. Returns `None` for malformed URLs, unknown hosts, and
/// known hosts whose path does not conform to the platform's listing shape.
#[must_use]
pub fn resolve(raw: &str) -> Option<ResolvedSource> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let path = parsed.path();

    if host.contains("modrinth.com") {
        let caps = modrinth_path_re().captures(path)?;
        Some(ResolvedSource::new(Platform::Modrinth, &caps[2]))
    } else if host.contains("spigotmc.org") {
        // Every Spigot attribute needs a page load, so the identifier is the
        // URL itself.
        Some(ResolvedSource::new(Platform::Spigot, raw))
    } else if host.contains("hangar.papermc.io") {
        let caps = hangar_path_re().captures(path)?;
        Some(ResolvedSource::new(
            Platform::Hangar,
            format!("{}/{}", &caps[1], &caps[2]),
        ))
    } else if host.contains("curseforge.com") {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 3 {
            return None;
        }
        let _class_id = curseforge_class_id(segments[1])?;
        Some(ResolvedSource::new(Platform::Curseforge, raw))
    } else {
        None
    }
}

/// Extract the numeric resource id from a SpigotMC listing URL
/// (`/resources/<name>.<id>/`).
#[must_use]
pub fn spigot_resource_id(url: &str) -> Option<String> {
    let caps = spigot_resource_re().captures(url)?;
    Some(caps[1].to_string())
}

/// Extract the project slug and class id from a CurseForge listing URL.
#[must_use]
pub fn curseforge_slug_and_class(url: &str) -> Option<(String, u32)> {
    let parsed = Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path().split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 3 {
        return None;
    }
    let class_id = curseforge_class_id(segments[1])?;
    Some((segments[2].to_string(), class_id))
}
