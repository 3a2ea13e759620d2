//! Icon URL extraction and normalization.
//!
//! Whatever the platform, a raw icon URL is normalized the same way: query
//! parameters are stripped, and relative paths are made absolute against
//! the listing page — with the Spigot `data/` prefix special-cased onto its
//! fixed CDN base.

use crate::context::FetchContext;
use crate::error::ExtractResult;
use crate::page::{dom_first_value, Strategy};
use plugindex_core::{Platform, ResolvedSource};
use url::Url;

/// Base host for Spigot icon paths that start with `data/`.
const SPIGOT_DATA_BASE: &str = "https://www.spigotmc.org";

/// Spigot icons need a longer wait than text content.
const SPIGOT_ICON_WAIT_MS: u64 = 10_000;

const SPIGOT_CHAIN: &[Strategy] = &[
    Strategy::Attr("img.resourceIcon", "src"),
    Strategy::Attr("img.resource-icon, .resource-image img", "src"),
];

/// Fetch the normalized icon URL; any failure is a miss, never an error.
///
/// CurseForge listings have no reachable icon source, so that platform is
/// always a miss.
pub async fn fetch_icon(ctx: &FetchContext, source: &ResolvedSource) -> Option<String> {
    let result = match source.platform {
        Platform::Modrinth => modrinth(ctx, &source.identifier).await,
        Platform::Spigot => Ok(spigot(ctx, &source.identifier).await),
        Platform::Hangar => hangar(ctx, &source.identifier).await,
        Platform::Curseforge => Ok(None),
    };

    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(platform = %source.platform, "icon extraction failed: {e}");
            None
        }
    }
}

async fn modrinth(ctx: &FetchContext, slug: &str) -> ExtractResult<Option<String>> {
    Ok(ctx
        .modrinth
        .project(slug)
        .await?
        .icon_url
        .as_deref()
        .and_then(strip_query))
}

async fn hangar(ctx: &FetchContext, identifier: &str) -> ExtractResult<Option<String>> {
    Ok(ctx
        .hangar
        .project(identifier)
        .await?
        .avatar_url
        .as_deref()
        .and_then(strip_query))
}

async fn spigot(ctx: &FetchContext, url: &str) -> Option<String> {
    let raw = dom_first_value(
        ctx,
        Platform::Spigot,
        url,
        SPIGOT_CHAIN,
        &[],
        SPIGOT_ICON_WAIT_MS,
    )
    .await?;
    normalize_icon_url(&raw, url)
}

/// Strip query parameters and fragment from an absolute URL.
#[must_use]
pub fn strip_query(raw: &str) -> Option<String> {
    let mut parsed = Url::parse(raw).ok()?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    Some(parsed.to_string())
}

/// Normalize a scraped icon source into an absolute, query-free URL.
#[must_use]
pub fn normalize_icon_url(raw: &str, listing_url: &str) -> Option<String> {
    let raw = raw.split('?').next().unwrap_or(raw);
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http") {
        return Some(raw.to_string());
    }
    if raw.starts_with("data/") {
        return Some(format!("{SPIGOT_DATA_BASE}/{raw}"));
    }
    let base = Url::parse(listing_url).ok()?;
    let host = base.host_str()?;
    Some(format!("{}://{host}{raw}", base.scheme()))
}
