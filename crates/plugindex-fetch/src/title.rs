//! Title extraction, one routine per platform.

use crate::context::FetchContext;
use crate::error::ExtractResult;
use crate::page::{dom_first_value, Strategy};
use plugindex_core::{Platform, ResolvedSource};

/// Values that identify an anti-bot interstitial rather than content.
pub(crate) const CHALLENGE_MARKERS: &[&str] = &["Just a moment..."];

/// Spigot resource titles end with a version label; strip it, or fall back
/// to the page title.
const SPIGOT_CHAIN: &[Strategy] = &[
    Strategy::TextDropLastToken("h1.resource-title__name"),
    Strategy::TitleSplit(&["|"]),
];

const CURSEFORGE_CHAIN: &[Strategy] = &[
    Strategy::Text("h1, h2"),
    Strategy::TitleSplit(&["-", "|"]),
];

/// Fetch the plugin title; any failure is a miss, never an error.
pub async fn fetch_title(ctx: &FetchContext, source: &ResolvedSource) -> Option<String> {
    let result = match source.platform {
        Platform::Modrinth => modrinth(ctx, &source.identifier).await,
        Platform::Spigot => Ok(dom_first_value(
            ctx,
            source.platform,
            &source.identifier,
            SPIGOT_CHAIN,
            &[],
            ctx.selector_timeout_ms(),
        )
        .await),
        Platform::Hangar => hangar(ctx, &source.identifier).await,
        Platform::Curseforge => Ok(dom_first_value(
            ctx,
            source.platform,
            &source.identifier,
            CURSEFORGE_CHAIN,
            CHALLENGE_MARKERS,
            ctx.selector_timeout_ms(),
        )
        .await),
    };

    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(platform = %source.platform, "title extraction failed: {e}");
            None
        }
    }
}

async fn modrinth(ctx: &FetchContext, slug: &str) -> ExtractResult<Option<String>> {
    Ok(ctx.modrinth.project(slug).await?.title)
}

async fn hangar(ctx: &FetchContext, identifier: &str) -> ExtractResult<Option<String>> {
    Ok(ctx.hangar.project(identifier).await?.name)
}
