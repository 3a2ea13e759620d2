//! Description extraction, one routine per platform.

use crate::context::FetchContext;
use crate::error::ExtractResult;
use crate::page::{dom_first_value, Strategy};
use plugindex_core::{Platform, ResolvedSource};

const SPIGOT_CHAIN: &[Strategy] = &[Strategy::Text("p.tagline"), Strategy::Meta("description")];

/// CurseForge keeps its summary in the meta tag; the first paragraph is a
/// last resort.
const CURSEFORGE_CHAIN: &[Strategy] = &[Strategy::Meta("description"), Strategy::Text("p")];

/// Fetch the short description; any failure is a miss, never an error.
pub async fn fetch_description(ctx: &FetchContext, source: &ResolvedSource) -> Option<String> {
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
            &[],
            ctx.selector_timeout_ms(),
        )
        .await),
    };

    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(platform = %source.platform, "description extraction failed: {e}");
            None
        }
    }
}

async fn modrinth(ctx: &FetchContext, slug: &str) -> ExtractResult<Option<String>> {
    Ok(ctx.modrinth.project(slug).await?.description)
}

async fn hangar(ctx: &FetchContext, identifier: &str) -> ExtractResult<Option<String>> {
    Ok(ctx.hangar.project(identifier).await?.description)
}
