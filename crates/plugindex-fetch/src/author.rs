//! Author extraction, one routine per platform.
//!
//! No platform needs a browser for this attribute: Modrinth and CurseForge
//! expose author data through their APIs, Spigot through the Spiget API,
//! and Hangar carries the author inside the resolved identifier.

use crate::context::FetchContext;
use crate::error::ExtractResult;
use plugindex_core::resolve::{curseforge_slug_and_class, spigot_resource_id};
use plugindex_core::{Platform, ResolvedSource};

/// Fetch the author name(s); any failure is a miss, never an error.
pub async fn fetch_author(ctx: &FetchContext, source: &ResolvedSource) -> Option<String> {
    let result = match source.platform {
        Platform::Modrinth => modrinth(ctx, &source.identifier).await,
        Platform::Spigot => spigot(ctx, &source.identifier).await,
        Platform::Hangar => Ok(hangar(&source.identifier)),
        Platform::Curseforge => curseforge(ctx, &source.identifier).await,
    };

    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(platform = %source.platform, "author extraction failed: {e}");
            None
        }
    }
}

/// Two calls: project detail for the team id, then the team-members list.
/// All-or-nothing — a failed second call misses the whole attribute rather
/// than returning a partial roster.
async fn modrinth(ctx: &FetchContext, slug: &str) -> ExtractResult<Option<String>> {
    let project = ctx.modrinth.project(slug).await?;
    let Some(team_id) = project.team.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let members = ctx.modrinth.team_members(&team_id).await?;
    let names: Vec<String> = members
        .into_iter()
        .filter_map(|m| m.user.and_then(|u| u.username))
        .filter(|n| !n.is_empty())
        .collect();

    Ok(if names.is_empty() {
        None
    } else {
        Some(names.join(" "))
    })
}

async fn spigot(ctx: &FetchContext, url: &str) -> ExtractResult<Option<String>> {
    let Some(resource_id) = spigot_resource_id(url) else {
        return Ok(None);
    };
    Ok(ctx.spiget.resource_author(&resource_id).await?.name)
}

/// The author is the namespace half of the `author/project` identifier.
fn hangar(identifier: &str) -> Option<String> {
    identifier
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

async fn curseforge(ctx: &FetchContext, url: &str) -> ExtractResult<Option<String>> {
    let Some((slug, class_id)) = curseforge_slug_and_class(url) else {
        return Ok(None);
    };
    let search = ctx.curseforge.search(&slug, class_id).await?;
    Ok(search
        .data
        .into_iter()
        .next()
        .and_then(|m| m.authors.into_iter().next())
        .and_then(|a| a.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangar_author_is_the_namespace() {
        assert_eq!(hangar("alice/CoolProj"), Some("alice".to_string()));
        assert_eq!(hangar(""), None);
    }
}
