//! Supported game-version extraction, one routine per platform.
//!
//! Every platform yields the same shape: a deduplicated, lexicographically
//! sorted set of version labels.

use crate::api::ModrinthVersion;
use crate::context::FetchContext;
use crate::error::ExtractResult;
use crate::page::{dom_all_texts, dom_regex_matches};
use plugindex_core::{Platform, ResolvedSource, VersionSet};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Server-capable loaders in priority order. When two version entries
/// declare the same game version, the higher-ranked loader's association
/// wins regardless of encounter order.
const SERVER_LOADER_RANK: &[(&str, u8)] = &[
    ("purpur", 4),
    ("paper", 3),
    ("spigot", 2),
    ("bukkit", 1),
];

/// Hangar versions endpoint page size.
const HANGAR_PAGE_SIZE: u64 = 25;

/// How many version-like tokens to keep from a scraped CurseForge page.
const CURSEFORGE_TOKEN_CAP: usize = 30;

const SPIGOT_VERSIONS_SELECTOR: &str = "dl.customResourceFieldmc_versions ul.plainList li a";

fn loader_rank(loader: &str) -> Option<(u8, &'static str)> {
    SERVER_LOADER_RANK
        .iter()
        .find(|(name, _)| *name == loader)
        .map(|(name, rank)| (*rank, *name))
}

fn version_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"1\.\d+(?:\.\d+)?").expect("valid regex"))
}

/// Fetch the supported game versions; any failure is a miss, never an
/// error. A resolved page with no versions is an empty set, not a miss.
pub async fn fetch_versions(ctx: &FetchContext, source: &ResolvedSource) -> Option<VersionSet> {
    let result = match source.platform {
        Platform::Modrinth => modrinth(ctx, &source.identifier).await,
        Platform::Spigot => Ok(spigot(ctx, &source.identifier).await),
        Platform::Hangar => hangar(ctx, &source.identifier).await,
        Platform::Curseforge => Ok(curseforge(ctx, &source.identifier).await),
    };

    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(platform = %source.platform, "versions extraction failed: {e}");
            None
        }
    }
}

/// Merge Modrinth version entries into a map of game version to the
/// winning server loader.
///
/// Entries without any server-capable loader are skipped. The winner per
/// game version is decided by the fixed rank table, so the result is
/// independent of entry order.
#[must_use]
pub fn rank_game_versions(entries: &[ModrinthVersion]) -> BTreeMap<String, &'static str> {
    let mut best: BTreeMap<String, (u8, &'static str)> = BTreeMap::new();

    for entry in entries {
        let Some((rank, loader)) = entry
            .loaders
            .iter()
            .filter_map(|l| loader_rank(&l.to_ascii_lowercase()))
            .max_by_key(|(rank, _)| *rank)
        else {
            continue;
        };

        for game_version in &entry.game_versions {
            let slot = best.entry(game_version.clone()).or_insert((rank, loader));
            if rank > slot.0 {
                *slot = (rank, loader);
            }
        }
    }

    best.into_iter().map(|(gv, (_, l))| (gv, l)).collect()
}

async fn modrinth(ctx: &FetchContext, slug: &str) -> ExtractResult<Option<VersionSet>> {
    let entries = ctx.modrinth.versions(slug).await?;
    Ok(Some(rank_game_versions(&entries).into_keys().collect()))
}

async fn spigot(ctx: &FetchContext, url: &str) -> Option<VersionSet> {
    let texts = dom_all_texts(
        ctx,
        Platform::Spigot,
        url,
        SPIGOT_VERSIONS_SELECTOR,
        ctx.selector_timeout_ms(),
    )
    .await?;
    Some(texts.into_iter().collect())
}

/// Accumulate every platform-dependency version across all pages.
///
/// Iteration is capped by the server-reported total count, so an
/// inconsistent count cannot loop forever.
async fn hangar(ctx: &FetchContext, identifier: &str) -> ExtractResult<Option<VersionSet>> {
    let mut set = VersionSet::new();
    let mut offset = 0;

    loop {
        let page = ctx
            .hangar
            .versions(identifier, HANGAR_PAGE_SIZE, offset)
            .await?;
        if page.result.is_empty() {
            break;
        }
        for version in page.result {
            for versions in version.platform_dependencies.into_values() {
                set.extend(versions);
            }
        }
        if offset + HANGAR_PAGE_SIZE >= page.pagination.count {
            break;
        }
        offset += HANGAR_PAGE_SIZE;
    }

    Ok(Some(set))
}

async fn curseforge(ctx: &FetchContext, url: &str) -> Option<VersionSet> {
    let tokens = dom_regex_matches(
        ctx,
        Platform::Curseforge,
        url,
        version_token_re(),
        CURSEFORGE_TOKEN_CAP,
    )
    .await?;
    Some(tokens.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(loaders: &[&str], game_versions: &[&str]) -> ModrinthVersion {
        ModrinthVersion {
            loaders: loaders.iter().map(|s| (*s).to_string()).collect(),
            game_versions: game_versions.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn skips_entries_without_server_loaders() {
        let entries = vec![
            entry(&["fabric"], &["1.20"]),
            entry(&["paper"], &["1.19"]),
        ];
        let ranked = rank_game_versions(&entries);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.get("1.19"), Some(&"paper"));
    }

    #[test]
    fn higher_rank_wins_regardless_of_order() {
        let a = entry(&["bukkit"], &["1.20"]);
        let b = entry(&["purpur"], &["1.20"]);

        let forward = rank_game_versions(&[a.clone(), b.clone()]);
        let backward = rank_game_versions(&[b, a]);

        assert_eq!(forward, backward);
        assert_eq!(forward.get("1.20"), Some(&"purpur"));
    }

    #[test]
    fn best_loader_within_one_entry_is_used() {
        let entries = vec![entry(&["bukkit", "paper", "fabric"], &["1.18", "1.19"])];
        let ranked = rank_game_versions(&entries);
        assert_eq!(ranked.get("1.18"), Some(&"paper"));
        assert_eq!(ranked.get("1.19"), Some(&"paper"));
    }

    #[test]
    fn loader_tags_are_case_insensitive() {
        let entries = vec![entry(&["Paper"], &["1.20.4"])];
        assert_eq!(rank_game_versions(&entries).get("1.20.4"), Some(&"paper"));
    }

    #[test]
    fn game_versions_come_out_sorted_and_deduplicated() {
        let entries = vec![
            entry(&["paper"], &["1.9", "1.10"]),
            entry(&["spigot"], &["1.9"]),
        ];
        let versions: Vec<String> = rank_game_versions(&entries).into_keys().collect();
        // Lexicographic, not semver: "1.10" first.
        assert_eq!(versions, vec!["1.10", "1.9"]);
    }

    #[test]
    fn version_token_regex_matches_dotted_versions() {
        let re = version_token_re();
        let found: Vec<&str> = re
            .find_iter("Supports 1.20.1, 1.20 and 1.8; requires Java 17")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["1.20.1", "1.20", "1.8"]);
    }
}
