//! Typed JSON API clients for the platforms that expose one.
//!
//! Each client is a thin wrapper over a shared `reqwest::Client` with an
//! injectable base URL so tests can point it at a local mock server.

use crate::error::{ExtractError, ExtractResult};
use serde::Deserialize;
use std::collections::HashMap;

/// Production Modrinth API base.
pub const MODRINTH_API: &str = "https://api.modrinth.com/v2";
/// Production Hangar API base.
pub const HANGAR_API: &str = "https://hangar.papermc.io/api/v1";
/// Production Spiget API base.
pub const SPIGET_API: &str = "https://api.spiget.org/v2";
/// Production CurseForge API base.
pub const CURSEFORGE_API: &str = "https://api.curseforge.com/v1";

/// CurseForge game id for Minecraft.
pub const CURSEFORGE_GAME_MINECRAFT: u32 = 432;

/// Modrinth project detail payload, reduced to the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct ModrinthProject {
    /// Display title.
    pub title: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Raw icon URL, may carry query parameters.
    pub icon_url: Option<String>,
    /// Owning team id, input to the team-members call.
    pub team: Option<String>,
}

/// One member entry from the Modrinth team-members endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ModrinthTeamMember {
    /// The member's user object, absent in malformed entries.
    pub user: Option<ModrinthUser>,
}

/// Modrinth user payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ModrinthUser {
    /// Public username.
    pub username: Option<String>,
}

/// One entry from the Modrinth project version list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModrinthVersion {
    /// Loader tags declared by this version.
    #[serde(default)]
    pub loaders: Vec<String>,
    /// Game versions this entry supports.
    #[serde(default)]
    pub game_versions: Vec<String>,
}

/// Hangar project detail payload.
#[derive(Debug, Clone, Deserialize)]
pub struct HangarProject {
    /// Display name.
    pub name: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Raw avatar URL, may carry query parameters.
    #[serde(rename = "avatarUrl")]
    pub avatar_url: Option<String>,
}

/// One page of the Hangar project versions endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HangarVersionPage {
    /// Version entries on this page.
    #[serde(default)]
    pub result: Vec<HangarVersion>,
    /// Total-count pagination envelope.
    #[serde(default)]
    pub pagination: HangarPagination,
}

/// Pagination envelope with the server-reported total count.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HangarPagination {
    /// Total number of versions the server claims to have.
    #[serde(default)]
    pub count: u64,
}

/// One Hangar version entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HangarVersion {
    /// Map of platform name to the game versions it supports.
    #[serde(rename = "platformDependencies", default)]
    pub platform_dependencies: HashMap<String, Vec<String>>,
}

/// Spiget resource author payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SpigetAuthor {
    /// Author display name.
    pub name: Option<String>,
}

/// CurseForge mod search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurseforgeSearch {
    /// Matching mods, best match first.
    #[serde(default)]
    pub data: Vec<CurseforgeMod>,
}

/// One mod from a CurseForge search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurseforgeMod {
    /// Listed authors, primary first.
    #[serde(default)]
    pub authors: Vec<CurseforgeAuthor>,
}

/// CurseForge author payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CurseforgeAuthor {
    /// Author display name.
    pub name: Option<String>,
}

/// Client for the Modrinth v2 API.
#[derive(Debug, Clone)]
pub struct ModrinthClient {
    http: reqwest::Client,
    base: String,
}

impl ModrinthClient {
    /// Client against the production API.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base(http, MODRINTH_API)
    }

    /// Client against an alternate base URL (tests).
    #[must_use]
    pub fn with_base(http: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    /// GET the project detail payload for a slug.
    pub async fn project(&self, slug: &str) -> ExtractResult<ModrinthProject> {
        let url = format!("{}/project/{slug}", self.base);
        Ok(self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// GET the members of a team.
    pub async fn team_members(&self, team_id: &str) -> ExtractResult<Vec<ModrinthTeamMember>> {
        let url = format!("{}/team/{team_id}/members", self.base);
        Ok(self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// GET the full version list for a slug.
    pub async fn versions(&self, slug: &str) -> ExtractResult<Vec<ModrinthVersion>> {
        let url = format!("{}/project/{slug}/version", self.base);
        Ok(self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

/// Client for the Hangar v1 API.
#[derive(Debug, Clone)]
pub struct HangarClient {
    http: reqwest::Client,
    base: String,
}

impl HangarClient {
    /// Client against the production API.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base(http, HANGAR_API)
    }

    /// Client against an alternate base URL (tests).
    #[must_use]
    pub fn with_base(http: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    /// GET the project detail payload for an `author/project` identifier.
    pub async fn project(&self, identifier: &str) -> ExtractResult<HangarProject> {
        let url = format!("{}/projects/{identifier}", self.base);
        Ok(self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// GET one page of the project's version list.
    pub async fn versions(
        &self,
        identifier: &str,
        limit: u64,
        offset: u64,
    ) -> ExtractResult<HangarVersionPage> {
        let url = format!(
            "{}/projects/{identifier}/versions?limit={limit}&offset={offset}",
            self.base
        );
        Ok(self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

/// Client for the Spiget v2 API (SpigotMC resource metadata).
#[derive(Debug, Clone)]
pub struct SpigetClient {
    http: reqwest::Client,
    base: String,
}

impl SpigetClient {
    /// Client against the production API.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base(http, SPIGET_API)
    }

    /// Client against an alternate base URL (tests).
    #[must_use]
    pub fn with_base(http: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    /// GET the author of a resource by numeric id.
    pub async fn resource_author(&self, resource_id: &str) -> ExtractResult<SpigetAuthor> {
        let url = format!("{}/resources/{resource_id}/author", self.base);
        Ok(self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

/// Client for the official CurseForge API.
///
/// Requests require an API key; without one every call is a clean
/// [`ExtractError::MissingApiKey`] so the extractor degrades to a miss.
#[derive(Debug, Clone)]
pub struct CurseforgeClient {
    http: reqwest::Client,
    base: String,
    api_key: Option<String>,
}

impl CurseforgeClient {
    /// Client against the production API.
    #[must_use]
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base(http, CURSEFORGE_API, api_key)
    }

    /// Client against an alternate base URL (tests).
    #[must_use]
    pub fn with_base(
        http: reqwest::Client,
        base: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            base: base.into(),
            api_key,
        }
    }

    /// Search Minecraft mods by slug within a class.
    pub async fn search(&self, slug: &str, class_id: u32) -> ExtractResult<CurseforgeSearch> {
        let key = self.api_key.as_deref().ok_or(ExtractError::MissingApiKey)?;
        let url = format!(
            "{}/mods/search?gameId={CURSEFORGE_GAME_MINECRAFT}&slug={slug}&classId={class_id}",
            self.base
        );
        Ok(self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .header("x-api-key", key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modrinth_project_deserializes_with_missing_fields() {
        let project: ModrinthProject = serde_json::from_str("{\"title\":\"Cool\"}").expect("parse");
        assert_eq!(project.title.as_deref(), Some("Cool"));
        assert!(project.team.is_none());
    }

    #[test]
    fn hangar_version_page_defaults_are_empty() {
        let page: HangarVersionPage = serde_json::from_str("{}").expect("parse");
        assert!(page.result.is_empty());
        assert_eq!(page.pagination.count, 0);
    }

    #[tokio::test]
    async fn curseforge_search_without_key_is_a_clean_miss() {
        let client = CurseforgeClient::new(reqwest::Client::new(), None);
        let err = client.search("jei", 6).await.expect_err("no key");
        assert!(matches!(err, ExtractError::MissingApiKey));
    }
}
