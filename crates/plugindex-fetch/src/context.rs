//! Shared collaborators handed to every extractor.

use crate::api::{CurseforgeClient, HangarClient, ModrinthClient, SpigetClient};
use crate::error::ExtractResult;
use plugindex_browser::SessionOptions;
use plugindex_core::config::BrowserConfig;
use plugindex_core::{AppConfig, Platform};
use std::time::Duration;

/// Desktop user agent presented to the challenge-protected platform.
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// How long CurseForge pages get to run their challenge scripts after
/// navigation before the DOM is read.
const CURSEFORGE_SETTLE_MS: u64 = 2_000;

/// API clients plus browser settings, shared by the five extractors.
///
/// All five run against the same resolved source; the context makes sure
/// they also share the same HTTP client and browser policy.
#[derive(Debug, Clone)]
pub struct FetchContext {
    /// Plain HTTP client, also used for static-HTML fallbacks.
    pub http: reqwest::Client,
    /// Modrinth API client.
    pub modrinth: ModrinthClient,
    /// Hangar API client.
    pub hangar: HangarClient,
    /// Spiget API client (SpigotMC author lookups).
    pub spiget: SpigetClient,
    /// CurseForge API client.
    pub curseforge: CurseforgeClient,
    /// Browser policy from configuration.
    pub browser: BrowserConfig,
}

impl FetchContext {
    /// Build a context against the production APIs.
    pub fn new(config: &AppConfig) -> ExtractResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()?;

        Ok(Self {
            modrinth: ModrinthClient::new(http.clone()),
            hangar: HangarClient::new(http.clone()),
            spiget: SpigetClient::new(http.clone()),
            curseforge: CurseforgeClient::new(http.clone(), config.curseforge.api_key.clone()),
            http,
            browser: config.browser.clone(),
        })
    }

    /// Session launch options for a platform.
    ///
    /// CurseForge sits behind a JavaScript challenge, so its sessions get
    /// stealth flags, a desktop user agent and a settle delay; SpigotMC
    /// renders server-side and needs none of that.
    #[must_use]
    pub fn session_options(&self, platform: Platform) -> SessionOptions {
        let base = SessionOptions {
            headless: self.browser.headless,
            navigation_timeout: Duration::from_millis(self.browser.navigation_timeout_ms),
            ..SessionOptions::default()
        };
        match platform {
            Platform::Curseforge => SessionOptions {
                stealth: true,
                user_agent: Some(DESKTOP_USER_AGENT.to_string()),
                settle_delay: Duration::from_millis(CURSEFORGE_SETTLE_MS),
                ..base
            },
            _ => base,
        }
    }

    /// Default bound on the primary-selector wait.
    #[must_use]
    pub fn selector_timeout_ms(&self) -> u64 {
        self.browser.selector_timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curseforge_sessions_are_stealthed() {
        let ctx = FetchContext::new(&AppConfig::default()).expect("context");
        let opts = ctx.session_options(Platform::Curseforge);
        assert!(opts.stealth);
        assert!(opts.user_agent.is_some());
        assert!(!opts.settle_delay.is_zero());

        let opts = ctx.session_options(Platform::Spigot);
        assert!(!opts.stealth);
        assert!(opts.settle_delay.is_zero());
    }
}
