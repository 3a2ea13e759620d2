//! Scoped browser page sessions.

use crate::error::{BrowserError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Instant};

/// How often a bounded selector wait re-polls the DOM.
const SELECTOR_POLL_MS: u64 = 100;

/// Launch options for one page session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Run without a visible window.
    pub headless: bool,
    /// Launch with automation-hiding flags and a desktop viewport, needed
    /// for challenge-protected hosts.
    pub stealth: bool,
    /// User agent override, applied as a launch argument.
    pub user_agent: Option<String>,
    /// Bound on launch plus initial navigation.
    pub navigation_timeout: Duration,
    /// Extra wait after navigation for script-rendered content.
    pub settle_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            headless: true,
            stealth: false,
            user_agent: None,
            navigation_timeout: Duration::from_secs(30),
            settle_delay: Duration::ZERO,
        }
    }
}

/// A single navigated browser page with guaranteed teardown.
///
/// `open` launches a dedicated browser process and navigates it; `close`
/// releases the page, the browser and its event handler task. When `open`
/// itself fails past the launch point, the half-built browser is torn down
/// before the error is returned, so no process leaks on any path.
pub struct PageSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl PageSession {
    /// Launch a browser and navigate it to `url`.
    pub async fn open(url: &str, opts: &SessionOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if !opts.headless {
            builder = builder.with_head();
        }
        if opts.stealth {
            builder = builder
                .args(vec![
                    "--disable-blink-features=AutomationControlled",
                    "--disable-setuid-sandbox",
                    "--disable-dev-shm-usage",
                ])
                .window_size(1920, 1080);
        }
        if let Some(ua) = &opts.user_agent {
            builder = builder.arg(format!("--user-agent={ua}"));
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = match timeout(opts.navigation_timeout, browser.new_page(url)).await {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => {
                Self::teardown(browser, handler_task).await;
                return Err(BrowserError::Navigation(e.to_string()));
            }
            Err(_) => {
                Self::teardown(browser, handler_task).await;
                return Err(BrowserError::Timeout(format!("navigating to {url}")));
            }
        };

        if !opts.settle_delay.is_zero() {
            tokio::time::sleep(opts.settle_delay).await;
        }

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Wait for a selector to appear, bounded by `timeout_ms`.
    pub async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(selector.to_string()));
            }
            tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
        }
    }

    /// Trimmed inner text of the first element matching `selector`.
    ///
    /// A missing element is `None`, not an error; only protocol failures
    /// raise.
    pub async fn inner_text(&self, selector: &str) -> Result<Option<String>> {
        let Ok(element) = self.page.find_element(selector).await else {
            return Ok(None);
        };
        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        Ok(text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    /// Trimmed inner text of every element matching `selector`.
    pub async fn inner_texts(&self, selector: &str) -> Result<Vec<String>> {
        let Ok(elements) = self.page.find_elements(selector).await else {
            return Ok(Vec::new());
        };
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            let text = element
                .inner_text()
                .await
                .map_err(|e| BrowserError::Chromium(e.to_string()))?;
            if let Some(t) = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
                texts.push(t);
            }
        }
        Ok(texts)
    }

    /// Attribute value of the first element matching `selector`.
    pub async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let Ok(element) = self.page.find_element(selector).await else {
            return Ok(None);
        };
        element
            .attribute(name)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))
    }

    /// The document title, if any.
    pub async fn title(&self) -> Result<Option<String>> {
        self.page
            .get_title()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))
    }

    /// Full rendered page content.
    pub async fn content(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))
    }

    /// Release the page, browser process and handler task.
    pub async fn close(self) {
        if let Err(e) = self.page.close().await {
            tracing::debug!("page close failed: {e}");
        }
        Self::teardown(self.browser, self.handler_task).await;
    }

    async fn teardown(mut browser: Browser, handler_task: JoinHandle<()>) {
        if let Err(e) = browser.close().await {
            tracing::debug!("browser close failed: {e}");
        }
        if let Err(e) = browser.wait().await {
            tracing::debug!("browser wait failed: {e}");
        }
        handler_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_headless_without_stealth() {
        let opts = SessionOptions::default();
        assert!(opts.headless);
        assert!(!opts.stealth);
        assert!(opts.settle_delay.is_zero());
    }

    #[tokio::test]
    #[ignore = "Requires Chrome browser to be installed"]
    async fn open_extract_close() {
        let opts = SessionOptions::default();
        let session = PageSession::open("https://example.com", &opts)
            .await
            .expect("open session");
        let title = session.title().await.expect("title");
        assert!(title.is_some());
        session.close().await;
    }
}
