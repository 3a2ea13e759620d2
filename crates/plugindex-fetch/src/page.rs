//! DOM extraction strategies and their evaluators.
//!
//! Each HTML-backed attribute is described as an ordered list of
//! [`Strategy`] values evaluated short-circuit: the first strategy that
//! yields an accepted value wins. The same list drives both the live
//! browser session and the static-HTML fallback used when the browser
//! cannot be launched, which keeps the per-platform fallback policy
//! testable without a browser.

use crate::context::FetchContext;
use plugindex_browser::PageSession;
use plugindex_core::Platform;
use regex::Regex;
use scraper::{Html, Selector};

/// One way of pulling a value out of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Trimmed inner text of the first element matching the selector.
    Text(&'static str),
    /// Like [`Strategy::Text`], with the trailing whitespace-separated
    /// token removed (listing titles that end in a version label).
    TextDropLastToken(&'static str),
    /// Attribute value of the first element matching the selector.
    Attr(&'static str, &'static str),
    /// `content` attribute of a `<meta name=..>` tag.
    Meta(&'static str),
    /// Document title, cut at each separator in order, keeping the left
    /// piece.
    TitleSplit(&'static [&'static str]),
}

impl Strategy {
    /// The selector worth waiting for before evaluation, if any.
    #[must_use]
    pub fn wait_selector(&self) -> Option<&'static str> {
        match self {
            Self::Text(sel) | Self::TextDropLastToken(sel) | Self::Attr(sel, _) => Some(sel),
            Self::Meta(_) | Self::TitleSplit(_) => None,
        }
    }
}

/// Drop the final whitespace-separated token. A single-token input has no
/// version suffix to strip and passes through unchanged.
#[must_use]
pub fn drop_last_token(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Some((left, _)) = trimmed.rsplit_once(char::is_whitespace) else {
        return Some(trimmed.to_string());
    };
    let left = left.trim_end();
    if left.is_empty() {
        None
    } else {
        Some(left.to_string())
    }
}

fn accept(value: String, reject: &[&str]) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() || reject.contains(&value.as_str()) {
        return None;
    }
    Some(value)
}

fn split_title(title: &str, separators: &[&str]) -> String {
    let mut title = title.to_string();
    for sep in separators {
        if let Some((left, _)) = title.split_once(sep) {
            title = left.trim().to_string();
        }
    }
    title
}

/// Evaluate a chain against a live page, first match wins.
pub async fn eval_session(
    session: &PageSession,
    chain: &[Strategy],
    reject: &[&str],
) -> Option<String> {
    for strategy in chain {
        let raw = match strategy {
            Strategy::Text(sel) => session.inner_text(sel).await.ok().flatten(),
            Strategy::TextDropLastToken(sel) => session
                .inner_text(sel)
                .await
                .ok()
                .flatten()
                .and_then(|t| drop_last_token(&t)),
            Strategy::Attr(sel, name) => session.attribute(sel, name).await.ok().flatten(),
            Strategy::Meta(name) => {
                let selector = format!("meta[name=\"{name}\"]");
                session.attribute(&selector, "content").await.ok().flatten()
            }
            Strategy::TitleSplit(seps) => session
                .title()
                .await
                .ok()
                .flatten()
                .map(|t| split_title(&t, seps)),
        };
        if let Some(value) = raw.and_then(|v| accept(v, reject)) {
            return Some(value);
        }
    }
    None
}

/// Evaluate a chain against fetched HTML text, first match wins.
#[must_use]
pub fn eval_static(html: &str, chain: &[Strategy], reject: &[&str]) -> Option<String> {
    let document = Html::parse_document(html);

    for strategy in chain {
        let raw = match strategy {
            Strategy::Text(sel) => select_text(&document, sel),
            Strategy::TextDropLastToken(sel) => {
                select_text(&document, sel).and_then(|t| drop_last_token(&t))
            }
            Strategy::Attr(sel, name) => select_attr(&document, sel, name),
            Strategy::Meta(name) => {
                select_attr(&document, &format!("meta[name=\"{name}\"]"), "content")
            }
            Strategy::TitleSplit(seps) => {
                select_text(&document, "title").map(|t| split_title(&t, seps))
            }
        };
        if let Some(value) = raw.and_then(|v| accept(v, reject)) {
            return Some(value);
        }
    }
    None
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text: String = element.text().collect();
    let text = text.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn select_attr(document: &Html, selector: &str, name: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()?
        .value()
        .attr(name)
        .map(str::to_string)
}

fn select_texts(document: &Html, selector: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// GET the raw HTML of a page, misses reduced to `None`.
pub async fn fetch_static_html(http: &reqwest::Client, url: &str) -> Option<String> {
    match http.get(url).send().await.and_then(|r| r.error_for_status()) {
        Ok(response) => response.text().await.ok(),
        Err(e) => {
            tracing::debug!("static fetch of {url} failed: {e}");
            None
        }
    }
}

/// Resolve a single value from a page: browser session first, static HTML
/// when the browser is unavailable.
///
/// Waits for the first strategy's selector (bounded by `wait_ms`) before
/// evaluating, then falls through the chain. The session is closed on every
/// path.
pub async fn dom_first_value(
    ctx: &FetchContext,
    platform: Platform,
    url: &str,
    chain: &[Strategy],
    reject: &[&str],
    wait_ms: u64,
) -> Option<String> {
    match PageSession::open(url, &ctx.session_options(platform)).await {
        Ok(session) => {
            if let Some(sel) = chain.iter().find_map(Strategy::wait_selector) {
                if let Err(e) = session.wait_for_selector(sel, wait_ms).await {
                    tracing::debug!("primary selector miss on {url}: {e}");
                }
            }
            let value = eval_session(&session, chain, reject).await;
            session.close().await;
            value
        }
        Err(e) => {
            tracing::debug!("browser unavailable for {url}: {e}; trying static fetch");
            let html = fetch_static_html(&ctx.http, url).await?;
            eval_static(&html, chain, reject)
        }
    }
}

/// Collect the texts of every element matching `selector`.
///
/// `None` means the page could not be loaded at all; a loaded page with no
/// matching elements is `Some` of an empty list.
pub async fn dom_all_texts(
    ctx: &FetchContext,
    platform: Platform,
    url: &str,
    selector: &'static str,
    wait_ms: u64,
) -> Option<Vec<String>> {
    match PageSession::open(url, &ctx.session_options(platform)).await {
        Ok(session) => {
            if let Err(e) = session.wait_for_selector(selector, wait_ms).await {
                tracing::debug!("selector miss on {url}: {e}");
            }
            let texts = session.inner_texts(selector).await.ok();
            session.close().await;
            texts.or(Some(Vec::new()))
        }
        Err(e) => {
            tracing::debug!("browser unavailable for {url}: {e}; trying static fetch");
            let html = fetch_static_html(&ctx.http, url).await?;
            Some(select_texts(&Html::parse_document(&html), selector))
        }
    }
}

/// Scan the rendered page content with a regex, keeping the first `cap`
/// matches.
pub async fn dom_regex_matches(
    ctx: &FetchContext,
    platform: Platform,
    url: &str,
    pattern: &Regex,
    cap: usize,
) -> Option<Vec<String>> {
    let content = match PageSession::open(url, &ctx.session_options(platform)).await {
        Ok(session) => {
            let content = session.content().await.ok();
            session.close().await;
            content
        }
        Err(e) => {
            tracing::debug!("browser unavailable for {url}: {e}; trying static fetch");
            fetch_static_html(&ctx.http, url).await
        }
    }?;
    Some(
        pattern
            .find_iter(&content)
            .take(cap)
            .map(|m| m.as_str().to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPIGOT_TITLE_CHAIN: &[Strategy] = &[
        Strategy::TextDropLastToken("h1.resource-title__name"),
        Strategy::TitleSplit(&["|"]),
    ];

    #[test]
    fn drop_last_token_strips_version_suffix() {
        assert_eq!(
            drop_last_token("EssentialsX 2.20.1"),
            Some("EssentialsX".to_string())
        );
        assert_eq!(drop_last_token(""), None);
    }

    #[test]
    fn single_token_titles_pass_through_whole() {
        assert_eq!(drop_last_token("WorldEdit"), Some("WorldEdit".to_string()));

        let html = r#"<html><head><title>ignored | SpigotMC</title></head>
            <body><h1 class="resource-title__name">WorldEdit</h1></body></html>"#;
        assert_eq!(
            eval_static(html, SPIGOT_TITLE_CHAIN, &[]),
            Some("WorldEdit".to_string())
        );
    }

    #[test]
    fn static_chain_prefers_primary_selector() {
        let html = r#"<html><head><title>EssentialsX | SpigotMC</title></head>
            <body><h1 class="resource-title__name">EssentialsX 2.20.1</h1></body></html>"#;
        assert_eq!(
            eval_static(html, SPIGOT_TITLE_CHAIN, &[]),
            Some("EssentialsX".to_string())
        );
    }

    #[test]
    fn static_chain_falls_back_to_title_split() {
        let html = r"<html><head><title>EssentialsX | SpigotMC</title></head><body></body></html>";
        assert_eq!(
            eval_static(html, SPIGOT_TITLE_CHAIN, &[]),
            Some("EssentialsX".to_string())
        );
    }

    #[test]
    fn meta_strategy_reads_content_attribute() {
        let html = r#"<html><head><meta name="description" content="A plugin."></head></html>"#;
        assert_eq!(
            eval_static(html, &[Strategy::Meta("description")], &[]),
            Some("A plugin.".to_string())
        );
    }

    #[test]
    fn rejected_values_fall_through() {
        let html = r"<html><head><title>Just a moment...</title></head>
            <body><h1>Just a moment...</h1></body></html>";
        let chain = &[Strategy::Text("h1, h2"), Strategy::TitleSplit(&["-", "|"])];
        assert_eq!(eval_static(html, chain, &["Just a moment..."]), None);
    }

    #[test]
    fn title_split_applies_separators_in_order() {
        let html = r"<html><head><title>JEI - Mods | CurseForge</title></head></html>";
        assert_eq!(
            eval_static(html, &[Strategy::TitleSplit(&["-", "|"])], &[]),
            Some("JEI".to_string())
        );
    }

    #[test]
    fn attr_strategy_reads_first_match() {
        let html = r#"<html><body><img class="resourceIcon" src="data/icon.png?v=1"></body></html>"#;
        assert_eq!(
            eval_static(html, &[Strategy::Attr("img.resourceIcon", "src")], &[]),
            Some("data/icon.png?v=1".to_string())
        );
    }
}
