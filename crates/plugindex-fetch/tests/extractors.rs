//! API-backed extractor tests against a local mock server.
//!
//! Browser-backed paths (Spigot/CurseForge DOM extraction) are covered by
//! the strategy-chain unit tests in `page.rs`; everything here exercises
//! the JSON backends end to end through the public `Fetcher` surface.

use mockito::ServerGuard;
use plugindex_core::AppConfig;
use plugindex_fetch::api::{
    CurseforgeClient, HangarClient, ModrinthClient, SpigetClient,
};
use plugindex_fetch::{Attribute, FetchContext, FetchError, Fetcher};

fn fetcher_for(server: &ServerGuard, api_key: Option<&str>) -> Fetcher {
    let http = reqwest::Client::new();
    let base = server.url();
    Fetcher::with_context(FetchContext {
        modrinth: ModrinthClient::with_base(http.clone(), base.clone()),
        hangar: HangarClient::with_base(http.clone(), base.clone()),
        spiget: SpigetClient::with_base(http.clone(), base.clone()),
        curseforge: CurseforgeClient::with_base(http.clone(), base, api_key.map(String::from)),
        http,
        browser: AppConfig::default().browser,
    })
}

#[tokio::test]
async fn modrinth_author_concatenates_team_members() {
    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/project/cool-plugin")
        .with_body(r#"{"title":"Cool Plugin","team":"T1"}"#)
        .create_async()
        .await;
    let _members = server
        .mock("GET", "/team/T1/members")
        .with_body(r#"[{"user":{"username":"alice"}},{"user":{"username":"bob"}}]"#)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let author = fetcher
        .fetch_attribute("https://modrinth.com/plugin/cool-plugin/", Attribute::Author)
        .await
        .expect("resolved");
    assert_eq!(author.as_deref(), Some("alice bob"));
}

#[tokio::test]
async fn modrinth_author_never_returns_partially() {
    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/project/cool-plugin")
        .with_body(r#"{"team":"T1"}"#)
        .create_async()
        .await;
    let _members = server
        .mock("GET", "/team/T1/members")
        .with_status(500)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let author = fetcher
        .fetch_attribute("https://modrinth.com/plugin/cool-plugin/", Attribute::Author)
        .await
        .expect("resolved");
    assert_eq!(author, None);
}

#[tokio::test]
async fn modrinth_author_without_team_is_a_miss() {
    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/project/cool-plugin")
        .with_body(r#"{"title":"Cool Plugin"}"#)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let author = fetcher
        .fetch_attribute("https://modrinth.com/plugin/cool-plugin/", Attribute::Author)
        .await
        .expect("resolved");
    assert_eq!(author, None);
}

#[tokio::test]
async fn modrinth_icon_is_stripped_of_query_parameters() {
    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/project/cool-plugin")
        .with_body(r#"{"icon_url":"https://cdn.example/icon.png?size=64&t=123"}"#)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let icon = fetcher
        .fetch_attribute("https://modrinth.com/plugin/cool-plugin/", Attribute::Icon)
        .await
        .expect("resolved");
    assert_eq!(icon.as_deref(), Some("https://cdn.example/icon.png"));
}

#[tokio::test]
async fn modrinth_versions_are_ranked_and_sorted() {
    let mut server = mockito::Server::new_async().await;
    let _versions = server
        .mock("GET", "/project/cool-plugin/version")
        .with_body(
            r#"[
                {"loaders":["fabric"],"game_versions":["1.21"]},
                {"loaders":["paper"],"game_versions":["1.9","1.10"]},
                {"loaders":["bukkit"],"game_versions":["1.9"]}
            ]"#,
        )
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let versions = fetcher
        .fetch_attribute(
            "https://modrinth.com/plugin/cool-plugin/",
            Attribute::Versions,
        )
        .await
        .expect("resolved");
    // Fabric-only 1.21 drops out; plain string sort puts 1.10 first.
    assert_eq!(versions.as_deref(), Some("1.10 1.9"));
}

#[tokio::test]
async fn hangar_versions_accumulate_across_pages() {
    let mut server = mockito::Server::new_async().await;
    let _page0 = server
        .mock("GET", "/projects/alice/CoolProj/versions?limit=25&offset=0")
        .with_body(
            r#"{"result":[{"platformDependencies":{"PAPER":["1.19","1.20"]}}],
                "pagination":{"count":30}}"#,
        )
        .create_async()
        .await;
    let _page1 = server
        .mock("GET", "/projects/alice/CoolProj/versions?limit=25&offset=25")
        .with_body(
            r#"{"result":[{"platformDependencies":{"PAPER":["1.20","1.18"],"WATERFALL":["1.18"]}}],
                "pagination":{"count":30}}"#,
        )
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let versions = fetcher
        .fetch_attribute("https://hangar.papermc.io/alice/CoolProj", Attribute::Versions)
        .await
        .expect("resolved");
    // Deduplicated sorted union of both pages.
    assert_eq!(versions.as_deref(), Some("1.18 1.19 1.20"));
}

#[tokio::test]
async fn hangar_pagination_stops_when_a_page_comes_back_empty() {
    let mut server = mockito::Server::new_async().await;
    // The server overstates its total; the empty second page must end the
    // walk instead of looping toward the claimed count.
    let _page0 = server
        .mock("GET", "/projects/alice/CoolProj/versions?limit=25&offset=0")
        .with_body(
            r#"{"result":[{"platformDependencies":{"PAPER":["1.19","1.20"]}}],
                "pagination":{"count":100}}"#,
        )
        .create_async()
        .await;
    let _page1 = server
        .mock("GET", "/projects/alice/CoolProj/versions?limit=25&offset=25")
        .with_body(r#"{"result":[],"pagination":{"count":100}}"#)
        .expect(1)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let versions = fetcher
        .fetch_attribute("https://hangar.papermc.io/alice/CoolProj", Attribute::Versions)
        .await
        .expect("resolved");
    assert_eq!(versions.as_deref(), Some("1.19 1.20"));
}

#[tokio::test]
async fn hangar_title_author_and_icon_come_from_one_payload() {
    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/projects/alice/CoolProj")
        .with_body(
            r#"{"name":"CoolProj","description":"Does cool things.",
                "avatarUrl":"https://h.example/avatar.png?v=7"}"#,
        )
        .expect_at_least(1)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let url = "https://hangar.papermc.io/alice/CoolProj";

    let title = fetcher
        .fetch_attribute(url, Attribute::Title)
        .await
        .expect("resolved");
    assert_eq!(title.as_deref(), Some("CoolProj"));

    let icon = fetcher
        .fetch_attribute(url, Attribute::Icon)
        .await
        .expect("resolved");
    assert_eq!(icon.as_deref(), Some("https://h.example/avatar.png"));

    // The author is the namespace half of the identifier, no extra call.
    let author = fetcher
        .fetch_attribute(url, Attribute::Author)
        .await
        .expect("resolved");
    assert_eq!(author.as_deref(), Some("alice"));
}

#[tokio::test]
async fn spigot_author_uses_the_spiget_api() {
    let mut server = mockito::Server::new_async().await;
    let _author = server
        .mock("GET", "/resources/9089/author")
        .with_body(r#"{"name":"md_5"}"#)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let author = fetcher
        .fetch_attribute(
            "https://www.spigotmc.org/resources/essentialsx.9089/",
            Attribute::Author,
        )
        .await
        .expect("resolved");
    assert_eq!(author.as_deref(), Some("md_5"));
}

#[tokio::test]
async fn curseforge_author_sends_the_api_key() {
    let mut server = mockito::Server::new_async().await;
    let _search = server
        .mock("GET", "/mods/search?gameId=432&slug=jei&classId=6")
        .match_header("x-api-key", "test-key")
        .with_body(r#"{"data":[{"authors":[{"name":"mezz"},{"name":"other"}]}]}"#)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, Some("test-key"));
    let author = fetcher
        .fetch_attribute(
            "https://www.curseforge.com/minecraft/mc-mods/jei",
            Attribute::Author,
        )
        .await
        .expect("resolved");
    assert_eq!(author.as_deref(), Some("mezz"));
}

#[tokio::test]
async fn curseforge_author_without_key_is_a_miss() {
    let server = mockito::Server::new_async().await;
    let fetcher = fetcher_for(&server, None);
    let author = fetcher
        .fetch_attribute(
            "https://www.curseforge.com/minecraft/mc-mods/jei",
            Attribute::Author,
        )
        .await
        .expect("resolved");
    assert_eq!(author, None);
}

#[tokio::test]
async fn invalid_url_fails_before_any_network_call() {
    let mut server = mockito::Server::new_async().await;
    let untouched = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let err = fetcher
        .fetch_plugin("https://example.com/plugin/foo")
        .await
        .expect_err("unresolved");
    assert!(matches!(err, FetchError::InvalidUrl(_)));

    let err = fetcher
        .fetch_attribute("not a url", Attribute::Title)
        .await
        .expect_err("unresolved");
    assert!(matches!(err, FetchError::InvalidUrl(_)));

    untouched.assert_async().await;
}

#[tokio::test]
async fn attribute_misses_leave_empty_fields_in_the_record() {
    let mut server = mockito::Server::new_async().await;
    let _missing = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(404)
        .expect_at_least(1)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server, None);
    let record = fetcher
        .fetch_plugin("https://modrinth.com/plugin/gone-plugin/")
        .await
        .expect("record assembled despite misses");

    assert_eq!(record.url, "https://modrinth.com/plugin/gone-plugin/");
    assert!(record.title.is_empty());
    assert!(record.description.is_empty());
    assert!(record.author.is_empty());
    assert!(record.icon_url.is_empty());
    assert!(record.versions.is_empty());
    assert!(record.owner.is_none());
}

#[tokio::test]
async fn confirm_replaces_by_url_in_the_store() {
    use plugindex_core::{MemoryStore, PluginRecord, RecordStore};

    let mut server = mockito::Server::new_async().await;
    let _project = server
        .mock("GET", "/project/cool-plugin")
        .with_body(r#"{"title":"Cool Plugin","description":"Neat."}"#)
        .expect_at_least(1)
        .create_async()
        .await;
    let _rest = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let url = "https://modrinth.com/plugin/cool-plugin/";
    let stale = PluginRecord {
        url: url.to_string(),
        title: "Old Title".to_string(),
        ..PluginRecord::default()
    };
    let store = MemoryStore::with_records(vec![stale]);

    let fetcher = fetcher_for(&server, None);
    let record = fetcher.fetch_plugin(url).await.expect("fetch");
    fetcher.confirm(record, &store).await.expect("confirm");

    let all = store.list_all().await.expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Cool Plugin");
    assert_eq!(all[0].description, "Neat.");
}
