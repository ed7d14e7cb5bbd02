use chrono::{TimeZone, Utc};
use newsclip::{
    article::{Article, article_id},
    config::SiteConfig,
    corpus::{ArticleStore, Corpus, CorpusError, JsonFileStore},
};
use tempfile::TempDir;
use url::Url;

fn article(path: &str, title: &str, body: &str) -> Article {
    let site = SiteConfig::new("nikkei", "cn.nikkei.com", "日经中文网");
    article_on(&site, path, title, body)
}

fn article_on(site: &SiteConfig, path: &str, title: &str, body: &str) -> Article {
    let raw = format!("https://{}/{path}", site.domain());
    Article::new(
        article_id(&raw),
        site,
        Url::parse(&raw).unwrap(),
        title.to_string(),
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        body,
    )
}

#[tokio::test]
async fn missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("articles.json"), "日经中文网");
    assert!(store.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn save_then_load_preserves_articles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db").join("articles.json");
    let store = JsonFileStore::new(&path, "日经中文网");

    let articles = vec![article("a.html", "Alpha", "one"), article("b.html", "Beta", "two")];
    store.save_all(&articles).await.unwrap();

    assert!(path.exists());
    assert_eq!(store.load_all().await.unwrap(), articles);
}

#[tokio::test]
async fn file_is_a_json_array_with_corpus_field_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("articles.json");
    let store = JsonFileStore::new(&path, "日经中文网");
    store.save_all(&[article("a.html", "Alpha", "one")]).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let records = raw.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["websiteDomain"], "cn.nikkei.com");
    assert_eq!(records[0]["websiteTitle"], "日经中文网");
    assert_eq!(records[0]["sourceUrl"], "https://cn.nikkei.com/a.html");
    assert_eq!(records[0]["updateTime"], "2024-05-01T09:30:00Z");
}

#[tokio::test]
async fn corrupt_file_reports_operation_and_site() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("articles.json");
    std::fs::write(&path, b"{not json").unwrap();

    let err = JsonFileStore::new(&path, "日经中文网")
        .load_all()
        .await
        .unwrap_err();
    assert!(matches!(err, CorpusError::Serde { op: "load unmarshal", .. }));
    assert!(err.to_string().starts_with("[日经中文网] load unmarshal error"));
}

#[tokio::test]
async fn search_finds_single_matching_article() {
    // no "k" anywhere in the site identity, urls or titles
    let site = SiteConfig::new("example", "example.org", "Example");
    let dir = TempDir::new().unwrap();
    let corpus = Corpus::json_file(dir.path().join("articles.json"), site.title());
    corpus
        .save(&[
            article_on(&site, "a.html", "Alpha", "plain text"),
            article_on(&site, "b.html", "Beta", "Keyword appears here"),
            article_on(&site, "c.html", "Gamma", "nothing"),
        ])
        .await
        .unwrap();

    let found = corpus.search(&["k"]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title(), "Beta");
}

#[tokio::test]
async fn append_and_get_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("articles.json");

    let corpus = Corpus::json_file(&path, "日经中文网");
    assert_eq!(corpus.append(vec![article("a.html", "Alpha", "")]).await.unwrap(), 1);
    assert_eq!(corpus.append(vec![article("b.html", "Beta", "")]).await.unwrap(), 2);

    let reopened = Corpus::json_file(&path, "日经中文网");
    let beta = reopened
        .get(&article_id("https://cn.nikkei.com/b.html"))
        .await
        .unwrap();
    assert_eq!(beta.title(), "Beta");
    assert!(reopened.get("nope").await.unwrap_err().is_not_found());
}
