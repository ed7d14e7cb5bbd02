use anyhow::{Context, Result, bail};
use newsclip::{
    article::{Advisory, ArticlePipeline},
    config::{Config, ENV_SITE_ID},
    corpus::Corpus,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        bail!("usage: newsclip <article-url>...");
    }

    let config = Config::from_env()?;
    let key = std::env::var(ENV_SITE_ID).unwrap_or_else(|_| "nikkei".to_string());
    let site = config
        .site(&key)
        .with_context(|| format!("no site registered under {key:?}"))?
        .clone();

    let corpus = Corpus::json_file(config.db_path(), site.title());
    let pipeline = ArticlePipeline::http(site);

    let mut fetched = Vec::new();
    for url in &urls {
        match pipeline.fetch(url).await {
            Ok(outcome) if outcome.is_stale() => {
                warn!("skipping stale article: {}", url);
            }
            Ok(outcome) => {
                if outcome.advisory() == Some(Advisory::DegradedFetch) {
                    warn!("storing degraded article: {}", url);
                }
                fetched.push(outcome.into_article());
            }
            Err(e) => error!("{}", e),
        }
    }

    if fetched.is_empty() {
        info!("nothing to store");
        return Ok(());
    }

    let count = fetched.len();
    let total = corpus.append(fetched).await?;
    info!("stored {} article(s), corpus now holds {}", count, total);
    Ok(())
}
