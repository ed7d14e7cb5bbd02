//! Configuration handling for the application.
//!
//! Sites are registered by key and handed to the pipeline explicitly; there
//! is no process-wide site table. `Config::from_env` reads a single site and
//! the corpus location from environment variables, falling back to
//! development defaults.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Environment variable names.
pub const ENV_DB_PATH: &str = "NEWSCLIP_DB_PATH";
pub const ENV_SITE_ID: &str = "NEWSCLIP_SITE_ID";
pub const ENV_SITE_DOMAIN: &str = "NEWSCLIP_SITE_DOMAIN";
pub const ENV_SITE_TITLE: &str = "NEWSCLIP_SITE_TITLE";
pub const ENV_SITE_TIMEOUT: &str = "NEWSCLIP_SITE_TIMEOUT";

const DEFAULT_DB_PATH: &str = "data/articles.json";
const DEFAULT_SITE_ID: &str = "nikkei";
const DEFAULT_SITE_DOMAIN: &str = "cn.nikkei.com";
const DEFAULT_SITE_TITLE: &str = "日经中文网";
const DEFAULT_CONTENT_ID: &str = "contentDiv";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Identity and fetch settings of one news site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    key: String,
    domain: String,
    title: String,
    timeout: Duration,
    title_noise: Vec<String>,
    content_id: String,
}

impl SiteConfig {
    /// Create a site with the default timeout and content container id.
    ///
    /// The page title noise list starts with the site name as pages of the
    /// site append it, separated by two spaces.
    pub fn new(
        key: impl Into<String>,
        domain: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            key: key.into(),
            domain: domain.into(),
            title_noise: vec![format!("  {title}")],
            title,
            timeout: DEFAULT_TIMEOUT,
            content_id: DEFAULT_CONTENT_ID.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse a human duration such as `1m` or `30s`.
    ///
    /// An unparseable value keeps the one minute default; startup never
    /// fails because of it.
    pub fn with_timeout_str(self, raw: &str) -> Self {
        let timeout = parse_timeout(raw).unwrap_or_else(|err| {
            warn!("[{}] timeout init error: {}", self.title, err);
            DEFAULT_TIMEOUT
        });
        self.with_timeout(timeout)
    }

    pub fn with_title_noise(mut self, noise: Vec<String>) -> Self {
        self.title_noise = noise;
        self
    }

    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = content_id.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn domain(&self) -> &str {
        &self.domain
    }
    /// Display title, used to prefix log lines and errors.
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
    pub fn title_noise(&self) -> &[String] {
        &self.title_noise
    }
    /// `id` attribute of the `div` holding the article body.
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// Stable site identifier: MD5 hex digest of the domain.
    pub fn site_id(&self) -> String {
        format!("{:x}", md5::compute(self.domain.as_bytes()))
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    db_path: PathBuf,
    sites: BTreeMap<String, SiteConfig>,
}

impl Config {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            sites: BTreeMap::new(),
        }
    }

    /// Register a site under its key, replacing an earlier registration.
    pub fn with_site(mut self, site: SiteConfig) -> Self {
        self.sites.insert(site.key().to_string(), site);
        self
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_path = env::var(ENV_DB_PATH).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let key = env::var(ENV_SITE_ID).unwrap_or_else(|_| DEFAULT_SITE_ID.to_string());
        let domain =
            env::var(ENV_SITE_DOMAIN).unwrap_or_else(|_| DEFAULT_SITE_DOMAIN.to_string());
        let title = env::var(ENV_SITE_TITLE).unwrap_or_else(|_| DEFAULT_SITE_TITLE.to_string());

        if key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: ENV_SITE_ID,
                reason: "site key must not be empty".to_string(),
            });
        }
        if domain.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: ENV_SITE_DOMAIN,
                reason: "site domain must not be empty".to_string(),
            });
        }

        let mut site = SiteConfig::new(key, domain, title);
        if let Ok(raw) = env::var(ENV_SITE_TIMEOUT) {
            site = site.with_timeout_str(&raw);
        }

        Ok(Self::new(db_path).with_site(site))
    }

    /// Path of the JSON corpus file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Look up a registered site by key.
    pub fn site(&self, key: &str) -> Option<&SiteConfig> {
        self.sites.get(key)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH).with_site(SiteConfig::new(
            DEFAULT_SITE_ID,
            DEFAULT_SITE_DOMAIN,
            DEFAULT_SITE_TITLE,
        ))
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        field: ENV_SITE_TIMEOUT,
        reason: e.to_string(),
    })
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_DB_PATH,
            ENV_SITE_ID,
            ENV_SITE_DOMAIN,
            ENV_SITE_TITLE,
            ENV_SITE_TIMEOUT,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.db_path(), Path::new(DEFAULT_DB_PATH));

        let site = cfg.site(DEFAULT_SITE_ID).unwrap();
        assert_eq!(site.domain(), DEFAULT_SITE_DOMAIN);
        assert_eq!(site.title(), DEFAULT_SITE_TITLE);
        assert_eq!(site.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(site.content_id(), "contentDiv");
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_DB_PATH, "/tmp/corpus.json");
            env::set_var(ENV_SITE_ID, "example");
            env::set_var(ENV_SITE_DOMAIN, "news.example.com");
            env::set_var(ENV_SITE_TITLE, "Example News");
            env::set_var(ENV_SITE_TIMEOUT, "30s");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.db_path(), Path::new("/tmp/corpus.json"));
        assert!(cfg.site(DEFAULT_SITE_ID).is_none());

        let site = cfg.site("example").unwrap();
        assert_eq!(site.domain(), "news.example.com");
        assert_eq!(site.title(), "Example News");
        assert_eq!(site.timeout(), Duration::from_secs(30));
        clear_env();
    }

    #[test]
    fn bad_timeout_falls_back_to_one_minute() {
        let site = SiteConfig::new("s", "s.example", "S").with_timeout_str("soon");
        assert_eq!(site.timeout(), DEFAULT_TIMEOUT);

        let site = SiteConfig::new("s", "s.example", "S").with_timeout_str("2m");
        assert_eq!(site.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn empty_domain_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_SITE_DOMAIN, " ");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_SITE_DOMAIN));
        clear_env();
    }

    #[test]
    fn site_id_is_md5_of_domain() {
        let site = SiteConfig::new("s", "cn.nikkei.com", "S");
        assert_eq!(site.site_id(), format!("{:x}", md5::compute("cn.nikkei.com")));
        assert_eq!(site.site_id().len(), 32);
    }

    #[test]
    fn default_title_noise_is_site_suffix() {
        let site = SiteConfig::new("s", "s.example", "Site");
        assert_eq!(site.title_noise(), ["  Site".to_string()]);
    }
}
