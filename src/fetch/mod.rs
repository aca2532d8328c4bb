// src/fetch/mod.rs

pub mod retry;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::{CacheBust, Config, FeedSource, HttpSettings};
pub use retry::{with_retry, RetryPolicy, Sleeper, TokioSleeper};

/// Fetches a document body as text. Non-2xx responses are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &Url) -> Result<String>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &Url) -> Result<String> {
        debug!("Fetching text from {}", url);
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {} for {}", status.as_u16(), url));
        }

        resp.text()
            .await
            .with_context(|| format!("reading body from {}", url))
    }
}

/// Append `_=<millis>` to defeat intermediary caches.
pub fn add_cache_buster(url: &Url, millis: i64) -> Url {
    let mut out = url.clone();
    out.query_pairs_mut().append_pair("_", &millis.to_string());
    out
}

fn is_google_sheets(url: &Url) -> bool {
    url.host_str() == Some("docs.google.com")
}

/// Resolve the URL actually requested for `source` at time `millis`.
pub fn request_url(source: &FeedSource, millis: i64) -> Result<Url> {
    let url = Url::parse(&source.url).with_context(|| format!("parsing feed URL {}", source.url))?;
    let bust = match source.cache_bust {
        CacheBust::Always => true,
        CacheBust::Never => false,
        CacheBust::GoogleSheets => is_google_sheets(&url),
    };
    Ok(if bust { add_cache_buster(&url, millis) } else { url })
}

/// Feed fetcher: transport, waiting strategy and retry policy in one place.
pub struct Fetcher<T = HttpTransport, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Fetcher::new(
            HttpTransport::new(&cfg.http)?,
            TokioSleeper,
            RetryPolicy::from(&cfg.retry),
        ))
    }
}

impl<T: Transport, S: Sleeper> Fetcher<T, S> {
    pub fn new(transport: T, sleeper: S, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Fetch one feed, retrying only when the source asks for it. The
    /// cache-busting timestamp is refreshed on every attempt.
    pub async fn fetch(&self, name: &str, source: &FeedSource) -> Result<String> {
        let policy = if source.retry {
            self.policy
        } else {
            RetryPolicy::once()
        };

        with_retry(&policy, &self.sleeper, name, move || async move {
            let url = request_url(source, Utc::now().timestamp_millis())?;
            self.transport.get_text(&url).await
        })
        .await
        .with_context(|| format!("fetching {} feed", name))
    }
}
