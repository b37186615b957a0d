pub mod error;
pub mod types;

pub use error::RequestError;

use crate::config::Settings;
use anyhow::Context;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use types::{
    GrowthPredictionsResponse, HotThemesResponse, MarketSummaryResponse, NewsResponse,
    RawThemeDetail, RecommendationsResponse, ThemesResponse,
};

pub const DEFAULT_MARKET_NEWS_LIMIT: u32 = 20;
pub const DEFAULT_STOCK_NEWS_LIMIT: u32 = 10;

/// Which news listing to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsFeed {
    Market,
    Stock(String),
    Keyword(String),
}

impl NewsFeed {
    pub fn default_limit(&self) -> u32 {
        match self {
            Self::Market => DEFAULT_MARKET_NEWS_LIMIT,
            Self::Stock(_) | Self::Keyword(_) => DEFAULT_STOCK_NEWS_LIMIT,
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Self::Market => vec!["news", "market"],
            Self::Stock(ticker) => vec!["news", "stock", ticker.as_str()],
            Self::Keyword(keyword) => vec!["news", "keyword", keyword.as_str()],
        }
    }
}

#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    async fn recommendations_today(&self) -> Result<RecommendationsResponse, RequestError>;

    async fn recommendations_growth(&self) -> Result<GrowthPredictionsResponse, RequestError>;

    async fn themes(&self) -> Result<ThemesResponse, RequestError>;

    async fn theme_detail(&self, id: &str) -> Result<RawThemeDetail, RequestError>;

    async fn hot_themes(&self) -> Result<HotThemesResponse, RequestError>;

    async fn market_summary(&self) -> Result<MarketSummaryResponse, RequestError>;

    async fn news(&self, feed: &NewsFeed, limit: u32) -> Result<NewsResponse, RequestError>;

    /// Reachability check. Never fails; an unreachable backend is `false`.
    async fn check_health(&self) -> bool;

    async fn market_news(&self, limit: u32) -> Result<NewsResponse, RequestError> {
        self.news(&NewsFeed::Market, limit).await
    }
}

/// GET-only JSON client for the recommendation backend.
///
/// No retries and no caching: a failed call surfaces immediately and the caller decides
/// whether to fall back.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackendClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.api_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .context("failed to build backend http client")?;

        Self::with_http(http, &settings.api_base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).with_context(|| format!("invalid backend base URL: {base_url}"))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/{segments...}`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, RequestError> {
        let endpoint = endpoint_label(segments);
        let invalid = |reason: String| RequestError::InvalidUrl {
            endpoint: endpoint.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// The health endpoint lives next to the API root, not under it. Only a trailing `/api`
    /// segment is dropped; an `/api` elsewhere in the path is part of the root.
    fn health_url(&self) -> Option<Url> {
        let root = self
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url);
        Url::parse(&format!("{root}/health")).ok()
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, RequestError> {
        let endpoint = endpoint_label(segments);
        let res = self.fetch(&endpoint, segments, query).await;
        if let Err(err) = &res {
            tracing::error!(endpoint = %endpoint, error = %err, "API call failed");
        }
        res
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, RequestError> {
        let url = self.url(segments)?;
        let transport = |source| RequestError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let mut req = self.http.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }
        let res = req.send().await.map_err(transport)?;

        let status = res.status();
        let text = res.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(RequestError::from_status(endpoint, status.as_u16(), &text));
        }

        serde_json::from_str::<T>(&text).map_err(|source| RequestError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl BackendClient for HttpBackendClient {
    async fn recommendations_today(&self) -> Result<RecommendationsResponse, RequestError> {
        self.get_json(&["recommendations", "today"], &[]).await
    }

    async fn recommendations_growth(&self) -> Result<GrowthPredictionsResponse, RequestError> {
        self.get_json(&["recommendations", "growth"], &[]).await
    }

    async fn themes(&self) -> Result<ThemesResponse, RequestError> {
        self.get_json(&["themes"], &[]).await
    }

    async fn theme_detail(&self, id: &str) -> Result<RawThemeDetail, RequestError> {
        self.get_json(&["themes", id], &[]).await
    }

    async fn hot_themes(&self) -> Result<HotThemesResponse, RequestError> {
        self.get_json(&["themes", "hot"], &[]).await
    }

    async fn market_summary(&self) -> Result<MarketSummaryResponse, RequestError> {
        self.get_json(&["recommendations", "summary"], &[]).await
    }

    async fn news(&self, feed: &NewsFeed, limit: u32) -> Result<NewsResponse, RequestError> {
        self.get_json(&feed.segments(), &[("limit", limit.to_string())]).await
    }

    async fn check_health(&self) -> bool {
        let Some(url) = self.health_url() else {
            return false;
        };
        match self.http.get(url).send().await {
            Ok(res) => res.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "backend health check failed");
                false
            }
        }
    }
}

fn endpoint_label(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}
