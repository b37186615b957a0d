//! Loads that feed the presentation layer.
//!
//! Every load either returns mapped backend data or, for any section the backend could not
//! serve, the built-in sample data with `degraded` set. Loads never fail; they only return
//! `None` when their [`CancelSignal`] fired first.

use crate::client::types::{GrowthPredictionsResponse, RecommendationsResponse, ThemesResponse};
use crate::client::{BackendClient, NewsFeed, RequestError, DEFAULT_MARKET_NEWS_LIMIT};
use crate::domain::market::MarketSummary;
use crate::domain::news::NewsRecord;
use crate::domain::stock::{GrowthRecord, MarketOverview, PricePoint, StockRecord};
use crate::domain::theme::{HotTheme, ThemeListEntry, ThemeTier, ThemeTrends};
use crate::lifetime::CancelSignal;
use crate::listing::{paginate, Page, PageRequest, ThemeDetailView, ThemeListView, ThemeQuery};
use crate::mapper::{self, Filler};
use crate::sample;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MAX_NEWS_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Recommendations,
    Growth,
    Themes,
    ThemeDetail,
    HotThemes,
    Summary,
    News,
}

/// A section that fell back to sample data, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionError {
    pub section: Section,
    pub message: String,
    /// Backend HTTP status, when it answered with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl SectionError {
    fn new(section: Section, err: &RequestError) -> Self {
        Self {
            section,
            message: err.to_string(),
            status: err.status(),
        }
    }
}

/// Result of a single-section load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loaded<T> {
    pub data: T,
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SectionError>,
}

impl<T> Loaded<T> {
    fn fresh(data: T) -> Self {
        Self {
            data,
            degraded: false,
            error: None,
        }
    }

    fn fallback(data: T, error: SectionError) -> Self {
        Self {
            data,
            degraded: true,
            error: Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            data: f(self.data),
            degraded: self.degraded,
            error: self.error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub loaded_at: DateTime<Utc>,
    pub generated_at: Option<String>,
    pub engine: Option<String>,
    /// `None` when the backend answered without a usable overview.
    pub market_overview: Option<MarketOverview>,
    pub recommended: Vec<StockRecord>,
    pub theme_stocks: Vec<StockRecord>,
    pub top_picks: Vec<StockRecord>,
    pub growth: Vec<GrowthRecord>,
    pub prediction_summary: Option<String>,
    pub risk_warning: Option<String>,
    pub hot_themes: Vec<ThemeListEntry>,
    pub theme_trends: ThemeTrends,
    pub news: Vec<NewsRecord>,
    pub degraded: bool,
    pub errors: Vec<SectionError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockCategory {
    Recommended,
    Theme,
    Growth,
}

struct RecommendationSection {
    generated_at: Option<String>,
    engine: Option<String>,
    market_overview: Option<MarketOverview>,
    recommended: Vec<StockRecord>,
    theme_stocks: Vec<StockRecord>,
    top_picks: Vec<StockRecord>,
}

struct GrowthSection {
    growth: Vec<GrowthRecord>,
    hot_themes: Vec<ThemeListEntry>,
    prediction_summary: Option<String>,
    risk_warning: Option<String>,
}

/// Every stock card the two recommendation feeds carry, recommendation lists first.
fn find_in(recs: &RecommendationSection, growth: &GrowthSection, id: &str) -> Option<StockRecord> {
    recs.recommended
        .iter()
        .chain(&recs.theme_stocks)
        .chain(&recs.top_picks)
        .chain(growth.growth.iter().map(|g| &g.stock))
        .find(|s| s.id == id)
        .cloned()
}

#[derive(Clone)]
pub struct DashboardLoader {
    backend: Arc<dyn BackendClient>,
    seed: u64,
}

impl DashboardLoader {
    pub fn new(backend: Arc<dyn BackendClient>, seed: u64) -> Self {
        Self { backend, seed }
    }

    pub fn backend(&self) -> &dyn BackendClient {
        self.backend.as_ref()
    }

    fn filler(&self) -> Filler {
        Filler::seeded(self.seed)
    }

    pub async fn load_dashboard(&self, signal: &mut CancelSignal) -> Option<Dashboard> {
        let backend = self.backend.as_ref();
        let (recs, growth, themes, news) = signal
            .run(async {
                tokio::join!(
                    backend.recommendations_today(),
                    backend.recommendations_growth(),
                    backend.themes(),
                    backend.market_news(DEFAULT_MARKET_NEWS_LIMIT),
                )
            })
            .await?;

        let mut filler = self.filler();
        let mut errors = Vec::new();

        let recs = match recs {
            Ok(raw) => map_recommendations(&raw, &mut filler),
            Err(err) => {
                errors.push(SectionError::new(Section::Recommendations, &err));
                sample_recommendations()
            }
        };

        let growth = match growth {
            Ok(raw) => map_growth(&raw, &mut filler),
            Err(err) => {
                errors.push(SectionError::new(Section::Growth, &err));
                sample_growth()
            }
        };

        let theme_trends = match themes {
            Ok(raw) => mapper::map_theme_trends(&raw.themes),
            Err(err) => {
                errors.push(SectionError::new(Section::Themes, &err));
                mapper::classify_theme_trends(sample::theme_trends())
            }
        };

        let news = match news {
            Ok(raw) => mapper::map_news(&raw),
            Err(err) => {
                errors.push(SectionError::new(Section::News, &err));
                sample::news(&NewsFeed::Market, DEFAULT_MARKET_NEWS_LIMIT)
            }
        };

        let degraded = !errors.is_empty();
        if degraded {
            let sections: Vec<Section> = errors.iter().map(|e| e.section).collect();
            tracing::warn!(?sections, "dashboard load degraded; serving sample data");
        }

        Some(Dashboard {
            loaded_at: Utc::now(),
            generated_at: recs.generated_at,
            engine: recs.engine,
            market_overview: recs.market_overview,
            recommended: recs.recommended,
            theme_stocks: recs.theme_stocks,
            top_picks: recs.top_picks,
            growth: growth.growth,
            prediction_summary: growth.prediction_summary,
            risk_warning: growth.risk_warning,
            hot_themes: growth.hot_themes,
            theme_trends,
            news,
            degraded,
            errors,
        })
    }

    pub async fn load_theme_list(
        &self,
        query: &ThemeQuery,
        signal: &mut CancelSignal,
    ) -> Option<Loaded<ThemeListView>> {
        let themes = self.load_themes(signal).await?;
        Some(themes.map(|raw| {
            let entries = match raw {
                Some(raw) => mapper::map_theme_list(&raw.themes),
                None => sample::theme_list(),
            };
            ThemeListView::build(&entries, query)
        }))
    }

    pub async fn load_theme_trends(&self, signal: &mut CancelSignal) -> Option<Loaded<ThemeTrends>> {
        let themes = self.load_themes(signal).await?;
        Some(themes.map(|raw| match raw {
            Some(raw) => mapper::map_theme_trends(&raw.themes),
            None => mapper::classify_theme_trends(sample::theme_trends()),
        }))
    }

    /// `data` is `None` when the themes call failed and sample data must be used.
    async fn load_themes(&self, signal: &mut CancelSignal) -> Option<Loaded<Option<ThemesResponse>>> {
        let res = signal.run(self.backend.themes()).await?;
        Some(match res {
            Ok(raw) => Loaded::fresh(Some(raw)),
            Err(err) => {
                tracing::warn!(error = %err, "theme load failed; serving sample themes");
                Loaded::fallback(None, SectionError::new(Section::Themes, &err))
            }
        })
    }

    pub async fn load_stocks(
        &self,
        category: StockCategory,
        signal: &mut CancelSignal,
    ) -> Option<Loaded<Vec<StockRecord>>> {
        let mut filler = self.filler();
        let loaded = match category {
            StockCategory::Recommended | StockCategory::Theme => {
                let recs = match signal.run(self.backend.recommendations_today()).await? {
                    Ok(raw) => Loaded::fresh(map_recommendations(&raw, &mut filler)),
                    Err(err) => {
                        tracing::warn!(?category, error = %err, "stock load failed; serving sample stocks");
                        Loaded::fallback(
                            sample_recommendations(),
                            SectionError::new(Section::Recommendations, &err),
                        )
                    }
                };
                recs.map(|recs| match category {
                    StockCategory::Theme => recs.theme_stocks,
                    _ => recs.recommended,
                })
            }
            StockCategory::Growth => {
                let growth = match signal.run(self.backend.recommendations_growth()).await? {
                    Ok(raw) => Loaded::fresh(map_growth(&raw, &mut filler)),
                    Err(err) => {
                        tracing::warn!(?category, error = %err, "stock load failed; serving sample stocks");
                        Loaded::fallback(sample_growth(), SectionError::new(Section::Growth, &err))
                    }
                };
                growth.map(|g| g.growth.into_iter().map(|g| g.stock).collect())
            }
        };
        Some(loaded)
    }

    /// Looks a stock card up by id across the recommendation and growth feeds only; themes and
    /// news are not fetched. `data` is `None` when no card carries the id.
    pub async fn find_stock(
        &self,
        id: &str,
        signal: &mut CancelSignal,
    ) -> Option<Loaded<Option<StockRecord>>> {
        let backend = self.backend.as_ref();
        let (recs, growth) = signal
            .run(async {
                tokio::join!(backend.recommendations_today(), backend.recommendations_growth())
            })
            .await?;

        let mut filler = self.filler();
        let mut error = None;
        let recs = match recs {
            Ok(raw) => map_recommendations(&raw, &mut filler),
            Err(err) => {
                error = Some(SectionError::new(Section::Recommendations, &err));
                sample_recommendations()
            }
        };
        let growth = match growth {
            Ok(raw) => map_growth(&raw, &mut filler),
            Err(err) => {
                error.get_or_insert_with(|| SectionError::new(Section::Growth, &err));
                sample_growth()
            }
        };

        let found = find_in(&recs, &growth, id);
        Some(match error {
            None => Loaded::fresh(found),
            Some(error) => {
                tracing::warn!(stock = id, section = ?error.section, "stock lookup degraded; searching sample stocks");
                Loaded::fallback(found, error)
            }
        })
    }

    pub async fn load_stock_page(
        &self,
        category: StockCategory,
        page: PageRequest,
        signal: &mut CancelSignal,
    ) -> Option<Loaded<Page<StockRecord>>> {
        let stocks = self.load_stocks(category, signal).await?;
        Some(stocks.map(|items| paginate(&items, page)))
    }

    pub async fn load_news(
        &self,
        feed: &NewsFeed,
        limit: Option<u32>,
        signal: &mut CancelSignal,
    ) -> Option<Loaded<Vec<NewsRecord>>> {
        let limit = limit
            .unwrap_or_else(|| feed.default_limit())
            .clamp(1, MAX_NEWS_LIMIT);
        let res = signal.run(self.backend.news(feed, limit)).await?;
        Some(match res {
            Ok(raw) => Loaded::fresh(mapper::map_news(&raw)),
            Err(err) => {
                tracing::warn!(?feed, error = %err, "news load failed; serving sample news");
                Loaded::fallback(sample::news(feed, limit), SectionError::new(Section::News, &err))
            }
        })
    }

    pub async fn load_theme_detail(
        &self,
        id: &str,
        tier: Option<ThemeTier>,
        signal: &mut CancelSignal,
    ) -> Option<Loaded<ThemeDetailView>> {
        let res = signal.run(self.backend.theme_detail(id)).await?;
        let detail = match res {
            Ok(raw) => Loaded::fresh(mapper::map_theme_detail(&raw, id)),
            Err(err) => {
                tracing::warn!(theme = id, error = %err, "theme detail load failed; serving sample detail");
                Loaded::fallback(
                    sample::theme_detail(id),
                    SectionError::new(Section::ThemeDetail, &err),
                )
            }
        };
        Some(detail.map(|d| ThemeDetailView::build(d, tier)))
    }

    pub async fn load_hot_themes(&self, signal: &mut CancelSignal) -> Option<Loaded<Vec<HotTheme>>> {
        let res = signal.run(self.backend.hot_themes()).await?;
        Some(match res {
            Ok(raw) => Loaded::fresh(mapper::map_hot_themes(&raw.themes)),
            Err(err) => {
                tracing::warn!(error = %err, "hot theme load failed; serving sample themes");
                Loaded::fallback(
                    sample::hot_theme_feed(),
                    SectionError::new(Section::HotThemes, &err),
                )
            }
        })
    }

    pub async fn load_market_summary(&self, signal: &mut CancelSignal) -> Option<Loaded<MarketSummary>> {
        let res = signal.run(self.backend.market_summary()).await?;
        Some(match res {
            Ok(raw) => Loaded::fresh(mapper::map_market_summary(&raw)),
            Err(err) => {
                tracing::warn!(error = %err, "market summary load failed; serving sample summary");
                Loaded::fallback(sample::market_summary(), SectionError::new(Section::Summary, &err))
            }
        })
    }

    /// Chart series for a stock's detail view. Seeded per stock id so a card always shows
    /// the same history for the same configured seed.
    pub fn price_history(&self, stock: &StockRecord, anchor: NaiveDate) -> Vec<PricePoint> {
        let seed = stock
            .id
            .bytes()
            .fold(self.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        Filler::seeded(seed).price_history(stock.price, anchor)
    }
}

fn map_recommendations(raw: &RecommendationsResponse, filler: &mut Filler) -> RecommendationSection {
    RecommendationSection {
        generated_at: raw.generated_at.clone(),
        engine: raw.engine.clone(),
        market_overview: mapper::map_market_overview(raw.market_overview.as_ref()),
        recommended: mapper::map_stocks(&raw.recommended_stocks, filler),
        theme_stocks: mapper::map_stocks(&raw.theme_stocks, filler),
        top_picks: mapper::map_stocks(&raw.top_picks, filler),
    }
}

fn sample_recommendations() -> RecommendationSection {
    RecommendationSection {
        generated_at: None,
        engine: None,
        market_overview: Some(sample::market_overview()),
        recommended: sample::recommended_stocks(),
        theme_stocks: sample::theme_stocks(),
        top_picks: Vec::new(),
    }
}

fn map_growth(raw: &GrowthPredictionsResponse, filler: &mut Filler) -> GrowthSection {
    GrowthSection {
        growth: mapper::map_growth_stocks(&raw.growth_stocks, filler),
        hot_themes: mapper::map_theme_list(&raw.hot_themes),
        prediction_summary: raw.prediction_summary.clone(),
        risk_warning: raw.risk_warning.clone(),
    }
}

fn sample_growth() -> GrowthSection {
    GrowthSection {
        growth: sample::growth_stocks(),
        hot_themes: sample::hot_themes(),
        prediction_summary: None,
        risk_warning: None,
    }
}
