//! List views over loaded records: theme search/sort, theme detail tiers, portfolio and
//! watchlist summaries, pagination.

use crate::domain::portfolio::{percent, Holding, Watchlist};
use crate::domain::stock::StockRecord;
use crate::domain::theme::{RelatedStock, ThemeDetail, ThemeListEntry, ThemeTier, Trend};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSort {
    #[default]
    Score,
    Change,
    Stocks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeQuery {
    pub search: Option<String>,
    pub sort_by: ThemeSort,
}

impl ThemeQuery {
    pub fn matches(&self, entry: &ThemeListEntry) -> bool {
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => entry
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    /// Filtered and sorted descending by the chosen key; ties keep input order.
    pub fn apply(&self, entries: &[ThemeListEntry]) -> Vec<ThemeListEntry> {
        let mut out: Vec<ThemeListEntry> =
            entries.iter().filter(|e| self.matches(e)).cloned().collect();
        match self.sort_by {
            ThemeSort::Score => out.sort_by(|a, b| b.score.total_cmp(&a.score)),
            ThemeSort::Change => out.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent)),
            ThemeSort::Stocks => out.sort_by(|a, b| b.related_stock_count.cmp(&a.related_stock_count)),
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeListView {
    pub themes: Vec<ThemeListEntry>,
    /// Counts are over every loaded theme, not just the filtered ones.
    pub rising_count: usize,
    pub falling_count: usize,
    pub total: usize,
}

impl ThemeListView {
    pub fn build(entries: &[ThemeListEntry], query: &ThemeQuery) -> Self {
        Self {
            themes: query.apply(entries),
            rising_count: entries.iter().filter(|e| e.trend == Trend::Up).count(),
            falling_count: entries.iter().filter(|e| e.trend == Trend::Down).count(),
            total: entries.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    #[serde(rename = "1차")]
    pub primary: usize,
    #[serde(rename = "2차")]
    pub secondary: usize,
    #[serde(rename = "3차")]
    pub tertiary: usize,
    #[serde(rename = "숨은")]
    pub hidden: usize,
}

impl TierCounts {
    /// Stocks without a recognizable tier are not counted.
    pub fn count(stocks: &[RelatedStock]) -> Self {
        let mut counts = Self::default();
        for tier in stocks.iter().filter_map(|s| s.tier) {
            *counts.slot(tier) += 1;
        }
        counts
    }

    pub fn get(&self, tier: ThemeTier) -> usize {
        match tier {
            ThemeTier::Primary => self.primary,
            ThemeTier::Secondary => self.secondary,
            ThemeTier::Tertiary => self.tertiary,
            ThemeTier::Hidden => self.hidden,
        }
    }

    fn slot(&mut self, tier: ThemeTier) -> &mut usize {
        match tier {
            ThemeTier::Primary => &mut self.primary,
            ThemeTier::Secondary => &mut self.secondary,
            ThemeTier::Tertiary => &mut self.tertiary,
            ThemeTier::Hidden => &mut self.hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDetailView {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub description: String,
    pub news_count: u32,
    pub avg_return: f64,
    pub selected_tier: Option<ThemeTier>,
    pub stocks: Vec<RelatedStock>,
    /// Over every related stock, whatever tier is selected.
    pub tier_counts: TierCounts,
}

impl ThemeDetailView {
    pub fn build(detail: ThemeDetail, tier: Option<ThemeTier>) -> Self {
        let tier_counts = TierCounts::count(&detail.related_stocks);
        let stocks = match tier {
            Some(t) => detail
                .related_stocks
                .into_iter()
                .filter(|s| s.tier == Some(t))
                .collect(),
            None => detail.related_stocks,
        };
        Self {
            id: detail.id,
            name: detail.name,
            score: detail.score,
            description: detail.description,
            news_count: detail.news_count,
            avg_return: detail.avg_return,
            selected_tier: tier,
            stocks,
            tier_counts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub holdings: Vec<Holding>,
    pub total_investment: f64,
    pub total_value: f64,
    pub total_profit_loss: f64,
    /// 0 for an empty portfolio.
    pub total_profit_loss_percent: f64,
}

impl PortfolioView {
    pub fn build(holdings: Vec<Holding>) -> Self {
        let total_investment: f64 = holdings.iter().map(Holding::cost).sum();
        let total_value: f64 = holdings.iter().map(|h| h.total_value).sum();
        let total_profit_loss = total_value - total_investment;
        Self {
            total_profit_loss_percent: percent(total_profit_loss, total_investment),
            holdings,
            total_investment,
            total_value,
            total_profit_loss,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistView {
    pub stocks: Vec<StockRecord>,
    pub total: usize,
    pub rising_count: usize,
    pub average_change_percent: f64,
}

impl WatchlistView {
    pub fn build(watchlist: &Watchlist) -> Self {
        let stocks = watchlist.stocks();
        let average_change_percent = if stocks.is_empty() {
            0.0
        } else {
            let sum: f64 = stocks.iter().map(|s| s.change_percent).sum();
            (sum / stocks.len() as f64 * 100.0).round() / 100.0
        };
        Self {
            stocks: stocks.to_vec(),
            total: stocks.len(),
            rising_count: stocks.iter().filter(|s| s.is_rising()).count(),
            average_change_percent,
        }
    }
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: Option<usize>, page_size: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub has_more: bool,
}

pub fn paginate<T: Clone>(items: &[T], req: PageRequest) -> Page<T> {
    let start = (req.page - 1).saturating_mul(req.page_size).min(items.len());
    let end = start.saturating_add(req.page_size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        page: req.page,
        page_size: req.page_size,
        total: items.len(),
        has_more: end < items.len(),
    }
}
