//! Raw backend payloads → presentation records.

pub mod filler;

pub use filler::Filler;

use crate::client::types::{
    value_to_label, MarketSummaryResponse, NewsResponse, RawGrowthStock, RawHotTheme,
    RawMarketOverview, RawRelatedStock, RawStock, RawTheme, RawThemeDetail,
};
use crate::domain::market::{MarketSummary, RiskAssessment, SectorOutlook};
use crate::domain::news::NewsRecord;
use crate::domain::stock::{
    GrowthRecord, MarketOverview, Recommendation, Sentiment, StockRecord, Synthesized,
};
use crate::domain::theme::{
    clamp_score, HotTheme, RelatedStock, ThemeDetail, ThemeListEntry, ThemeTier, ThemeTrendRecord,
    ThemeTrends, Trend,
};
use rand::Rng;
use serde_json::Value;

/// Placeholder price for entries without one: `BASE + index * STEP`.
pub const PLACEHOLDER_PRICE_BASE: f64 = 50_000.0;
pub const PLACEHOLDER_PRICE_STEP: f64 = 1_000.0;

pub const RISING_LIMIT: usize = 4;
pub const FALLING_LIMIT: usize = 3;

const MISSING_LABEL: &str = "-";
const MAX_RATING: f64 = 5.0;

pub fn placeholder_price(index: usize) -> f64 {
    PLACEHOLDER_PRICE_BASE + (index as f64) * PLACEHOLDER_PRICE_STEP
}

pub fn map_stocks<R: Rng>(raw: &[RawStock], filler: &mut Filler<R>) -> Vec<StockRecord> {
    raw.iter()
        .enumerate()
        .map(|(index, stock)| map_stock(stock, index, filler))
        .collect()
}

pub fn map_stock<R: Rng>(raw: &RawStock, index: usize, filler: &mut Filler<R>) -> StockRecord {
    let mut synthesized = Synthesized::default();

    let quoted = |p: Option<f64>| p.filter(|x| x.is_finite() && *x > 0.0);
    let price = match quoted(raw.price).or_else(|| quoted(raw.current_price)) {
        Some(p) => p,
        None => {
            synthesized.price = true;
            placeholder_price(index)
        }
    };

    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
    let change_percent = finite(raw.change_percent).or_else(|| finite(raw.change_rate));
    let (change, change_percent) = match (finite(raw.change), change_percent) {
        (Some(c), Some(p)) => (c, p),
        (Some(c), None) => (c, percent_of(c, price)),
        (None, Some(p)) => ((price * p / 100.0).round(), p),
        (None, None) => {
            synthesized.change = true;
            let c = filler.change();
            (c, percent_of(c, price))
        }
    };

    let score = finite(raw.score).or_else(|| finite(raw.theme_score));
    let recommendation = match score {
        Some(s) => Recommendation::from_score(s),
        None => raw
            .recommendation
            .as_deref()
            .and_then(Recommendation::parse)
            .unwrap_or(Recommendation::Hold),
    };

    let analyst_rating = match (score, finite(raw.analyst_rating).or_else(|| finite(raw.rating))) {
        (None, Some(r)) if r > 0.0 => r.min(MAX_RATING),
        _ => f64::from(recommendation.rating_bucket()),
    };

    let id = raw
        .id
        .as_ref()
        .and_then(value_to_label)
        .or_else(|| non_blank(raw.ticker.as_deref()))
        .or_else(|| non_blank(raw.code.as_deref()))
        .unwrap_or_else(|| (index + 1).to_string());
    let name = non_blank(raw.name.as_deref()).or_else(|| non_blank(raw.stock_name.as_deref()));
    let symbol = non_blank(raw.symbol.as_deref())
        .or_else(|| name.clone())
        .unwrap_or_else(|| id.clone());

    StockRecord {
        name: name.unwrap_or_else(|| symbol.clone()),
        symbol,
        id,
        price,
        change,
        change_percent,
        market_cap: raw
            .market_cap
            .as_ref()
            .and_then(market_cap_label)
            .unwrap_or_else(|| MISSING_LABEL.to_string()),
        pe_ratio: finite(raw.pe_ratio).or_else(|| finite(raw.per)).unwrap_or(0.0),
        dividend_yield: finite(raw.dividend_yield).unwrap_or(0.0),
        sector: non_blank(raw.sector.as_deref()).unwrap_or_else(|| MISSING_LABEL.to_string()),
        recommendation,
        analyst_rating,
        synthesized,
        reasoning: non_blank(raw.reasoning.as_deref()),
        target_return: raw.target_return.as_ref().and_then(value_to_label),
        risk_factors: raw.risk_factors.clone(),
        catalysts: raw.catalysts.clone(),
        volume: finite(raw.volume),
    }
}

/// Ranks default to list position (1-based) when the backend omits them.
pub fn map_growth_stocks<R: Rng>(raw: &[RawGrowthStock], filler: &mut Filler<R>) -> Vec<GrowthRecord> {
    raw.iter()
        .enumerate()
        .map(|(index, g)| GrowthRecord {
            stock: map_stock(&g.stock, index, filler),
            predicted_return: g.predicted_return.as_ref().and_then(value_to_label),
            confidence: non_blank(g.confidence.as_deref()),
            timeframe: non_blank(g.timeframe.as_deref()),
            rank: g.rank.unwrap_or(index as u32 + 1),
        })
        .collect()
}

pub fn map_theme_trend(raw: &RawTheme, index: usize) -> ThemeTrendRecord {
    ThemeTrendRecord::new(
        theme_id(raw, index),
        theme_name(raw),
        theme_score(raw),
        theme_change(raw),
    )
}

pub fn map_theme_trends(raw: &[RawTheme]) -> ThemeTrends {
    classify_theme_trends(
        raw.iter()
            .enumerate()
            .map(|(index, t)| map_theme_trend(t, index))
            .collect(),
    )
}

/// Rising: positive change, largest first, top 4. Falling: negative change, most negative
/// first, top 3. Sorting is stable, so ties keep input order.
pub fn classify_theme_trends(records: Vec<ThemeTrendRecord>) -> ThemeTrends {
    let (mut rising, mut falling): (Vec<_>, Vec<_>) = records
        .into_iter()
        .filter(|r| r.score_change != 0.0)
        .partition(|r| r.score_change > 0.0);

    rising.sort_by(|a, b| b.score_change.total_cmp(&a.score_change));
    rising.truncate(RISING_LIMIT);

    falling.sort_by(|a, b| a.score_change.total_cmp(&b.score_change));
    falling.truncate(FALLING_LIMIT);

    ThemeTrends { rising, falling }
}

pub fn map_theme_list(raw: &[RawTheme]) -> Vec<ThemeListEntry> {
    raw.iter()
        .enumerate()
        .map(|(index, t)| {
            let change = theme_change(t);
            ThemeListEntry {
                id: theme_id(t, index),
                name: theme_name(t),
                score: clamp_score(theme_score(t)),
                change_percent: change,
                related_stock_count: t.stock_count.or(t.related_stock_count).unwrap_or(0),
                trend: Trend::from_change(change),
                top_stocks: t.top_stocks.clone(),
            }
        })
        .collect()
}

pub fn map_hot_themes(raw: &[RawHotTheme]) -> Vec<HotTheme> {
    let themes: Vec<RawTheme> = raw.iter().map(|h| h.theme.clone()).collect();
    map_theme_list(&themes)
        .into_iter()
        .zip(raw)
        .map(|(theme, h)| HotTheme {
            theme,
            momentum: non_blank(h.momentum.as_deref()),
            signal: non_blank(h.signal.as_deref()),
        })
        .collect()
}

/// `requested_id` names the detail when the backend omits its own id.
pub fn map_theme_detail(raw: &RawThemeDetail, requested_id: &str) -> ThemeDetail {
    ThemeDetail {
        id: raw
            .theme
            .id
            .as_ref()
            .and_then(value_to_label)
            .unwrap_or_else(|| requested_id.to_string()),
        name: theme_name(&raw.theme),
        score: clamp_score(theme_score(&raw.theme)),
        description: non_blank(raw.description.as_deref())
            .or_else(|| non_blank(raw.theme.reasoning.as_deref()))
            .unwrap_or_default(),
        news_count: raw.news_count.unwrap_or(0),
        avg_return: raw.avg_return.filter(|r| r.is_finite()).unwrap_or(0.0),
        related_stocks: raw
            .related_stocks
            .iter()
            .enumerate()
            .map(|(index, s)| map_related_stock(s, index))
            .collect(),
    }
}

/// Change figures come from the backend or from the previous close; they are never
/// synthesized. A missing price gets the same placeholder rule as stock cards.
pub fn map_related_stock(raw: &RawRelatedStock, index: usize) -> RelatedStock {
    let quoted = |p: Option<f64>| p.filter(|x| x.is_finite() && *x > 0.0);
    let real_price = quoted(raw.current_price).or_else(|| quoted(raw.price));
    let price = real_price.unwrap_or_else(|| placeholder_price(index));
    let previous_close = quoted(raw.previous_close);

    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
    let from_close = real_price.zip(previous_close).map(|(p, c)| p - c);
    let change = finite(raw.change).or(from_close).unwrap_or(0.0);
    let change_percent = finite(raw.change_percent)
        .or_else(|| previous_close.map(|c| percent_of(change, c)))
        .unwrap_or(0.0);

    let code = non_blank(raw.code.as_deref()).unwrap_or_default();
    RelatedStock {
        id: raw
            .id
            .as_ref()
            .and_then(value_to_label)
            .or_else(|| (!code.is_empty()).then(|| code.clone()))
            .unwrap_or_else(|| (index + 1).to_string()),
        name: non_blank(raw.name.as_deref()).unwrap_or_else(|| MISSING_LABEL.to_string()),
        code,
        price,
        previous_close,
        change,
        change_percent,
        volume: raw
            .volume
            .as_ref()
            .and_then(value_to_label)
            .unwrap_or_else(|| MISSING_LABEL.to_string()),
        market_cap: raw
            .market_cap
            .as_ref()
            .and_then(market_cap_label)
            .unwrap_or_else(|| MISSING_LABEL.to_string()),
        tier: raw.tier.as_deref().and_then(ThemeTier::parse),
        premium: raw.is_premium,
        synthesized_price: real_price.is_none(),
    }
}

pub fn map_market_summary(raw: &MarketSummaryResponse) -> MarketSummary {
    MarketSummary {
        generated_at: non_blank(raw.generated_at.as_deref()),
        overview: map_market_overview(raw.market_overview.as_ref()),
        sectors: raw
            .sector_analysis
            .iter()
            .filter_map(|s| {
                Some(SectorOutlook {
                    sector: non_blank(s.sector.as_deref())?,
                    outlook: s
                        .outlook
                        .as_deref()
                        .map(Sentiment::parse)
                        .unwrap_or(Sentiment::Neutral),
                    reasoning: non_blank(s.reasoning.as_deref()),
                    top_stocks: s.top_stocks.clone(),
                    score: s.score.filter(|x| x.is_finite()).map(clamp_score),
                })
            })
            .collect(),
        risk: raw.risk_assessment.as_ref().map(|r| RiskAssessment {
            overall_risk: non_blank(r.overall_risk.as_deref()),
            key_risks: r.key_risks.clone(),
            opportunities: r.opportunities.clone(),
        }),
    }
}

pub fn map_news(raw: &NewsResponse) -> Vec<NewsRecord> {
    raw.news
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let title = non_blank(item.title.as_deref())?;
            Some(NewsRecord {
                id: item
                    .id
                    .as_ref()
                    .and_then(value_to_label)
                    .unwrap_or_else(|| format!("news-{}", index + 1)),
                title,
                summary: non_blank(item.description.as_deref())
                    .or_else(|| non_blank(item.summary.as_deref()))
                    .unwrap_or_default(),
                link: non_blank(item.link.as_deref()),
                source: non_blank(item.source.as_deref())
                    .unwrap_or_else(|| MISSING_LABEL.to_string()),
                published: non_blank(item.published.as_deref()),
                ticker: non_blank(item.ticker.as_deref()).or_else(|| raw.ticker.clone()),
                keyword: non_blank(item.keyword.as_deref()).or_else(|| raw.keyword.clone()),
            })
        })
        .collect()
}

pub fn map_market_overview(raw: Option<&RawMarketOverview>) -> Option<MarketOverview> {
    let raw = raw?;
    let summary = non_blank(raw.summary.as_deref())?;
    Some(MarketOverview {
        summary,
        sentiment: raw
            .sentiment
            .as_deref()
            .map(Sentiment::parse)
            .unwrap_or(Sentiment::Neutral),
        korea_summary: non_blank(raw.korea_summary.as_deref()),
        usa_summary: non_blank(raw.usa_summary.as_deref()),
    })
}

/// Strings pass through; raw KRW amounts become `조원`/`억원` labels.
pub fn market_cap_label(value: &Value) -> Option<String> {
    const JO: f64 = 1.0e12;
    const EOK: f64 = 1.0e8;
    match value {
        Value::Number(n) => {
            let n = n.as_f64().filter(|n| n.is_finite() && *n > 0.0)?;
            Some(if n >= JO {
                format!("{:.0}조원", n / JO)
            } else if n >= EOK {
                format!("{:.0}억원", n / EOK)
            } else {
                format!("{n:.0}원")
            })
        }
        other => value_to_label(other),
    }
}

fn percent_of(change: f64, price: f64) -> f64 {
    round2(change / price * 100.0)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn theme_id(raw: &RawTheme, index: usize) -> String {
    raw.id
        .as_ref()
        .and_then(value_to_label)
        .unwrap_or_else(|| (index + 1).to_string())
}

fn theme_name(raw: &RawTheme) -> String {
    non_blank(raw.name.as_deref())
        .or_else(|| non_blank(raw.theme_name.as_deref()))
        .unwrap_or_else(|| MISSING_LABEL.to_string())
}

fn theme_score(raw: &RawTheme) -> f64 {
    [raw.score, raw.theme_score]
        .into_iter()
        .flatten()
        .find(|x| x.is_finite())
        .unwrap_or(0.0)
}

fn theme_change(raw: &RawTheme) -> f64 {
    [raw.score_change, raw.daily_change, raw.change]
        .into_iter()
        .flatten()
        .find(|x| x.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_stock(v: Value) -> RawStock {
        serde_json::from_value(v).unwrap()
    }

    fn raw_themes(v: Value) -> Vec<RawTheme> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn zero_or_missing_price_gets_positive_index_based_placeholder() {
        let raws = vec![
            raw_stock(json!({"id": "a", "price": 0})),
            raw_stock(json!({"id": "b"})),
            raw_stock(json!({"id": "c", "price": -10.0})),
        ];
        let first = map_stocks(&raws, &mut Filler::seeded(1));
        let second = map_stocks(&raws, &mut Filler::seeded(999));

        for (i, (a, b)) in first.iter().zip(&second).enumerate() {
            assert!(a.price > 0.0);
            assert!(a.synthesized.price);
            // The price rule ignores the seed.
            assert_eq!(a.price, b.price);
            assert_eq!(a.price, placeholder_price(i));
        }
        assert_eq!(first[0].price, 50_000.0);
        assert_eq!(first[2].price, 52_000.0);
    }

    #[test]
    fn real_figures_are_kept_and_not_flagged() {
        let raw = raw_stock(json!({
            "id": "005930",
            "symbol": "삼성전자",
            "name": "Samsung Electronics",
            "price": 71500,
            "change": 1200,
            "changePercent": 1.71,
            "marketCap": "427조원",
            "peRatio": 15.2,
            "dividendYield": 2.8,
            "sector": "반도체",
            "recommendation": "Strong Buy",
            "analystRating": 4.7,
        }));
        let s = map_stock(&raw, 0, &mut Filler::seeded(1));
        assert_eq!(s.price, 71_500.0);
        assert_eq!(s.change, 1_200.0);
        assert_eq!(s.change_percent, 1.71);
        assert_eq!(s.market_cap, "427조원");
        assert_eq!(s.recommendation, Recommendation::StrongBuy);
        assert_eq!(s.analyst_rating, 4.7);
        assert!(!s.synthesized.any());
    }

    #[test]
    fn absent_change_is_synthesized_within_bounds_and_flagged() {
        let raw = raw_stock(json!({"id": "x", "price": 100000}));
        let a = map_stock(&raw, 0, &mut Filler::seeded(5));
        let b = map_stock(&raw, 0, &mut Filler::seeded(5));

        assert!(a.synthesized.change);
        assert!(!a.synthesized.price);
        assert!(a.change.abs() <= filler::CHANGE_BOUND);
        assert_eq!(a.change_percent, round2(a.change / 100_000.0 * 100.0));
        assert_eq!(a, b);
    }

    #[test]
    fn one_sided_change_is_derived_not_random() {
        let only_change = raw_stock(json!({"price": 200000, "change": 5000}));
        let s = map_stock(&only_change, 0, &mut Filler::seeded(1));
        assert_eq!(s.change_percent, 2.5);
        assert!(!s.synthesized.change);

        let only_percent = raw_stock(json!({"price": 200000, "changePercent": -1.5}));
        let s = map_stock(&only_percent, 0, &mut Filler::seeded(1));
        assert_eq!(s.change, -3000.0);
        assert!(!s.synthesized.change);
    }

    #[test]
    fn score_decides_tier_and_rating() {
        for (score, tier, rating) in [
            (85.0, Recommendation::StrongBuy, 5.0),
            (65.0, Recommendation::Buy, 4.0),
            (50.0, Recommendation::Hold, 3.0),
        ] {
            let raw = raw_stock(json!({
                "price": 1000,
                "theme_score": score,
                "recommendation": "Hold",
                "analystRating": 1.2,
            }));
            let s = map_stock(&raw, 0, &mut Filler::seeded(1));
            assert_eq!(s.recommendation, tier, "score {score}");
            assert_eq!(s.analyst_rating, rating, "score {score}");
        }
    }

    #[test]
    fn missing_score_and_label_defaults_to_hold() {
        let s = map_stock(&raw_stock(json!({"price": 1000})), 3, &mut Filler::seeded(1));
        assert_eq!(s.recommendation, Recommendation::Hold);
        assert_eq!(s.analyst_rating, 3.0);
        assert_eq!(s.id, "4");
        assert_eq!(s.sector, "-");
        assert_eq!(s.market_cap, "-");
    }

    #[test]
    fn rating_is_capped_at_five() {
        let raw = raw_stock(json!({"price": 1000, "recommendation": "Buy", "analystRating": 9}));
        let s = map_stock(&raw, 0, &mut Filler::seeded(1));
        assert_eq!(s.analyst_rating, 5.0);
    }

    #[test]
    fn id_falls_back_to_ticker_and_names_fill_each_other() {
        let raw = raw_stock(json!({"ticker": "000660", "name": "SK Hynix"}));
        let s = map_stock(&raw, 0, &mut Filler::seeded(1));
        assert_eq!(s.id, "000660");
        assert_eq!(s.symbol, "SK Hynix");
        assert_eq!(s.name, "SK Hynix");
    }

    #[test]
    fn numeric_market_cap_gets_korean_unit() {
        assert_eq!(market_cap_label(&json!(427.0e12)).as_deref(), Some("427조원"));
        assert_eq!(market_cap_label(&json!(3.5e10)).as_deref(), Some("350억원"));
        assert_eq!(market_cap_label(&json!(0)), None);
    }

    #[test]
    fn trend_tag_matches_sign_for_every_theme() {
        let raws = raw_themes(json!([
            {"id": 1, "name": "a", "score": 10, "scoreChange": 3},
            {"id": 2, "name": "b", "score": 10, "scoreChange": -3},
            {"id": 3, "name": "c", "score": 10, "scoreChange": 0},
            {"id": 4, "name": "d", "score": 10},
        ]));
        for (i, raw) in raws.iter().enumerate() {
            let r = map_theme_trend(raw, i);
            let expected = if r.score_change > 0.0 {
                Trend::Up
            } else if r.score_change < 0.0 {
                Trend::Down
            } else {
                Trend::Stable
            };
            assert_eq!(r.trend, expected);
        }
    }

    #[test]
    fn classifies_example_scenario() {
        let raws = raw_themes(json!([
            {"name": "AI 반도체", "score": 95, "change": 35},
            {"name": "부동산", "score": 45, "change": -15},
            {"name": "방산", "score": 82, "change": 28},
        ]));
        let trends = map_theme_trends(&raws);

        let rising: Vec<(f64, f64)> = trends
            .rising
            .iter()
            .map(|r| (r.current_score, r.score_change))
            .collect();
        let falling: Vec<(f64, f64)> = trends
            .falling
            .iter()
            .map(|r| (r.current_score, r.score_change))
            .collect();
        assert_eq!(rising, vec![(95.0, 35.0), (82.0, 28.0)]);
        assert_eq!(falling, vec![(45.0, -15.0)]);
    }

    #[test]
    fn rising_and_falling_are_capped_sorted_and_signed() {
        let changes = [5.0, -1.0, 12.0, 0.0, -9.0, 3.0, 7.0, -4.0, 20.0, -2.0, 1.0];
        let records = changes
            .iter()
            .enumerate()
            .map(|(i, c)| ThemeTrendRecord::new(i.to_string(), format!("t{i}"), 50.0, *c))
            .collect();
        let trends = classify_theme_trends(records);

        let rising: Vec<f64> = trends.rising.iter().map(|r| r.score_change).collect();
        let falling: Vec<f64> = trends.falling.iter().map(|r| r.score_change).collect();
        assert_eq!(rising, vec![20.0, 12.0, 7.0, 5.0]);
        assert_eq!(falling, vec![-9.0, -4.0, -2.0]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            ThemeTrendRecord::new("first", "a", 50.0, 10.0),
            ThemeTrendRecord::new("second", "b", 50.0, 10.0),
            ThemeTrendRecord::new("third", "c", 50.0, -5.0),
            ThemeTrendRecord::new("fourth", "d", 50.0, -5.0),
        ];
        let trends = classify_theme_trends(records);
        let rising: Vec<&str> = trends.rising.iter().map(|r| r.id.as_str()).collect();
        let falling: Vec<&str> = trends.falling.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(rising, ["first", "second"]);
        assert_eq!(falling, ["third", "fourth"]);
    }

    #[test]
    fn theme_list_uses_backend_columns_with_zero_defaults() {
        let raws = raw_themes(json!([
            {"id": 7, "theme_name": "로봇", "theme_score": 78, "daily_change": 30.0, "stock_count": 31},
            {"theme_name": "게임"},
        ]));
        let list = map_theme_list(&raws);
        assert_eq!(list[0].id, "7");
        assert_eq!(list[0].related_stock_count, 31);
        assert_eq!(list[0].trend, Trend::Up);
        assert_eq!(list[1].id, "2");
        assert_eq!(list[1].score, 0.0);
        assert_eq!(list[1].trend, Trend::Stable);
    }

    #[test]
    fn news_without_title_is_dropped_and_feed_context_inherited() {
        let raw: NewsResponse = serde_json::from_value(json!({
            "news": [
                {"title": "삼성전자, 신규 반도체 공장 투자 확대 발표", "source": "한국경제"},
                {"title": "  ", "source": "x"},
            ],
            "ticker": "005930",
        }))
        .unwrap();
        let news = map_news(&raw);
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].id, "news-1");
        assert_eq!(news[0].ticker.as_deref(), Some("005930"));
    }

    #[test]
    fn overview_requires_summary() {
        assert!(map_market_overview(None).is_none());
        let raw = RawMarketOverview {
            summary: Some("반도체 강세".into()),
            sentiment: Some("positive".into()),
            ..Default::default()
        };
        let o = map_market_overview(Some(&raw)).unwrap();
        assert_eq!(o.sentiment, Sentiment::Positive);
    }

    #[test]
    fn theme_sent_with_both_spellings_uses_the_first_usable_one() {
        let raws = raw_themes(json!([
            {"id": 1, "name": "AI", "theme_name": "AI 반도체", "score": 90, "theme_score": 10, "scoreChange": 3},
            {"id": 2, "name": " ", "theme_name": "로봇", "theme_score": 78, "daily_change": -2, "change": 9},
        ]));
        let list = map_theme_list(&raws);
        assert_eq!(list[0].name, "AI");
        assert_eq!(list[0].score, 90.0);
        assert_eq!(list[0].change_percent, 3.0);
        assert_eq!(list[1].name, "로봇");
        assert_eq!(list[1].score, 78.0);
        assert_eq!(list[1].change_percent, -2.0);
        assert_eq!(list[1].trend, Trend::Down);
    }

    #[test]
    fn stock_alternate_columns_fill_gaps() {
        let raw = raw_stock(json!({
            "code": "000660",
            "stock_name": "SK하이닉스",
            "price": 0,
            "current_price": 142000,
            "change_rate": 2.53,
            "per": 18.5,
            "theme_score": 65,
        }));
        let s = map_stock(&raw, 0, &mut Filler::seeded(1));
        assert_eq!(s.id, "000660");
        assert_eq!(s.name, "SK하이닉스");
        assert_eq!(s.price, 142_000.0);
        assert!(!s.synthesized.any());
        assert_eq!(s.change_percent, 2.53);
        assert_eq!(s.pe_ratio, 18.5);
        assert_eq!(s.recommendation, Recommendation::Buy);
    }

    #[test]
    fn related_stock_change_is_derived_from_previous_close() {
        let raw: RawRelatedStock = serde_json::from_value(json!({
            "name": "한미반도체",
            "code": "042700",
            "currentPrice": 89500,
            "previousClose": 85200,
            "volume": "2,156,890",
            "marketCap": "8.5조원",
            "tier": "1차",
        }))
        .unwrap();
        let s = map_related_stock(&raw, 0);
        assert_eq!(s.id, "042700");
        assert_eq!(s.change, 4_300.0);
        assert_eq!(s.change_percent, 5.05);
        assert_eq!(s.tier, Some(ThemeTier::Primary));
        assert!(!s.synthesized_price);

        let bare = map_related_stock(&RawRelatedStock::default(), 2);
        assert_eq!(bare.price, placeholder_price(2));
        assert!(bare.synthesized_price);
        assert_eq!(bare.change, 0.0);
        assert_eq!(bare.tier, None);
    }

    #[test]
    fn theme_detail_falls_back_to_requested_id() {
        let raw: RawThemeDetail = serde_json::from_value(json!({
            "theme_name": "방산",
            "theme_score": 82,
            "reasoning": "수출 확대",
            "relatedStocks": [{"name": "LIG넥스원", "tier": "2차"}],
        }))
        .unwrap();
        let d = map_theme_detail(&raw, "defense");
        assert_eq!(d.id, "defense");
        assert_eq!(d.name, "방산");
        assert_eq!(d.score, 82.0);
        assert_eq!(d.description, "수출 확대");
        assert_eq!(d.related_stocks[0].tier, Some(ThemeTier::Secondary));
    }

    #[test]
    fn summary_keeps_missing_overview_as_none() {
        let raw: MarketSummaryResponse = serde_json::from_value(json!({
            "sectorAnalysis": [
                {"sector": "반도체", "outlook": "positive", "top_stocks": ["삼성전자"], "score": 120},
                {"outlook": "negative"},
            ],
            "riskAssessment": {"overall_risk": "중간", "key_risks": ["환율"]},
        }))
        .unwrap();
        let m = map_market_summary(&raw);
        assert!(m.overview.is_none());
        assert_eq!(m.sectors.len(), 1);
        assert_eq!(m.sectors[0].outlook, Sentiment::Positive);
        assert_eq!(m.sectors[0].score, Some(100.0));
        assert_eq!(m.risk.unwrap().key_risks, ["환율"]);
    }
}
