//! Raw backend payloads.
//!
//! The backend mixes camelCase and snake_case spellings and omits fields freely, so every
//! field here is optional. Case variants of one name are serde aliases; differently named
//! columns for the same value (`name`/`theme_name`, `score`/`theme_score`, ...) are separate
//! fields so a payload carrying both still decodes. `mapper` picks the first usable one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawStock {
    pub id: Option<Value>,
    pub ticker: Option<String>,
    pub code: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "stock_name", alias = "stockName")]
    pub stock_name: Option<String>,
    pub price: Option<f64>,
    #[serde(rename = "current_price", alias = "currentPrice")]
    pub current_price: Option<f64>,
    pub change: Option<f64>,
    #[serde(alias = "change_percent")]
    pub change_percent: Option<f64>,
    #[serde(rename = "change_rate", alias = "changeRate")]
    pub change_rate: Option<f64>,
    #[serde(alias = "market_cap")]
    pub market_cap: Option<Value>,
    #[serde(alias = "pe_ratio")]
    pub pe_ratio: Option<f64>,
    pub per: Option<f64>,
    #[serde(alias = "dividend_yield")]
    pub dividend_yield: Option<f64>,
    pub sector: Option<String>,
    pub recommendation: Option<String>,
    #[serde(alias = "analyst_rating")]
    pub analyst_rating: Option<f64>,
    pub rating: Option<f64>,
    pub score: Option<f64>,
    #[serde(rename = "theme_score", alias = "themeScore")]
    pub theme_score: Option<f64>,
    pub reasoning: Option<String>,
    #[serde(alias = "target_return")]
    pub target_return: Option<Value>,
    #[serde(alias = "risk_factors")]
    pub risk_factors: Vec<String>,
    pub catalysts: Vec<String>,
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGrowthStock {
    #[serde(flatten)]
    pub stock: RawStock,
    #[serde(alias = "predicted_return")]
    pub predicted_return: Option<Value>,
    pub confidence: Option<String>,
    pub timeframe: Option<String>,
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMarketOverview {
    pub summary: Option<String>,
    pub sentiment: Option<String>,
    pub korea_summary: Option<String>,
    pub usa_summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationsResponse {
    #[serde(alias = "generated_at")]
    pub generated_at: Option<String>,
    pub engine: Option<String>,
    #[serde(alias = "market_overview")]
    pub market_overview: Option<RawMarketOverview>,
    #[serde(alias = "recommended_stocks")]
    pub recommended_stocks: Vec<RawStock>,
    #[serde(alias = "theme_stocks")]
    pub theme_stocks: Vec<RawStock>,
    #[serde(alias = "top_picks")]
    pub top_picks: Vec<RawStock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrowthPredictionsResponse {
    #[serde(alias = "generated_at")]
    pub generated_at: Option<String>,
    pub engine: Option<String>,
    #[serde(alias = "prediction_summary")]
    pub prediction_summary: Option<String>,
    #[serde(alias = "growth_stocks")]
    pub growth_stocks: Vec<RawGrowthStock>,
    #[serde(alias = "hot_themes")]
    pub hot_themes: Vec<RawTheme>,
    #[serde(alias = "risk_warning")]
    pub risk_warning: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTheme {
    pub id: Option<Value>,
    pub name: Option<String>,
    #[serde(rename = "theme_name", alias = "themeName")]
    pub theme_name: Option<String>,
    pub score: Option<f64>,
    #[serde(rename = "theme_score", alias = "themeScore")]
    pub theme_score: Option<f64>,
    #[serde(alias = "score_change")]
    pub score_change: Option<f64>,
    #[serde(rename = "daily_change", alias = "dailyChange")]
    pub daily_change: Option<f64>,
    pub change: Option<f64>,
    #[serde(alias = "stock_count")]
    pub stock_count: Option<u32>,
    #[serde(alias = "related_stock_count")]
    pub related_stock_count: Option<u32>,
    #[serde(alias = "top_stocks")]
    pub top_stocks: Vec<String>,
    pub trend: Option<String>,
    pub outlook: Option<String>,
    pub reasoning: Option<String>,
}

/// `themes` is required: a body without it is treated as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesResponse {
    pub themes: Vec<RawTheme>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHotTheme {
    #[serde(flatten)]
    pub theme: RawTheme,
    pub momentum: Option<String>,
    pub signal: Option<String>,
}

/// `/themes/hot`. Accepts the list under `themes` or `hotThemes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotThemesResponse {
    #[serde(alias = "hotThemes", alias = "hot_themes")]
    pub themes: Vec<RawHotTheme>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawRelatedStock {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(alias = "current_price")]
    pub current_price: Option<f64>,
    pub price: Option<f64>,
    #[serde(alias = "previous_close")]
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    #[serde(alias = "change_percent")]
    pub change_percent: Option<f64>,
    pub volume: Option<Value>,
    #[serde(alias = "market_cap")]
    pub market_cap: Option<Value>,
    pub tier: Option<String>,
    #[serde(alias = "is_premium")]
    pub is_premium: bool,
}

/// `/themes/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawThemeDetail {
    #[serde(flatten)]
    pub theme: RawTheme,
    pub description: Option<String>,
    #[serde(alias = "news_count")]
    pub news_count: Option<u32>,
    #[serde(alias = "avg_return")]
    pub avg_return: Option<f64>,
    #[serde(default, alias = "related_stocks")]
    pub related_stocks: Vec<RawRelatedStock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSectorAnalysis {
    pub sector: Option<String>,
    pub outlook: Option<String>,
    pub reasoning: Option<String>,
    #[serde(alias = "topStocks")]
    pub top_stocks: Vec<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRiskAssessment {
    #[serde(alias = "overallRisk")]
    pub overall_risk: Option<String>,
    #[serde(alias = "keyRisks")]
    pub key_risks: Vec<String>,
    pub opportunities: Vec<String>,
}

/// `/recommendations/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketSummaryResponse {
    #[serde(alias = "generated_at")]
    pub generated_at: Option<String>,
    #[serde(alias = "market_overview")]
    pub market_overview: Option<RawMarketOverview>,
    #[serde(alias = "sector_analysis")]
    pub sector_analysis: Vec<RawSectorAnalysis>,
    #[serde(alias = "risk_assessment")]
    pub risk_assessment: Option<RawRiskAssessment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawNewsItem {
    pub id: Option<Value>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub published: Option<String>,
    pub ticker: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub news: Vec<RawNewsItem>,
    #[serde(default, alias = "total_count")]
    pub total_count: Option<u64>,
    #[serde(default, alias = "collected_at")]
    pub collected_at: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default, alias = "stock_name")]
    pub stock_name: Option<String>,
}

/// Error body returned by the backend on non-2xx responses. `detail` is usually a string but
/// validation errors carry a list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub detail: Option<Value>,
    pub status_code: Option<u16>,
}

/// Renders an id-like value (`"005930"` or `5930`) as a string.
pub fn value_to_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stock_accepts_snake_and_camel_case() {
        let camel: RawStock = serde_json::from_value(json!({
            "id": "005930",
            "symbol": "삼성전자",
            "changePercent": 1.71,
            "analystRating": 4.7,
        }))
        .unwrap();
        let snake: RawStock = serde_json::from_value(json!({
            "id": 5930,
            "ticker": "005930",
            "change_percent": 1.71,
            "theme_score": 85,
            "risk_factors": ["환율"],
        }))
        .unwrap();

        assert_eq!(camel.change_percent, Some(1.71));
        assert_eq!(camel.analyst_rating, Some(4.7));
        assert_eq!(snake.change_percent, Some(1.71));
        assert_eq!(snake.theme_score, Some(85.0));
        assert_eq!(snake.risk_factors, vec!["환율".to_string()]);
        assert_eq!(snake.id.as_ref().and_then(value_to_label), Some("5930".to_string()));
        assert_eq!(snake.ticker.as_deref(), Some("005930"));
    }

    #[test]
    fn growth_stock_flattens_base_fields() {
        let g: RawGrowthStock = serde_json::from_value(json!({
            "id": "247540",
            "name": "EcoPro BM",
            "price": 285000,
            "predictedReturn": "+15%",
            "confidence": "High",
            "rank": 1,
        }))
        .unwrap();
        assert_eq!(g.stock.price, Some(285000.0));
        assert_eq!(g.rank, Some(1));
        assert_eq!(g.confidence.as_deref(), Some("High"));
    }

    #[test]
    fn theme_accepts_backend_column_names() {
        let t: RawTheme = serde_json::from_value(json!({
            "id": 3,
            "theme_name": "AI 반도체",
            "theme_score": 95.0,
            "daily_change": 12.5,
            "stock_count": 47,
        }))
        .unwrap();
        assert_eq!(t.theme_name.as_deref(), Some("AI 반도체"));
        assert_eq!(t.theme_score, Some(95.0));
        assert_eq!(t.daily_change, Some(12.5));
        assert_eq!(t.stock_count, Some(47));
    }

    #[test]
    fn themes_response_requires_themes_key() {
        assert!(serde_json::from_value::<ThemesResponse>(json!({"items": []})).is_err());
        assert!(serde_json::from_value::<ThemesResponse>(json!({"themes": "nope"})).is_err());
    }

    #[test]
    fn recommendations_reject_non_array_stock_lists() {
        let res = serde_json::from_value::<RecommendationsResponse>(json!({
            "recommendedStocks": {"id": "1"},
        }));
        assert!(res.is_err());
    }

    #[test]
    fn theme_with_both_column_spellings_still_decodes() {
        let res: ThemesResponse = serde_json::from_value(json!({"themes": [{
            "id": 1,
            "name": "AI",
            "theme_name": "AI 반도체",
            "score": 90,
            "theme_score": 88,
            "scoreChange": 3,
            "daily_change": 2.5,
        }]}))
        .unwrap();
        let t = &res.themes[0];
        assert_eq!(t.name.as_deref(), Some("AI"));
        assert_eq!(t.theme_name.as_deref(), Some("AI 반도체"));
        assert_eq!(t.score, Some(90.0));
        assert_eq!(t.theme_score, Some(88.0));
        assert_eq!(t.score_change, Some(3.0));
        assert_eq!(t.daily_change, Some(2.5));
    }

    #[test]
    fn stock_with_both_column_spellings_still_decodes() {
        let s: RawStock = serde_json::from_value(json!({
            "id": "005930",
            "name": "Samsung Electronics",
            "stock_name": "삼성전자",
            "price": 71500,
            "current_price": 71600,
            "score": 85,
            "theme_score": 70,
        }))
        .unwrap();
        assert_eq!(s.price, Some(71500.0));
        assert_eq!(s.current_price, Some(71600.0));
        assert_eq!(s.stock_name.as_deref(), Some("삼성전자"));
    }

    #[test]
    fn theme_detail_flattens_theme_and_reads_related_stocks() {
        let d: RawThemeDetail = serde_json::from_value(json!({
            "id": "ai-semiconductor",
            "name": "AI 반도체",
            "score": 95,
            "newsCount": 15,
            "avg_return": 3.2,
            "relatedStocks": [
                {"name": "SK하이닉스", "code": "000660", "currentPrice": 142000, "tier": "1차"},
                {"name": "와이씨", "current_price": 8520, "tier": "숨은", "isPremium": true},
            ],
        }))
        .unwrap();
        assert_eq!(d.theme.name.as_deref(), Some("AI 반도체"));
        assert_eq!(d.news_count, Some(15));
        assert_eq!(d.avg_return, Some(3.2));
        assert_eq!(d.related_stocks.len(), 2);
        assert!(d.related_stocks[1].is_premium);
    }

    #[test]
    fn hot_themes_accept_either_list_key() {
        let a: HotThemesResponse =
            serde_json::from_value(json!({"themes": [{"name": "방산", "momentum": "강세"}]})).unwrap();
        let b: HotThemesResponse =
            serde_json::from_value(json!({"hotThemes": [{"name": "방산", "signal": "매수"}]})).unwrap();
        assert_eq!(a.themes[0].momentum.as_deref(), Some("강세"));
        assert_eq!(b.themes[0].theme.name.as_deref(), Some("방산"));
        assert!(serde_json::from_value::<HotThemesResponse>(json!({})).is_err());
    }
}
