use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse buy/hold signal shown on stock cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Hold")]
    Hold,
}

impl Recommendation {
    pub const STRONG_BUY_MIN_SCORE: f64 = 80.0;
    pub const BUY_MIN_SCORE: f64 = 60.0;

    /// NaN scores fall through to `Hold`.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::STRONG_BUY_MIN_SCORE {
            Self::StrongBuy
        } else if score >= Self::BUY_MIN_SCORE {
            Self::Buy
        } else {
            Self::Hold
        }
    }

    /// Rating bucket used for sorting and coloring.
    pub fn rating_bucket(self) -> u8 {
        match self {
            Self::StrongBuy => 5,
            Self::Buy => 4,
            Self::Hold => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
        }
    }

    /// Accepts the English labels in any case/separator and the Korean broker terms.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "strongbuy" | "적극매수" | "강력매수" => Some(Self::StrongBuy),
            "buy" | "매수" => Some(Self::Buy),
            "hold" | "neutral" | "보유" | "중립" | "관망" => Some(Self::Hold),
            _ => None,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which figures on a record are presentation filler rather than backend data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesized {
    pub price: bool,
    pub change: bool,
}

impl Synthesized {
    pub fn any(&self) -> bool {
        self.price || self.change
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub market_cap: String,
    pub pe_ratio: f64,
    pub dividend_yield: f64,
    pub sector: String,
    pub recommendation: Recommendation,
    /// 0.0..=5.0
    pub analyst_rating: f64,
    pub synthesized: Synthesized,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_return: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_factors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalysts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl StockRecord {
    pub fn is_rising(&self) -> bool {
        self.change > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecord {
    #[serde(flatten)]
    pub stock: StockRecord,
    pub predicted_return: Option<String>,
    pub confidence: Option<String>,
    pub timeframe: Option<String>,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "bullish" | "긍정" => Self::Positive,
            "negative" | "bearish" | "부정" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub summary: String,
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub korea_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usa_summary: Option<String>,
}
