use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Derived solely from the sign of the change.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTrendRecord {
    pub id: String,
    pub name: String,
    /// 0..=100
    pub current_score: f64,
    pub score_change: f64,
    pub trend: Trend,
}

impl ThemeTrendRecord {
    /// The only constructor: keeps `trend` consistent with `score_change`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: f64, score_change: f64) -> Self {
        let score_change = if score_change.is_finite() { score_change } else { 0.0 };
        Self {
            id: id.into(),
            name: name.into(),
            current_score: clamp_score(score),
            score_change,
            trend: Trend::from_change(score_change),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeTrends {
    pub rising: Vec<ThemeTrendRecord>,
    pub falling: Vec<ThemeTrendRecord>,
}

/// One row of the full theme listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeListEntry {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub change_percent: f64,
    pub related_stock_count: u32,
    pub trend: Trend,
    pub top_stocks: Vec<String>,
}

/// A themed listing with the backend's momentum and signal labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotTheme {
    #[serde(flatten)]
    pub theme: ThemeListEntry,
    pub momentum: Option<String>,
    pub signal: Option<String>,
}

/// How directly a related stock rides the theme, from large caps down to hidden small caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeTier {
    #[serde(rename = "1차", alias = "primary")]
    Primary,
    #[serde(rename = "2차", alias = "secondary")]
    Secondary,
    #[serde(rename = "3차", alias = "tertiary")]
    Tertiary,
    #[serde(rename = "숨은", alias = "hidden")]
    Hidden,
}

impl ThemeTier {
    pub const ALL: [ThemeTier; 4] = [Self::Primary, Self::Secondary, Self::Tertiary, Self::Hidden];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1차" | "1" | "primary" => Some(Self::Primary),
            "2차" | "2" | "secondary" => Some(Self::Secondary),
            "3차" | "3" | "tertiary" => Some(Self::Tertiary),
            "숨은" | "hidden" => Some(Self::Hidden),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "1차",
            Self::Secondary => "2차",
            Self::Tertiary => "3차",
            Self::Hidden => "숨은",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedStock {
    pub id: String,
    pub name: String,
    pub code: String,
    pub price: f64,
    pub previous_close: Option<f64>,
    pub change: f64,
    pub change_percent: f64,
    pub volume: String,
    pub market_cap: String,
    /// `None` when the backend sent no recognizable tier.
    pub tier: Option<ThemeTier>,
    pub premium: bool,
    /// Price is a placeholder, not a quote.
    pub synthesized_price: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDetail {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub description: String,
    pub news_count: u32,
    pub avg_return: f64,
    pub related_stocks: Vec<RelatedStock>,
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
