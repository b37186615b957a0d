//! Market-wide summary: overview text, per-sector outlook and the risk assessment.

use super::stock::{MarketOverview, Sentiment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorOutlook {
    pub sector: String,
    pub outlook: Sentiment,
    pub reasoning: Option<String>,
    pub top_stocks: Vec<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_risk: Option<String>,
    pub key_risks: Vec<String>,
    pub opportunities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub generated_at: Option<String>,
    /// `None` when the backend sent no usable overview.
    pub overview: Option<MarketOverview>,
    pub sectors: Vec<SectorOutlook>,
    pub risk: Option<RiskAssessment>,
}
