//! Built-in dataset served whenever the backend cannot be used.

use crate::client::NewsFeed;
use crate::domain::market::{MarketSummary, RiskAssessment, SectorOutlook};
use crate::domain::news::NewsRecord;
use crate::domain::portfolio::{Holding, Watchlist};
use crate::domain::stock::{
    GrowthRecord, MarketOverview, Recommendation, Sentiment, StockRecord, Synthesized,
};
use crate::domain::theme::{
    HotTheme, RelatedStock, ThemeDetail, ThemeListEntry, ThemeTier, ThemeTrendRecord, Trend,
};

#[allow(clippy::too_many_arguments)]
fn stock(
    id: &str,
    symbol: &str,
    name: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    market_cap: &str,
    pe_ratio: f64,
    dividend_yield: f64,
    sector: &str,
    recommendation: Recommendation,
    analyst_rating: f64,
) -> StockRecord {
    StockRecord {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        price,
        change,
        change_percent,
        market_cap: market_cap.to_string(),
        pe_ratio,
        dividend_yield,
        sector: sector.to_string(),
        recommendation,
        analyst_rating,
        synthesized: Synthesized::default(),
        reasoning: None,
        target_return: None,
        risk_factors: Vec::new(),
        catalysts: Vec::new(),
        volume: None,
    }
}

pub fn recommended_stocks() -> Vec<StockRecord> {
    use Recommendation::*;
    vec![
        stock("1", "삼성전자", "Samsung Electronics", 71_500.0, 1_200.0, 1.71, "427조원", 15.2, 2.8, "반도체", StrongBuy, 4.7),
        stock("2", "SK하이닉스", "SK Hynix", 142_000.0, 3_500.0, 2.53, "103조원", 18.5, 1.2, "반도체", StrongBuy, 4.8),
        stock("3", "NAVER", "Naver Corporation", 198_500.0, 2_500.0, 1.28, "32조원", 22.3, 0.5, "IT서비스", StrongBuy, 4.5),
        stock("4", "카카오", "Kakao Corp", 48_900.0, 850.0, 1.77, "21조원", 28.1, 0.3, "IT서비스", Buy, 4.2),
    ]
}

pub fn theme_stocks() -> Vec<StockRecord> {
    use Recommendation::*;
    vec![
        stock("5", "에코프로비엠", "EcoPro BM", 285_000.0, 12_000.0, 4.4, "18조원", 35.2, 0.1, "2차전지", StrongBuy, 4.6),
        stock("6", "포스코홀딩스", "POSCO Holdings", 398_000.0, 5_500.0, 1.4, "34조원", 12.8, 3.5, "2차전지", Buy, 4.3),
        stock("7", "LG에너지솔루션", "LG Energy Solution", 425_000.0, 8_000.0, 1.92, "99조원", 42.1, 0.8, "2차전지", StrongBuy, 4.7),
        stock("8", "삼성바이오로직스", "Samsung Biologics", 892_000.0, -5_000.0, -0.56, "61조원", 38.5, 0.2, "바이오", Buy, 4.4),
        stock("9", "셀트리온", "Celltrion", 178_500.0, 3_200.0, 1.83, "24조원", 25.7, 1.1, "바이오", StrongBuy, 4.5),
        stock("10", "현대차", "Hyundai Motor", 215_000.0, 4_500.0, 2.14, "46조원", 6.8, 4.2, "자동차", Buy, 4.1),
    ]
}

pub fn growth_stocks() -> Vec<GrowthRecord> {
    let picks = [
        ("5", "+15%", "High", "1주"),
        ("7", "+10%", "Medium", "2주"),
        ("9", "+8%", "Medium", "1개월"),
    ];
    let pool = theme_stocks();
    picks
        .iter()
        .zip(1u32..)
        .filter_map(|((id, ret, confidence, timeframe), rank)| {
            let stock = pool.iter().find(|s| s.id == *id)?.clone();
            Some(GrowthRecord {
                stock,
                predicted_return: Some(ret.to_string()),
                confidence: Some(confidence.to_string()),
                timeframe: Some(timeframe.to_string()),
                rank,
            })
        })
        .collect()
}

pub fn theme_trends() -> Vec<ThemeTrendRecord> {
    vec![
        ThemeTrendRecord::new("1", "AI 반도체", 95.0, 35.0),
        ThemeTrendRecord::new("2", "방산", 82.0, 28.0),
        ThemeTrendRecord::new("3", "로봇", 78.0, 22.0),
        ThemeTrendRecord::new("4", "우주항공", 71.0, 18.0),
        ThemeTrendRecord::new("5", "부동산", 42.0, -15.0),
        ThemeTrendRecord::new("6", "게임", 38.0, -12.0),
        ThemeTrendRecord::new("7", "엔터", 45.0, -8.0),
    ]
}

fn theme(id: &str, name: &str, score: f64, change_percent: f64, related: u32, top: [&str; 3]) -> ThemeListEntry {
    ThemeListEntry {
        id: id.to_string(),
        name: name.to_string(),
        score,
        change_percent,
        related_stock_count: related,
        trend: Trend::from_change(change_percent),
        top_stocks: top.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn theme_list() -> Vec<ThemeListEntry> {
    vec![
        theme("ai-semiconductor", "AI 반도체", 95.0, 11.76, 47, ["SK하이닉스", "삼성전자", "한미반도체"]),
        theme("secondary-battery", "2차전지", 87.0, 6.1, 38, ["LG에너지솔루션", "에코프로비엠", "포스코퓨처엠"]),
        theme("defense", "방산", 82.0, 9.33, 24, ["한화에어로스페이스", "LIG넥스원", "한국항공우주"]),
        theme("robot", "로봇", 78.0, 30.0, 31, ["두산로보틱스", "레인보우로보틱스", "로보스타"]),
        theme("bio", "바이오", 75.0, -3.85, 52, ["삼성바이오로직스", "셀트리온", "SK바이오팜"]),
        theme("aerospace", "우주항공", 71.0, 9.23, 18, ["한국항공우주", "쎄트렉아이", "AP위성"]),
        theme("ai-agent", "AI 에이전트", 72.0, 100.0, 15, ["카카오", "네이버", "솔트룩스"]),
        theme("game", "게임", 45.0, -13.46, 28, ["크래프톤", "엔씨소프트", "넷마블"]),
        theme("entertainment", "엔터테인먼트", 48.0, -12.73, 22, ["하이브", "JYP엔터", "SM엔터"]),
        theme("real-estate", "부동산", 42.0, -16.0, 35, ["삼성물산", "현대건설", "DL이앤씨"]),
    ]
}

/// The three highest-scoring listed themes.
pub fn hot_themes() -> Vec<ThemeListEntry> {
    let mut themes = theme_list();
    themes.sort_by(|a, b| b.score.total_cmp(&a.score));
    themes.truncate(3);
    themes
}

/// `hot_themes` labelled the way the backend's hot-theme feed labels them.
pub fn hot_theme_feed() -> Vec<HotTheme> {
    hot_themes()
        .into_iter()
        .map(|theme| {
            let momentum = if theme.change_percent >= 10.0 { "강함" } else { "보통" };
            HotTheme {
                theme,
                momentum: Some(momentum.to_string()),
                signal: Some("매수".to_string()),
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn related(
    id: &str,
    name: &str,
    code: &str,
    price: f64,
    previous_close: f64,
    change: f64,
    change_percent: f64,
    volume: &str,
    market_cap: &str,
    tier: ThemeTier,
) -> RelatedStock {
    RelatedStock {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        price,
        previous_close: Some(previous_close),
        change,
        change_percent,
        volume: volume.to_string(),
        market_cap: market_cap.to_string(),
        tier: Some(tier),
        premium: matches!(tier, ThemeTier::Tertiary | ThemeTier::Hidden),
        synthesized_price: false,
    }
}

fn ai_semiconductor_stocks() -> Vec<RelatedStock> {
    use ThemeTier::*;
    vec![
        related("1", "SK하이닉스", "000660", 142_000.0, 138_500.0, 3_500.0, 2.53, "4,521,320", "103조원", Primary),
        related("2", "삼성전자", "005930", 71_500.0, 70_300.0, 1_200.0, 1.71, "12,845,210", "427조원", Primary),
        related("3", "한미반도체", "042700", 89_500.0, 85_200.0, 4_300.0, 5.05, "2,156,890", "8.5조원", Primary),
        related("4", "리노공업", "058470", 215_000.0, 210_000.0, 5_000.0, 2.38, "312,450", "3.2조원", Secondary),
        related("5", "ISC", "095340", 58_200.0, 56_800.0, 1_400.0, 2.46, "856,320", "1.1조원", Secondary),
        related("6", "테크윙", "089030", 32_500.0, 31_200.0, 1_300.0, 4.17, "1,245,670", "6,500억원", Secondary),
        related("7", "피에스케이홀딩스", "031980", 28_750.0, 27_900.0, 850.0, 3.05, "542,180", "4,200억원", Tertiary),
        related("8", "하나마이크론", "067310", 24_800.0, 23_500.0, 1_300.0, 5.53, "2,856,420", "3,100억원", Tertiary),
        related("9", "네패스아크", "330860", 18_500.0, 17_200.0, 1_300.0, 7.56, "1,523,890", "1,800억원", Hidden),
        related("10", "와이씨", "232140", 8_520.0, 7_850.0, 670.0, 8.54, "3,421,560", "950억원", Hidden),
    ]
}

/// Detail for a theme id. Only `ai-semiconductor` carries related stocks; other listed themes
/// keep their listing name and score; unknown ids get a generic placeholder.
pub fn theme_detail(id: &str) -> ThemeDetail {
    if id == "ai-semiconductor" {
        return ThemeDetail {
            id: id.to_string(),
            name: "AI 반도체".to_string(),
            score: 95.0,
            description: "인공지능 학습 및 추론에 필요한 고성능 반도체 관련 테마. 엔비디아 실적 호조와 HBM 수요 급증으로 관련주 상승세."
                .to_string(),
            news_count: 15,
            avg_return: 3.2,
            related_stocks: ai_semiconductor_stocks(),
        };
    }
    let (name, score) = theme_list()
        .into_iter()
        .find(|t| t.id == id)
        .map(|t| (t.name, t.score))
        .unwrap_or_else(|| ("테마".to_string(), 75.0));
    ThemeDetail {
        id: id.to_string(),
        name,
        score,
        description: "테마 설명이 여기에 표시됩니다.".to_string(),
        news_count: 10,
        avg_return: 2.5,
        related_stocks: Vec::new(),
    }
}

pub fn market_summary() -> MarketSummary {
    let sector = |name: &str, outlook, top: [&str; 2], score| SectorOutlook {
        sector: name.to_string(),
        outlook,
        reasoning: None,
        top_stocks: top.iter().map(|s| s.to_string()).collect(),
        score: Some(score),
    };
    MarketSummary {
        generated_at: None,
        overview: Some(market_overview()),
        sectors: vec![
            sector("반도체", Sentiment::Positive, ["SK하이닉스", "삼성전자"], 92.0),
            sector("2차전지", Sentiment::Positive, ["LG에너지솔루션", "에코프로비엠"], 85.0),
            sector("바이오", Sentiment::Neutral, ["삼성바이오로직스", "셀트리온"], 70.0),
        ],
        risk: Some(RiskAssessment {
            overall_risk: Some("중간".to_string()),
            key_risks: vec!["환율 변동성".to_string(), "미국 금리 경로".to_string()],
            opportunities: vec!["AI 반도체 수요 확대".to_string()],
        }),
    }
}

/// Held positions, valued at the sample recommended prices.
pub fn portfolio() -> Vec<Holding> {
    let pool = recommended_stocks();
    [("1", 50, 68_000.0), ("2", 20, 135_000.0), ("3", 10, 205_000.0)]
        .into_iter()
        .filter_map(|(id, quantity, avg_price)| {
            let stock = pool.iter().find(|s| s.id == id)?.clone();
            Some(Holding::new(stock, quantity, avg_price))
        })
        .collect()
}

pub fn watchlist() -> Watchlist {
    Watchlist::new(recommended_stocks().into_iter().take(3).collect())
}

pub fn market_overview() -> MarketOverview {
    MarketOverview {
        summary: "반도체와 2차전지 중심의 강세 흐름이 이어지고 있습니다.".to_string(),
        sentiment: Sentiment::Neutral,
        korea_summary: None,
        usa_summary: None,
    }
}

fn news_item(id: &str, title: &str, summary: &str, published: &str, source: &str) -> NewsRecord {
    NewsRecord {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        link: None,
        source: source.to_string(),
        published: Some(published.to_string()),
        ticker: None,
        keyword: None,
    }
}

pub fn market_news() -> Vec<NewsRecord> {
    vec![
        news_item(
            "news-1",
            "삼성전자, 신규 반도체 공장 투자 확대 발표",
            "삼성전자가 차세대 반도체 생산을 위해 대규모 투자를 결정하며 글로벌 시장 점유율 확대를 노린다.",
            "2시간 전",
            "한국경제",
        ),
        news_item(
            "news-2",
            "SK하이닉스, HBM 수요 급증으로 실적 개선 전망",
            "AI 반도체 수요가 증가하면서 HBM 시장에서 SK하이닉스의 입지가 더욱 강화되고 있다.",
            "4시간 전",
            "매일경제",
        ),
        news_item(
            "news-3",
            "네이버, AI 검색 기능 대폭 강화",
            "네이버가 생성형 AI를 활용한 새로운 검색 서비스를 출시하며 사용자 경험을 혁신한다.",
            "6시간 전",
            "서울경제",
        ),
        news_item(
            "news-4",
            "2차전지 업계, 글로벌 수주 잇따라 발표",
            "에코프로비엠을 비롯한 국내 2차전지 기업들이 유럽과 북미 시장에서 대규모 수주를 확보했다.",
            "1시간 전",
            "이데일리",
        ),
        news_item(
            "news-5",
            "바이오 업계, 신약 개발 성과로 주가 상승세",
            "삼성바이오로직스와 셀트리온의 신약 개발 진척으로 투자자들의 관심이 집중되고 있다.",
            "3시간 전",
            "뉴스1",
        ),
        news_item(
            "news-6",
            "전기차 시장 확대, 자동차 부품사 수혜 기대",
            "글로벌 전기차 수요 증가에 따라 현대차와 기아의 실적 개선이 예상된다.",
            "5시간 전",
            "연합뉴스",
        ),
    ]
}

/// Sample news for a feed. Ticker/keyword feeds are tagged with the requested value so the
/// presentation layer can still label them.
pub fn news(feed: &NewsFeed, limit: u32) -> Vec<NewsRecord> {
    let mut items = market_news();
    items.truncate(limit as usize);
    for item in &mut items {
        match feed {
            NewsFeed::Market => {}
            NewsFeed::Stock(ticker) => item.ticker = Some(ticker.clone()),
            NewsFeed::Keyword(keyword) => item.keyword = Some(keyword.clone()),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::classify_theme_trends;

    #[test]
    fn sample_stock_ids_are_unique() {
        let mut ids: Vec<String> = recommended_stocks()
            .into_iter()
            .chain(theme_stocks())
            .map(|s| s.id)
            .collect();
        let n = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }

    #[test]
    fn sample_figures_are_real_not_synthesized() {
        assert!(recommended_stocks()
            .iter()
            .chain(theme_stocks().iter())
            .all(|s| !s.synthesized.any() && s.price > 0.0));
    }

    #[test]
    fn sample_trends_fill_both_panels() {
        let trends = classify_theme_trends(theme_trends());
        assert_eq!(trends.rising.len(), 4);
        assert_eq!(trends.falling.len(), 3);
        assert_eq!(trends.falling[0].name, "부동산");
    }

    #[test]
    fn growth_picks_resolve_against_theme_stocks() {
        let growth = growth_stocks();
        assert_eq!(growth.len(), 3);
        assert_eq!(growth[0].rank, 1);
        assert_eq!(growth[0].stock.symbol, "에코프로비엠");
    }

    #[test]
    fn hot_themes_are_top_scored() {
        let names: Vec<String> = hot_themes().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["AI 반도체", "2차전지", "방산"]);
    }

    #[test]
    fn sample_detail_tiers_match_premium_flags() {
        let detail = theme_detail("ai-semiconductor");
        assert_eq!(detail.related_stocks.len(), 10);
        for s in &detail.related_stocks {
            let deep = matches!(s.tier, Some(ThemeTier::Tertiary | ThemeTier::Hidden));
            assert_eq!(s.premium, deep, "{}", s.name);
        }
    }

    #[test]
    fn unknown_theme_detail_uses_listing_or_generic_placeholder() {
        let listed = theme_detail("defense");
        assert_eq!(listed.name, "방산");
        assert_eq!(listed.score, 82.0);
        assert!(listed.related_stocks.is_empty());

        let unknown = theme_detail("nope");
        assert_eq!(unknown.name, "테마");
        assert_eq!(unknown.score, 75.0);
        assert_eq!(unknown.news_count, 10);
    }

    #[test]
    fn sample_portfolio_values_at_current_prices() {
        let holdings = portfolio();
        assert_eq!(holdings.len(), 3);
        assert_eq!(holdings[0].total_value, 3_575_000.0);
        assert_eq!(holdings[1].total_value, 2_840_000.0);
        assert_eq!(holdings[2].total_value, 1_985_000.0);
    }

    #[test]
    fn feed_news_is_tagged_and_limited() {
        let items = news(&NewsFeed::Stock("005930".into()), 2);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|n| n.ticker.as_deref() == Some("005930")));
    }
}
