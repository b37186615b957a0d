use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recommand_core::client::{BackendClient, HttpBackendClient, NewsFeed};
use recommand_core::dashboard::{Dashboard, DashboardLoader, Loaded, StockCategory};
use recommand_core::domain::market::MarketSummary;
use recommand_core::domain::news::NewsRecord;
use recommand_core::domain::portfolio::Watchlist;
use recommand_core::domain::stock::{PricePoint, StockRecord};
use recommand_core::domain::theme::{HotTheme, ThemeTier, ThemeTrends};
use recommand_core::lifetime::{CancelSignal, ViewScope};
use recommand_core::listing::{
    Page, PageRequest, PortfolioView, ThemeDetailView, ThemeListView, ThemeQuery, ThemeSort,
    WatchlistView,
};
use recommand_core::sample;
use recommand_core::session::{IdentityProvider, Session, SessionState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = recommand_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    if let Err(e) = run(settings).await {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "api stopped with error");
        return Err(e);
    }
    Ok(())
}

async fn run(settings: recommand_core::config::Settings) -> anyhow::Result<()> {
    let backend = HttpBackendClient::from_settings(&settings)?;
    tracing::info!(base_url = backend.base_url(), "using recommendation backend");

    let scope = ViewScope::new();
    let state = AppState::new(
        DashboardLoader::new(Arc::new(backend), settings.placeholder_seed),
        scope.signal(),
    );

    if !state.loader.backend().check_health().await {
        tracing::warn!("backend unreachable at startup; views will serve sample data");
    }

    let session = state.session.clone();
    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(scope))
        .await?;

    std::mem::take(&mut *session.write().await).teardown();
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/backend/health", get(backend_health))
        .route("/dashboard", get(get_dashboard))
        .route("/themes", get(get_themes))
        .route("/themes/trends", get(get_theme_trends))
        .route("/themes/hot", get(get_hot_themes))
        .route("/themes/:id", get(get_theme_detail))
        .route("/market/summary", get(get_market_summary))
        // Both stock routes name their segment `:id` so the router accepts them side by side.
        .route("/stocks/:id", get(get_stocks))
        .route("/stocks/:id/history", get(get_price_history))
        .route("/news/market", get(get_market_news))
        .route("/news/stock/:ticker", get(get_stock_news))
        .route("/news/keyword/:keyword", get(get_keyword_news))
        .route("/portfolio", get(get_portfolio))
        .route("/watchlist", get(get_watchlist))
        .route("/watchlist/:id", delete(remove_from_watchlist))
        .route("/session", get(get_session))
        .route("/session/sign-in", post(sign_in))
        .route("/session/sign-out", post(sign_out))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    loader: DashboardLoader,
    session: Arc<RwLock<Session>>,
    watchlist: Arc<RwLock<Watchlist>>,
    /// Fires when the server shuts down.
    signal: CancelSignal,
}

impl AppState {
    fn new(loader: DashboardLoader, signal: CancelSignal) -> Self {
        Self {
            loader,
            session: Arc::new(RwLock::new(Session::init())),
            watchlist: Arc::new(RwLock::new(sample::watchlist())),
            signal,
        }
    }
}

/// A load that returns `None` was cancelled by shutdown.
fn finished<T>(loaded: Option<T>) -> Result<Json<T>, StatusCode> {
    loaded.map(Json).ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

#[derive(Debug, Serialize)]
struct BackendHealth {
    reachable: bool,
}

async fn backend_health(State(state): State<AppState>) -> Json<BackendHealth> {
    Json(BackendHealth {
        reachable: state.loader.backend().check_health().await,
    })
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, StatusCode> {
    let mut signal = state.signal.clone();
    finished(state.loader.load_dashboard(&mut signal).await)
}

#[derive(Debug, Default, Deserialize)]
struct ThemeParams {
    q: Option<String>,
    sort: Option<ThemeSort>,
}

async fn get_themes(
    State(state): State<AppState>,
    Query(params): Query<ThemeParams>,
) -> Result<Json<Loaded<ThemeListView>>, StatusCode> {
    let query = ThemeQuery {
        search: params.q,
        sort_by: params.sort.unwrap_or_default(),
    };
    let mut signal = state.signal.clone();
    finished(state.loader.load_theme_list(&query, &mut signal).await)
}

async fn get_theme_trends(
    State(state): State<AppState>,
) -> Result<Json<Loaded<ThemeTrends>>, StatusCode> {
    let mut signal = state.signal.clone();
    finished(state.loader.load_theme_trends(&mut signal).await)
}

#[derive(Debug, Default, Deserialize)]
struct TierParams {
    tier: Option<String>,
}

async fn get_theme_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<TierParams>,
) -> Result<Json<Loaded<ThemeDetailView>>, StatusCode> {
    let tier = match params.tier.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(ThemeTier::parse(raw).ok_or(StatusCode::BAD_REQUEST)?),
    };
    let mut signal = state.signal.clone();
    finished(state.loader.load_theme_detail(&id, tier, &mut signal).await)
}

async fn get_hot_themes(
    State(state): State<AppState>,
) -> Result<Json<Loaded<Vec<HotTheme>>>, StatusCode> {
    let mut signal = state.signal.clone();
    finished(state.loader.load_hot_themes(&mut signal).await)
}

async fn get_market_summary(
    State(state): State<AppState>,
) -> Result<Json<Loaded<MarketSummary>>, StatusCode> {
    let mut signal = state.signal.clone();
    finished(state.loader.load_market_summary(&mut signal).await)
}

#[derive(Debug, Default, Deserialize)]
struct PageParams {
    page: Option<usize>,
    page_size: Option<usize>,
}

fn parse_category(raw: &str) -> Option<StockCategory> {
    match raw {
        "recommended" => Some(StockCategory::Recommended),
        "theme" => Some(StockCategory::Theme),
        "growth" => Some(StockCategory::Growth),
        _ => None,
    }
}

async fn get_stocks(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Loaded<Page<StockRecord>>>, StatusCode> {
    let category = parse_category(&category).ok_or(StatusCode::NOT_FOUND)?;
    let page = PageRequest::new(params.page, params.page_size);
    let mut signal = state.signal.clone();
    finished(state.loader.load_stock_page(category, page, &mut signal).await)
}

#[derive(Debug, Serialize)]
struct PriceHistory {
    stock: StockRecord,
    history: Vec<PricePoint>,
}

async fn get_price_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Loaded<PriceHistory>>, StatusCode> {
    let mut signal = state.signal.clone();
    let Loaded {
        data,
        degraded,
        error,
    } = state
        .loader
        .find_stock(&id, &mut signal)
        .await
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    let stock = data.ok_or(StatusCode::NOT_FOUND)?;
    let history = state
        .loader
        .price_history(&stock, Utc::now().date_naive());
    Ok(Json(Loaded {
        data: PriceHistory { stock, history },
        degraded,
        error,
    }))
}

async fn get_portfolio() -> Json<PortfolioView> {
    Json(PortfolioView::build(sample::portfolio()))
}

async fn get_watchlist(State(state): State<AppState>) -> Json<WatchlistView> {
    Json(WatchlistView::build(&*state.watchlist.read().await))
}

async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WatchlistView>, StatusCode> {
    let mut watchlist = state.watchlist.write().await;
    if !watchlist.remove(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    tracing::info!(stock = %id, remaining = watchlist.stocks().len(), "removed from watchlist");
    Ok(Json(WatchlistView::build(&watchlist)))
}

#[derive(Debug, Default, Deserialize)]
struct NewsParams {
    limit: Option<u32>,
}

async fn load_news(
    state: &AppState,
    feed: NewsFeed,
    limit: Option<u32>,
) -> Result<Json<Loaded<Vec<NewsRecord>>>, StatusCode> {
    let mut signal = state.signal.clone();
    finished(state.loader.load_news(&feed, limit, &mut signal).await)
}

async fn get_market_news(
    State(state): State<AppState>,
    Query(params): Query<NewsParams>,
) -> Result<Json<Loaded<Vec<NewsRecord>>>, StatusCode> {
    load_news(&state, NewsFeed::Market, params.limit).await
}

async fn get_stock_news(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(params): Query<NewsParams>,
) -> Result<Json<Loaded<Vec<NewsRecord>>>, StatusCode> {
    load_news(&state, NewsFeed::Stock(ticker), params.limit).await
}

async fn get_keyword_news(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Query(params): Query<NewsParams>,
) -> Result<Json<Loaded<Vec<NewsRecord>>>, StatusCode> {
    load_news(&state, NewsFeed::Keyword(keyword), params.limit).await
}

async fn get_session(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.session.read().await.state().clone())
}

#[derive(Debug, Deserialize)]
struct SignInRequest {
    provider: IdentityProvider,
}

async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Json<SessionState> {
    let mut session = state.session.write().await;
    session.sign_in(req.provider, Utc::now());
    Json(session.state().clone())
}

async fn sign_out(State(state): State<AppState>) -> Json<SessionState> {
    let mut session = state.session.write().await;
    session.sign_out();
    Json(session.state().clone())
}

/// Waits for Ctrl-C, then cancels every in-flight load.
async fn shutdown_signal(scope: ViewScope) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
    scope.cancel();
}

fn init_sentry(settings: &recommand_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
