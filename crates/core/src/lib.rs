pub mod client;
pub mod dashboard;
pub mod domain;
pub mod lifetime;
pub mod listing;
pub mod mapper;
pub mod sample;
pub mod session;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
    pub const DEFAULT_PLACEHOLDER_SEED: u64 = 0x5245_434F_4D4D; // "RECOMM"

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: String,
        pub api_timeout_secs: Option<u64>,
        pub placeholder_seed: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
                api_timeout_secs: None,
                placeholder_seed: DEFAULT_PLACEHOLDER_SEED,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let api_base_url = std::env::var("RECOMMAND_API_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
            anyhow::ensure!(
                api_base_url.starts_with("http://") || api_base_url.starts_with("https://"),
                "RECOMMAND_API_URL must be an http(s) URL (got {api_base_url})"
            );

            let api_timeout_secs = match std::env::var("RECOMMAND_API_TIMEOUT_SECS") {
                Ok(s) => Some(
                    s.trim()
                        .parse::<u64>()
                        .with_context(|| format!("invalid RECOMMAND_API_TIMEOUT_SECS: {s}"))?,
                ),
                Err(_) => None,
            };

            let placeholder_seed = std::env::var("PLACEHOLDER_SEED")
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_PLACEHOLDER_SEED);

            Ok(Self {
                api_base_url,
                api_timeout_secs,
                placeholder_seed,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }
    }
}
