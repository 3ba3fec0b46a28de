use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted backend (record store + AI API)
    pub api_base_url: String,
    /// API key for the hosted backend
    pub api_key: String,
    /// Upper bound on a single AI judge call, in seconds
    pub judge_timeout_secs: u64,
    /// Maximum number of candidates offered to the judge per highlight window
    pub highlight_pool_limit: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("ANONMASK_API_URL")
                .unwrap_or_else(|_| "http://localhost:8090".to_string()),
            api_key: env::var("ANONMASK_API_KEY").unwrap_or_default(),
            judge_timeout_secs: env::var("ANONMASK_JUDGE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            highlight_pool_limit: env::var("ANONMASK_HIGHLIGHT_POOL_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
        }
    }

    pub fn judge_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.judge_timeout_secs)
    }
}
