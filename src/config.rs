//! Endpoint configuration.

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws";

/// Where the ops API and its push channel live.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub ws_url: String,
}

impl Config {
    /// Read `OPSDECK_API_URL` / `OPSDECK_WS_URL` from the environment (a
    /// `.env` file is loaded best-effort first), falling back to the local
    /// development server.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            api_url: std::env::var("OPSDECK_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            ws_url: std::env::var("OPSDECK_WS_URL").unwrap_or_else(|_| DEFAULT_WS_URL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
        }
    }
}
