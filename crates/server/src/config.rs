use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path to the UCI engine binary.
    pub engine_path: String,
    /// Search depth per oracle query. Deeper = higher fidelity, higher latency.
    pub search_depth: u32,
    /// Per-query timeout before the engine is considered unresponsive.
    pub eval_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            engine_path: env::var("STOCKFISH_PATH")
                .unwrap_or_else(|_| "/usr/local/bin/stockfish".to_string()),
            search_depth: env::var("SEARCH_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(engine_audit::DEFAULT_DEPTH),
            eval_timeout_secs: env::var("EVAL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
        }
    }
}
