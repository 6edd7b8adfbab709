use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the POS backend. When absent the app runs against the
    /// in-memory backend with a seeded catalog.
    pub api_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = env::var("POS_API_URL").ok();
        Ok(Self { api_url })
    }
}
