//! Runtime configuration from the environment.
//!
//! `TRADELOG_API_URL` points at the journal backend, `TRADELOG_API_KEY`
//! is the public api key its auth endpoint expects. Both are required,
//! a `.env` file is honored when present.

use anyhow::{Context, Result};

pub const API_URL_VAR: &str = "TRADELOG_API_URL";
pub const API_KEY_VAR: &str = "TRADELOG_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_VAR)
            .with_context(|| format!("{} is not set", API_URL_VAR))?;
        let api_key = std::env::var(API_KEY_VAR)
            .with_context(|| format!("{} is not set", API_KEY_VAR))?;
        Ok(Self { base_url, api_key })
    }
}
