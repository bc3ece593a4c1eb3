use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::ApiError;

/// Asset class tag on catalog instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairType {
    Crypto,
    Forex,
    Commodity,
}

impl PairType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairType::Crypto => "crypto",
            PairType::Forex => "forex",
            PairType::Commodity => "commodity",
        }
    }
}

impl FromStr for PairType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crypto" => Ok(PairType::Crypto),
            "forex" => Ok(PairType::Forex),
            "commodity" => Ok(PairType::Commodity),
            other => Err(ApiError::Validation {
                field: "type",
                reason: format!("expected crypto, forex or commodity, got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for PairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter for the instrument catalog endpoint.
#[derive(Debug, Clone, Default)]
pub struct PairQuery {
    pub pair_type: Option<PairType>,
    pub search: Option<String>,
}

/// Instrument symbols matching a catalog query.
#[derive(Debug, Clone)]
pub struct PairCatalog {
    pub pairs: Vec<String>,
    pub total: u64,
}
