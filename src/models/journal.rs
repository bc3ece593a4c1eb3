use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::api::ApiError;

/// Currency unit the trading capital was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalType {
    Usd,
    /// US cents, 1/100 of a dollar
    Usc,
    Idr,
}

impl ModalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalType::Usd => "usd",
            ModalType::Usc => "usc",
            ModalType::Idr => "idr",
        }
    }
}

impl FromStr for ModalType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "usd" => Ok(ModalType::Usd),
            "usc" | "cent" => Ok(ModalType::Usc),
            "idr" => Ok(ModalType::Idr),
            other => Err(ApiError::Validation {
                field: "modal_type",
                reason: format!("expected usd, usc or idr, got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for ModalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl FromStr for Side {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(ApiError::Validation {
                field: "side",
                reason: format!("expected buy or sell, got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade outcome. The backend may omit the field or send an empty string
/// for trades that are still open, both map to `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinLose {
    Win,
    Lose,
    Draw,
    #[default]
    Unset,
}

impl WinLose {
    pub fn as_str(&self) -> &'static str {
        match self {
            WinLose::Win => "win",
            WinLose::Lose => "lose",
            WinLose::Draw => "draw",
            WinLose::Unset => "",
        }
    }

    /// Derive the signed profit from a user-entered magnitude.
    ///
    /// The outcome strictly determines the sign: a win is positive, a loss
    /// is negative, a draw is zero. An unset outcome leaves the value as
    /// entered.
    pub fn apply_sign(&self, magnitude: f64) -> f64 {
        match self {
            WinLose::Win => magnitude.abs(),
            WinLose::Lose => -magnitude.abs(),
            WinLose::Draw => 0.0,
            WinLose::Unset => magnitude,
        }
    }
}

impl FromStr for WinLose {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "win" => Ok(WinLose::Win),
            "lose" => Ok(WinLose::Lose),
            "draw" => Ok(WinLose::Draw),
            "" => Ok(WinLose::Unset),
            other => Err(ApiError::Validation {
                field: "win_lose",
                reason: format!("expected win, lose or draw, got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for WinLose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WinLose {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WinLose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(match value.as_deref() {
            Some("win") => WinLose::Win,
            Some("lose") => WinLose::Lose,
            Some("draw") => WinLose::Draw,
            _ => WinLose::Unset,
        })
    }
}

/// One logged trade as returned by the journal backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    /// Trading capital amount, in the unit given by `modal_type`
    pub modal: f64,
    pub modal_type: ModalType,
    /// Trade date, calendar precision
    pub tanggal: NaiveDate,
    pub pair: String,
    pub side: Side,
    pub lot: f64,
    #[serde(default)]
    pub harga_entry: Option<f64>,
    #[serde(default)]
    pub harga_take_profit: Option<f64>,
    #[serde(default)]
    pub harga_stop_loss: Option<f64>,
    /// "Before" analysis screenshot URL
    #[serde(default)]
    pub analisa_before: Option<String>,
    /// "After" analysis screenshot URL
    #[serde(default)]
    pub analisa_after: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub win_lose: WinLose,
    /// Signed profit, negative for losses
    #[serde(default)]
    pub profit: f64,
    pub created_at: DateTime<Utc>,
}

/// One page of journal entries with the backend's pagination counters.
#[derive(Debug, Clone)]
pub struct JournalPage {
    pub data: Vec<JournalEntry>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Acknowledgement returned by the delete endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAck {
    pub status: bool,
    pub message: String,
}

/// Screenshot URLs are only renderable when present and not pointing at a
/// never-uploaded file. The backend produces URLs containing the literal
/// substring "undefined" for those, they get a placeholder instead.
pub fn is_valid_image(url: Option<&str>) -> bool {
    matches!(url, Some(u) if !u.is_empty() && !u.contains("undefined"))
}

/// Loosely-typed journal input, straight from CLI flags or a form.
///
/// Validation turns it into a typed [`JournalDraft`] before anything is
/// sent over the wire, failures name the offending field.
#[derive(Debug, Clone, Default)]
pub struct JournalForm {
    pub modal: String,
    pub modal_type: String,
    pub tanggal: String,
    pub pair: String,
    pub side: String,
    pub lot: String,
    pub harga_entry: Option<String>,
    pub harga_take_profit: Option<String>,
    pub harga_stop_loss: Option<String>,
    pub reason: Option<String>,
    pub win_lose: Option<String>,
    pub profit: Option<String>,
}

/// Validated journal entry ready to submit.
#[derive(Debug, Clone)]
pub struct JournalDraft {
    pub modal: f64,
    pub modal_type: ModalType,
    pub tanggal: NaiveDate,
    pub pair: String,
    pub side: Side,
    pub lot: f64,
    pub harga_entry: Option<f64>,
    pub harga_take_profit: Option<f64>,
    pub harga_stop_loss: Option<f64>,
    pub reason: String,
    pub win_lose: WinLose,
    pub profit: f64,
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ApiError> {
    value.trim().parse::<f64>().map_err(|_| ApiError::Validation {
        field,
        reason: format!("'{}' is not a number", value),
    })
}

fn parse_optional_number(
    field: &'static str,
    value: &Option<String>,
) -> Result<Option<f64>, ApiError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_number(field, v).map(Some),
    }
}

impl JournalForm {
    pub fn validate(&self) -> Result<JournalDraft, ApiError> {
        let tanggal = NaiveDate::parse_from_str(self.tanggal.trim(), "%Y-%m-%d").map_err(|_| {
            ApiError::Validation {
                field: "tanggal",
                reason: format!("'{}' is not a YYYY-MM-DD date", self.tanggal),
            }
        })?;

        let pair = self.pair.trim().to_uppercase();
        if pair.is_empty() {
            return Err(ApiError::Validation {
                field: "pair",
                reason: "pair is required".to_string(),
            });
        }

        let side: Side = self.side.parse()?;
        let modal_type: ModalType = self.modal_type.parse()?;

        let modal = parse_number("modal", &self.modal)?;
        if modal <= 0.0 {
            return Err(ApiError::Validation {
                field: "modal",
                reason: "modal must be positive".to_string(),
            });
        }

        let lot = parse_number("lot", &self.lot)?;
        if lot <= 0.0 {
            return Err(ApiError::Validation {
                field: "lot",
                reason: "lot must be positive".to_string(),
            });
        }

        let win_lose: WinLose = match self.win_lose.as_deref() {
            None => WinLose::Unset,
            Some(v) => v.parse()?,
        };
        let profit_magnitude = match &self.profit {
            None => 0.0,
            Some(v) if v.trim().is_empty() => 0.0,
            Some(v) => parse_number("profit", v)?,
        };

        Ok(JournalDraft {
            modal,
            modal_type,
            tanggal,
            pair,
            side,
            lot,
            harga_entry: parse_optional_number("harga_entry", &self.harga_entry)?,
            harga_take_profit: parse_optional_number("harga_take_profit", &self.harga_take_profit)?,
            harga_stop_loss: parse_optional_number("harga_stop_loss", &self.harga_stop_loss)?,
            reason: self.reason.clone().unwrap_or_default(),
            win_lose,
            profit: win_lose.apply_sign(profit_magnitude),
        })
    }
}
