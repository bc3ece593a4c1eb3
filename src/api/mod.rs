pub mod client;
pub mod error;
pub mod fx;

pub use client::{Attachments, BackendClient, JournalApi};
pub use error::ApiError;
pub use fx::{normalize, FrankfurterRates, RateSource};
