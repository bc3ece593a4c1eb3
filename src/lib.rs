pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod query;
pub mod session;
pub mod stats;
