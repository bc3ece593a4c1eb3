pub mod auth;
pub mod dashboard;
pub mod journal;
pub mod pairs;

pub use auth::*;
pub use dashboard::*;
pub use journal::*;
pub use pairs::*;
