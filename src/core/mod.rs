pub mod engine;
pub mod fetch;
pub mod placeholder;
pub mod sanitize;

pub use crate::domain::model::{Company, ProcessOutcome, RunSummary};
pub use crate::domain::ports::{HttpFetcher, LogoSource, LogoStore};
pub use crate::utils::error::Result;
