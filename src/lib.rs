pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{LocalLogoStore, ReqwestFetcher};
pub use crate::config::LogoConfig;
pub use crate::core::{
    engine::LogoEngine,
    fetch::FallbackChain,
    placeholder::PlaceholderGenerator,
    sanitize::sanitize_filename,
};
pub use crate::domain::model::{Company, LogoStatus, ProcessOutcome, RunSummary};
pub use crate::utils::error::{LogoError, Result};
