use crate::adapters::http::ReqwestFetcher;
use crate::core::fetch::{
    ClearbitSource, FaviconSource, IconSource, OverrideSource, DEFAULT_CLEARBIT_BASE_URL,
    DEFAULT_FAVICON_BASE_URL, DEFAULT_ICON_BASE_URL, ICON_MIN_BYTES, LOGO_MIN_BYTES,
};
use crate::core::placeholder::{PlaceholderGenerator, PlaceholderStyle};
use crate::domain::companies::{default_companies, default_overrides};
use crate::domain::model::Company;
use crate::domain::ports::LogoSource;
use crate::utils::error::{LogoError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const SOURCE_NAMES: [&str; 4] = ["clearbit", "favicon", "duckduckgo", "custom"];

pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    /// Replaces the built-in company table when present.
    pub companies: Option<Vec<String>>,
    pub output: OutputConfig,
    pub fetch: FetchConfig,
    pub placeholder: PlaceholderConfig,
    /// Extra or replacement entries for the per-company URL table.
    pub overrides: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub logos_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            logos_dir: "./public/logos".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
    pub delay_millis: u64,
    pub user_agent: String,
    pub sources: Vec<String>,
    pub clearbit_base_url: String,
    pub favicon_base_url: String,
    pub icon_base_url: String,
    pub logo_min_bytes: usize,
    pub icon_min_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            delay_millis: 1000,
            user_agent: format!("portal-logos/{}", env!("CARGO_PKG_VERSION")),
            sources: SOURCE_NAMES.iter().map(|s| s.to_string()).collect(),
            clearbit_base_url: DEFAULT_CLEARBIT_BASE_URL.to_string(),
            favicon_base_url: DEFAULT_FAVICON_BASE_URL.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            logo_min_bytes: LOGO_MIN_BYTES,
            icon_min_bytes: ICON_MIN_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    pub size: u32,
    pub font_size: f32,
    /// TrueType font for the initials. The built-in bitmap font is used when unset or unreadable.
    pub font_path: Option<String>,
    pub circle_color: [u8; 3],
    pub text_color: [u8; 3],
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        let style = PlaceholderStyle::default();
        Self {
            size: style.size,
            font_size: style.font_size,
            font_path: Some(DEFAULT_FONT_PATH.to_string()),
            circle_color: style.circle_color,
            text_color: style.text_color,
        }
    }
}

impl LogoConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LogoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replace `${VAR}` with the environment value. Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LogoError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("output.logos_dir", &self.output.logos_dir)?;
        if let Some(companies) = &self.companies {
            validation::validate_company_names("companies", companies)?;
        }

        let fetch = &self.fetch;
        validation::validate_at_least("fetch.timeout_seconds", fetch.timeout_seconds, 1)?;
        validation::validate_non_blank("fetch.user_agent", &fetch.user_agent)?;
        validation::validate_choices("fetch.sources", &fetch.sources, &SOURCE_NAMES)?;
        validation::validate_http_url("fetch.clearbit_base_url", &fetch.clearbit_base_url)?;
        validation::validate_http_url("fetch.favicon_base_url", &fetch.favicon_base_url)?;
        validation::validate_http_url("fetch.icon_base_url", &fetch.icon_base_url)?;

        for (company, url) in &self.overrides {
            validation::validate_http_url(&format!("overrides.\"{}\"", company), url)?;
        }

        let placeholder = &self.placeholder;
        validation::validate_range("placeholder.size", placeholder.size, 16, 1024)?;
        validation::validate_range("placeholder.font_size", placeholder.font_size, 4.0, 512.0)?;
        if let Some(font_path) = &placeholder.font_path {
            validation::validate_path("placeholder.font_path", font_path)?;
        }

        Ok(())
    }

    pub fn logos_dir(&self) -> &str {
        &self.output.logos_dir
    }

    pub fn company_list(&self) -> Vec<Company> {
        match &self.companies {
            Some(names) => names.iter().map(|n| Company::new(n.trim())).collect(),
            None => default_companies(),
        }
    }

    /// Built-in URL table with the configured entries layered on top.
    pub fn logo_overrides(&self) -> BTreeMap<String, String> {
        let mut overrides = default_overrides();
        overrides.extend(self.overrides.clone());
        overrides
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_seconds)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.fetch.delay_millis)
    }

    /// Enabled sources in configured order.
    pub fn build_sources(&self) -> Vec<Box<dyn LogoSource>> {
        let fetch = &self.fetch;
        fetch
            .sources
            .iter()
            .filter_map(|name| -> Option<Box<dyn LogoSource>> {
                match name.as_str() {
                    "clearbit" => Some(Box::new(ClearbitSource::new(
                        fetch.clearbit_base_url.clone(),
                        fetch.logo_min_bytes,
                    ))),
                    "favicon" => Some(Box::new(FaviconSource::new(
                        fetch.favicon_base_url.clone(),
                        fetch.icon_min_bytes,
                    ))),
                    "duckduckgo" => Some(Box::new(IconSource::new(
                        fetch.icon_base_url.clone(),
                        fetch.icon_min_bytes,
                    ))),
                    "custom" => Some(Box::new(OverrideSource::new(
                        self.logo_overrides(),
                        fetch.icon_min_bytes,
                    ))),
                    other => {
                        tracing::warn!("Ignoring unknown logo source '{}'", other);
                        None
                    }
                }
            })
            .collect()
    }

    pub fn build_fetcher(&self) -> Result<ReqwestFetcher> {
        ReqwestFetcher::new(self.request_timeout(), &self.fetch.user_agent)
    }

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle {
            size: self.placeholder.size,
            circle_color: self.placeholder.circle_color,
            text_color: self.placeholder.text_color,
            font_size: self.placeholder.font_size,
        }
    }

    pub fn build_generator(&self) -> PlaceholderGenerator {
        PlaceholderGenerator::new(
            self.placeholder_style(),
            self.placeholder.font_path.as_deref().map(Path::new),
        )
    }
}

impl Validate for LogoConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
