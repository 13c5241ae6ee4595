//! Ordered fallback chain of logo lookups.
//!
//! Each source turns a company name into candidate URLs. The chain requests
//! them in order and returns the first payload whose status is a success and
//! whose size is strictly above the source's minimum. Nothing after the
//! accepted candidate is requested.

use crate::domain::model::FetchedLogo;
use crate::domain::ports::{HttpFetcher, LogoSource};
use std::collections::BTreeMap;
use url::Url;

pub const DEFAULT_CLEARBIT_BASE_URL: &str = "https://logo.clearbit.com";
pub const DEFAULT_FAVICON_BASE_URL: &str = "https://www.google.com";
pub const DEFAULT_ICON_BASE_URL: &str = "https://icons.duckduckgo.com";

pub const LOGO_MIN_BYTES: usize = 1000;
pub const ICON_MIN_BYTES: usize = 500;

/// Domain guesses are dropped when this short or shorter.
const MIN_DOMAIN_LEN: usize = 3;

/// Second-level domain guesses for a company name, without the `.com` suffix.
pub fn domain_candidates(company_name: &str) -> Vec<String> {
    let lowered = company_name.to_lowercase();

    let full: String = lowered
        .chars()
        .filter(|c| !matches!(c, ' ' | ',' | '.'))
        .collect();

    let before_comma: String = lowered
        .replace(' ', "")
        .split(',')
        .next()
        .unwrap_or_default()
        .replace('.', "");

    let mut domains: Vec<String> = Vec::new();
    for domain in [full, before_comma] {
        if domain.chars().count() > MIN_DOMAIN_LEN && !domains.contains(&domain) {
            domains.push(domain);
        }
    }
    domains
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Logo-by-domain service.
#[derive(Debug, Clone)]
pub struct ClearbitSource {
    base_url: String,
    min_bytes: usize,
}

impl ClearbitSource {
    pub fn new(base_url: impl Into<String>, min_bytes: usize) -> Self {
        Self {
            base_url: base_url.into(),
            min_bytes,
        }
    }
}

impl Default for ClearbitSource {
    fn default() -> Self {
        Self::new(DEFAULT_CLEARBIT_BASE_URL, LOGO_MIN_BYTES)
    }
}

impl LogoSource for ClearbitSource {
    fn name(&self) -> &str {
        "clearbit"
    }

    fn candidate_urls(&self, company: &str) -> Vec<String> {
        domain_candidates(company)
            .into_iter()
            .map(|domain| format!("{}/{}.com", trim_base(&self.base_url), domain))
            .collect()
    }

    fn min_bytes(&self) -> usize {
        self.min_bytes
    }
}

/// Favicon service keyed by domain.
#[derive(Debug, Clone)]
pub struct FaviconSource {
    base_url: String,
    min_bytes: usize,
}

impl FaviconSource {
    pub fn new(base_url: impl Into<String>, min_bytes: usize) -> Self {
        Self {
            base_url: base_url.into(),
            min_bytes,
        }
    }
}

impl Default for FaviconSource {
    fn default() -> Self {
        Self::new(DEFAULT_FAVICON_BASE_URL, ICON_MIN_BYTES)
    }
}

impl LogoSource for FaviconSource {
    fn name(&self) -> &str {
        "favicon"
    }

    fn candidate_urls(&self, company: &str) -> Vec<String> {
        let endpoint = format!("{}/s2/favicons", trim_base(&self.base_url));
        let base = match Url::parse(&endpoint) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping favicon lookup, bad endpoint {}: {}", endpoint, e);
                return Vec::new();
            }
        };

        domain_candidates(company)
            .into_iter()
            .map(|domain| {
                let mut url = base.clone();
                url.query_pairs_mut()
                    .append_pair("domain", &format!("{}.com", domain))
                    .append_pair("sz", "128");
                url.to_string()
            })
            .collect()
    }

    fn min_bytes(&self) -> usize {
        self.min_bytes
    }
}

/// Icon service addressed by the bare lowercased name.
#[derive(Debug, Clone)]
pub struct IconSource {
    base_url: String,
    min_bytes: usize,
}

impl IconSource {
    pub fn new(base_url: impl Into<String>, min_bytes: usize) -> Self {
        Self {
            base_url: base_url.into(),
            min_bytes,
        }
    }
}

impl Default for IconSource {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE_URL, ICON_MIN_BYTES)
    }
}

impl LogoSource for IconSource {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    fn candidate_urls(&self, company: &str) -> Vec<String> {
        let host = company.to_lowercase().replace(' ', "");
        if host.is_empty() {
            return Vec::new();
        }
        vec![format!("{}/ip3/{}.com.ico", trim_base(&self.base_url), host)]
    }

    fn min_bytes(&self) -> usize {
        self.min_bytes
    }
}

/// Static per-company URL table. Only exact name matches produce a candidate.
#[derive(Debug, Clone, Default)]
pub struct OverrideSource {
    urls: BTreeMap<String, String>,
    min_bytes: usize,
}

impl OverrideSource {
    pub fn new(urls: BTreeMap<String, String>, min_bytes: usize) -> Self {
        Self { urls, min_bytes }
    }
}

impl LogoSource for OverrideSource {
    fn name(&self) -> &str {
        "custom"
    }

    fn candidate_urls(&self, company: &str) -> Vec<String> {
        self.urls.get(company).cloned().into_iter().collect()
    }

    fn min_bytes(&self) -> usize {
        self.min_bytes
    }
}

pub struct FallbackChain<F: HttpFetcher> {
    fetcher: F,
    sources: Vec<Box<dyn LogoSource>>,
}

impl<F: HttpFetcher> FallbackChain<F> {
    pub fn new(fetcher: F, sources: Vec<Box<dyn LogoSource>>) -> Self {
        Self { fetcher, sources }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// First acceptable payload for `company`, or `None` once every candidate failed.
    pub async fn fetch(&self, company: &str) -> Option<FetchedLogo> {
        for source in &self.sources {
            for url in source.candidate_urls(company) {
                tracing::debug!("Trying {} for {}: {}", source.name(), company, url);

                let response = match self.fetcher.get(&url).await {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::debug!("Request to {} failed: {}", url, e);
                        continue;
                    }
                };

                if !response.is_success() {
                    tracing::debug!("{} answered with status {}", url, response.status);
                    continue;
                }

                if response.body.len() <= source.min_bytes() {
                    tracing::debug!(
                        "{} returned {} bytes, need more than {}",
                        url,
                        response.body.len(),
                        source.min_bytes()
                    );
                    continue;
                }

                return Some(FetchedLogo {
                    source: source.name().to_string(),
                    url,
                    bytes: response.body,
                });
            }
        }

        None
    }
}
