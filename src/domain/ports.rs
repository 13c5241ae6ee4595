use crate::domain::model::HttpResponse;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Directory of logo files, keyed by sanitized file name.
pub trait LogoStore: Send + Sync {
    fn exists(&self, file_name: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn write_file(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Removes every file with `extension` and returns the removed names.
    fn purge(
        &self,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn location(&self) -> String;
}

#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// One strategy of the fallback chain.
pub trait LogoSource: Send + Sync {
    fn name(&self) -> &str;
    /// URLs to try for `company`, in order. Empty when the source has nothing to offer.
    fn candidate_urls(&self, company: &str) -> Vec<String>;
    /// A body must be strictly larger than this to be accepted.
    fn min_bytes(&self) -> usize;
}
