use crate::core::fetch::FallbackChain;
use crate::core::placeholder::PlaceholderGenerator;
use crate::core::sanitize::{sanitize_filename, sanitize_stem, LOGO_EXTENSION};
use crate::domain::model::{Company, LogoStatus, ProcessOutcome, RunSummary};
use crate::domain::ports::{HttpFetcher, LogoStore};
use crate::utils::error::Result;
use std::time::Duration;

enum Step {
    Done(ProcessOutcome),
    Produce(String),
}

/// Walks the company list one entry at a time and keeps the logo directory filled.
///
/// A company whose derived file already exists is skipped before any network
/// or render work. Per-company failures are counted, never propagated.
pub struct LogoEngine<S: LogoStore> {
    store: S,
    companies: Vec<Company>,
    request_delay: Duration,
}

impl<S: LogoStore> LogoEngine<S> {
    pub fn new(store: S, companies: Vec<Company>) -> Self {
        Self {
            store,
            companies,
            request_delay: Duration::ZERO,
        }
    }

    /// Pause after each company that needed network requests.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Downloads real logos through the fallback chain.
    pub async fn fetch<F: HttpFetcher>(&self, chain: &FallbackChain<F>) -> RunSummary {
        let mut summary = RunSummary::default();
        let total = self.companies.len();

        for (index, company) in self.companies.iter().enumerate() {
            let file_name = match self.prepare(index, company).await {
                Step::Done(outcome) => {
                    summary.record(&outcome);
                    continue;
                }
                Step::Produce(file_name) => file_name,
            };

            let outcome = match chain.fetch(&company.name).await {
                Some(logo) => {
                    let outcome = ProcessOutcome::Fetched {
                        source: logo.source,
                    };
                    self.save(&file_name, &logo.bytes, outcome).await
                }
                None => ProcessOutcome::Failed {
                    reason: "no source returned a usable logo".to_string(),
                },
            };

            self.report(index, company, &outcome);
            summary.record(&outcome);
            self.pause(index, total).await;
        }

        summary
    }

    /// Draws placeholders for every company without a logo file.
    pub async fn generate(&self, generator: &PlaceholderGenerator) -> RunSummary {
        let mut summary = RunSummary::default();

        for (index, company) in self.companies.iter().enumerate() {
            let file_name = match self.prepare(index, company).await {
                Step::Done(outcome) => {
                    summary.record(&outcome);
                    continue;
                }
                Step::Produce(file_name) => file_name,
            };

            let outcome = self.draw(generator, company, &file_name).await;
            self.report(index, company, &outcome);
            summary.record(&outcome);
        }

        summary
    }

    /// Deletes every existing logo file, then draws placeholders for all companies.
    pub async fn regenerate(&self, generator: &PlaceholderGenerator) -> Result<RunSummary> {
        let removed = self.store.purge(LOGO_EXTENSION).await?;
        for file_name in &removed {
            println!("🗑️  Removed old logo: {}", file_name);
        }
        tracing::info!("Purged {} logo files from {}", removed.len(), self.store.location());

        Ok(self.generate(generator).await)
    }

    /// Real logo where one can be found, placeholder otherwise.
    pub async fn sync<F: HttpFetcher>(
        &self,
        chain: &FallbackChain<F>,
        generator: &PlaceholderGenerator,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        let total = self.companies.len();

        for (index, company) in self.companies.iter().enumerate() {
            let file_name = match self.prepare(index, company).await {
                Step::Done(outcome) => {
                    summary.record(&outcome);
                    continue;
                }
                Step::Produce(file_name) => file_name,
            };

            let outcome = match chain.fetch(&company.name).await {
                Some(logo) => {
                    let outcome = ProcessOutcome::Fetched {
                        source: logo.source,
                    };
                    self.save(&file_name, &logo.bytes, outcome).await
                }
                None => {
                    tracing::debug!("No real logo for {}, drawing placeholder", company.name);
                    self.draw(generator, company, &file_name).await
                }
            };

            self.report(index, company, &outcome);
            summary.record(&outcome);
            self.pause(index, total).await;
        }

        summary
    }

    /// Derived file name and presence on disk for every company. Writes nothing.
    pub async fn check(&self) -> Result<Vec<LogoStatus>> {
        let mut statuses = Vec::with_capacity(self.companies.len());
        for company in &self.companies {
            let file_name = sanitize_filename(&company.name);
            let exists = self.store.exists(&file_name).await?;
            statuses.push(LogoStatus {
                company: company.clone(),
                file_name,
                exists,
            });
        }
        Ok(statuses)
    }

    async fn prepare(&self, index: usize, company: &Company) -> Step {
        let total = self.companies.len();

        if sanitize_stem(&company.name).is_empty() {
            tracing::warn!("'{}' has no letters or digits to name a file after", company.name);
            let outcome = ProcessOutcome::Failed {
                reason: "name yields an empty file name".to_string(),
            };
            self.report(index, company, &outcome);
            return Step::Done(outcome);
        }

        let file_name = sanitize_filename(&company.name);
        match self.store.exists(&file_name).await {
            Ok(true) => {
                println!(
                    "⏭️  [{}/{}] {} - already exists ({})",
                    index + 1,
                    total,
                    company.name,
                    file_name
                );
                Step::Done(ProcessOutcome::Skipped)
            }
            Ok(false) => {
                println!("🔍 [{}/{}] {}", index + 1, total, company.name);
                Step::Produce(file_name)
            }
            Err(e) => {
                tracing::error!("Cannot check {}: {}", file_name, e);
                let outcome = ProcessOutcome::Failed {
                    reason: e.to_string(),
                };
                self.report(index, company, &outcome);
                Step::Done(outcome)
            }
        }
    }

    async fn draw(
        &self,
        generator: &PlaceholderGenerator,
        company: &Company,
        file_name: &str,
    ) -> ProcessOutcome {
        match generator.render(&company.name) {
            Ok(bytes) => self.save(file_name, &bytes, ProcessOutcome::Generated).await,
            Err(e) => {
                tracing::warn!("Placeholder for {} failed: {}", company.name, e);
                ProcessOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn save(&self, file_name: &str, bytes: &[u8], outcome: ProcessOutcome) -> ProcessOutcome {
        match self.store.write_file(file_name, bytes).await {
            Ok(()) => {
                tracing::debug!("Wrote {} ({} bytes)", file_name, bytes.len());
                outcome
            }
            Err(e) => {
                tracing::error!("Writing {} failed: {}", file_name, e);
                ProcessOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn report(&self, index: usize, company: &Company, outcome: &ProcessOutcome) {
        let total = self.companies.len();
        match outcome {
            ProcessOutcome::Skipped => {}
            ProcessOutcome::Fetched { source } => {
                println!("✅ {}: {}", source, company.name);
            }
            ProcessOutcome::Generated => {
                println!(
                    "🎨 Placeholder for {}: {}",
                    company.name,
                    sanitize_filename(&company.name)
                );
            }
            ProcessOutcome::Failed { reason } => {
                println!(
                    "❌ [{}/{}] {} - {}",
                    index + 1,
                    total,
                    company.name,
                    reason
                );
            }
        }
    }

    async fn pause(&self, index: usize, total: usize) {
        if !self.request_delay.is_zero() && index + 1 < total {
            tokio::time::sleep(self.request_delay).await;
        }
    }
}
