use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Raw answer of a logo service, as seen by the fallback chain.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Payload accepted by the fallback chain, with the source that produced it.
#[derive(Debug, Clone)]
pub struct FetchedLogo {
    pub source: String,
    pub url: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The target file was already on disk; nothing was requested or written.
    Skipped,
    Fetched { source: String },
    Generated,
    Failed { reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub fetched: usize,
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &ProcessOutcome) {
        self.total += 1;
        match outcome {
            ProcessOutcome::Skipped => self.skipped += 1,
            ProcessOutcome::Fetched { .. } => self.fetched += 1,
            ProcessOutcome::Generated => self.generated += 1,
            ProcessOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.fetched + self.generated + self.skipped
    }

    /// Percentage of companies that ended with a logo on disk.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.succeeded() as f64 / self.total as f64 * 100.0
    }
}

/// One line of the `check` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoStatus {
    pub company: Company,
    pub file_name: String,
    pub exists: bool,
}
