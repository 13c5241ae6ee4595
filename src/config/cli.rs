use crate::config::toml_config::LogoConfig;
use crate::utils::error::{LogoError, Result};
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "portal-logos")]
#[command(about = "Fetches or draws company logos for the customer portal")]
pub struct CliConfig {
    /// TOML configuration file. Built-in defaults are used without one.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the logo files
    #[arg(long)]
    pub logos_dir: Option<String>,

    /// Process only these companies (repeatable)
    #[arg(long = "company")]
    pub companies: Vec<String>,

    /// Pause between companies that needed network requests, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// TrueType font for placeholder initials
    #[arg(long)]
    pub font: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch real logos and draw placeholders for companies without one
    Sync,
    /// Fetch real logos only
    Fetch,
    /// Draw placeholder logos only
    Generate {
        /// Delete every existing logo first, then draw all placeholders again
        #[arg(long)]
        purge: bool,
    },
    /// Print the derived file name of each company and whether it exists
    Check,
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Sync)
    }

    /// Defaults, then the config file, then command line flags. The result is validated.
    pub fn resolve(&self) -> Result<LogoConfig> {
        // Purge clears the whole directory, not just the named companies.
        let purge = matches!(self.command, Some(Command::Generate { purge: true }));
        if purge && !self.companies.is_empty() {
            return Err(LogoError::ConfigValidationError {
                field: "--purge".to_string(),
                message: "cannot be combined with --company; it would delete every other logo"
                    .to_string(),
            });
        }

        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                LogoConfig::from_file(path)?
            }
            None => LogoConfig::default(),
        };

        if let Some(logos_dir) = &self.logos_dir {
            config.output.logos_dir = logos_dir.clone();
        }
        if !self.companies.is_empty() {
            config.companies = Some(self.companies.clone());
        }
        if let Some(delay) = self.delay_ms {
            config.fetch.delay_millis = delay;
        }
        if let Some(font) = &self.font {
            config.placeholder.font_path = Some(font.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs_sync_with_defaults() {
        let cli = CliConfig::parse_from(["portal-logos"]);
        assert_eq!(cli.command(), Command::Sync);

        let config = cli.resolve().unwrap();
        assert_eq!(config.company_list().len(), 43);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = CliConfig::parse_from([
            "portal-logos",
            "--logos-dir",
            "/tmp/logos",
            "--company",
            "HGS, a.s.",
            "--company",
            "ZAMET, spol. s r.o.",
            "--delay-ms",
            "0",
            "generate",
        ]);

        assert_eq!(cli.command(), Command::Generate { purge: false });

        let config = cli.resolve().unwrap();
        assert_eq!(config.logos_dir(), "/tmp/logos");
        assert_eq!(config.company_list().len(), 2);
        assert_eq!(config.fetch.delay_millis, 0);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = CliConfig::parse_from([
            "portal-logos",
            "--config",
            "/nonexistent/portal-logos.toml",
        ]);
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_purge_with_company_is_rejected() {
        let cli = CliConfig::parse_from([
            "portal-logos",
            "--company",
            "HGS, a.s.",
            "generate",
            "--purge",
        ]);

        match cli.resolve() {
            Err(LogoError::ConfigValidationError { field, .. }) => assert_eq!(field, "--purge"),
            other => panic!("expected --purge to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_purge_without_company_is_allowed() {
        let cli = CliConfig::parse_from(["portal-logos", "generate", "--purge"]);
        assert_eq!(cli.command(), Command::Generate { purge: true });
        assert!(cli.resolve().is_ok());
    }
}
