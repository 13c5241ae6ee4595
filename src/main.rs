use clap::Parser;
use portal_logos::utils::logger::{self, LogFormat};
use portal_logos::{
    CliConfig, Command, FallbackChain, LocalLogoStore, LogoConfig, LogoEngine, LogoError,
    RunSummary,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_logger(LogFormat::from_flag(cli.log_json), cli.verbose);

    tracing::info!("Starting portal-logos");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ Run aborted: {} (Severity: {:?})", e, e.severity());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), LogoError> {
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            return Err(e);
        }
    };

    let store = LocalLogoStore::new(config.logos_dir());
    let command = cli.command();
    if command != Command::Check {
        store.ensure_dir().await?;
    }

    let engine = LogoEngine::new(store, config.company_list())
        .with_request_delay(config.request_delay());
    let total = engine.companies().len();

    let summary = match command {
        Command::Check => {
            print_check_report(&engine).await?;
            return Ok(());
        }
        Command::Fetch => {
            print_fetch_banner(&config, total);
            let chain = FallbackChain::new(config.build_fetcher()?, config.build_sources());
            engine.fetch(&chain).await
        }
        Command::Generate { purge } => {
            println!("🎨 Drawing placeholder logos for {} companies...", total);
            let generator = config.build_generator();
            if generator.uses_builtin_font() {
                tracing::info!("Using built-in bitmap font for initials");
            }
            if purge {
                engine.regenerate(&generator).await?
            } else {
                engine.generate(&generator).await
            }
        }
        Command::Sync => {
            print_fetch_banner(&config, total);
            let chain = FallbackChain::new(config.build_fetcher()?, config.build_sources());
            let generator = config.build_generator();
            engine.sync(&chain, &generator).await
        }
    };

    print_summary(&summary, config.logos_dir());
    Ok(())
}

fn print_fetch_banner(config: &LogoConfig, total: usize) {
    println!("🌐 Fetching {} logos...", total);
    println!("🔄 Sources: {}", config.fetch.sources.join(", "));
    println!("{}", "-".repeat(60));
}

async fn print_check_report(engine: &LogoEngine<LocalLogoStore>) -> Result<(), LogoError> {
    let statuses = engine.check().await?;

    println!("📁 Logo files in {}:", engine.store().base_path().display());
    println!("{}", "-".repeat(60));
    for status in &statuses {
        let mark = if status.exists { "✅" } else { "❌" };
        println!("{} {} -> {}", mark, status.company.name, status.file_name);
    }

    let present = statuses.iter().filter(|s| s.exists).count();
    println!("{}", "-".repeat(60));
    println!("📊 {} of {} logos present", present, statuses.len());
    Ok(())
}

fn print_summary(summary: &RunSummary, logos_dir: &str) {
    println!("{}", "-".repeat(60));
    println!("📊 Summary:");
    println!("🌐 Fetched: {}", summary.fetched);
    println!("🎨 Generated: {}", summary.generated);
    println!("⏭️  Already present: {}", summary.skipped);
    println!("❌ Failed: {}", summary.failed);
    println!("📁 Logos stored in: {}", logos_dir);
    println!("📈 Success rate: {:.1}%", summary.success_rate());

    tracing::info!(
        total = summary.total,
        fetched = summary.fetched,
        generated = summary.generated,
        skipped = summary.skipped,
        failed = summary.failed,
        "Run finished"
    );
}
