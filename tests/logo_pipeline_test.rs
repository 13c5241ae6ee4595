use anyhow::Result;
use httpmock::prelude::*;
use portal_logos::{FallbackChain, LocalLogoStore, LogoConfig, LogoEngine};
use tempfile::TempDir;

fn config_for(server: &MockServer, logos_dir: &TempDir, companies: &[&str]) -> LogoConfig {
    let mut config = LogoConfig::default();
    config.companies = Some(companies.iter().map(|c| c.to_string()).collect());
    config.output.logos_dir = logos_dir.path().to_str().unwrap().to_string();
    config.fetch.delay_millis = 0;
    config.fetch.timeout_seconds = 5;
    config.fetch.clearbit_base_url = server.base_url();
    config.fetch.favicon_base_url = server.base_url();
    config.fetch.icon_base_url = server.base_url();
    config.placeholder.font_path = None;
    // Keep the built-in override table away from the network.
    for name in companies {
        config
            .overrides
            .insert(name.to_string(), server.url(format!("/custom/{}", name.len())));
    }
    config
}

fn engine_for(config: &LogoConfig) -> LogoEngine<LocalLogoStore> {
    LogoEngine::new(LocalLogoStore::new(config.logos_dir()), config.company_list())
        .with_request_delay(config.request_delay())
}

#[tokio::test]
async fn test_fetch_stops_at_first_accepted_source() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let clearbit_small = server.mock(|when, then| {
        when.method(GET).path("/absjetsas.com");
        then.status(200).body(vec![1u8; 200]);
    });
    let favicon_hit = server.mock(|when, then| {
        when.method(GET)
            .path("/s2/favicons")
            .query_param("domain", "absjetsas.com")
            .query_param("sz", "128");
        then.status(200)
            .header("Content-Type", "image/png")
            .body(vec![9u8; 800]);
    });
    let favicon_second = server.mock(|when, then| {
        when.method(GET)
            .path("/s2/favicons")
            .query_param("domain", "absjets.com");
        then.status(200).body(vec![2u8; 800]);
    });
    let custom = server.mock(|when, then| {
        when.method(GET).path_contains("/custom/");
        then.status(200).body(vec![3u8; 5000]);
    });

    let config = config_for(&server, &temp_dir, &["ABS Jets, a.s."]);
    let engine = engine_for(&config);
    let chain = FallbackChain::new(config.build_fetcher()?, config.build_sources());

    let summary = engine.fetch(&chain).await;

    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.failed, 0);
    clearbit_small.assert();
    favicon_hit.assert();
    favicon_second.assert_hits(0);
    custom.assert_hits(0);

    let written = std::fs::read(temp_dir.path().join("abs_jets_a_s.png"))?;
    assert_eq!(written, vec![9u8; 800]);
    Ok(())
}

#[tokio::test]
async fn test_rerun_makes_no_requests_for_existing_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let clearbit = server.mock(|when, then| {
        when.method(GET).path("/geomineas.com");
        then.status(200).body(vec![5u8; 2048]);
    });

    let config = config_for(&server, &temp_dir, &["Geomine a.s."]);
    let engine = engine_for(&config);
    let chain = FallbackChain::new(config.build_fetcher()?, config.build_sources());

    let first = engine.fetch(&chain).await;
    let second = engine.fetch(&chain).await;

    assert_eq!(first.fetched, 1);
    assert_eq!(second.skipped, 1);
    assert_eq!(second.fetched, 0);
    clearbit.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_existing_file_is_never_overwritten() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    std::fs::write(temp_dir.path().join("geomine_a_s.png"), b"hand-made logo")?;

    let any_request = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body(vec![5u8; 4096]);
    });

    let config = config_for(&server, &temp_dir, &["Geomine a.s."]);
    let engine = engine_for(&config);
    let chain = FallbackChain::new(config.build_fetcher()?, config.build_sources());
    let generator = config.build_generator();

    let summary = engine.sync(&chain, &generator).await;

    assert_eq!(summary.skipped, 1);
    any_request.assert_hits(0);
    assert_eq!(
        std::fs::read(temp_dir.path().join("geomine_a_s.png"))?,
        b"hand-made logo"
    );
    Ok(())
}

#[tokio::test]
async fn test_not_found_everywhere_is_counted_not_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let config = config_for(&server, &temp_dir, &["Geomine a.s.", "NYTRON s.r.o."]);
    let engine = engine_for(&config);
    let chain = FallbackChain::new(config.build_fetcher()?, config.build_sources());

    let summary = engine.fetch(&chain).await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.success_rate(), 0.0);
    assert!(!temp_dir.path().join("geomine_a_s.png").exists());
    Ok(())
}

#[tokio::test]
async fn test_sync_draws_placeholder_when_nothing_is_found() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let config = config_for(&server, &temp_dir, &["SENSIT s.r.o."]);
    let engine = engine_for(&config);
    let chain = FallbackChain::new(config.build_fetcher()?, config.build_sources());
    let generator = config.build_generator();

    let summary = engine.sync(&chain, &generator).await;

    assert_eq!(summary.generated, 1);
    let png = std::fs::read(temp_dir.path().join("sensit_s_r_o.png"))?;
    let decoded = image::load_from_memory(&png)?;
    assert_eq!((decoded.width(), decoded.height()), (80, 80));
    Ok(())
}

#[tokio::test]
async fn test_generate_with_purge_replaces_old_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    // Names produced by an older, non-collapsing naming scheme.
    std::fs::write(temp_dir.path().join("hgs__a_s_.png"), b"old")?;
    std::fs::write(temp_dir.path().join("hgs_a_s.png"), b"old")?;
    std::fs::write(temp_dir.path().join("notes.txt"), b"keep")?;

    let config = config_for(&server, &temp_dir, &["HGS, a.s.", "ZAMET, spol. s r.o."]);
    let engine = engine_for(&config);
    let generator = config.build_generator();

    let summary = engine.regenerate(&generator).await?;

    assert_eq!(summary.generated, 2);
    assert_eq!(summary.skipped, 0);
    assert!(!temp_dir.path().join("hgs__a_s_.png").exists());
    assert!(temp_dir.path().join("notes.txt").exists());
    assert_ne!(std::fs::read(temp_dir.path().join("hgs_a_s.png"))?, b"old");
    assert!(temp_dir.path().join("zamet_spol_s_r_o.png").exists());
    Ok(())
}

#[tokio::test]
async fn test_check_lists_every_company() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    std::fs::write(temp_dir.path().join("ckd_blansko_holding_a_s.png"), b"logo")?;

    let config = config_for(
        &server,
        &temp_dir,
        &["ČKD Blansko Holding, a.s.", "ABS Jets, a.s."],
    );
    let engine = engine_for(&config);

    let statuses = engine.check().await?;

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].file_name, "ckd_blansko_holding_a_s.png");
    assert!(statuses[0].exists);
    assert_eq!(statuses[1].file_name, "abs_jets_a_s.png");
    assert!(!statuses[1].exists);
    Ok(())
}
