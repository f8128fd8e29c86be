//! Validate the content directory.
//!
//! Usage: validate_content [--json]
//!
//! Loads every brand under `CONTENT_DIR`, validates it, and prints the report
//! as text (default) or JSON. Exits 1 when there are errors or load failures,
//! or any warnings when `FAIL_ON_WARNINGS` is set.

use anyhow::{bail, Context};
use engine_catalog::catalog::{load_dir, LoadOptions};
use engine_catalog::{CatalogConfig, ValidationOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "engine_catalog=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            other => bail!("unexpected argument '{}'\nusage: validate_content [--json]", other),
        }
    }

    let config = CatalogConfig::from_env().context("Invalid configuration")?;
    tracing::info!("Configuration:");
    tracing::info!("  CONTENT_DIR: {}", config.content_dir.display());
    tracing::info!("  SYNC_FAQ_PAGES: {}", config.sync_faq_pages);
    tracing::info!("  FAIL_ON_WARNINGS: {}", config.fail_on_warnings);

    let outcome = load_dir(&config.content_dir, &LoadOptions::from(&config))?;
    let report = outcome
        .store
        .validate_all(&ValidationOptions::from(&config))
        .with_load_failures(&outcome.failures);

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }

    let failed = report.has_errors() || (config.fail_on_warnings && report.warning_count > 0);
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
