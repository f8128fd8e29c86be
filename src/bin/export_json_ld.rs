//! Print the JSON-LD script element for one engine page.
//!
//! Usage: export_json_ld <brand> <engine>
//!
//! Exits 2 when the brand or engine does not exist.

use anyhow::{bail, Context};
use engine_catalog::catalog::{load_dir, LoadOptions};
use engine_catalog::schema_org::json_ld;
use engine_catalog::CatalogConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "engine_catalog=warn,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (brand, engine) = match args.as_slice() {
        [brand, engine] => (brand.as_str(), engine.as_str()),
        _ => bail!("usage: export_json_ld <brand> <engine>"),
    };

    let config = CatalogConfig::from_env().context("Invalid configuration")?;
    let outcome = load_dir(&config.content_dir, &LoadOptions::from(&config))?;

    let record = match outcome.store.get_engine(brand, engine) {
        Ok(record) => record,
        Err(err) => {
            eprintln!("{}", err);
            let what = if err.is_unknown_brand() {
                "brands".to_string()
            } else {
                format!("engines for '{}'", err.brand())
            };
            eprintln!("available {}: {}", what, outcome.store.alternatives(&err).join(", "));
            std::process::exit(2);
        }
    };

    let script = json_ld::script_tag(&record.schema)
        .with_context(|| format!("Failed to serialise JSON-LD for {}.{}", brand, engine))?;
    println!("{}", script);
    Ok(())
}
