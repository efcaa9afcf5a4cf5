//! property-seeder: wipe the property management database and fill it with
//! demo owners, properties, images and sale traces.
//!
//! Usage:
//!   cargo run -p property-seeder
//!   cargo run -p property-seeder -- --seed 42           # reproducible run
//!   cargo run -p property-seeder -- --db sqlite:demo.db?mode=rwc
//!   cargo run -p property-seeder -- --dry-run --seed 7  # in memory only

use chrono::Utc;
use property_core::{MemoryStore, RecordStore, TaxPolicy};
use property_seeder::{SeedSummary, Seeder, SeederConfig};
use property_store::PropertyDb;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_seeder=info,property_store=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let config = match SeederConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            print_usage();
            return Err(e.into());
        }
    };

    tracing::info!(
        "property-seeder: db={}, seed={:?}, uvt={}, dry_run={}",
        config.database_url,
        config.rng_seed,
        config.unit_value,
        config.dry_run
    );

    match run(&config).await {
        Ok(summary) => {
            tracing::info!("Seeding completed: {}", serde_json::to_string(&summary)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Error during seeding: {:?}", e);
            Err(e)
        }
    }
}

async fn run(config: &SeederConfig) -> anyhow::Result<SeedSummary> {
    let policy = TaxPolicy::with_unit_value(config.unit_value);
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let store: Box<dyn RecordStore> = if config.dry_run {
        Box::new(MemoryStore::new())
    } else {
        if !PropertyDb::exists(&config.database_url) {
            tracing::info!("Creating database {}", config.database_url);
        }
        Box::new(PropertyDb::new(&config.database_url).await?)
    };

    Seeder::new(store.as_ref(), policy)
        .run(Utc::now(), &mut rng)
        .await
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  property-seeder [--db URL] [--seed N] [--uvt VALUE] [--dry-run]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db URL       SQLite URL (env DATABASE_URL, default sqlite:property_management.db?mode=rwc)");
    eprintln!("  --seed N       Fixed RNG seed for a reproducible run (env SEED_RNG_SEED)");
    eprintln!("  --uvt VALUE    Monetary worth of one UVT (env TAX_UVT_VALUE, default 49700)");
    eprintln!("  --dry-run      Seed into memory only, leaving the database untouched");
}
