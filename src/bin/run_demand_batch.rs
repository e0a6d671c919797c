// Batch driver: run the demand pipeline over every SKU in a batch file.
//
// Usage:
//   cargo run --bin run_demand_batch -- <batch.json> [sales.csv] [config.json]
//
// The JSON report goes to stdout; logs go to stderr.

use anyhow::{bail, Context};
use retail_demand_engine::config::ConfigManager;
use retail_demand_engine::engine::DemandPipeline;
use retail_demand_engine::{importer, logging};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let batch_path = match args.next() {
        Some(p) => PathBuf::from(p),
        None => bail!("usage: run_demand_batch <batch.json> [sales.csv] [config.json]"),
    };
    let sales_path = args.next().map(PathBuf::from);
    let config_path = args.next().map(PathBuf::from);

    let manager = match &config_path {
        Some(path) => ConfigManager::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigManager::new(),
    };
    let config = manager
        .with_env_overrides()
        .engine_config()
        .context("invalid engine config")?;

    let batch = importer::load_batch(&batch_path, sales_path.as_deref())
        .with_context(|| format!("failed to load batch {}", batch_path.display()))?;

    let report = DemandPipeline::new(&config).run_batch(&batch);

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}
