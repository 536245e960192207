use anyhow::Context;
use cohort_core::api;
use cohort_core::config::CohortConfig;
use cohort_core::{Contract, OracleClient, RocksDbLedger};
use log::info;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("Cohort node starting...");

    let config = CohortConfig::load()?;

    let ledger = RocksDbLedger::open(&config.database.path)
        .with_context(|| format!("Failed to open ledger at {}", config.database.path))?;
    info!("Ledger opened at {}", config.database.path);

    // The HTTP oracle owns a blocking client, so it is built before the
    // async runtime exists.
    let oracle = OracleClient::from_config(&config.oracle).context("Failed to build oracle")?;

    let contract = Arc::new(
        Contract::new(ledger, oracle).with_decode_policy(config.ledger.decode_policy),
    );
    info!("Decode policy: {:?}", contract.decode_policy());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(api::serve(contract, &config.bind_addr()))?;

    info!("Cohort node stopped");
    Ok(())
}
