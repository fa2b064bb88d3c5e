//! `zones` command: show the courier zones without routing them.

use anyhow::{Context, Result};

use courier_cli::output::{emit, OutputFormat};
use courier_lib::{partition_orders, PartitionOptions, ZonesSummary};

use super::DatasetArgs;

/// Arguments for the zones command.
#[derive(Debug, Clone)]
pub struct ZonesCommandArgs {
    pub couriers: usize,
    pub seed: u64,
    pub restarts: usize,
}

pub fn handle_zones(
    dataset: &DatasetArgs,
    args: &ZonesCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let data = dataset.load()?;
    let options = PartitionOptions {
        clusters: args.couriers,
        seed: args.seed,
        restarts: args.restarts,
        ..PartitionOptions::default()
    };
    let zones = partition_orders(&data.orders, &data.registry, &options)
        .context("failed to partition orders")?;

    let summary = ZonesSummary::from_zones(args.couriers, &zones);
    emit(format, || summary.render_text(), || summary.to_json())?;
    Ok(())
}
