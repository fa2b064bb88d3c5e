//! `plan` command: partition the pending orders and route every courier.

use anyhow::{Context, Result};
use tracing::warn;

use courier_cli::output::{emit, OutputFormat};
use courier_lib::{plan_deliveries, PartitionOptions, PlanSummary, PlannerConfig, SearchOptions};

use super::{AlgorithmArg, DatasetArgs};

/// Arguments for the plan command.
#[derive(Debug, Clone)]
pub struct PlanCommandArgs {
    pub depot: String,
    pub couriers: usize,
    pub seed: u64,
    pub restarts: usize,
    pub algorithm: AlgorithmArg,
    pub max_expansions: Option<usize>,
}

impl PlanCommandArgs {
    fn to_config(&self) -> PlannerConfig {
        PlannerConfig {
            depot: self.depot.clone(),
            partition: PartitionOptions {
                clusters: self.couriers,
                seed: self.seed,
                restarts: self.restarts,
                ..PartitionOptions::default()
            },
            algorithm: self.algorithm.into(),
            search: SearchOptions {
                max_expansions: self.max_expansions,
            },
        }
    }
}

pub fn handle_plan(
    dataset: &DatasetArgs,
    args: &PlanCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let data = dataset.load()?;
    let plan = plan_deliveries(&data.registry, &data.graph, &data.orders, &args.to_config())
        .context("failed to build delivery plan")?;

    if plan.warning_count() > 0 {
        warn!(
            warnings = plan.warning_count(),
            "some stops could not be reached and were skipped"
        );
    }

    let summary = PlanSummary::from_plan(&plan);
    emit(format, || summary.render_text(), || summary.to_json())?;
    Ok(())
}
