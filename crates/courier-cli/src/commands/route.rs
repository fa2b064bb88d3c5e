//! `route` command: shortest path between two locations.

use anyhow::{bail, Result};

use courier_cli::output::{emit, OutputFormat};
use courier_lib::{select_pathfinder, PathAlgorithm, PathSummary, SearchOptions};

use super::{AlgorithmArg, DatasetArgs};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub from: String,
    pub to: String,
    pub algorithm: AlgorithmArg,
}

pub fn handle_route(
    dataset: &DatasetArgs,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let data = dataset.load()?;
    data.registry.require(&args.from, "--from")?;
    data.registry.require(&args.to, "--to")?;

    let algorithm = PathAlgorithm::from(args.algorithm);
    let pathfinder = select_pathfinder(
        algorithm,
        &data.graph,
        &data.registry,
        SearchOptions::default(),
    );
    let Some(path) = pathfinder.find_path(&args.from, &args.to) else {
        bail!("No route found between {} and {}.", args.from, args.to);
    };

    let summary = PathSummary::from_path(algorithm, &path);
    emit(format, || summary.render_text(), || summary.to_json())?;
    Ok(())
}
