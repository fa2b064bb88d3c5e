mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use courier_cli::output::OutputFormat;
use courier_lib::DEFAULT_DEPOT;

use commands::plan::{handle_plan, PlanCommandArgs};
use commands::route::{handle_route, RouteCommandArgs};
use commands::zones::{handle_zones, ZonesCommandArgs};
use commands::{AlgorithmArg, DatasetArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Courier zone partitioning and route planning")]
struct Cli {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split pending orders into courier zones and route each courier.
    Plan {
        /// Location every courier starts from and returns to.
        #[arg(long, default_value = DEFAULT_DEPOT)]
        depot: String,
        /// Number of couriers (zones).
        #[arg(long, default_value_t = 3)]
        couriers: usize,
        /// Seed for zone partitioning.
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Independent k-means runs; the tightest partition wins.
        #[arg(long, default_value_t = 10)]
        restarts: usize,
        /// Shortest-path algorithm for each leg.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
        algorithm: AlgorithmArg,
        /// Abort a leg search after expanding this many nodes.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Compute the shortest path between two locations.
    Route {
        /// Starting location.
        #[arg(long = "from")]
        from: String,
        /// Destination location.
        #[arg(long = "to")]
        to: String,
        /// Shortest-path algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
        algorithm: AlgorithmArg,
    },
    /// Show the courier zones without routing them.
    Zones {
        /// Number of couriers (zones).
        #[arg(long, default_value_t = 3)]
        couriers: usize,
        /// Seed for zone partitioning.
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Independent k-means runs; the tightest partition wins.
        #[arg(long, default_value_t = 10)]
        restarts: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            depot,
            couriers,
            seed,
            restarts,
            algorithm,
            max_expansions,
        } => handle_plan(
            &cli.dataset,
            &PlanCommandArgs {
                depot,
                couriers,
                seed,
                restarts,
                algorithm,
                max_expansions,
            },
            cli.format,
        ),
        Command::Route {
            from,
            to,
            algorithm,
        } => handle_route(
            &cli.dataset,
            &RouteCommandArgs {
                from,
                to,
                algorithm,
            },
            cli.format,
        ),
        Command::Zones {
            couriers,
            seed,
            restarts,
        } => handle_zones(
            &cli.dataset,
            &ZonesCommandArgs {
                couriers,
                seed,
                restarts,
            },
            cli.format,
        ),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
