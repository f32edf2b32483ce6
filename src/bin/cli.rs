//! CLI for placement planning

use anyhow::Context;
use clap::{Parser, Subcommand};
use clusterplan::{
    Planner, PlannerConfig, StaticZoneDirectory, UserIntent, ZoneCatalog, ZoneDirectory,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clusterplan")]
#[command(about = "Cluster placement planner")]
#[command(version)]
struct Cli {
    /// Zone catalog file (TOML)
    #[arg(long, default_value = "zones.toml")]
    zones: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan placement and node configuration for a cluster
    Plan {
        /// Candidate regions (comma-separated region codes)
        #[arg(long, value_delimiter = ',', required = true)]
        regions: Vec<String>,

        /// Spread replicas across multiple AZs
        #[arg(long)]
        multi_az: bool,

        /// Region code that should carry the majority of replicas
        #[arg(long)]
        preferred_region: Option<String>,

        /// Instance type for every node
        #[arg(long, default_value = "m3.medium")]
        instance_type: String,

        /// Replication factor
        #[arg(long, default_value = "3")]
        replication_factor: usize,

        /// Node name prefix
        #[arg(long, default_value = "cluster")]
        name_prefix: String,

        /// RNG seed, for reproducible plans
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the regions and zones in the catalog
    Zones,
}

fn load_directory(path: &PathBuf) -> anyhow::Result<StaticZoneDirectory> {
    let catalog: ZoneCatalog = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .build()
        .with_context(|| format!("failed to read zone catalog {}", path.display()))?
        .try_deserialize()
        .context("invalid zone catalog")?;
    Ok(StaticZoneDirectory::from_catalog(&catalog))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let directory = load_directory(&cli.zones)?;

    match cli.command {
        Commands::Plan {
            regions,
            multi_az,
            preferred_region,
            instance_type,
            replication_factor,
            name_prefix,
            seed,
        } => {
            let region_list = regions
                .iter()
                .map(|code| {
                    directory
                        .region_id_by_code(code)
                        .with_context(|| format!("unknown region code: {}", code))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let preferred = preferred_region
                .as_deref()
                .map(|code| {
                    directory
                        .region_id_by_code(code)
                        .with_context(|| format!("unknown region code: {}", code))
                })
                .transpose()?;

            let intent = UserIntent {
                is_multi_az: multi_az,
                preferred_region: preferred,
                region_list,
                instance_type,
                replication_factor,
            };

            let config = PlannerConfig::default();
            let mut planner = match seed {
                Some(seed) => Planner::with_seed(directory, config, seed),
                None => Planner::new(directory, config),
            };
            let plan = planner.plan(&intent, None, &name_prefix)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }

        Commands::Zones => {
            for (id, code) in directory.regions() {
                println!("{}  {}", id, code);
                for az in directory.azs_for_region(id)? {
                    println!("  {}  {}  subnet={}", az.id, az.name, az.subnet_id);
                }
            }
        }
    }

    Ok(())
}
