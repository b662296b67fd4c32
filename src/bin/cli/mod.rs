//! Command handlers for the discovery CLI
//!
//! Each subcommand maps to one handler through the `match` in [`run`].

use anyhow::Context;
use node_discovery::{DiscoveryConfig, NodeHealthGenerator};
use std::path::Path;
use tracing::info;

use crate::{Cli, Commands};

pub fn load_config(file: Option<&Path>) -> anyhow::Result<DiscoveryConfig> {
    DiscoveryConfig::load(file).context("failed to load discovery configuration")
}

pub async fn run(cli: Cli, config: DiscoveryConfig) -> anyhow::Result<()> {
    info!(
        marker = %config.marker_path.display(),
        snapshot = %config.snapshot_path.display(),
        root = %config.root_id(),
        "Discovery CLI starting"
    );

    let generator = NodeHealthGenerator::with_topology(&config);

    match cli.command {
        Commands::Discover => handle_discover(&generator).await,
        Commands::Show { health, no_cache } => handle_show(&generator, &health, !no_cache).await,
        Commands::Status => handle_status(&generator),
        Commands::ClearMarker => handle_clear_marker(&generator),
    }
}

async fn handle_discover(generator: &NodeHealthGenerator) -> anyhow::Result<()> {
    let ticket = generator.start_generation().await?;
    println!("{}", ticket.state());

    // The run lives on this process's runtime, so wait for it before exiting
    let snapshot = ticket.wait().await?;
    println!(
        "{} ({} resources, generation {})",
        generator.get_status(),
        snapshot.root.node_count(),
        snapshot.generation_id
    );
    Ok(())
}

async fn handle_show(
    generator: &NodeHealthGenerator,
    rpath: &str,
    use_cache: bool,
) -> anyhow::Result<()> {
    let health_info = generator.get_node_health_info(rpath, use_cache).await?;
    println!("{health_info}");
    Ok(())
}

fn handle_status(generator: &NodeHealthGenerator) -> anyhow::Result<()> {
    let status = generator.get_status();
    match generator.marker().holder() {
        Some(holder) if status.is_busy() => println!(
            "{status} (generation {}, pid {}, since {})",
            holder.generation_id, holder.pid, holder.acquired_at
        ),
        _ => println!("{status}"),
    }
    Ok(())
}

fn handle_clear_marker(generator: &NodeHealthGenerator) -> anyhow::Result<()> {
    if generator.marker().force_clear()? {
        println!("cleared {}", generator.marker().path().display());
    } else {
        println!("no marker at {}", generator.marker().path().display());
    }
    Ok(())
}
