mod args;
mod config;
mod console;
mod input;
mod world;

use std::sync::Arc;

use clap::Parser;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use hft_core::{command, orchestrator::Orchestrator, store::LabelStore};
use hft_observe::{init_local_offset, init_logger};

use crate::{args::Args, config::AgentConfig, console::ConsoleDrawer, input::InputLine, world::World};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Must run while the process is still single-threaded.
    init_local_offset();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
    // 1) config + logger
    let mut cfg = AgentConfig::load(args.config.as_deref())?;
    if let Some(data_file) = args.data_file {
        cfg.data_file = data_file;
    }
    init_logger(&cfg.logger)?;
    info!(data_file = ?cfg.data_file, "logger initialized");

    // 2) collaborators
    let world = Arc::new(World::new());
    let drawer = Arc::new(ConsoleDrawer::new());
    let orch = Orchestrator::builder(LabelStore::new(&cfg.data_file), drawer.clone())
        .viewers(world.clone())
        .build();

    // 3) labels
    if let Err(e) = orch.load().await {
        error!(error = %e, "cannot load floating texts, starting empty");
    }

    // 4) stdin until quit / EOF / ctrl-c
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            info!("stdin closed");
            break;
        };

        match InputLine::parse(&line) {
            Ok(InputLine::Blank) => {}
            Ok(InputLine::Quit) => break,
            Ok(InputLine::Join { id, name, dimension }) => {
                let viewer = world.join(id, name, dimension);
                orch.viewer_joined(&viewer).await;
            }
            Ok(InputLine::Leave { id }) => {
                if world.leave(id).is_none() {
                    warn!(viewer = %id, "unknown viewer");
                }
            }
            Ok(InputLine::Dimension { id, dimension }) => match world.change_dimension(id, dimension) {
                Some(viewer) => orch.dimension_changed(&viewer).await,
                None => warn!(viewer = %id, "unknown viewer"),
            },
            Ok(InputLine::Operator(line)) => {
                let out = command::run_line(&orch, &line).await;
                if out.is_success() {
                    info!("{out}");
                } else {
                    warn!("{out}");
                }
            }
            Err(e) => warn!("{e:#}"),
        }
    }

    orch.shutdown().await;
    info!(objects_left = drawer.len(), "bye");
    Ok(())
}
