use std::sync::Arc;

use clap::Parser;
use shiftdesk_core::clock::SystemClock;
use shiftdesk_core::ShiftdeskConfig;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use shiftdesk_server::engine::{Engine, Stores};
use shiftdesk_server::{http, seed, subsystems};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "shiftdesk.toml")]
    config: String,

    /// Start with an empty roster instead of the demo teams and agents
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Init logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Load config
    let config = match ShiftdeskConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    let stores = Stores::in_memory();
    if !args.no_seed {
        seed::seed_demo_data(&stores).await?;
    }

    let engine = Arc::new(Engine::new(
        stores,
        Arc::new(SystemClock),
        config.scheduling.clone(),
    ));

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    // Spawn the assignment tick loop
    let assign_engine = engine.clone();
    let assign_shutdown = tx.subscribe();
    tokio::spawn(async move {
        subsystems::assign::run_assignment_loop(assign_engine, assign_shutdown).await;
    });

    // Spawn the liveness sweep loop
    let sweep_engine = engine.clone();
    let sweep_shutdown = tx.subscribe();
    tokio::spawn(async move {
        subsystems::sweep::run_sweep_loop(sweep_engine, sweep_shutdown).await;
    });

    if config.http.enabled {
        http::start_http_server(engine, config, tx.subscribe()).await?;
    } else {
        let mut shutdown = tx.subscribe();
        let _ = shutdown.recv().await;
    }

    Ok(())
}
