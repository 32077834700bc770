mod config;
mod inventory;
mod player;
mod session;
mod terrain;
mod tools;
mod world_gen;

use std::path::Path;
use std::time::Duration;

use config::SimConfig;
use session::Session;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "sim.toml".into());
    let (config, missing) = if Path::new(&path).exists() {
        match SimConfig::load(&path) {
            Ok(c) => (c, false),
            Err(e) => {
                eprintln!("Failed to load {path}: {e}");
                std::process::exit(1);
            }
        }
    } else {
        (SimConfig::default(), true)
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    if missing {
        warn!("{path} not found, using built-in defaults");
    }
    info!("Wildcraft sim v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Ticks: {}, delta: {}s, realtime: {}",
        config.simulation.ticks, config.simulation.delta_seconds, config.simulation.realtime
    );

    let mut session = match Session::new(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to build the world: {e}");
            std::process::exit(1);
        }
    };

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

    // Handle Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let sim = &config.simulation;
    let delta = sim.delta_seconds.max(0.001);
    let mut tick_interval = tokio::time::interval(Duration::from_secs_f32(delta));
    let mut tick: u64 = 0;

    while sim.ticks == 0 || tick < sim.ticks {
        if sim.realtime {
            tokio::select! {
                _ = tick_interval.tick() => {}
                _ = shutdown_rx.changed() => break,
            }
        } else {
            if *shutdown_rx.borrow() {
                break;
            }
            tokio::task::yield_now().await;
        }

        session.step(delta);
        tick += 1;

        if sim.summary_interval > 0 && tick % sim.summary_interval == 0 {
            session.log_summary();
        }
        if session.player.is_dead {
            info!("Player is dead, ending session");
            break;
        }
    }

    session.log_summary();
    let stats = &session.stats;
    info!(
        "Session over after {} ticks: {} attacks ({:.0} damage), {:.0} damage taken, {} kills, {} gathers, {} items picked up, {} left on the ground, {} spawns, {} corpses removed",
        stats.ticks,
        stats.attacks,
        stats.damage_dealt,
        stats.damage_taken,
        stats.kills,
        stats.gathers,
        stats.items_picked_up,
        session.inventory.ground_items().len(),
        stats.creatures_spawned,
        stats.creatures_removed,
    );
}
