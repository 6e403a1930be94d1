// src/main.rs

use escher::{
    bitmap::io::load_bitmap,
    config::CONFIG,
    orchestrator::{AppOrchestrator, OrchestratorStatus},
};

use anyhow::{bail, Context};
use log::{error, info};
use std::path::PathBuf;
use std::time::Duration;

/// Main entry point for the `escher` viewer.
fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "escher".to_string());
    let paths: Vec<String> = args.collect();
    if paths.len() != 1 {
        bail!("Usage: {} foo.bmp", program);
    }
    let path = PathBuf::from(&paths[0]);

    let image = load_bitmap(&path)
        .with_context(|| format!("Invalid command line arguments or unable to read image '{}'", path.display()))?;
    info!(
        "Performing Escher on {}x{} image '{}'...",
        image.width(),
        image.height(),
        path.display()
    );

    let mut driver = open_display()?;
    let mut orchestrator = AppOrchestrator::new(&mut driver, image, &CONFIG)?;
    let tick = Duration::from_millis(CONFIG.performance.tick_interval_ms);

    info!("Starting main event loop...");
    loop {
        match orchestrator.process_event_cycle() {
            Ok(OrchestratorStatus::Running) => std::thread::sleep(tick),
            Ok(OrchestratorStatus::Shutdown) => break,
            Err(e) => {
                error!("Error in event cycle: {:#}. Exiting.", e);
                return Err(e);
            }
        }
    }

    info!("Bye.");
    Ok(())
}

#[cfg(feature = "x11")]
fn open_display() -> anyhow::Result<escher::display::drivers::X11DisplayDriver> {
    use escher::display::DisplayDriver;
    escher::display::drivers::X11DisplayDriver::new().context("Unable to create window")
}

#[cfg(not(feature = "x11"))]
fn open_display() -> anyhow::Result<escher::display::drivers::HeadlessDisplayDriver> {
    bail!("Unable to create window: built without a display backend (enable the `x11` feature)")
}
