use std::time::Duration;

use color_eyre::eyre::Result;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::Settings;
use crate::data::SystemMonitor;

/// Runs the sampling pipeline without a terminal UI and prints one JSON
/// snapshot per tick. `samples == 0` runs until Ctrl-C.
pub fn run(settings: &Settings, samples: u32, compact: bool) -> Result<()> {
    let mut monitor = SystemMonitor::detect(settings)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(sample_loop(
        &mut monitor,
        settings.tick_period(),
        samples,
        compact,
    ))
}

async fn sample_loop(
    monitor: &mut SystemMonitor,
    period: Duration,
    samples: u32,
    compact: bool,
) -> Result<()> {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut counter = 0u32;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = monitor.tick();
                debug!(
                    tick = snapshot.tick,
                    total_watts = snapshot.total_power_watts,
                    "Pipe sample"
                );

                if compact {
                    println!("{}", serde_json::to_string(&snapshot)?);
                } else {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                }

                counter += 1;
                if samples > 0 && counter >= samples {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                info!(samples = counter, "Interrupted");
                break;
            }
        }
    }

    Ok(())
}
