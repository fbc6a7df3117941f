//! Application core module.
//!
//! [`App`] owns the power monitor and the tick scheduler, keeps the latest
//! published snapshot for rendering, and tracks which overlay is open.

mod actions;
mod tui;
pub mod types;

pub use tui::run_tui;
pub use types::{Action, AppView, SourceSummary};

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use pwrwatch_protocol::Snapshot;
use tracing::{info, trace};

use crate::config::Settings;
use crate::data::{HardwareProfile, SystemMonitor};
use crate::scheduler::Scheduler;
use crate::theme::ThemeColors;

pub struct App {
    pub view: AppView,
    pub settings: Settings,
    pub sources: SourceSummary,
    pub snapshot: Option<Snapshot>,
    monitor: SystemMonitor,
    scheduler: Scheduler,
    theme: ThemeColors,
}

impl App {
    /// Detects hardware and prepares the first tick. Errors here are the
    /// only fatal ones.
    pub fn new(settings: Settings) -> Result<Self> {
        info!(refresh_ms = settings.refresh_ms, "Initializing app");

        let mut monitor = SystemMonitor::detect(&settings)?;
        let (gpu_load, cpu_watts, gpu_watts) = monitor.source_mut().probe_names();
        let scheduler = Scheduler::new(settings.tick_period(), Instant::now());

        Ok(Self {
            view: AppView::Main,
            settings,
            sources: SourceSummary {
                gpu_load,
                cpu_watts,
                gpu_watts,
            },
            snapshot: None,
            monitor,
            scheduler,
            theme: ThemeColors::default(),
        })
    }

    pub fn profile(&self) -> &HardwareProfile {
        self.monitor.profile()
    }

    pub fn current_theme(&self) -> ThemeColors {
        self.theme
    }

    pub fn is_terminated(&self) -> bool {
        self.scheduler.is_terminated()
    }

    pub fn time_until_next_tick(&self, now: Instant) -> Duration {
        self.scheduler.time_until_due(now)
    }

    pub fn last_tick_duration(&self) -> Duration {
        self.monitor.last_tick_duration()
    }

    /// Runs a tick if one is due. Returns true when a new snapshot was
    /// published.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.scheduler.begin_tick(now) {
            return false;
        }

        let snapshot = self.monitor.tick();
        self.scheduler.begin_publish();
        self.snapshot = Some(snapshot);
        self.scheduler.finish_tick(Instant::now());
        trace!(
            ticks = self.scheduler.ticks(),
            overruns = self.scheduler.overruns(),
            period_ms = self.scheduler.period().as_millis() as u64,
            state = ?self.scheduler.state(),
            "Snapshot published"
        );
        true
    }
}
