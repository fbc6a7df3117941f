use std::time::Instant;

use pwrwatch_platform::{BatteryState, Notifier};
use pwrwatch_protocol::{
    breakdown_total, ComponentBreakdown, SensorSnapshot, Snapshot, TotalSource,
};
use tracing::{debug, info};

use crate::config::{ALERT_TITLE, BATTERY_PROXY_WATTS};
use crate::data::history::PowerHistory;

/// Mutable state carried across ticks.
#[derive(Debug, Clone)]
pub struct RunState {
    started_at: Instant,
    last_tick: Instant,
    energy_wh: f64,
    history: PowerHistory,
    ticks: u64,
}

impl RunState {
    pub fn new(history_capacity: usize, now: Instant) -> Self {
        Self {
            started_at: now,
            last_tick: now,
            energy_wh: 0.0,
            history: PowerHistory::new(history_capacity),
            ticks: 0,
        }
    }
}

/// Battery-derived total: a discharge-rate proxy from the charge level.
pub fn battery_proxy_watts(battery: &BatteryState) -> f32 {
    battery.percent.clamp(0.0, 100.0) * BATTERY_PROXY_WATTS / 100.0
}

pub fn alert_message(total_watts: f32) -> String {
    format!("Current system power draw is {:.1}W", total_watts)
}

/// Turns per-component power into a published [`Snapshot`]: picks the
/// total, integrates energy, appends history and raises the alert.
pub struct Aggregator<N: Notifier> {
    state: RunState,
    has_battery: bool,
    alert_watts: f32,
    notifier: N,
}

impl<N: Notifier> Aggregator<N> {
    pub fn new(
        has_battery: bool,
        alert_watts: f32,
        history_capacity: usize,
        notifier: N,
        now: Instant,
    ) -> Self {
        Self {
            state: RunState::new(history_capacity, now),
            has_battery,
            alert_watts,
            notifier,
        }
    }

    pub fn aggregate(
        &mut self,
        components: ComponentBreakdown,
        battery: Option<BatteryState>,
        sensors: SensorSnapshot,
        now: Instant,
    ) -> Snapshot {
        let (total_power_watts, total_source) = match battery {
            Some(b) if self.has_battery && b.on_battery() => {
                (battery_proxy_watts(&b), TotalSource::Battery)
            }
            _ => (breakdown_total(&components), TotalSource::Components),
        };

        let elapsed = now.saturating_duration_since(self.state.last_tick);
        self.state.energy_wh += f64::from(total_power_watts.max(0.0)) * elapsed.as_secs_f64() / 3600.0;
        if now > self.state.last_tick {
            self.state.last_tick = now;
        }
        self.state.history.push(total_power_watts);
        self.state.ticks += 1;

        let over_threshold = total_power_watts > self.alert_watts;
        if over_threshold {
            info!(total_power_watts, threshold = self.alert_watts, "Power draw over threshold");
            self.notifier
                .notify(ALERT_TITLE, &alert_message(total_power_watts));
        }

        debug!(
            tick = self.state.ticks,
            total_power_watts,
            source = total_source.label(),
            elapsed_ms = elapsed.as_millis() as u64,
            energy_wh = self.state.energy_wh,
            history = self.state.history.len(),
            history_capacity = self.state.history.capacity(),
            "Aggregated tick"
        );

        Snapshot {
            tick: self.state.ticks,
            total_power_watts,
            total_source,
            components,
            run_time_secs: now
                .saturating_duration_since(self.state.started_at)
                .as_secs_f64(),
            energy_wh: self.state.energy_wh,
            history: self.state.history.to_vec(),
            over_threshold,
            sensors,
            ..Snapshot::default()
        }
    }
}
