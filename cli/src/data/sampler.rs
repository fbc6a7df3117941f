use std::path::PathBuf;
use std::time::Duration;

use pwrwatch_platform::{BatteryState, DiskKind, SensorReading, TelemetrySource};
use pwrwatch_protocol::{self as protocol, SensorSnapshot};
use tracing::trace;

use crate::data::power_model::{DiskSample, UtilizationSnapshot};
use crate::data::profile::HardwareProfile;
use crate::data::retry::RetryPolicy;

/// Everything read from telemetry in one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickSample {
    pub utilization: UtilizationSnapshot,
    pub battery: Option<BatteryState>,
    pub sensors: SensorSnapshot,
}

/// Pulls one tick's readings from a [`TelemetrySource`].
pub struct Sampler<S: TelemetrySource> {
    source: S,
    disks: Vec<(PathBuf, DiskKind)>,
    gpu_retry: RetryPolicy,
    cpu_window: Duration,
    last_gpu_load: f32,
}

impl<S: TelemetrySource> Sampler<S> {
    pub fn new(
        source: S,
        profile: &HardwareProfile,
        gpu_retry: RetryPolicy,
        cpu_window: Duration,
    ) -> Self {
        let disks = profile
            .disks
            .iter()
            .map(|d| (d.mount_point.clone(), d.kind))
            .collect();

        Self {
            source,
            disks,
            gpu_retry,
            cpu_window,
            last_gpu_load: 0.0,
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn sample(&mut self) -> TickSample {
        let real_watts = self.source.real_component_watts();

        // With a CPU sensor the usage figure is display-only, so skip the
        // blocking measurement window.
        let cpu_usage_percent = if real_watts.cpu.is_some() {
            self.source.cpu_usage_percent()
        } else {
            self.source.cpu_usage_over(self.cpu_window)
        }
        .unwrap_or(0.0);

        let gpu_load = self.read_gpu_load();
        let gpu_load = if real_watts.gpu.is_some() && gpu_load == 0.0 {
            self.last_gpu_load
        } else {
            gpu_load
        };

        let memory_usage_percent = self.source.memory_usage_percent().unwrap_or(0.0);

        if !self.disks.is_empty() {
            self.source.refresh_disks();
        }
        let disks = self
            .disks
            .iter()
            .filter_map(|(mount, kind)| {
                let usage = self.source.disk_usage(mount);
                if usage.is_none() {
                    trace!(mount = %mount.display(), "Disk did not report usage");
                }
                usage.map(|usage| DiskSample { kind: *kind, usage })
            })
            .collect();

        let battery = self.source.battery_state();
        let sensors = SensorSnapshot {
            temperatures: to_protocol(self.source.temperatures()),
            fans: to_protocol(self.source.fan_speeds()),
        };

        TickSample {
            utilization: UtilizationSnapshot {
                cpu_usage_percent,
                memory_usage_percent,
                gpu_load,
                disks,
                real_watts,
            },
            battery,
            sensors,
        }
    }

    /// Zero is ambiguous (idle or failed read), so it is retried; the final
    /// fallback is 0.
    fn read_gpu_load(&mut self) -> f32 {
        let retry = self.gpu_retry;
        let source = &mut self.source;
        let load = retry
            .run(|| source.gpu_load(), |load| *load > 0.0)
            .unwrap_or(0.0);

        if load > 0.0 {
            self.last_gpu_load = load;
        }
        load
    }
}

fn to_protocol(readings: Vec<SensorReading>) -> Vec<protocol::SensorReading> {
    readings
        .into_iter()
        .map(|r| protocol::SensorReading {
            label: r.label,
            value: r.value,
        })
        .collect()
}
