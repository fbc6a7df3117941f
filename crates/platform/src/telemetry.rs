//! Live utilization and sensor readings.
//!
//! [`TelemetrySource`] is the seam between the power model and the machine.
//! Every method degrades to `None` (or an empty list) instead of failing;
//! callers never see adapter errors.

use std::path::Path;
use std::thread;
use std::time::Duration;

use sysinfo::{Components, Disks, System as SysinfoSystem};
use systemstat::{Platform, System as SystemstatSystem};
use tracing::trace;

use crate::battery::BatteryMonitor;
use crate::chain::ProbeChain;
use crate::gpu;
use crate::sensors::{self, HWMON_PATH};
use crate::types::{BatteryState, ComponentWatts, DiskUsage, SensorReading};
use crate::vendor::NvidiaSmi;

/// Source of per-tick utilization and sensor readings.
pub trait TelemetrySource {
    /// System-wide CPU utilization since the previous call, 0-100.
    fn cpu_usage_percent(&mut self) -> Option<f32>;

    /// CPU utilization measured across a fixed window, 0-100. Blocks for
    /// `window`.
    fn cpu_usage_over(&mut self, window: Duration) -> Option<f32>;

    /// Physical memory in use, 0-100.
    fn memory_usage_percent(&mut self) -> Option<f32>;

    /// Rescans disk capacity figures. Called once per tick before any
    /// [`disk_usage`](Self::disk_usage) lookups.
    fn refresh_disks(&mut self) {}

    /// Usage for `mount_point` as of the last [`refresh_disks`](Self::refresh_disks).
    fn disk_usage(&mut self, mount_point: &Path) -> Option<DiskUsage>;

    /// GPU load fraction, 0.0-1.0. `Some(0.0)` may mean idle or a failed read.
    fn gpu_load(&mut self) -> Option<f32>;

    fn real_component_watts(&mut self) -> ComponentWatts;

    fn battery_state(&mut self) -> Option<BatteryState>;

    fn temperatures(&mut self) -> Vec<SensorReading>;

    fn fan_speeds(&mut self) -> Vec<SensorReading>;
}

/// [`TelemetrySource`] backed by sysinfo, systemstat, sysfs and vendor tools.
pub struct SystemTelemetry {
    sysinfo: SysinfoSystem,
    systemstat: SystemstatSystem,
    disks: Disks,
    components: Components,
    gpu_load: ProbeChain<f32>,
    cpu_watts: ProbeChain<f32>,
    gpu_watts: ProbeChain<f32>,
    battery: BatteryMonitor,
}

impl SystemTelemetry {
    pub fn new(smi: NvidiaSmi) -> Self {
        let mut sysinfo = SysinfoSystem::new();
        // Prime the counters so the first delta is meaningful.
        sysinfo.refresh_cpu_usage();

        Self {
            sysinfo,
            systemstat: SystemstatSystem::new(),
            disks: Disks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
            gpu_load: gpu::load_chain(smi),
            cpu_watts: sensors::cpu_power_chain(),
            gpu_watts: gpu::power_chain(smi),
            battery: BatteryMonitor::new(),
        }
    }

    /// Names of the configured probes: (gpu load, cpu watts, gpu watts).
    pub fn probe_names(&self) -> (Vec<&'static str>, Vec<&'static str>, Vec<&'static str>) {
        (
            self.gpu_load.names(),
            self.cpu_watts.names(),
            self.gpu_watts.names(),
        )
    }
}

impl TelemetrySource for SystemTelemetry {
    fn cpu_usage_percent(&mut self) -> Option<f32> {
        self.sysinfo.refresh_cpu_usage();
        if self.sysinfo.cpus().is_empty() {
            return None;
        }
        Some(self.sysinfo.global_cpu_usage().clamp(0.0, 100.0))
    }

    fn cpu_usage_over(&mut self, window: Duration) -> Option<f32> {
        self.sysinfo.refresh_cpu_usage();
        thread::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.cpu_usage_percent()
    }

    fn memory_usage_percent(&mut self) -> Option<f32> {
        let mem = self.systemstat.memory().ok()?;
        let total = mem.total.as_u64();
        if total == 0 {
            return None;
        }
        let used = total.saturating_sub(mem.free.as_u64());
        Some((used as f64 / total as f64 * 100.0) as f32)
    }

    fn refresh_disks(&mut self) {
        self.disks.refresh(true);
    }

    fn disk_usage(&mut self, mount_point: &Path) -> Option<DiskUsage> {
        let disk = self
            .disks
            .list()
            .iter()
            .find(|d| d.mount_point() == mount_point)?;

        let total_bytes = disk.total_space();
        if total_bytes == 0 {
            return None;
        }
        Some(DiskUsage {
            total_bytes,
            used_bytes: total_bytes.saturating_sub(disk.available_space()),
        })
    }

    fn gpu_load(&mut self) -> Option<f32> {
        let (source, load) = self.gpu_load.read_with_source()?;
        trace!(source, load, "GPU load");
        Some(load)
    }

    fn real_component_watts(&mut self) -> ComponentWatts {
        ComponentWatts {
            cpu: self.cpu_watts.read(),
            gpu: self.gpu_watts.read(),
        }
    }

    fn battery_state(&mut self) -> Option<BatteryState> {
        self.battery.read()
    }

    fn temperatures(&mut self) -> Vec<SensorReading> {
        sensors::read_temperatures(&mut self.components, &self.systemstat)
    }

    fn fan_speeds(&mut self) -> Vec<SensorReading> {
        sensors::read_fan_speeds(Path::new(HWMON_PATH))
    }
}
