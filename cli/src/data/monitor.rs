use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use pwrwatch_platform::{
    DesktopNotifier, HardwareInventory, NoopNotifier, Notifier, NvidiaSmi, SystemTelemetry,
    TelemetrySource,
};
use pwrwatch_protocol::Snapshot;
use tracing::debug;

use crate::config::{Settings, CPU_SAMPLE_WINDOW, GPU_RETRY_ATTEMPTS, GPU_RETRY_DELAY};
use crate::data::aggregator::Aggregator;
use crate::data::power_model;
use crate::data::profile::HardwareProfile;
use crate::data::retry::RetryPolicy;
use crate::data::sampler::Sampler;

pub type SystemMonitor = PowerMonitor<SystemTelemetry, Box<dyn Notifier + Send>>;

/// One tick of the pipeline: sample, estimate, aggregate.
pub struct PowerMonitor<S: TelemetrySource, N: Notifier> {
    profile: HardwareProfile,
    sampler: Sampler<S>,
    aggregator: Aggregator<N>,
    last_tick_duration: Duration,
}

impl PowerMonitor<SystemTelemetry, Box<dyn Notifier + Send>> {
    /// Detects hardware and wires the live telemetry sources. Fails only
    /// when no baseline profile can be built.
    pub fn detect(settings: &Settings) -> Result<Self> {
        let smi = NvidiaSmi::detect();
        let inventory = HardwareInventory::detect(&smi)?;
        let profile = HardwareProfile::from_inventory(&inventory);
        let telemetry = SystemTelemetry::new(smi);

        let notifier: Box<dyn Notifier + Send> = if settings.notifications {
            Box::new(DesktopNotifier::new())
        } else {
            Box::new(NoopNotifier)
        };

        Ok(Self::new(profile, telemetry, notifier, settings))
    }
}

impl<S: TelemetrySource, N: Notifier> PowerMonitor<S, N> {
    pub fn new(profile: HardwareProfile, source: S, notifier: N, settings: &Settings) -> Self {
        Self::with_timing(
            profile,
            source,
            notifier,
            settings,
            RetryPolicy::new(GPU_RETRY_ATTEMPTS, GPU_RETRY_DELAY),
            CPU_SAMPLE_WINDOW,
        )
    }

    pub fn with_timing(
        profile: HardwareProfile,
        source: S,
        notifier: N,
        settings: &Settings,
        gpu_retry: RetryPolicy,
        cpu_window: Duration,
    ) -> Self {
        let sampler = Sampler::new(source, &profile, gpu_retry, cpu_window);
        let aggregator = Aggregator::new(
            profile.has_battery(),
            settings.alert_watts,
            settings.history_capacity,
            notifier,
            Instant::now(),
        );

        Self {
            profile,
            sampler,
            aggregator,
            last_tick_duration: Duration::ZERO,
        }
    }

    pub fn profile(&self) -> &HardwareProfile {
        &self.profile
    }

    pub fn source_mut(&mut self) -> &mut S {
        self.sampler.source_mut()
    }

    /// Wall time the previous tick spent sampling and aggregating.
    pub fn last_tick_duration(&self) -> Duration {
        self.last_tick_duration
    }

    pub fn tick(&mut self) -> Snapshot {
        let started = Instant::now();
        let sample = self.sampler.sample();
        let components = power_model::estimate(&self.profile, &sample.utilization);

        let now = Instant::now();
        let snapshot = self
            .aggregator
            .aggregate(components, sample.battery, sample.sensors, now);

        self.last_tick_duration = now.duration_since(started);
        debug!(
            tick = snapshot.tick,
            sample_ms = self.last_tick_duration.as_millis() as u64,
            "Monitor tick complete"
        );
        snapshot
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use pwrwatch_platform::{
        BatteryState, ComponentWatts, DiskKind, DiskUsage, Notifier, SensorReading,
        TelemetrySource,
    };

    use crate::data::profile::{CpuProfile, DiskProfile, FixedOverhead, GpuProfile, HardwareProfile};
    use crate::data::tdp::CpuTdpClass;

    /// In-memory telemetry with scripted GPU load readings.
    #[derive(Default)]
    pub struct ScriptedTelemetry {
        pub cpu_percent: Option<f32>,
        pub memory_percent: Option<f32>,
        pub gpu_loads: VecDeque<Option<f32>>,
        pub gpu_calls: usize,
        pub cpu_window_calls: usize,
        pub real_watts: ComponentWatts,
        pub battery: Option<BatteryState>,
        pub disks: Vec<(PathBuf, DiskUsage)>,
        pub disk_refreshes: usize,
        pub disk_lookups: usize,
        pub temperatures: Vec<SensorReading>,
    }

    impl TelemetrySource for ScriptedTelemetry {
        fn cpu_usage_percent(&mut self) -> Option<f32> {
            self.cpu_percent
        }

        fn cpu_usage_over(&mut self, _window: Duration) -> Option<f32> {
            self.cpu_window_calls += 1;
            self.cpu_percent
        }

        fn memory_usage_percent(&mut self) -> Option<f32> {
            self.memory_percent
        }

        fn refresh_disks(&mut self) {
            self.disk_refreshes += 1;
        }

        fn disk_usage(&mut self, mount_point: &Path) -> Option<DiskUsage> {
            self.disk_lookups += 1;
            self.disks
                .iter()
                .find(|(m, _)| m == mount_point)
                .map(|(_, u)| *u)
        }

        fn gpu_load(&mut self) -> Option<f32> {
            self.gpu_calls += 1;
            self.gpu_loads.pop_front().flatten()
        }

        fn real_component_watts(&mut self) -> ComponentWatts {
            self.real_watts
        }

        fn battery_state(&mut self) -> Option<BatteryState> {
            self.battery
        }

        fn temperatures(&mut self) -> Vec<SensorReading> {
            self.temperatures.clone()
        }

        fn fan_speeds(&mut self) -> Vec<SensorReading> {
            Vec::new()
        }
    }

    #[derive(Default, Clone)]
    pub struct RecordingNotifier {
        pub sent: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl RecordingNotifier {
        pub fn count(&self) -> usize {
            self.sent.lock().map(|s| s.len()).unwrap_or(0)
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, _title: &str, message: &str) {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(message.to_string());
            }
        }
    }

    pub fn desktop_profile() -> HardwareProfile {
        HardwareProfile {
            cpu: CpuProfile {
                name: "Intel(R) Core(TM) i7-10700K".to_string(),
                cores: 8,
                threads: 16,
                tdp: CpuTdpClass::new(65.0, 200.0),
            },
            gpu: GpuProfile {
                name: "NVIDIA GeForce RTX 3080".to_string(),
                integrated: false,
                tdp_watts: 320.0,
            },
            ram_total_gb: 16.0,
            disks: vec![
                DiskProfile {
                    device: "/dev/nvme0n1p2".to_string(),
                    mount_point: PathBuf::from("/"),
                    kind: DiskKind::Ssd,
                    total_bytes: 1000,
                },
                DiskProfile {
                    device: "/dev/sdb1".to_string(),
                    mount_point: PathBuf::from("/mnt/archive"),
                    kind: DiskKind::Hdd,
                    total_bytes: 1000,
                },
            ],
            overhead: FixedOverhead::default(),
            battery: None,
        }
    }
}
