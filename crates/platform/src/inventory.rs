//! One-time hardware discovery.

use std::collections::HashSet;

use sysinfo::{Disks, System as SysinfoSystem};
use tracing::{debug, info};

use crate::battery::BatteryMonitor;
use crate::error::{PlatformError, Result};
use crate::gpu;
use crate::types::{BatteryState, CpuInventory, DiskInventory, DiskUsage, GpuInventory};
use crate::vendor::NvidiaSmi;

/// What was found on this machine at startup.
#[derive(Debug, Clone)]
pub struct HardwareInventory {
    /// `None` when the CPU could not be identified.
    pub cpu: Option<CpuInventory>,
    pub gpu: GpuInventory,
    pub ram_bytes: u64,
    pub disks: Vec<DiskInventory>,
    /// Charge state seen at detection time; `None` without a readable battery.
    pub battery: Option<BatteryState>,
}

impl HardwareInventory {
    /// Probes CPU, memory, GPU, disks and battery.
    ///
    /// Partial failures fall back to defaults; only a machine with neither a
    /// CPU nor memory information is an error.
    pub fn detect(smi: &NvidiaSmi) -> Result<Self> {
        let mut sys = SysinfoSystem::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let cpu = detect_cpu(&sys);
        let ram_bytes = sys.total_memory();
        if cpu.is_none() && ram_bytes == 0 {
            return Err(PlatformError::NoHardware("no CPU or memory information"));
        }

        let gpu = gpu::detect_gpu(smi);
        let disks = detect_disks(&Disks::new_with_refreshed_list());
        let mut battery_monitor = BatteryMonitor::new();
        let battery = if battery_monitor.is_present() {
            battery_monitor.read()
        } else {
            None
        };

        info!(
            cpu = cpu.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
            gpu = %gpu.name,
            ram_bytes,
            disks = disks.len(),
            battery_percent = battery.map(|b| b.percent),
            "Hardware detected"
        );

        Ok(Self {
            cpu,
            gpu,
            ram_bytes,
            disks,
            battery,
        })
    }
}

fn detect_cpu(sys: &SysinfoSystem) -> Option<CpuInventory> {
    let cpus = sys.cpus();
    let first = cpus.first()?;

    // May be empty on virtual machines and some ARM boards.
    let name = first.brand().trim().to_string();

    let logical_threads = cpus.len() as u32;
    let physical_cores = SysinfoSystem::physical_core_count()
        .map(|n| n as u32)
        .unwrap_or(logical_threads)
        .max(1);

    debug!(%name, physical_cores, logical_threads, "CPU detected");
    Some(CpuInventory {
        name,
        physical_cores,
        logical_threads,
    })
}

fn detect_disks(disks: &Disks) -> Vec<DiskInventory> {
    let mut seen = HashSet::new();

    disks
        .list()
        .iter()
        .filter(|d| d.total_space() > 0)
        .filter(|d| seen.insert(d.name().to_os_string()))
        .map(|d| {
            let total_bytes = d.total_space();
            DiskInventory {
                device: d.name().to_string_lossy().to_string(),
                mount_point: d.mount_point().to_path_buf(),
                kind: d.kind().into(),
                usage: DiskUsage {
                    total_bytes,
                    used_bytes: total_bytes.saturating_sub(d.available_space()),
                },
            }
        })
        .collect()
}
