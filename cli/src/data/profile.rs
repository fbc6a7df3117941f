use std::path::PathBuf;

use pwrwatch_platform::{BatteryState, DiskKind, HardwareInventory};

use crate::data::tdp::{self, CpuTdpClass};

const BYTES_PER_GB: f64 = 1_073_741_824.0;
const UNKNOWN_CPU: &str = "Unknown CPU";

#[derive(Debug, Clone, PartialEq)]
pub struct CpuProfile {
    pub name: String,
    pub cores: u32,
    pub threads: u32,
    pub tdp: CpuTdpClass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpuProfile {
    pub name: String,
    pub integrated: bool,
    pub tdp_watts: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskProfile {
    pub device: String,
    pub mount_point: PathBuf,
    pub kind: DiskKind,
    pub total_bytes: u64,
}

/// Constant draw of components without a utilization signal, in watts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOverhead {
    pub motherboard: f32,
    pub fans: f32,
    pub display: f32,
    pub peripherals: f32,
}

impl Default for FixedOverhead {
    fn default() -> Self {
        Self {
            motherboard: 30.0,
            fans: 10.0,
            display: 20.0,
            peripherals: 15.0,
        }
    }
}

impl FixedOverhead {
    pub fn total(&self) -> f32 {
        self.motherboard + self.fans + self.display + self.peripherals
    }
}

/// Static description of the machine, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareProfile {
    pub cpu: CpuProfile,
    pub gpu: GpuProfile,
    pub ram_total_gb: f32,
    pub disks: Vec<DiskProfile>,
    pub overhead: FixedOverhead,
    /// Battery as seen at detection time.
    pub battery: Option<BatteryState>,
}

impl HardwareProfile {
    pub fn has_battery(&self) -> bool {
        self.battery.is_some()
    }

    /// Detection-time battery line, e.g. `80% (plugged in)`.
    pub fn battery_summary(&self) -> String {
        match &self.battery {
            Some(b) if b.on_battery() => format!("{:.0}% (on battery)", b.percent),
            Some(b) => format!("{:.0}% (plugged in)", b.percent),
            None => "none".to_string(),
        }
    }

    pub fn from_inventory(inventory: &HardwareInventory) -> Self {
        let cpu = match &inventory.cpu {
            Some(cpu) if cpu.name.is_empty() => CpuProfile {
                name: UNKNOWN_CPU.to_string(),
                cores: cpu.physical_cores.max(1),
                threads: cpu.logical_threads.max(1),
                tdp: tdp::CPU_UNKNOWN,
            },
            Some(cpu) => CpuProfile {
                name: cpu.name.clone(),
                cores: cpu.physical_cores.max(1),
                threads: cpu.logical_threads.max(1),
                tdp: tdp::cpu_tdp(&cpu.name),
            },
            None => {
                let threads = std::thread::available_parallelism()
                    .map(|n| n.get() as u32)
                    .unwrap_or(1);
                CpuProfile {
                    name: UNKNOWN_CPU.to_string(),
                    cores: threads,
                    threads,
                    tdp: tdp::CPU_UNKNOWN,
                }
            }
        };

        let gpu = GpuProfile {
            name: inventory.gpu.name.clone(),
            integrated: inventory.gpu.integrated,
            tdp_watts: if inventory.gpu.integrated {
                tdp::GPU_INTEGRATED_WATTS
            } else {
                tdp::gpu_tdp(&inventory.gpu.name)
            },
        };

        let disks = inventory
            .disks
            .iter()
            .map(|d| DiskProfile {
                device: d.device.clone(),
                mount_point: d.mount_point.clone(),
                kind: d.kind,
                total_bytes: d.usage.total_bytes,
            })
            .collect();

        Self {
            cpu,
            gpu,
            ram_total_gb: (inventory.ram_bytes as f64 / BYTES_PER_GB) as f32,
            disks,
            overhead: FixedOverhead::default(),
            battery: inventory.battery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwrwatch_platform::{CpuInventory, DiskInventory, DiskUsage, GpuInventory};

    fn inventory() -> HardwareInventory {
        HardwareInventory {
            cpu: Some(CpuInventory {
                name: "AMD Ryzen 7 5800X 8-Core Processor".to_string(),
                physical_cores: 8,
                logical_threads: 16,
            }),
            gpu: GpuInventory {
                name: "NVIDIA GeForce RTX 3080".to_string(),
                integrated: false,
            },
            ram_bytes: 32 * 1_073_741_824,
            disks: vec![DiskInventory {
                device: "/dev/nvme0n1p2".to_string(),
                mount_point: PathBuf::from("/"),
                kind: DiskKind::Ssd,
                usage: DiskUsage {
                    total_bytes: 500,
                    used_bytes: 250,
                },
            }],
            battery: None,
        }
    }

    #[test]
    fn test_profile_keeps_detected_battery() {
        let mut inv = inventory();
        assert!(!HardwareProfile::from_inventory(&inv).has_battery());
        assert_eq!(HardwareProfile::from_inventory(&inv).battery_summary(), "none");

        inv.battery = Some(BatteryState {
            percent: 72.4,
            plugged: false,
        });
        let profile = HardwareProfile::from_inventory(&inv);
        assert!(profile.has_battery());
        assert_eq!(profile.battery, inv.battery);
        assert_eq!(profile.battery_summary(), "72% (on battery)");

        inv.battery = Some(BatteryState {
            percent: 100.0,
            plugged: true,
        });
        assert_eq!(
            HardwareProfile::from_inventory(&inv).battery_summary(),
            "100% (plugged in)"
        );
    }

    #[test]
    fn test_profile_from_inventory() {
        let profile = HardwareProfile::from_inventory(&inventory());
        assert_eq!(profile.cpu.tdp, CpuTdpClass::new(65.0, 180.0));
        assert_eq!(profile.cpu.cores, 8);
        assert_eq!(profile.gpu.tdp_watts, 320.0);
        assert_eq!(profile.ram_total_gb, 32.0);
        assert_eq!(profile.disks.len(), 1);
        assert_eq!(profile.overhead.total(), 75.0);
    }

    #[test]
    fn test_integrated_gpu_uses_fixed_tdp() {
        let mut inv = inventory();
        inv.gpu = GpuInventory::default();
        let profile = HardwareProfile::from_inventory(&inv);
        assert!(profile.gpu.integrated);
        assert_eq!(profile.gpu.name, "Integrated GPU");
        assert_eq!(profile.gpu.tdp_watts, 15.0);
    }

    #[test]
    fn test_unknown_cpu_defaults() {
        let mut inv = inventory();
        inv.cpu = None;
        let profile = HardwareProfile::from_inventory(&inv);
        assert_eq!(profile.cpu.name, "Unknown CPU");
        assert_eq!(profile.cpu.tdp, tdp::CPU_UNKNOWN);
        assert!(profile.cpu.cores >= 1);
    }

    #[test]
    fn test_unnamed_cpu_keeps_core_counts() {
        let mut inv = inventory();
        if let Some(cpu) = inv.cpu.as_mut() {
            cpu.name.clear();
        }
        let profile = HardwareProfile::from_inventory(&inv);
        assert_eq!(profile.cpu.name, "Unknown CPU");
        assert_eq!(profile.cpu.tdp, tdp::CPU_UNKNOWN);
        assert_eq!(profile.cpu.threads, 16);
    }
}
