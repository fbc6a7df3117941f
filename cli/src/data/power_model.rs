//! Per-component power estimation.
//!
//! Everything here is a pure function of the hardware profile and one
//! tick's utilization readings. Sensor wattages, when present, replace the
//! CPU and GPU estimates; RAM, disks and fixed overhead are always modelled.

use pwrwatch_platform::{ComponentWatts, DiskKind, DiskUsage};
use pwrwatch_protocol::{ComponentBreakdown, ComponentKind, ComponentPower};

use crate::data::profile::{CpuProfile, FixedOverhead, GpuProfile, HardwareProfile};

/// Core count at which a TDP class applies in full.
const TDP_REFERENCE_CORES: f32 = 8.0;

const INTEGRATED_GPU_BASE_WATTS: f32 = 10.0;
const INTEGRATED_GPU_RANGE_WATTS: f32 = 5.0;

const RAM_BASE_WATTS: f32 = 3.0;
const RAM_WATTS_PER_GB: f32 = 0.5;

const SSD_BASE_WATTS: f32 = 2.0;
const SSD_RANGE_WATTS: f32 = 1.0;
const HDD_BASE_WATTS: f32 = 5.0;
const HDD_RANGE_WATTS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskSample {
    pub kind: DiskKind,
    pub usage: DiskUsage,
}

/// Utilization and sensor readings gathered for one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UtilizationSnapshot {
    /// 0-100.
    pub cpu_usage_percent: f32,
    /// 0-100.
    pub memory_usage_percent: f32,
    /// 0.0-1.0.
    pub gpu_load: f32,
    /// Disks that reported usage this tick.
    pub disks: Vec<DiskSample>,
    pub real_watts: ComponentWatts,
}

fn fraction(percent: f32) -> f32 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn cpu_power(cpu: &CpuProfile, usage_percent: f32, real_watts: Option<f32>) -> ComponentPower {
    if let Some(watts) = real_watts {
        return ComponentPower::new(watts, usage_percent);
    }

    let usage = fraction(usage_percent);
    let tdp = cpu.tdp;
    let raw = tdp.base_watts + (tdp.max_watts - tdp.base_watts) * usage;
    let core_scale = (cpu.cores as f32 / TDP_REFERENCE_CORES).min(1.0);
    ComponentPower::new(raw * core_scale, usage_percent)
}

pub fn gpu_power(gpu: &GpuProfile, load: f32, real_watts: Option<f32>) -> ComponentPower {
    let load = if load.is_finite() {
        load.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let usage_percent = load * 100.0;

    if let Some(watts) = real_watts {
        return ComponentPower::new(watts, usage_percent);
    }

    let watts = if gpu.integrated {
        INTEGRATED_GPU_BASE_WATTS + INTEGRATED_GPU_RANGE_WATTS * load
    } else {
        gpu.tdp_watts * load
    };
    ComponentPower::new(watts, usage_percent)
}

pub fn ram_power(ram_total_gb: f32, usage_percent: f32) -> ComponentPower {
    let watts = RAM_BASE_WATTS + RAM_WATTS_PER_GB * ram_total_gb * fraction(usage_percent);
    ComponentPower::new(watts, usage_percent)
}

/// Summed disk draw; usage is the mean used fraction, 0 with no disks.
pub fn disk_power(disks: &[DiskSample]) -> ComponentPower {
    let mut watts = 0.0;
    let mut used_sum = 0.0;
    let mut counted = 0usize;

    for disk in disks {
        let Some(used) = disk.usage.used_fraction() else {
            continue;
        };
        watts += match disk.kind {
            DiskKind::Ssd => SSD_BASE_WATTS + SSD_RANGE_WATTS * used,
            DiskKind::Hdd => HDD_BASE_WATTS + HDD_RANGE_WATTS * used,
        };
        used_sum += used;
        counted += 1;
    }

    let usage_percent = if counted == 0 {
        0.0
    } else {
        used_sum / counted as f32 * 100.0
    };
    ComponentPower::new(watts, usage_percent)
}

pub fn fixed_overhead(overhead: &FixedOverhead) -> [(ComponentKind, ComponentPower); 4] {
    [
        (ComponentKind::Motherboard, ComponentPower::fixed(overhead.motherboard)),
        (ComponentKind::Fans, ComponentPower::fixed(overhead.fans)),
        (ComponentKind::Display, ComponentPower::fixed(overhead.display)),
        (ComponentKind::Peripherals, ComponentPower::fixed(overhead.peripherals)),
    ]
}

/// Full per-component breakdown for one tick.
pub fn estimate(profile: &HardwareProfile, util: &UtilizationSnapshot) -> ComponentBreakdown {
    let mut components = ComponentBreakdown::new();

    components.insert(
        ComponentKind::Cpu,
        cpu_power(&profile.cpu, util.cpu_usage_percent, util.real_watts.cpu),
    );
    components.insert(
        ComponentKind::Gpu,
        gpu_power(&profile.gpu, util.gpu_load, util.real_watts.gpu),
    );
    components.insert(
        ComponentKind::Ram,
        ram_power(profile.ram_total_gb, util.memory_usage_percent),
    );
    components.insert(ComponentKind::Disks, disk_power(&util.disks));
    components.extend(fixed_overhead(&profile.overhead));

    components
}
