use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::SNAPSHOT_VERSION;

/// A power-drawing part of the machine.
///
/// Variant order is the display order; `Ord` follows it so a
/// [`ComponentBreakdown`] iterates CPU first and Peripherals last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Cpu,
    Gpu,
    Ram,
    Disks,
    Motherboard,
    Fans,
    Display,
    Peripherals,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 8] = [
        ComponentKind::Cpu,
        ComponentKind::Gpu,
        ComponentKind::Ram,
        ComponentKind::Disks,
        ComponentKind::Motherboard,
        ComponentKind::Fans,
        ComponentKind::Display,
        ComponentKind::Peripherals,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Cpu => "CPU",
            ComponentKind::Gpu => "GPU",
            ComponentKind::Ram => "RAM",
            ComponentKind::Disks => "Disks",
            ComponentKind::Motherboard => "Motherboard",
            ComponentKind::Fans => "Fans",
            ComponentKind::Display => "Display",
            ComponentKind::Peripherals => "Peripherals",
        }
    }

    /// Fixed-overhead parts have no utilization concept.
    pub fn is_fixed_overhead(&self) -> bool {
        matches!(
            self,
            ComponentKind::Motherboard
                | ComponentKind::Fans
                | ComponentKind::Display
                | ComponentKind::Peripherals
        )
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One component's draw for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ComponentPower {
    pub power_watts: f32,
    pub usage_percent: f32,
}

impl ComponentPower {
    /// Builds a reading, clamping watts to be non-negative and usage to 0..=100.
    pub fn new(power_watts: f32, usage_percent: f32) -> Self {
        Self {
            power_watts: sanitize(power_watts).max(0.0),
            usage_percent: sanitize(usage_percent).clamp(0.0, 100.0),
        }
    }

    pub fn fixed(power_watts: f32) -> Self {
        Self::new(power_watts, 0.0)
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub type ComponentBreakdown = BTreeMap<ComponentKind, ComponentPower>;

/// Sum of every component's watts in a breakdown.
pub fn breakdown_total(components: &ComponentBreakdown) -> f32 {
    components.values().map(|c| c.power_watts).sum()
}

/// Where the published total came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TotalSource {
    /// Sum of the per-component figures.
    #[default]
    Components,
    /// Discharge-rate proxy derived from the battery charge level.
    Battery,
}

impl TotalSource {
    pub fn label(&self) -> &'static str {
        match self {
            TotalSource::Components => "components",
            TotalSource::Battery => "battery estimate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub label: String,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SensorSnapshot {
    /// Degrees Celsius.
    pub temperatures: Vec<SensorReading>,
    /// Revolutions per minute.
    pub fans: Vec<SensorReading>,
}

/// One tick's fully aggregated result, handed to renderers as a frozen value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub version: u32,
    pub timestamp: i64,
    pub tick: u64,
    pub total_power_watts: f32,
    pub total_source: TotalSource,
    pub components: ComponentBreakdown,
    pub run_time_secs: f64,
    pub energy_wh: f64,
    /// Oldest first.
    pub history: Vec<f32>,
    pub over_threshold: bool,
    pub sensors: SensorSnapshot,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Utc::now().timestamp(),
            tick: 0,
            total_power_watts: 0.0,
            total_source: TotalSource::default(),
            components: ComponentBreakdown::new(),
            run_time_secs: 0.0,
            energy_wh: 0.0,
            history: Vec::new(),
            over_threshold: false,
            sensors: SensorSnapshot::default(),
        }
    }
}

impl Snapshot {
    pub fn component(&self, kind: ComponentKind) -> Option<&ComponentPower> {
        self.components.get(&kind)
    }

    /// Sum of the component breakdown, which differs from
    /// `total_power_watts` when the battery proxy is in effect.
    pub fn components_total_watts(&self) -> f32 {
        breakdown_total(&self.components)
    }

    /// Share of the component sum drawn by `kind`, in percent.
    pub fn share_percent(&self, kind: ComponentKind) -> f32 {
        let total = self.components_total_watts();
        match self.component(kind) {
            Some(c) if total > 0.0 => c.power_watts / total * 100.0,
            _ => 0.0,
        }
    }

    pub fn energy_kwh(&self) -> f64 {
        self.energy_wh / 1000.0
    }

    /// Run time as `HH:MM:SS`; hours keep growing past 99.
    pub fn run_time_formatted(&self) -> String {
        let total = self.run_time_secs.max(0.0) as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }

    pub fn history_max(&self) -> f32 {
        self.history.iter().copied().fold(0.0_f32, f32::max)
    }

    pub fn history_average(&self) -> Option<f32> {
        if self.history.is_empty() {
            return None;
        }
        Some(self.history.iter().sum::<f32>() / self.history.len() as f32)
    }
}
