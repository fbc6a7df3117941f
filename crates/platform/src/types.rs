//! Shared types for hardware inventory and telemetry.

use std::fmt;
use std::path::PathBuf;

/// Battery charging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeState {
    /// Battery is actively charging
    Charging,
    /// Battery is discharging (on battery power)
    Discharging,
    /// Battery is full
    Full,
    /// State cannot be determined
    #[default]
    Unknown,
}

impl ChargeState {
    /// Returns a human-readable label for the charge state.
    pub fn label(&self) -> &'static str {
        match self {
            ChargeState::Charging => "Charging",
            ChargeState::Discharging => "On Battery",
            ChargeState::Full => "Full",
            ChargeState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<starship_battery::State> for ChargeState {
    fn from(state: starship_battery::State) -> Self {
        match state {
            starship_battery::State::Charging => ChargeState::Charging,
            starship_battery::State::Discharging => ChargeState::Discharging,
            starship_battery::State::Empty => ChargeState::Discharging,
            starship_battery::State::Full => ChargeState::Full,
            starship_battery::State::Unknown => ChargeState::Unknown,
        }
    }
}

/// Battery reading: charge level and whether external power is connected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryState {
    /// Charge level, 0-100.
    pub percent: f32,
    pub plugged: bool,
}

impl BatteryState {
    /// True when the machine is running from the battery.
    pub fn on_battery(&self) -> bool {
        !self.plugged
    }
}

/// Storage medium, used to pick a disk power curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiskKind {
    Ssd,
    /// Rotational or unknown media.
    #[default]
    Hdd,
}

impl DiskKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiskKind::Ssd => "SSD",
            DiskKind::Hdd => "HDD",
        }
    }
}

impl fmt::Display for DiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<sysinfo::DiskKind> for DiskKind {
    fn from(kind: sysinfo::DiskKind) -> Self {
        match kind {
            sysinfo::DiskKind::SSD => DiskKind::Ssd,
            _ => DiskKind::Hdd,
        }
    }
}

/// Capacity figures for one mounted filesystem, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

impl DiskUsage {
    pub fn used_fraction(&self) -> Option<f32> {
        if self.total_bytes == 0 {
            return None;
        }
        Some((self.used_bytes as f64 / self.total_bytes as f64) as f32)
    }
}

/// Sensor-backed power readings. Either field may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComponentWatts {
    pub cpu: Option<f32>,
    pub gpu: Option<f32>,
}

/// A labelled numeric sensor value (°C for temperatures, RPM for fans).
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub label: String,
    pub value: f32,
}

impl SensorReading {
    pub fn new(label: impl Into<String>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// CPU identity as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuInventory {
    pub name: String,
    pub physical_cores: u32,
    pub logical_threads: u32,
}

/// GPU identity. `integrated` is false only when a discrete adapter was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuInventory {
    pub name: String,
    pub integrated: bool,
}

impl Default for GpuInventory {
    fn default() -> Self {
        Self {
            name: "Integrated GPU".to_string(),
            integrated: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskInventory {
    pub device: String,
    pub mount_point: PathBuf,
    pub kind: DiskKind,
    pub usage: DiskUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_state_labels() {
        assert_eq!(ChargeState::Charging.label(), "Charging");
        assert_eq!(ChargeState::Discharging.label(), "On Battery");
        assert_eq!(ChargeState::Full.label(), "Full");
        assert_eq!(ChargeState::Unknown.label(), "Unknown");
    }

    #[test]
    fn test_battery_state_conversion() {
        assert_eq!(
            ChargeState::from(starship_battery::State::Charging),
            ChargeState::Charging
        );
        assert_eq!(
            ChargeState::from(starship_battery::State::Empty),
            ChargeState::Discharging
        );
        assert_eq!(
            ChargeState::from(starship_battery::State::Unknown),
            ChargeState::Unknown
        );
    }

    #[test]
    fn test_disk_kind_conversion() {
        assert_eq!(DiskKind::from(sysinfo::DiskKind::SSD), DiskKind::Ssd);
        assert_eq!(DiskKind::from(sysinfo::DiskKind::HDD), DiskKind::Hdd);
        assert_eq!(DiskKind::from(sysinfo::DiskKind::Unknown(-1)), DiskKind::Hdd);
    }

    #[test]
    fn test_used_fraction() {
        let usage = DiskUsage {
            total_bytes: 500,
            used_bytes: 250,
        };
        assert_eq!(usage.used_fraction(), Some(0.5));

        let empty = DiskUsage {
            total_bytes: 0,
            used_bytes: 0,
        };
        assert_eq!(empty.used_fraction(), None);
    }

    #[test]
    fn test_on_battery() {
        let unplugged = BatteryState {
            percent: 60.0,
            plugged: false,
        };
        assert!(unplugged.on_battery());
        assert!(!BatteryState {
            plugged: true,
            ..unplugged
        }
        .on_battery());
    }
}
