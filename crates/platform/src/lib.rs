//! Hardware inventory and live telemetry for pwrwatch.
//!
//! This crate hides where readings come from. Callers get a
//! [`HardwareInventory`] once at startup and poll a [`TelemetrySource`] on
//! every tick; sources that are missing on a given machine simply yield no
//! value.
//!
//! # Sources
//!
//! - CPU/memory/disks/temperatures: `sysinfo`, with `systemstat` fallbacks
//! - CPU package power: RAPL `energy_uj` counters
//! - GPU load and power: `nvidia-smi`, DRM sysfs counters, hwmon
//! - Battery: `starship-battery` plus the sysfs mains supply
//!
//! # Example
//!
//! ```ignore
//! use pwrwatch_platform::{HardwareInventory, NvidiaSmi, SystemTelemetry, TelemetrySource};
//!
//! let smi = NvidiaSmi::detect();
//! let inventory = HardwareInventory::detect(&smi)?;
//! let mut telemetry = SystemTelemetry::new(smi);
//! println!("GPU load: {:?}", telemetry.gpu_load());
//! ```

mod battery;
mod chain;
mod error;
mod gpu;
mod inventory;
mod notify;
mod sensors;
mod telemetry;
mod types;
mod vendor;

pub use battery::BatteryMonitor;
pub use chain::{Probe, ProbeChain};
pub use error::{PlatformError, Result};
pub use inventory::HardwareInventory;
pub use notify::{DesktopNotifier, NoopNotifier, Notifier};
pub use telemetry::{SystemTelemetry, TelemetrySource};
pub use types::{
    BatteryState, ChargeState, ComponentWatts, CpuInventory, DiskInventory, DiskKind, DiskUsage,
    GpuInventory, SensorReading,
};
pub use vendor::NvidiaSmi;
