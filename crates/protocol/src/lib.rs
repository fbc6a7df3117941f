//! Types published by the pwrwatch sampling pipeline.
//!
//! A [`Snapshot`] is produced once per tick and handed to the dashboard or
//! serialized as JSON by `pwrwatch pipe`.

mod types;
mod version;

pub use types::{
    breakdown_total, ComponentBreakdown, ComponentKind, ComponentPower, SensorReading,
    SensorSnapshot, Snapshot, TotalSource,
};
pub use version::{is_supported, MIN_SUPPORTED_VERSION, SNAPSHOT_VERSION};
