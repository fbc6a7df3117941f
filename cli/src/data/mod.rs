pub mod aggregator;
pub mod history;
pub mod monitor;
pub mod power_model;
pub mod profile;
pub mod retry;
pub mod sampler;
pub mod tdp;

pub use monitor::SystemMonitor;
pub use profile::HardwareProfile;
