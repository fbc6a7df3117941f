//! CPU package power (RAPL), temperatures and fan tachometers.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sysinfo::Components;
use systemstat::{Platform, System as SystemstatSystem};
use tracing::debug;

use crate::chain::{Probe, ProbeChain};
use crate::types::SensorReading;

const RAPL_PATH: &str = "/sys/class/powercap/intel-rapl";
pub(crate) const HWMON_PATH: &str = "/sys/class/hwmon";

#[derive(Debug)]
struct RaplDomain {
    path: PathBuf,
    max_energy_uj: Option<u64>,
    last_energy_uj: Option<u64>,
    last_time: Instant,
}

impl RaplDomain {
    fn energy_path(&self) -> PathBuf {
        self.path.join("energy_uj")
    }

    /// Watts since the previous call, or `None` on the first read or a
    /// failed read.
    fn sample(&mut self, now: Instant) -> Option<f32> {
        let energy_uj = read_u64(&self.energy_path())?;
        let elapsed_us = now.duration_since(self.last_time).as_micros() as u64;
        let previous = self.last_energy_uj.replace(energy_uj);
        self.last_time = now;

        let previous = previous?;
        if elapsed_us == 0 {
            return None;
        }
        let delta = energy_delta(previous, energy_uj, self.max_energy_uj);
        Some(delta as f32 / elapsed_us as f32)
    }
}

/// Energy counter difference, accounting for one wrap at `max_uj`.
fn energy_delta(previous: u64, current: u64, max_uj: Option<u64>) -> u64 {
    if current >= previous {
        return current - previous;
    }
    match max_uj {
        Some(max) if max >= previous => (max - previous) + current,
        _ => current,
    }
}

/// CPU package power from the RAPL `energy_uj` counters.
///
/// Counters are sampled on every read; the first read after discovery uses
/// the baseline taken at discovery time.
pub struct RaplPackage {
    domains: Vec<RaplDomain>,
}

impl RaplPackage {
    pub fn discover() -> Self {
        Self::discover_in(Path::new(RAPL_PATH))
    }

    fn discover_in(root: &Path) -> Self {
        let mut domains = Vec::new();

        if let Ok(entries) = fs::read_dir(root) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.join("energy_uj").exists() {
                    continue;
                }

                let name = fs::read_to_string(path.join("name"))
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default();
                if !name.contains("package") {
                    continue;
                }

                let last_energy_uj = read_u64(&path.join("energy_uj"));
                let max_energy_uj = read_u64(&path.join("max_energy_range_uj"));
                debug!(domain = %name, readable = last_energy_uj.is_some(), "Found RAPL domain");

                domains.push(RaplDomain {
                    path,
                    max_energy_uj,
                    last_energy_uj,
                    last_time: Instant::now(),
                });
            }
        }

        domains.sort_by(|a, b| a.path.cmp(&b.path));
        Self { domains }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Probe<f32> for RaplPackage {
    fn name(&self) -> &'static str {
        "rapl package"
    }

    fn read(&mut self) -> Option<f32> {
        let now = Instant::now();
        let readings: Vec<f32> = self
            .domains
            .iter_mut()
            .filter_map(|d| d.sample(now))
            .collect();

        if readings.is_empty() {
            None
        } else {
            Some(readings.iter().sum())
        }
    }
}

/// CPU real-watts chain. RAPL is the only sensor source on Linux.
pub fn cpu_power_chain() -> ProbeChain<f32> {
    let rapl = RaplPackage::discover();
    if rapl.is_empty() {
        ProbeChain::new()
    } else {
        ProbeChain::new().with(rapl)
    }
}

/// Temperature sensors from sysinfo, falling back to systemstat's CPU
/// temperature when sysinfo reports nothing.
pub fn read_temperatures(
    components: &mut Components,
    systemstat: &SystemstatSystem,
) -> Vec<SensorReading> {
    components.refresh(true);

    let mut readings: Vec<SensorReading> = components
        .iter()
        .filter_map(|c| {
            c.temperature()
                .filter(|t| t.is_finite() && *t > 0.0)
                .map(|t| SensorReading::new(c.label(), t))
        })
        .collect();

    if readings.is_empty() {
        if let Ok(temp) = systemstat.cpu_temp() {
            readings.push(SensorReading::new("CPU", temp));
        }
    }

    readings
}

/// Fan tachometers (`fan*_input`, RPM) across all hwmon chips.
pub fn read_fan_speeds(root: &Path) -> Vec<SensorReading> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut chips: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    chips.sort();

    let mut readings = Vec::new();
    for chip in chips {
        let chip_name = fs::read_to_string(chip.join("name"))
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "hwmon".to_string());

        let Ok(files) = fs::read_dir(&chip) else {
            continue;
        };
        let mut inputs: Vec<String> = files
            .flatten()
            .map(|f| f.file_name().to_string_lossy().to_string())
            .filter(|n| n.starts_with("fan") && n.ends_with("_input"))
            .collect();
        inputs.sort();

        for input in inputs {
            let Some(rpm) = read_u64(&chip.join(&input)) else {
                continue;
            };
            let index = input.trim_start_matches("fan").trim_end_matches("_input");
            let label = fs::read_to_string(chip.join(format!("fan{}_label", index)))
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|_| format!("{} fan{}", chip_name, index));
            readings.push(SensorReading::new(label, rpm as f32));
        }
    }

    readings
}

fn read_u64(path: &Path) -> Option<u64> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pwrwatch-sensors-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_energy_delta_handles_wrap() {
        assert_eq!(energy_delta(100, 250, None), 150);
        assert_eq!(energy_delta(900, 100, Some(1000)), 200);
        assert_eq!(energy_delta(900, 100, None), 100);
    }

    #[test]
    fn test_rapl_skips_non_package_domains() {
        let root = scratch_dir("rapl-names");
        for (dir, name) in [("intel-rapl:0", "package-0"), ("intel-rapl:0:0", "core")] {
            let domain = root.join(dir);
            fs::create_dir_all(&domain).unwrap();
            fs::write(domain.join("name"), format!("{}\n", name)).unwrap();
            fs::write(domain.join("energy_uj"), "1000\n").unwrap();
        }

        let rapl = RaplPackage::discover_in(&root);
        assert_eq!(rapl.domains.len(), 1);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_rapl_reports_watts_from_counter_delta() {
        let root = scratch_dir("rapl-delta");
        let domain = root.join("intel-rapl:0");
        fs::create_dir_all(&domain).unwrap();
        fs::write(domain.join("name"), "package-0\n").unwrap();
        fs::write(domain.join("energy_uj"), "1000000\n").unwrap();

        let mut rapl = RaplPackage::discover_in(&root);
        let start = rapl.domains[0].last_time;

        fs::write(domain.join("energy_uj"), "6000000\n").unwrap();
        let watts = rapl.domains[0]
            .sample(start + Duration::from_millis(500))
            .unwrap();
        assert!((watts - 10.0).abs() < 1e-3);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_unreadable_counter_yields_none() {
        let root = scratch_dir("rapl-missing");
        let domain = root.join("intel-rapl:0");
        fs::create_dir_all(&domain).unwrap();
        fs::write(domain.join("name"), "package-0\n").unwrap();
        fs::write(domain.join("energy_uj"), "not a number\n").unwrap();

        let mut rapl = RaplPackage::discover_in(&root);
        assert_eq!(rapl.read(), None);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_fan_speeds_use_labels_when_present() {
        let root = scratch_dir("fans");
        let chip = root.join("hwmon2");
        fs::create_dir_all(&chip).unwrap();
        fs::write(chip.join("name"), "nct6775\n").unwrap();
        fs::write(chip.join("fan1_input"), "1200\n").unwrap();
        fs::write(chip.join("fan2_input"), "860\n").unwrap();
        fs::write(chip.join("fan2_label"), "Chassis\n").unwrap();

        let fans = read_fan_speeds(&root);
        assert_eq!(
            fans,
            vec![
                SensorReading::new("nct6775 fan1", 1200.0),
                SensorReading::new("Chassis", 860.0),
            ]
        );

        let _ = fs::remove_dir_all(&root);
    }
}
