//! Battery presence, charge level and AC state.

use std::fs;
use std::path::Path;

use starship_battery::units::ratio::percent;
use starship_battery::Manager;
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{BatteryState, ChargeState};

const POWER_SUPPLY_PATH: &str = "/sys/class/power_supply";

/// Reads the first system battery through `starship-battery`.
pub struct BatteryMonitor {
    manager: Option<Manager>,
}

impl BatteryMonitor {
    pub fn new() -> Self {
        let manager = match Manager::new() {
            Ok(manager) => Some(manager),
            Err(e) => {
                warn!(error = %e, "Battery backend unavailable");
                None
            }
        };
        Self { manager }
    }

    /// True when at least one battery is attached.
    pub fn is_present(&self) -> bool {
        self.first_battery().ok().flatten().is_some()
    }

    pub fn read(&mut self) -> Option<BatteryState> {
        match self.first_battery() {
            Ok(Some(battery)) => {
                let charge = ChargeState::from(battery.state());
                let state = BatteryState {
                    percent: battery.state_of_charge().get::<percent>().clamp(0.0, 100.0),
                    plugged: is_plugged(charge, mains_online(Path::new(POWER_SUPPLY_PATH))),
                };
                Some(state)
            }
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "Battery read failed");
                None
            }
        }
    }

    fn first_battery(&self) -> Result<Option<starship_battery::Battery>> {
        let Some(manager) = &self.manager else {
            return Ok(None);
        };
        match manager.batteries()?.next() {
            Some(battery) => Ok(Some(battery?)),
            None => Ok(None),
        }
    }
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// A mains supply's `online` flag wins; otherwise infer from the charge state.
fn is_plugged(charge: ChargeState, mains: Option<bool>) -> bool {
    if let Some(online) = mains {
        return online;
    }
    match charge {
        ChargeState::Charging | ChargeState::Full => true,
        ChargeState::Discharging => false,
        ChargeState::Unknown => true,
    }
}

/// `Some(true)` if any `Mains` supply reports online, `None` when the
/// machine exposes no mains supply at all.
fn mains_online(root: &Path) -> Option<bool> {
    let entries = fs::read_dir(root).ok()?;
    let mut found = false;

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(kind) = fs::read_to_string(path.join("type")) else {
            continue;
        };
        if kind.trim() != "Mains" {
            continue;
        }
        found = true;
        if let Ok(online) = fs::read_to_string(path.join("online")) {
            if online.trim() == "1" {
                return Some(true);
            }
        }
    }

    found.then_some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pwrwatch-battery-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn supply(root: &Path, name: &str, kind: &str, online: Option<&str>) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("type"), format!("{}\n", kind)).unwrap();
        if let Some(online) = online {
            fs::write(dir.join("online"), format!("{}\n", online)).unwrap();
        }
    }

    #[test]
    fn test_mains_flag_overrides_charge_state() {
        assert!(is_plugged(ChargeState::Discharging, Some(true)));
        assert!(!is_plugged(ChargeState::Full, Some(false)));
    }

    #[test]
    fn test_charge_state_used_without_mains_supply() {
        assert!(is_plugged(ChargeState::Charging, None));
        assert!(is_plugged(ChargeState::Full, None));
        assert!(!is_plugged(ChargeState::Discharging, None));
    }

    #[test]
    fn test_mains_online_detection() {
        let root = scratch_dir("mains");
        supply(&root, "BAT0", "Battery", None);
        assert_eq!(mains_online(&root), None);

        supply(&root, "AC", "Mains", Some("0"));
        assert_eq!(mains_online(&root), Some(false));

        supply(&root, "ACAD", "Mains", Some("1"));
        assert_eq!(mains_online(&root), Some(true));

        let _ = fs::remove_dir_all(&root);
    }
}
