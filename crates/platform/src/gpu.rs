//! GPU discovery plus load and power probes.
//!
//! Load sources, in fallback order:
//! 1. `nvidia-smi` utilization query
//! 2. DRM busy counters averaged across cards (`gpu_busy_percent`)
//! 3. Frequency-derived load from the i915/xe GT frequency files

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::chain::{Probe, ProbeChain};
use crate::sensors::HWMON_PATH;
use crate::types::GpuInventory;
use crate::vendor::{parse_number, NvidiaSmi};

const DRM_PATH: &str = "/sys/class/drm";
const DISCRETE_VRAM_BYTES: u64 = 1 << 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
    Other,
}

impl GpuVendor {
    fn from_pci_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "0x10de" => GpuVendor::Nvidia,
            "0x1002" => GpuVendor::Amd,
            "0x8086" => GpuVendor::Intel,
            _ => GpuVendor::Other,
        }
    }
}

/// A `/sys/class/drm/cardN` entry.
#[derive(Debug, Clone)]
pub struct DrmCard {
    pub path: PathBuf,
    pub vendor: GpuVendor,
}

impl DrmCard {
    fn device_file(&self, name: &str) -> PathBuf {
        self.path.join("device").join(name)
    }

    fn vram_bytes(&self) -> Option<u64> {
        read_u64(&self.device_file("mem_info_vram_total"))
    }

    fn product_name(&self) -> Option<String> {
        fs::read_to_string(self.device_file("product_name"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn is_discrete(&self) -> bool {
        match self.vendor {
            GpuVendor::Nvidia => true,
            GpuVendor::Amd => self.vram_bytes().unwrap_or(0) >= DISCRETE_VRAM_BYTES,
            GpuVendor::Intel | GpuVendor::Other => false,
        }
    }

    fn display_name(&self) -> String {
        if let Some(name) = self.product_name() {
            return name;
        }
        match self.vendor {
            GpuVendor::Nvidia => "NVIDIA GPU".to_string(),
            GpuVendor::Amd => "AMD Radeon Graphics".to_string(),
            GpuVendor::Intel => "Intel Graphics".to_string(),
            GpuVendor::Other => "Integrated GPU".to_string(),
        }
    }
}

/// Lists `cardN` directories under `root`, skipping connector entries
/// such as `card0-HDMI-A-1`.
pub fn discover_drm_cards(root: &Path) -> Vec<DrmCard> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut cards: Vec<DrmCard> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let index = name.strip_prefix("card")?;
            if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let path = entry.path();
            let vendor = fs::read_to_string(path.join("device").join("vendor"))
                .map(|id| GpuVendor::from_pci_id(&id))
                .unwrap_or(GpuVendor::Other);
            Some(DrmCard { path, vendor })
        })
        .collect();

    cards.sort_by(|a, b| a.path.cmp(&b.path));
    cards
}

/// Identifies the primary GPU, preferring a discrete adapter.
pub fn detect_gpu(smi: &NvidiaSmi) -> GpuInventory {
    if let Ok(name) = smi.query("name") {
        debug!(%name, "GPU identified by nvidia-smi");
        return GpuInventory {
            name,
            integrated: false,
        };
    }

    let cards = discover_drm_cards(Path::new(DRM_PATH));
    let primary = cards
        .iter()
        .find(|c| c.is_discrete())
        .or_else(|| cards.first());

    match primary {
        Some(card) => GpuInventory {
            name: card.display_name(),
            integrated: !card.is_discrete(),
        },
        None => GpuInventory::default(),
    }
}

/// Builds the GPU load fallback chain for this machine.
pub fn load_chain(smi: NvidiaSmi) -> ProbeChain<f32> {
    let cards = discover_drm_cards(Path::new(DRM_PATH));
    let mut chain = ProbeChain::new();

    if smi.is_available() {
        chain = chain.with(NvidiaSmiLoad { smi });
    }

    let busy = DrmBusyPercent::from_cards(&cards);
    if !busy.paths.is_empty() {
        chain = chain.with(busy);
    }

    let freq = GpuFrequencyLoad::from_cards(&cards);
    if !freq.cards.is_empty() {
        chain = chain.with(freq);
    }

    chain
}

/// Builds the GPU real-watts fallback chain (hwmon sensor, then vendor CLI).
pub fn power_chain(smi: NvidiaSmi) -> ProbeChain<f32> {
    let mut chain = ProbeChain::new();

    if let Some(path) = discover_gpu_hwmon(Path::new(HWMON_PATH)) {
        chain = chain.with(HwmonGpuPower { path });
    }
    if smi.is_available() {
        chain = chain.with(NvidiaSmiPower { smi });
    }

    chain
}

pub struct NvidiaSmiLoad {
    smi: NvidiaSmi,
}

impl Probe<f32> for NvidiaSmiLoad {
    fn name(&self) -> &'static str {
        "nvidia-smi utilization"
    }

    fn read(&mut self) -> Option<f32> {
        self.smi
            .query_f32("utilization.gpu")
            .map(|pct| (pct / 100.0).clamp(0.0, 1.0))
            .ok()
    }
}

pub struct NvidiaSmiPower {
    smi: NvidiaSmi,
}

impl Probe<f32> for NvidiaSmiPower {
    fn name(&self) -> &'static str {
        "nvidia-smi power.draw"
    }

    fn read(&mut self) -> Option<f32> {
        self.smi.query_f32("power.draw").ok().filter(|w| *w >= 0.0)
    }
}

/// Average of the per-card DRM busy counters.
pub struct DrmBusyPercent {
    paths: Vec<PathBuf>,
}

impl DrmBusyPercent {
    pub fn from_cards(cards: &[DrmCard]) -> Self {
        let paths = cards
            .iter()
            .map(|c| c.device_file("gpu_busy_percent"))
            .filter(|p| p.exists())
            .collect();
        Self { paths }
    }
}

impl Probe<f32> for DrmBusyPercent {
    fn name(&self) -> &'static str {
        "drm gpu_busy_percent"
    }

    fn read(&mut self) -> Option<f32> {
        let readings: Vec<f32> = self
            .paths
            .iter()
            .filter_map(|p| fs::read_to_string(p).ok())
            .filter_map(|s| parse_number(&s))
            .collect();

        if readings.is_empty() {
            return None;
        }
        let avg = readings.iter().sum::<f32>() / readings.len() as f32;
        Some((avg / 100.0).clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone)]
struct FrequencyFiles {
    current: PathBuf,
    min: PathBuf,
    max: PathBuf,
}

impl FrequencyFiles {
    fn for_card(card: &Path) -> Option<Self> {
        let legacy = Self {
            current: card.join("gt_cur_freq_mhz"),
            min: card.join("gt_min_freq_mhz"),
            max: card.join("gt_max_freq_mhz"),
        };
        if legacy.current.exists() {
            return Some(legacy);
        }

        let gt0 = card.join("gt").join("gt0");
        let rps = Self {
            current: gt0.join("rps_cur_freq_mhz"),
            min: gt0.join("rps_min_freq_mhz"),
            max: gt0.join("rps_max_freq_mhz"),
        };
        rps.current.exists().then_some(rps)
    }

    fn load(&self) -> Option<f32> {
        let current = read_u64(&self.current)? as f32;
        let min = read_u64(&self.min).unwrap_or(0) as f32;
        let max = read_u64(&self.max)? as f32;
        frequency_load(current, min, max)
    }
}

fn frequency_load(current: f32, min: f32, max: f32) -> Option<f32> {
    if max <= min {
        return None;
    }
    Some(((current - min) / (max - min)).clamp(0.0, 1.0))
}

/// Load approximated from the GT clock's position between its min and max.
pub struct GpuFrequencyLoad {
    cards: Vec<FrequencyFiles>,
}

impl GpuFrequencyLoad {
    pub fn from_cards(cards: &[DrmCard]) -> Self {
        let cards = cards
            .iter()
            .filter_map(|c| FrequencyFiles::for_card(&c.path))
            .collect();
        Self { cards }
    }
}

impl Probe<f32> for GpuFrequencyLoad {
    fn name(&self) -> &'static str {
        "gt frequency load"
    }

    fn read(&mut self) -> Option<f32> {
        self.cards
            .iter()
            .filter_map(FrequencyFiles::load)
            .fold(None, |acc: Option<f32>, v| Some(acc.map_or(v, |a| a.max(v))))
    }
}

/// hwmon power reading in microwatts for a GPU driver.
pub struct HwmonGpuPower {
    path: PathBuf,
}

impl Probe<f32> for HwmonGpuPower {
    fn name(&self) -> &'static str {
        "hwmon gpu power"
    }

    fn read(&mut self) -> Option<f32> {
        read_u64(&self.path).map(|microwatts| microwatts as f32 / 1_000_000.0)
    }
}

fn discover_gpu_hwmon(root: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(root).ok()?;

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(name) = fs::read_to_string(path.join("name")) else {
            continue;
        };
        let name = name.trim().to_lowercase();
        if ["amdgpu", "i915", "xe", "nouveau"]
            .iter()
            .any(|driver| name.contains(driver))
        {
            for file in ["power1_average", "power1_input"] {
                let power_path = path.join(file);
                if power_path.exists() {
                    return Some(power_path);
                }
            }
        }
    }

    None
}

fn read_u64(path: &Path) -> Option<u64> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}
