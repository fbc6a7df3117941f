//! Thermal-design-power classes looked up from hardware names.
//!
//! Tables are ordered; the first rule whose patterns all appear in the name
//! wins. CPU patterns are matched case-sensitively against the marketing
//! name, GPU patterns against the lowercased name.

/// Base and maximum package power for a CPU tier, in watts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuTdpClass {
    pub base_watts: f32,
    pub max_watts: f32,
}

impl CpuTdpClass {
    pub const fn new(base_watts: f32, max_watts: f32) -> Self {
        Self {
            base_watts,
            max_watts,
        }
    }
}

pub struct TdpRule<T: 'static> {
    pub patterns: &'static [&'static str],
    pub class: T,
}

impl<T> TdpRule<T> {
    fn matches(&self, name: &str) -> bool {
        self.patterns.iter().all(|p| name.contains(p))
    }
}

/// Class for names no rule matches.
pub const CPU_FALLBACK: CpuTdpClass = CpuTdpClass::new(35.0, 95.0);

/// Class used when the CPU could not be identified at all.
pub const CPU_UNKNOWN: CpuTdpClass = CpuTdpClass::new(65.0, 150.0);

pub const CPU_TDP_TABLE: &[TdpRule<CpuTdpClass>] = &[
    TdpRule {
        patterns: &["Intel", "i9"],
        class: CpuTdpClass::new(65.0, 250.0),
    },
    TdpRule {
        patterns: &["Intel", "i7"],
        class: CpuTdpClass::new(65.0, 200.0),
    },
    TdpRule {
        patterns: &["Intel", "i5"],
        class: CpuTdpClass::new(65.0, 150.0),
    },
    TdpRule {
        patterns: &["Intel", "i3"],
        class: CpuTdpClass::new(35.0, 110.0),
    },
    TdpRule {
        patterns: &["Intel"],
        class: CpuTdpClass::new(35.0, 95.0),
    },
    TdpRule {
        patterns: &["AMD", "Ryzen 9"],
        class: CpuTdpClass::new(105.0, 230.0),
    },
    TdpRule {
        patterns: &["AMD", "Ryzen 7"],
        class: CpuTdpClass::new(65.0, 180.0),
    },
    TdpRule {
        patterns: &["AMD", "Ryzen 5"],
        class: CpuTdpClass::new(65.0, 150.0),
    },
    TdpRule {
        patterns: &["AMD"],
        class: CpuTdpClass::new(35.0, 95.0),
    },
];

/// Board power for discrete GPUs no rule matches.
pub const GPU_FALLBACK_WATTS: f32 = 150.0;

/// Nominal TDP recorded for integrated graphics.
pub const GPU_INTEGRATED_WATTS: f32 = 15.0;

pub const GPU_TDP_TABLE: &[TdpRule<f32>] = &[
    TdpRule {
        patterns: &["rtx 4090"],
        class: 450.0,
    },
    TdpRule {
        patterns: &["rtx 4080"],
        class: 320.0,
    },
    TdpRule {
        patterns: &["rtx 3090"],
        class: 350.0,
    },
    TdpRule {
        patterns: &["rtx 3080"],
        class: 320.0,
    },
    TdpRule {
        patterns: &["rtx 3070"],
        class: 220.0,
    },
    TdpRule {
        patterns: &["rtx 3060"],
        class: 170.0,
    },
    TdpRule {
        patterns: &["rx 7900"],
        class: 300.0,
    },
    TdpRule {
        patterns: &["rx 6800"],
        class: 250.0,
    },
];

pub fn first_match<T: Copy>(table: &[TdpRule<T>], name: &str) -> Option<T> {
    table.iter().find(|rule| rule.matches(name)).map(|rule| rule.class)
}

pub fn cpu_tdp(name: &str) -> CpuTdpClass {
    first_match(CPU_TDP_TABLE, name).unwrap_or(CPU_FALLBACK)
}

pub fn gpu_tdp(name: &str) -> f32 {
    first_match(GPU_TDP_TABLE, &name.to_lowercase()).unwrap_or(GPU_FALLBACK_WATTS)
}
