//! Configuration model — LED clusters, animation effects, per-cluster settings.
//!
//! The `led_anim` driver exposes three LED clusters. Each cluster carries a
//! brightness, an animation effect, a color and an effect cycle duration.
//! All bounds live here so the mutator, the settings store and the sync
//! engine agree on them.

/// Maximum brightness value accepted by the `led_anim` firmware.
pub const MAX_BRIGHTNESS: i32 = 100;

/// Brightness change per left/right press.
pub const BRIGHTNESS_STEP: i32 = 10;

/// Maximum effect cycle duration in milliseconds.
pub const MAX_DURATION: i32 = 5000;

/// Duration change per left/right press, in milliseconds.
pub const DURATION_STEP: i32 = 500;

/// Largest packed 24-bit RGB value.
pub const MAX_COLOR: u32 = 0xFF_FFFF;

/// Number of LED clusters.
pub const CLUSTER_COUNT: usize = 3;

/// Number of animation effects recognized by the driver.
pub const EFFECT_COUNT: usize = 8;

/// Fixed color palette used outside extended color mode.
///
/// Order matters: left/right walks this table with wraparound.
pub static PALETTE: [(u32, &str); 17] = [
    (0xFF_0000, "Red"),
    (0xFF_8080, "Light Red"),
    (0x80_0000, "Maroon"),
    (0xFF_0080, "Hot Pink"),
    (0xFF_8000, "Orange"),
    (0x00_FF00, "Green"),
    (0x00_FF80, "Lime"),
    (0xFF_FF00, "Yellow"),
    (0x80_8000, "Olive"),
    (0x00_00FF, "Blue"),
    (0x00_80FF, "Light Blue"),
    (0x00_0080, "Navy"),
    (0x00_FFFF, "Cyan"),
    (0x00_8080, "Teal"),
    (0xFF_00FF, "Magenta"),
    (0xFF_80C0, "Pink"),
    (0xFF_FFFF, "White"),
];

// ── Clusters ──

/// One physical LED group controlled as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedCluster {
    Front,
    Top,
    Back,
}

impl LedCluster {
    /// All clusters in ordinal order.
    pub const ALL: [LedCluster; CLUSTER_COUNT] =
        [LedCluster::Front, LedCluster::Top, LedCluster::Back];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Cluster at `index`, wrapping with floor modulo (negative indices wrap from the end).
    pub fn from_index(index: i64) -> LedCluster {
        Self::ALL[index.rem_euclid(CLUSTER_COUNT as i64) as usize]
    }

    /// Human-readable name shown on screen.
    pub fn display_name(self) -> &'static str {
        match self {
            LedCluster::Front => "Front LED",
            LedCluster::Top => "Top LED",
            LedCluster::Back => "Back LED",
        }
    }

    /// Fixed short name used as the section header in the settings file.
    pub fn internal_name(self) -> &'static str {
        match self {
            LedCluster::Front => "f1f2",
            LedCluster::Top => "m",
            LedCluster::Back => "lr",
        }
    }

    /// Reverse of [`internal_name`](Self::internal_name). Unknown names yield `None`.
    pub fn from_internal_name(name: &str) -> Option<LedCluster> {
        Self::ALL.into_iter().find(|c| c.internal_name() == name)
    }
}

// ── Effects ──

/// Blink/breathe patterns understood by the driver (see `led_anim/help`).
///
/// The discriminant is the value written to the `effect_*` control files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEffect {
    Disable = 0,
    Linear = 1,
    Breath = 2,
    Sniff = 3,
    Static = 4,
    Blink1 = 5,
    Blink2 = 6,
    Blink3 = 7,
}

impl AnimationEffect {
    pub const ALL: [AnimationEffect; EFFECT_COUNT] = [
        AnimationEffect::Disable,
        AnimationEffect::Linear,
        AnimationEffect::Breath,
        AnimationEffect::Sniff,
        AnimationEffect::Static,
        AnimationEffect::Blink1,
        AnimationEffect::Blink2,
        AnimationEffect::Blink3,
    ];

    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Effect for `ordinal`, clamped into `0..EFFECT_COUNT`.
    pub fn from_ordinal_clamped(ordinal: i64) -> AnimationEffect {
        Self::ALL[ordinal.clamp(0, EFFECT_COUNT as i64 - 1) as usize]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AnimationEffect::Disable => "Disabled",
            AnimationEffect::Linear => "Linear",
            AnimationEffect::Breath => "Breath",
            AnimationEffect::Sniff => "Sniff",
            AnimationEffect::Static => "Static",
            AnimationEffect::Blink1 => "Blink 1",
            AnimationEffect::Blink2 => "Blink 2",
            AnimationEffect::Blink3 => "Blink 3",
        }
    }
}

impl std::str::FromStr for AnimationEffect {
    type Err = crate::BrickledError;

    /// Accepts an ordinal (`"5"`) or a name, ignoring case, spaces and dashes
    /// (`"blink-1"`, `"Blink 1"`, `"disabled"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        if let Ok(n) = wanted.parse::<usize>() {
            return Self::ALL.get(n).copied().ok_or_else(|| {
                crate::BrickledError::Settings(format!(
                    "effect {n} out of range (0-{})",
                    EFFECT_COUNT - 1
                ))
            });
        }
        Self::ALL
            .into_iter()
            .find(|e| {
                e.display_name().replace(' ', "").to_lowercase() == wanted
                    || format!("{e:?}").to_lowercase() == wanted
            })
            .ok_or_else(|| crate::BrickledError::Settings(format!("unknown effect: {s}")))
    }
}

// ── Per-cluster settings ──

/// Settings for a single cluster. Every field stays within its closed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedSettings {
    /// `0..=MAX_BRIGHTNESS`
    pub brightness: i32,
    pub effect: AnimationEffect,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    /// Milliseconds, `0..=MAX_DURATION`
    pub duration: i32,
}

impl Default for LedSettings {
    fn default() -> Self {
        LedSettings {
            brightness: MAX_BRIGHTNESS / 2,
            effect: AnimationEffect::Static,
            color: PALETTE[0].0,
            duration: 1000,
        }
    }
}

impl LedSettings {
    /// Force every field back into bounds.
    pub fn clamp(&mut self) {
        self.brightness = self.brightness.clamp(0, MAX_BRIGHTNESS);
        self.duration = self.duration.clamp(0, MAX_DURATION);
        self.color = self.color.min(MAX_COLOR);
    }
}
