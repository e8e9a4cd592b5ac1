use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{default_locator, Tier};
use crate::consts::{
    DEFAULT_TIER_BOUNDS, DEFAULT_TIER_QUALITIES, DEFAULT_TIER_WIDTHS, DEFERRED_WARM_DELAY_MS,
    MAX_SCALE, MIN_SCALE, PROGRESS_CEILING_PERCENT, PROGRESS_STEP_PERCENT, PROGRESS_TICK_MS,
    SWAP_DELAY_MS, WHEEL_ZOOM_IN_FACTOR, WHEEL_ZOOM_OUT_FACTOR,
};
use crate::error::{PanoramaError, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub preload: PreloadConfig,
    #[serde(default = "default_tiers")]
    pub tiers: Vec<TierConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            timing: TimingConfig::default(),
            preload: PreloadConfig::default(),
            tiers: default_tiers(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject settings the viewer cannot run with. Tier table checks live in
    /// [`crate::catalog::ResolutionCatalog::from_config`].
    pub fn validate(&self) -> Result<()> {
        let z = &self.zoom;
        if !(z.min_scale.is_finite() && z.max_scale.is_finite()) || z.min_scale <= 0.0 {
            return Err(PanoramaError::InvalidConfig(format!(
                "min_scale must be positive, got {}",
                z.min_scale
            )));
        }
        if z.max_scale < z.min_scale {
            return Err(PanoramaError::InvalidConfig(format!(
                "max_scale ({}) is below min_scale ({})",
                z.max_scale, z.min_scale
            )));
        }
        if !(z.wheel_zoom_in > 0.0 && z.wheel_zoom_out > 0.0) {
            return Err(PanoramaError::InvalidConfig(
                "wheel zoom factors must be positive".into(),
            ));
        }
        if self.timing.progress_tick_ms == 0 {
            return Err(PanoramaError::InvalidConfig(
                "progress_tick_ms must be non-zero".into(),
            ));
        }
        if self.timing.progress_ceiling_percent > 100 {
            return Err(PanoramaError::InvalidConfig(format!(
                "progress_ceiling_percent must be at most 100, got {}",
                self.timing.progress_ceiling_percent
            )));
        }
        Ok(())
    }

    pub fn tier(&self, tier: Tier) -> Option<&TierConfig> {
        self.tiers.iter().find(|t| t.tier == tier)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    pub wheel_zoom_in: f32,
    pub wheel_zoom_out: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_zoom_in: WHEEL_ZOOM_IN_FACTOR,
            wheel_zoom_out: WHEEL_ZOOM_OUT_FACTOR,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimingConfig {
    pub deferred_warm_delay_ms: u64,
    pub progress_tick_ms: u64,
    pub progress_step_percent: u8,
    pub progress_ceiling_percent: u8,
    pub swap_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            deferred_warm_delay_ms: DEFERRED_WARM_DELAY_MS,
            progress_tick_ms: PROGRESS_TICK_MS,
            progress_step_percent: PROGRESS_STEP_PERCENT,
            progress_ceiling_percent: PROGRESS_CEILING_PERCENT,
            swap_delay_ms: SWAP_DELAY_MS,
        }
    }
}

impl TimingConfig {
    pub fn deferred_warm_delay(&self) -> Duration {
        Duration::from_millis(self.deferred_warm_delay_ms)
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }

    pub fn swap_delay(&self) -> Duration {
        Duration::from_millis(self.swap_delay_ms)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreloadConfig {
    /// Tiers warmed immediately at startup; the rest follow after the deferred delay.
    pub priority: Vec<Tier>,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            priority: vec![Tier::Hd, Tier::FourK],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TierConfig {
    pub tier: Tier,
    pub locator: String,
    /// Inclusive lower zoom-scale bound.
    pub min_scale: f32,
    /// Target pixel width when generating this tier's asset.
    pub width: u32,
    /// JPEG quality (1-100) when generating this tier's asset.
    pub quality: u8,
}

fn default_tiers() -> Vec<TierConfig> {
    Tier::ALL
        .into_iter()
        .enumerate()
        .map(|(i, tier)| TierConfig {
            tier,
            locator: default_locator(tier),
            min_scale: DEFAULT_TIER_BOUNDS[i],
            width: DEFAULT_TIER_WIDTHS[i],
            quality: DEFAULT_TIER_QUALITIES[i],
        })
        .collect()
}
