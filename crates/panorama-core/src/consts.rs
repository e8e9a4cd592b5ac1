/// Lower bound of the zoom scale. At or below it the image is pinned to the center.
pub const MIN_SCALE: f32 = 1.0;

/// Upper bound of the zoom scale.
pub const MAX_SCALE: f32 = 10.0;

/// Scale multiplier applied per wheel notch towards the user (zoom in).
pub const WHEEL_ZOOM_IN_FACTOR: f32 = 1.1;

/// Scale multiplier applied per wheel notch away from the user (zoom out).
pub const WHEEL_ZOOM_OUT_FACTOR: f32 = 0.9;

/// Delay after startup before the non-priority tiers are warmed.
pub const DEFERRED_WARM_DELAY_MS: u64 = 2000;

/// Interval between cosmetic progress bar advances.
pub const PROGRESS_TICK_MS: u64 = 100;

/// Percent added to the progress bar per tick.
pub const PROGRESS_STEP_PERCENT: u8 = 5;

/// The cosmetic progress bar never passes this value before the load completes.
pub const PROGRESS_CEILING_PERCENT: u8 = 90;

/// Time the indicator stays at 100% before the new asset is swapped in.
pub const SWAP_DELAY_MS: u64 = 200;

/// Inter-finger distances at or below this are treated as zero.
pub const PINCH_DISTANCE_EPSILON: f32 = 1e-6;

/// Target pixel widths of the generated tier variants, lowest tier first.
pub const DEFAULT_TIER_WIDTHS: [u32; 5] = [1920, 3840, 6400, 10240, 16384];

/// JPEG quality of the generated tier variants, lowest tier first.
pub const DEFAULT_TIER_QUALITIES: [u8; 5] = [85, 90, 92, 96, 94];

/// Lower zoom-scale bound of each tier, lowest tier first.
pub const DEFAULT_TIER_BOUNDS: [f32; 5] = [1.0, 1.5, 2.5, 4.0, 7.0];
