//! Offline generation of the per-tier image variants from one master image.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use rayon::prelude::*;
use tracing::info;

use crate::catalog::Tier;
use crate::config::ViewerConfig;
use crate::error::Result;

/// One variant to produce.
#[derive(Clone, Debug)]
pub struct VariantSpec {
    pub tier: Tier,
    /// Target width; the variant is never wider than the master.
    pub width: u32,
    pub quality: u8,
    pub output: PathBuf,
}

#[derive(Clone, Debug)]
pub struct VariantReport {
    pub tier: Tier,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

impl VariantReport {
    pub fn size_mb(&self) -> f64 {
        self.bytes as f64 / 1024.0 / 1024.0
    }
}

/// Variant specs for every tier in `config`, written under `out_dir` at
/// each tier's locator.
pub fn variant_specs(config: &ViewerConfig, out_dir: &Path) -> Vec<VariantSpec> {
    config
        .tiers
        .iter()
        .map(|t| VariantSpec {
            tier: t.tier,
            width: t.width,
            quality: t.quality.clamp(1, 100),
            output: out_dir.join(&t.locator),
        })
        .collect()
}

/// `img/photo.jpg` -> `img/photo-original.jpg`.
pub fn backup_path(master: &Path) -> PathBuf {
    let stem = master
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match master.extension() {
        Some(ext) => format!("{stem}-original.{}", ext.to_string_lossy()),
        None => format!("{stem}-original"),
    };
    master.with_file_name(name)
}

/// Copy the master next to itself once. Returns the backup path when a new
/// copy was written.
pub fn backup_master(master: &Path) -> Result<Option<PathBuf>> {
    let backup = backup_path(master);
    if backup.exists() {
        return Ok(None);
    }
    std::fs::copy(master, &backup)?;
    info!("Backed up {} to {}", master.display(), backup.display());
    Ok(Some(backup))
}

/// Load the master without decoder size limits; masters are expected to be huge.
pub fn load_master(path: &Path) -> Result<DynamicImage> {
    let mut reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.no_limits();
    Ok(reader.decode()?)
}

/// Dimensions fitting inside `target_width`, keeping the aspect ratio and
/// never enlarging.
pub fn fit_width(src_width: u32, src_height: u32, target_width: u32) -> (u32, u32) {
    if src_width == 0 || target_width >= src_width {
        return (src_width, src_height);
    }
    let height = (src_height as f64 * target_width as f64 / src_width as f64).round() as u32;
    (target_width.max(1), height.max(1))
}

pub fn generate_variant(master: &DynamicImage, spec: &VariantSpec) -> Result<VariantReport> {
    let (src_w, src_h) = master.dimensions();
    let (width, height) = fit_width(src_w, src_h, spec.width);

    let rgb = if (width, height) == (src_w, src_h) {
        master.to_rgb8()
    } else {
        master
            .resize_exact(width, height, FilterType::Lanczos3)
            .to_rgb8()
    };

    if let Some(parent) = spec.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(&spec.output)?);
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, spec.quality))?;
    writer.flush()?;

    let bytes = std::fs::metadata(&spec.output)?.len();
    info!(
        "[{}] {}x{} q{} -> {}",
        spec.tier,
        width,
        height,
        spec.quality,
        spec.output.display()
    );

    Ok(VariantReport {
        tier: spec.tier,
        output: spec.output.clone(),
        width,
        height,
        bytes,
    })
}

/// Encode all variants in parallel. `on_done` runs once per finished variant.
pub fn generate_all<F>(
    master: &DynamicImage,
    specs: &[VariantSpec],
    on_done: F,
) -> Result<Vec<VariantReport>>
where
    F: Fn(&VariantReport) + Sync,
{
    let mut reports = specs
        .par_iter()
        .map(|spec| -> Result<VariantReport> {
            let report = generate_variant(master, spec)?;
            on_done(&report);
            Ok(report)
        })
        .collect::<Result<Vec<_>>>()?;
    reports.sort_by_key(|r| r.tier);
    Ok(reports)
}
