use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

/// Convert a decoded image to an egui ColorImage, shrinking it when its longest
/// side exceeds what the GPU accepts for one texture.
pub fn to_color_image(image: &DynamicImage, max_side: usize) -> egui::ColorImage {
    let longest = image.width().max(image.height()) as usize;
    let rgba = if max_side > 0 && longest > max_side {
        debug!(
            width = image.width(),
            height = image.height(),
            max_side,
            "Downsampling image to fit the texture limit"
        );
        let side = max_side as u32;
        image.resize(side, side, FilterType::Triangle).to_rgba8()
    } else {
        image.to_rgba8()
    };

    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}
