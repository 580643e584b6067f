use crate::core::error::Result;
use crate::storage::atomic::atomic_write_bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

/// JPEG quality used for every saved image
pub const JPEG_QUALITY: u8 = 95;

/// Background that transparent pixels are composited over
const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Decode `source` and write it to `target` as a baseline JPEG.
///
/// Images with an alpha channel are flattened over opaque white first.
/// The target is written atomically.
pub fn convert_to_jpeg(source: &Path, target: &Path) -> Result<()> {
    let img = image::open(source)?;
    let bytes = encode_jpeg(&img)?;
    atomic_write_bytes(target, &bytes)?;

    tracing::debug!(
        source = %source.display(),
        target = %target.display(),
        width = img.width(),
        height = img.height(),
        had_alpha = img.color().has_alpha(),
        "converted image"
    );
    Ok(())
}

/// Encode an image as JPEG at [`JPEG_QUALITY`]
pub fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = to_opaque_rgb(img);

    let mut buffer = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
        encoder.encode_image(&rgb)?;
    }

    Ok(buffer)
}

/// Drop the alpha channel, compositing over white when there is one
pub fn to_opaque_rgb(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([
            blend(r, BACKGROUND[0], a),
            blend(g, BACKGROUND[1], a),
            blend(b, BACKGROUND[2], a),
        ])
    })
}

fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}
