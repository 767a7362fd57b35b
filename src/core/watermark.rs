//! Photo watermark processor: burns the capture timestamp into the bottom
//! right corner of an uploaded photo before it is stored.
//!
//! Degrades gracefully: on any failure (unreadable image, no usable font)
//! the original bytes pass through untouched and the caller logs the
//! degradation. The submission itself never fails here.

use ab_glyph::{FontVec, PxScale};
use image::Rgb;
use image::codecs::jpeg::JpegEncoder;
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use std::path::Path;

const CAPTION_SCALE: f32 = 36.0;
/// Distance of the caption's bottom-right corner from the image's.
const MARGIN: i64 = 20;
/// Backdrop padding around the caption box.
const PAD_X: i64 = 10;
const PAD_Y: i64 = 5;
/// Backdrop opacity toward black, out of 255.
const BACKDROP_ALPHA: u32 = 180;

/// Fonts probed when the config does not pin one.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Result of a stamping attempt. `degraded` carries the failure reason when
/// the original bytes were passed through unmodified.
pub struct StampOutcome {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub degraded: Option<String>,
}

/// Stamp `caption` onto the photo. On success the output is a quality-95
/// JPEG named `watermark_<original-name>`; on failure the input comes back
/// exactly as given.
pub fn stamp(
    bytes: &[u8],
    caption: &str,
    original_name: &str,
    font_path: Option<&Path>,
) -> StampOutcome {
    match try_stamp(bytes, caption, font_path) {
        Ok(out) => StampOutcome {
            bytes: out,
            filename: format!("watermark_{original_name}"),
            degraded: None,
        },
        Err(reason) => StampOutcome {
            bytes: bytes.to_vec(),
            filename: original_name.to_string(),
            degraded: Some(reason),
        },
    }
}

fn try_stamp(bytes: &[u8], caption: &str, font_path: Option<&Path>) -> Result<Vec<u8>, String> {
    let font = load_font(font_path)?;
    let scale = PxScale::from(CAPTION_SCALE);

    // Normalize color model: everything becomes 8-bit RGB.
    let mut img = image::load_from_memory(bytes)
        .map_err(|e| format!("decode failed: {e}"))?
        .to_rgb8();

    let (w, h) = (img.width() as i64, img.height() as i64);
    let (tw, th) = text_size(scale, &font, caption);
    let (tw, th) = (tw as i64, th as i64);

    // Caption top-left so its bottom-right corner sits MARGIN px in from
    // the image's bottom-right corner.
    let x = (w - tw - MARGIN).max(0);
    let y = (h - th - MARGIN).max(0);

    darken_rect(
        &mut img,
        x - PAD_X,
        y - PAD_Y,
        x + tw + PAD_X,
        y + th + PAD_Y,
    );

    draw_text_mut(
        &mut img,
        Rgb([255u8, 255, 255]),
        x as i32,
        y as i32,
        scale,
        &font,
        caption,
    );

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 95)
        .encode_image(&img)
        .map_err(|e| format!("encode failed: {e}"))?;

    Ok(out)
}

/// Blend the given rectangle toward black for caption legibility. Bounds
/// are clamped to the image.
fn darken_rect(img: &mut image::RgbImage, x0: i64, y0: i64, x1: i64, y1: i64) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let keep = 255 - BACKDROP_ALPHA;

    for yy in y0.max(0)..y1.min(h) {
        for xx in x0.max(0)..x1.min(w) {
            let px = img.get_pixel_mut(xx as u32, yy as u32);
            for c in px.0.iter_mut() {
                *c = ((*c as u32 * keep) / 255) as u8;
            }
        }
    }
}

fn load_font(font_path: Option<&Path>) -> Result<FontVec, String> {
    let candidates: Vec<&Path> = match font_path {
        // A configured font is authoritative: if it is unusable we degrade
        // rather than silently picking another face.
        Some(p) => vec![p],
        None => FONT_CANDIDATES.iter().map(Path::new).collect(),
    };

    for path in candidates {
        if let Ok(data) = fs::read(path)
            && let Ok(font) = FontVec::try_from_vec(data)
        {
            return Ok(font);
        }
    }

    Err("no usable caption font found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_jpeg() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(120, 90, Rgb([40u8, 80, 120]));
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 90)
            .encode_image(&img)
            .unwrap();
        out
    }

    #[test]
    fn corrupt_image_passes_through_unchanged() {
        let garbage = b"not an image at all".to_vec();
        let out = stamp(&garbage, "01/09/2025 08:00", "odometro.jpg", None);

        assert!(out.degraded.is_some());
        assert_eq!(out.bytes, garbage);
        assert_eq!(out.filename, "odometro.jpg");
    }

    #[test]
    fn unusable_font_passes_through_unchanged() {
        let photo = tiny_jpeg();
        let bogus = Path::new("/definitely/not/a/font.ttf");
        let out = stamp(&photo, "01/09/2025 08:00", "combustivel.jpg", Some(bogus));

        assert!(out.degraded.is_some());
        assert_eq!(out.bytes, photo);
        assert_eq!(out.filename, "combustivel.jpg");
    }

    #[test]
    fn successful_stamp_changes_bytes_and_filename() {
        let photo = tiny_jpeg();
        let out = stamp(&photo, "01/09/2025 08:00", "odometro.jpg", None);

        // Depends on a system font being present; without one the degrade
        // contract applies instead.
        match out.degraded {
            None => {
                assert_ne!(out.bytes, photo);
                assert_eq!(out.filename, "watermark_odometro.jpg");
            }
            Some(_) => assert_eq!(out.bytes, photo),
        }
    }

    #[test]
    fn caption_larger_than_image_still_stamps() {
        // A 16x16 image is smaller than the caption box; coordinates clamp
        // to zero instead of underflowing.
        let img = image::RgbImage::from_pixel(16, 16, Rgb([200u8, 200, 200]));
        let mut small = Vec::new();
        JpegEncoder::new_with_quality(&mut small, 90)
            .encode_image(&img)
            .unwrap();

        let out = stamp(&small, "01/09/2025 08:00", "p.jpg", None);
        // Either degraded (no font) or stamped; both must return bytes.
        assert!(!out.bytes.is_empty());
    }
}
