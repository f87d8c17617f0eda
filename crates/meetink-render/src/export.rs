//! Static image export of the shared picture.

use chrono::{DateTime, SecondsFormat, Utc};
use meetink_core::WhiteboardError;
use thiserror::Error;

use crate::renderer::RenderContext;
use crate::surface::{DrawSurface, PixelSurface};

/// Errors from the export path.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("offscreen surface unavailable: {0}")]
    Surface(#[from] WhiteboardError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// A finished export, ready to hand to the host for a client-side download.
#[derive(Debug, Clone)]
pub struct ExportImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Download filename for an export taken at `taken_at`:
/// `whiteboard-<ISO 8601, colons replaced with hyphens>.png`.
pub fn export_filename(taken_at: DateTime<Utc>) -> String {
    let stamp = taken_at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-");
    format!("whiteboard-{stamp}.png")
}

/// Compose the picture onto an offscreen surface and encode it as a PNG.
///
/// Identical output to [`RenderContext::render_full`]; reads the committed
/// list without mutating it and involves no network activity.
pub fn export_png(
    ctx: &RenderContext<'_>,
    width: u32,
    height: u32,
    taken_at: DateTime<Utc>,
) -> Result<ExportImage, ExportError> {
    let mut surface = PixelSurface::new(width, height)?;
    ctx.render_full(&mut surface);

    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(surface.pixels())?;
    }
    log::info!("exported whiteboard image ({width}x{height}, {} bytes)", bytes.len());

    Ok(ExportImage { filename: export_filename(taken_at), bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use meetink_core::{Rgba, Stroke, StrokePoint};

    fn taken_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 14, 30, 5).unwrap()
    }

    #[test]
    fn test_filename_replaces_colons() {
        let name = export_filename(taken_at());
        assert_eq!(name, "whiteboard-2026-08-07T14-30-05.000Z.png");
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_export_produces_valid_png_header() {
        let strokes = vec![Stroke::new(
            StrokePoint::new(5.0, 5.0),
            Rgba::black(),
            4.0,
            0,
            "p",
            "Ada",
        )];
        let ctx = RenderContext::new(&strokes, 0);
        let image = export_png(&ctx, 32, 32, taken_at()).unwrap();
        assert_eq!(&image.bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }

    #[test]
    fn test_export_of_zero_sized_surface_fails() {
        let ctx = RenderContext::new(&[], 0);
        assert!(export_png(&ctx, 0, 32, taken_at()).is_err());
    }
}
