//! PNG export of an RGBA canvas.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::Canvas;

/// Encode `canvas` as an 8-bit RGBA PNG into `writer`.
pub fn encode_png<W: Write>(canvas: &Canvas, writer: W) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, canvas.width as u32, canvas.height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().context("Failed to write PNG header")?;
    writer
        .write_image_data(&canvas.data)
        .context("Failed to write PNG image data")?;
    writer.finish().context("Failed to finish PNG stream")?;
    Ok(())
}

/// Write `canvas` to `path` as a PNG file.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let mut bytes = Vec::with_capacity(canvas.data.len() / 4);
    encode_png(canvas, &mut bytes)?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RgbColor;
    use crate::renderer::Surface;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn encodes_signature_and_dimensions() {
        let mut canvas = Canvas::new(32, 16);
        canvas.clear(RgbColor::WHITE);

        let mut bytes = Vec::new();
        encode_png(&canvas, &mut bytes).unwrap();

        assert_eq!(bytes[..8], PNG_SIGNATURE);
        // IHDR: length(4) type(4) width(4) height(4)
        assert_eq!(&bytes[12..16], b"IHDR");
        assert_eq!(u32::from_be_bytes(bytes[16..20].try_into().unwrap()), 32);
        assert_eq!(u32::from_be_bytes(bytes[20..24].try_into().unwrap()), 16);
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        write_png(&Canvas::new(4, 4), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes[..8], PNG_SIGNATURE);
    }

    #[test]
    fn reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.png");
        assert!(write_png(&Canvas::new(4, 4), &path).is_err());
    }
}
