//! PNG input and output.
//!
//! Luminance stimuli are read from grayscale PNGs (8 or 16 bit). Colour
//! files are accepted and reduced to Rec.709 luma of the stored values;
//! no transfer function is removed. Alpha is ignored.
//!
//! Drive images are written as 8-bit RGBA without colour metadata: the
//! values are hardware drive levels, not colours, and must reach the
//! framebuffer untouched.

use crate::{IoError, IoResult};
use lumswitch_core::{luminance_rec709, DriveImage, Image, LuminanceImage, PixelFormat};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file as a single-channel luminance image in `[0, 1]`.
///
/// # Example
///
/// ```rust,ignore
/// use lumswitch_io::png;
///
/// let stimulus = png::read_luminance("grating.png")?;
/// ```
pub fn read_luminance<P: AsRef<Path>>(path: P) -> IoResult<LuminanceImage> {
    let path = path.as_ref();
    let (width, height, samples, channels) = decode(path)?;

    let data: Vec<f32> = match channels {
        1 => samples,
        2 => samples.chunks_exact(2).map(|ga| ga[0]).collect(),
        3 | 4 => samples
            .chunks_exact(channels)
            .map(|px| luminance_rec709([px[0], px[1], px[2]]))
            .collect(),
        n => return Err(IoError::UnsupportedFormat(format!("{} channels", n))),
    };

    debug!(path = %path.display(), width, height, channels, "luminance image read");
    Ok(Image::from_data(width, height, data)?)
}

/// Reads an 8-bit RGBA drive image as written by [`write_drive`].
pub fn read_drive<P: AsRef<Path>>(path: P) -> IoResult<Image<u8, 4>> {
    let mut reader = open(path.as_ref())?;
    let mut buf = vec![0u8; output_size(&reader)?];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    if (info.color_type, info.bit_depth) != (png::ColorType::Rgba, png::BitDepth::Eight) {
        return Err(IoError::UnsupportedBitDepth(format!(
            "{:?} {:?}, expected 8-bit RGBA",
            info.color_type, info.bit_depth
        )));
    }
    buf.truncate(info.buffer_size());
    Ok(Image::from_data(info.width, info.height, buf)?)
}

/// Writes a drive image as 8-bit RGBA.
///
/// Channel values are quantized with `round(v * 255)`; integer drive
/// values survive exactly.
pub fn write_drive<P: AsRef<Path>>(path: P, image: &DriveImage) -> IoResult<()> {
    let bytes: Vec<u8> = image.data().iter().map(|&v| u8::from_f32(v)).collect();
    write_raw(path.as_ref(), image.width(), image.height(), png::ColorType::Rgba, png::BitDepth::Eight, &bytes)
}

/// Writes a luminance image as 16-bit grayscale.
pub fn write_luminance<P: AsRef<Path>>(path: P, image: &LuminanceImage) -> IoResult<()> {
    let bytes: Vec<u8> = image
        .data()
        .iter()
        .flat_map(|&v| u16::from_f32(v).to_be_bytes())
        .collect();
    write_raw(path.as_ref(), image.width(), image.height(), png::ColorType::Grayscale, png::BitDepth::Sixteen, &bytes)
}

fn open(path: &Path) -> IoResult<png::Reader<BufReader<File>>> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    // Palette and sub-byte gray expand to 8 bits per sample.
    decoder.set_transformations(png::Transformations::EXPAND);
    decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))
}

fn output_size(reader: &png::Reader<BufReader<File>>) -> IoResult<usize> {
    reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))
}

/// Decodes a PNG into normalized samples: `(width, height, samples, channels)`.
fn decode(path: &Path) -> IoResult<(u32, u32, Vec<f32>, usize)> {
    let mut reader = open(path)?;
    let mut buf = vec![0u8; output_size(&reader)?];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!("{:?}", other)));
        }
    };

    let samples = match info.bit_depth {
        png::BitDepth::Eight => bytes.iter().map(|&b| b.to_f32()).collect(),
        png::BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]).to_f32())
            .collect(),
        depth => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                info.color_type, depth
            )));
        }
    };

    Ok((info.width, info.height, samples, channels))
}

fn write_raw(
    path: &Path,
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    bytes: &[u8],
) -> IoResult<()> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color);
    encoder.set_depth(depth);
    encoder.set_compression(png::Compression::default());

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .write_image_data(bytes)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(path = %path.display(), width, height, ?color, ?depth, "PNG written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_luminance_roundtrip_16bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let data: Vec<f32> = (0..64).map(|i| i as f32 / 63.0).collect();
        let img = LuminanceImage::from_data(16, 4, data.clone()).unwrap();

        write_luminance(&path, &img).unwrap();
        let loaded = read_luminance(&path).unwrap();
        assert_eq!(loaded.dimensions(), (16, 4));
        for (a, b) in data.iter().zip(loaded.data()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1.0 / 65535.0);
        }
    }

    #[test]
    fn test_drive_roundtrip_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive.png");
        let mut img = DriveImage::new(3, 2);
        img.set_pixel(0, 0, [200.0 / 255.0, 0.0, 17.0 / 255.0, 9.0 / 255.0]);
        img.set_pixel(2, 1, [1.0, 0.0, 1.0, 10.0 / 255.0]);

        write_drive(&path, &img).unwrap();
        let loaded = read_drive(&path).unwrap();
        assert_eq!(loaded.pixel(0, 0), [200, 0, 17, 9]);
        assert_eq!(loaded.pixel(2, 1), [255, 0, 255, 10]);
        assert_eq!(loaded.pixel(1, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_rgb_reduced_to_luma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        write_raw(&path, 1, 1, png::ColorType::Rgb, png::BitDepth::Eight, &[255, 0, 0]).unwrap();
        let loaded = read_luminance(&path).unwrap();
        assert_abs_diff_eq!(loaded.pixel(0, 0)[0], 0.2126, epsilon = 1e-6);
    }

    #[test]
    fn test_drive_reader_rejects_gray() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        write_raw(&path, 1, 1, png::ColorType::Grayscale, png::BitDepth::Eight, &[7]).unwrap();
        assert!(matches!(read_drive(&path), Err(IoError::UnsupportedBitDepth(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(read_luminance("/nonexistent.png"), Err(IoError::Io(_))));
    }
}
