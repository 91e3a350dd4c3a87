//! `.lum` calibration table format.
//!
//! A plain text list of the 257 luminance bounds, one per line or
//! whitespace separated, normalized to `[0, 1]`.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "CRT booth 3, 2026-03-02"
//! LUMINANCE_BOUNDS 257
//! 0.000000
//! 0.000015
//! ...
//! 1.000000
//! ```
//!
//! `TITLE` and `LUMINANCE_BOUNDS` are optional. When the header is present
//! the value count must match it.

use crate::table::BOUND_COUNT;
use crate::{CalibrationLut, LutError, LutResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads a calibration table from a `.lum` file.
///
/// # Example
///
/// ```rust,ignore
/// let lut = lumswitch_lut::read_lum("booth3.lum")?;
/// ```
pub fn read_lum<P: AsRef<Path>>(path: P) -> LutResult<CalibrationLut> {
    let file = File::open(path.as_ref())?;
    parse_lum(BufReader::new(file))
}

/// Parses a calibration table from a reader.
pub fn parse_lum<R: BufRead>(reader: R) -> LutResult<CalibrationLut> {
    let mut declared: Option<usize> = None;
    let mut bounds: Vec<f32> = Vec::with_capacity(BOUND_COUNT);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with("TITLE") {
            continue;
        } else if line.starts_with("LUMINANCE_BOUNDS") {
            declared = Some(parse_count(line)?);
        } else {
            for token in line.split_whitespace() {
                let value = token.parse::<f32>().map_err(|_| {
                    LutError::ParseError(format!("line {}: invalid value '{}'", line_no + 1, token))
                })?;
                bounds.push(value);
            }
        }
    }

    if let Some(count) = declared {
        if count != bounds.len() {
            return Err(LutError::ParseError(format!(
                "expected {} values, found {}",
                count,
                bounds.len()
            )));
        }
    }

    CalibrationLut::new(bounds)
}

/// Writes a calibration table to a `.lum` file.
pub fn write_lum<P: AsRef<Path>>(path: P, lut: &CalibrationLut, title: Option<&str>) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    format_lum(&mut writer, lut, title)?;
    writer.flush()?;
    Ok(())
}

/// Serializes a calibration table into any writer.
pub fn format_lum<W: Write>(writer: &mut W, lut: &CalibrationLut, title: Option<&str>) -> LutResult<()> {
    writeln!(writer, "# Generated by lumswitch-lut")?;
    if let Some(title) = title {
        writeln!(writer, "TITLE \"{}\"", title)?;
    }
    writeln!(writer, "LUMINANCE_BOUNDS {}", lut.bounds().len())?;
    // Shortest decimal form that reads back to the same f32.
    for value in lut.bounds() {
        writeln!(writer, "{}", value)?;
    }
    Ok(())
}

fn parse_count(line: &str) -> LutResult<usize> {
    line.split_whitespace()
        .nth(1)
        .ok_or_else(|| LutError::ParseError("invalid LUMINANCE_BOUNDS line".into()))?
        .parse()
        .map_err(|_| LutError::ParseError("invalid LUMINANCE_BOUNDS value".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn linear_text(header: bool) -> String {
        let mut text = String::from("# test table\nTITLE \"linear\"\n");
        if header {
            text.push_str("LUMINANCE_BOUNDS 257\n");
        }
        for i in 0..257 {
            text.push_str(&format!("{}\n", i as f32 / 256.0));
        }
        text
    }

    #[test]
    fn parse_with_header() {
        let lut = parse_lum(Cursor::new(linear_text(true))).expect("parse failed");
        assert_eq!(lut, CalibrationLut::linear());
    }

    #[test]
    fn parse_without_header() {
        let lut = parse_lum(Cursor::new(linear_text(false))).expect("parse failed");
        assert_eq!(lut.max(), 1.0);
    }

    #[test]
    fn parse_several_values_per_line() {
        let values: Vec<String> = (0..257).map(|i| (i as f32 / 256.0).to_string()).collect();
        let text = values.chunks(8).map(|c| c.join(" ")).collect::<Vec<_>>().join("\n");
        assert!(parse_lum(Cursor::new(text)).is_ok());
    }

    #[test]
    fn header_count_mismatch() {
        let text = "LUMINANCE_BOUNDS 257\n0.0\n0.5\n1.0\n";
        let err = parse_lum(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, LutError::ParseError(_)));
    }

    #[test]
    fn bad_token_reports_line() {
        let text = "0.0\nabc\n";
        let err = parse_lum(Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn roundtrip_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gamma.lum");
        let lut = CalibrationLut::gamma(2.4);

        write_lum(&path, &lut, Some("gamma 2.4")).expect("write failed");
        let loaded = read_lum(&path).expect("read failed");

        assert_eq!(loaded, lut);
    }
}
