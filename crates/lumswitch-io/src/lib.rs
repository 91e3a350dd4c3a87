//! # lumswitch-io
//!
//! Image I/O for luminance stimuli and drive images.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Notes |
//! |--------|------|-------|-------|
//! | PNG gray | ✓ | ✓ | 8/16-bit luminance stimuli |
//! | PNG RGB(A) | ✓ | ✓ | read as Rec.709 luma; drive images written as RGBA8 |
//!
//! # Usage
//!
//! ```rust,ignore
//! use lumswitch_io::{read_luminance, write_drive};
//!
//! let stimulus = read_luminance("grating.png")?;
//! // ... encode ...
//! write_drive("grating_drive.png", &drive)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod png;

pub use error::{IoError, IoResult};

use std::path::Path;

/// Input formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics
    Png,
}

impl Format {
    /// Detects the format from a file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => Ok(Self::Png),
            _ => Err(IoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Reads a luminance image, dispatching on the file extension.
pub fn read_luminance<P: AsRef<Path>>(path: P) -> IoResult<lumswitch_core::LuminanceImage> {
    match Format::from_path(&path)? {
        Format::Png => png::read_luminance(path),
    }
}

/// Writes a drive image, dispatching on the file extension.
pub fn write_drive<P: AsRef<Path>>(path: P, image: &lumswitch_core::DriveImage) -> IoResult<()> {
    match Format::from_path(&path)? {
        Format::Png => png::write_drive(path, image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a/b/stim.PNG").unwrap(), Format::Png);
        assert!(Format::from_path("stim.exr").is_err());
        assert!(Format::from_path("noext").is_err());
    }
}
