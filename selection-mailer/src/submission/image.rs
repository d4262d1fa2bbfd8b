//! Screenshot verification
//!
//! The upload's declared content type and file name are ignored; the format
//! is read from the bytes themselves. The whole image is decoded, so a valid
//! header in front of corrupt pixel data is still rejected. The decoder's
//! default allocation limits apply.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use thiserror::Error;

/// Largest accepted screenshot (5 MiB)
pub const MAX_SCREENSHOT_BYTES: usize = 5 * 1024 * 1024;

/// Reasons a screenshot is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreenshotError {
    /// The bytes are not a readable image
    #[error("Invalid image file.")]
    Invalid,

    /// A readable image in a format other than JPEG or PNG
    #[error("Only JPG and PNG files are allowed.")]
    UnsupportedFormat,

    /// Larger than [`MAX_SCREENSHOT_BYTES`]
    #[error("Image size should not exceed 5MB.")]
    TooLarge,
}

/// Verify that `data` is a JPEG or PNG image of at most 5 MiB
///
/// Checks run in order (readable, format, size) and the first failure wins.
///
/// # Errors
///
/// Returns the first [`ScreenshotError`] that applies
pub fn verify_screenshot(data: &[u8]) -> Result<ImageFormat, ScreenshotError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|_| ScreenshotError::Invalid)?;

    let format = reader.format().ok_or(ScreenshotError::Invalid)?;
    reader.decode().map_err(|_| ScreenshotError::Invalid)?;

    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(ScreenshotError::UnsupportedFormat);
    }

    if data.len() > MAX_SCREENSHOT_BYTES {
        return Err(ScreenshotError::TooLarge);
    }

    Ok(format)
}
