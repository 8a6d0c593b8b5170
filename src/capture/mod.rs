//! Camera capture
//!
//! Produces one still image per capture request. The device is opened for
//! the duration of a single frame and released afterwards; there is no
//! streaming preview.

use anyhow::{Context, Result};
use image::DynamicImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::info;

/// One-shot still source over a camera device.
pub struct CameraSource {
    index: u32,
}

impl CameraSource {
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    /// Capture a single still image from the device.
    pub fn capture_still(&self) -> Result<DynamicImage> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(self.index), requested)
            .with_context(|| format!("opening camera {}", self.index))?;

        camera.open_stream().context("starting camera stream")?;
        let frame = camera.frame().context("reading camera frame")?;
        let decoded = frame
            .decode_image::<RgbFormat>()
            .context("decoding camera frame")?;
        let _ = camera.stop_stream();

        info!(
            width = decoded.width(),
            height = decoded.height(),
            "captured camera still"
        );
        Ok(DynamicImage::ImageRgb8(decoded))
    }
}
