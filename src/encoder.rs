//! Text to QR raster encoding.

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

/// Pixels per QR module.
pub const DEFAULT_MODULE_PX: u32 = 10;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Renders a data value into a raster code image.
pub trait CodeEncoder {
    fn render(&self, data: &str) -> Result<GrayImage, QrError>;
}

/// Fixed rendering parameters. Not exposed to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderSettings {
    pub ec_level: EcLevel,
    pub module_px: u32,
    /// Standard 4-module border around the symbol
    pub quiet_zone: bool,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::L,
            module_px: DEFAULT_MODULE_PX,
            quiet_zone: true,
        }
    }
}

/// Black-on-white QR encoder; the smallest symbol version that fits is chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder {
    settings: EncoderSettings,
}

impl QrEncoder {
    pub fn new(settings: EncoderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EncoderSettings {
        &self.settings
    }
}

impl CodeEncoder for QrEncoder {
    fn render(&self, data: &str) -> Result<GrayImage, QrError> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.settings.ec_level)?;
        let module = self.settings.module_px.max(1);
        Ok(code
            .render::<Luma<u8>>()
            .module_dimensions(module, module)
            .quiet_zone(self.settings.quiet_zone)
            .dark_color(DARK)
            .light_color(LIGHT)
            .build())
    }
}

/// Serializes a rendered code as PNG bytes.
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(image.clone()).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
