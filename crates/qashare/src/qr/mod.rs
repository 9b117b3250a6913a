mod requests;

pub use requests::QrRequests;

use base64::Engine;
use image::{imageops, GrayImage, Luma, RgbaImage};
use qrcode::QrCode;
use std::io::Cursor;

/// Pixel size every share QR code is generated at. Renderers scale it down
/// for compact layouts.
pub const QR_PIXEL_SIZE: u32 = 160;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("nothing to encode")]
    Empty,

    #[error("invalid size {0}")]
    InvalidSize(u32),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("png error: {0}")]
    Png(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct QrOptions {
    /// Edge length of the output bitmap in pixels
    pub size: u32,
    /// Quiet zone around the code, in modules
    pub margin: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: QR_PIXEL_SIZE,
            margin: 0,
        }
    }
}

/// A square QR bitmap and the text it encodes
#[derive(Debug, Clone, PartialEq)]
pub struct QrImage {
    text: String,
    image: RgbaImage,
}

impl QrImage {
    pub fn new(text: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            text: text.into(),
            image,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA8 pixels, row major
    pub fn rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn to_png(&self) -> Result<Vec<u8>, QrError> {
        let mut bytes: Vec<u8> = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// `data:image/png;base64,...`, for hosts that hand images to a web view
    pub fn to_data_url(&self) -> Result<String, QrError> {
        let png = self.to_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }
}

pub trait QrGenerator: Send + Sync {
    fn generate(&self, text: &str, opts: QrOptions) -> Result<QrImage, QrError>;
}

/// Dark modules on white, backed by the `qrcode` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeGenerator;

impl QrGenerator for QrCodeGenerator {
    #[profiling::function]
    fn generate(&self, text: &str, opts: QrOptions) -> Result<QrImage, QrError> {
        if text.is_empty() {
            return Err(QrError::Empty);
        }
        if opts.size == 0 {
            return Err(QrError::InvalidSize(opts.size));
        }

        let code = QrCode::new(text.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;
        let modules = code.width() as u32 + 2 * opts.margin;
        // less than a pixel per module does not scan
        if modules > opts.size {
            return Err(QrError::InvalidSize(opts.size));
        }
        let module_px = opts.size / modules;

        let symbol: GrayImage = code
            .render::<Luma<u8>>()
            .quiet_zone(false)
            .module_dimensions(module_px, module_px)
            .build();

        let full = modules * module_px;
        let mut canvas = GrayImage::from_pixel(full, full, Luma([255u8]));
        let offset = (opts.margin * module_px) as i64;
        imageops::overlay(&mut canvas, &symbol, offset, offset);

        let canvas = if full != opts.size {
            imageops::resize(&canvas, opts.size, opts.size, imageops::FilterType::Nearest)
        } else {
            canvas
        };

        let rgba = image::DynamicImage::ImageLuma8(canvas).to_rgba8();
        tracing::trace!("generated {}px qr code for '{}'", opts.size, text);

        Ok(QrImage::new(text, rgba))
    }
}
