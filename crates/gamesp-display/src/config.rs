//! Display configuration types and builder

pub use crate::error::BuilderError;

/// Largest panel the driver will address.
pub const MAX_COLS: u16 = 320;
pub const MAX_ROWS: u16 = 240;

/// In-memory pixel layout of the attached panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 1 bit per pixel, 8 vertically packed pixels per byte, LSB is the
    /// topmost row of the byte group (SSD1306 page layout).
    PackedMonochrome,
    /// 2 bytes per pixel, big-endian 5-6-5 channel split (ILI9341).
    Rgb565,
}

impl PixelFormat {
    /// Buffer size in bytes for a `cols x rows` surface in this format.
    pub fn buffer_size(self, cols: u16, rows: u16) -> usize {
        match self {
            PixelFormat::PackedMonochrome => cols as usize * rows as usize / 8,
            PixelFormat::Rgb565 => cols as usize * rows as usize * 2,
        }
    }
}

/// Panel dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (display columns).
    pub cols: u16,
    /// Height in pixels (display rows).
    pub rows: u16,
}

impl Dimensions {
    /// Create dimensions, validated against the controller limits.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either axis is zero or
    /// exceeds the controller maximum, or if `rows` is not a multiple of 8
    /// for a monochrome panel (page-addressed RAM is byte-per-8-rows).
    pub fn new(cols: u16, rows: u16, format: PixelFormat) -> Result<Self, BuilderError> {
        if cols == 0 || cols > MAX_COLS || rows == 0 || rows > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { cols, rows });
        }
        if format == PixelFormat::PackedMonochrome && rows % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Number of 8-row pages (monochrome panels).
    pub fn pages(&self) -> u16 {
        self.rows / 8
    }
}

/// Display configuration.
///
/// Use [`Builder`] to construct one.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel dimensions.
    pub dimensions: Dimensions,
    /// Pixel layout, which also selects the controller command set.
    pub format: PixelFormat,
    /// Initial contrast (monochrome panels only).
    pub contrast: u8,
    /// Whether the panel is powered from an external VCC rail rather than
    /// the internal charge pump (affects pre-charge and pump commands).
    pub external_vcc: bool,
    /// First RAM column mapped to the leftmost pixel. 64-column OLED
    /// modules are wired 32 columns into controller RAM.
    pub column_offset: u8,
}

impl Config {
    /// Required flush buffer size in bytes.
    pub fn buffer_size(&self) -> usize {
        self.format
            .buffer_size(self.dimensions.cols, self.dimensions.rows)
    }
}

/// Builder for [`Config`].
///
/// # Example
///
/// ```
/// use gamesp_display::{Builder, Dimensions, PixelFormat};
///
/// let dims = Dimensions::new(128, 64, PixelFormat::PackedMonochrome).unwrap();
/// let config = Builder::new()
///     .dimensions(dims)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.buffer_size(), 1024);
/// ```
pub struct Builder {
    dimensions: Option<Dimensions>,
    format: PixelFormat,
    contrast: u8,
    external_vcc: bool,
    column_offset: Option<u8>,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            dimensions: None,
            format: PixelFormat::PackedMonochrome,
            // Maximum contrast, as the stock bring-up uses
            contrast: 0xFF,
            external_vcc: false,
            column_offset: None,
        }
    }
}

impl Builder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel dimensions (required).
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the pixel format (default: packed monochrome).
    pub fn format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the initial contrast level.
    pub fn contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }

    /// Mark the panel as externally powered.
    pub fn external_vcc(mut self, external: bool) -> Self {
        self.external_vcc = external;
        self
    }

    /// Override the RAM column offset. When unset, 64-column monochrome
    /// panels get the standard offset of 32 and everything else gets 0.
    pub fn column_offset(mut self, offset: u8) -> Self {
        self.column_offset = Some(offset);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let column_offset = self.column_offset.unwrap_or(
            if self.format == PixelFormat::PackedMonochrome && dimensions.cols == 64 {
                32
            } else {
                0
            },
        );
        Ok(Config {
            dimensions,
            format: self.format,
            contrast: self.contrast,
            external_vcc: self.external_vcc,
            column_offset,
        })
    }
}
