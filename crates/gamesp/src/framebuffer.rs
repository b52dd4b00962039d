//! In-RAM framebuffer with primitive drawing
//!
//! Games draw into a plain byte buffer and flush it wholesale through the
//! display transport once per frame. Two pixel layouts match the two
//! panel controllers:
//!
//! * [`PixelFormat::PackedMonochrome`]: one bit per pixel, bytes are
//!   vertical 8-pixel strips (`index = (y / 8) * stride + x`, bit `y % 8`).
//!   This is the OLED's native RAM order, so flush is a straight copy.
//! * [`PixelFormat::Rgb565`]: two bytes per pixel, big-endian, row major.
//!
//! All primitives take signed coordinates and clip to the buffer; drawing
//! off the edge is never an error. Color is a `u16`: any nonzero value
//! sets a monochrome pixel.

pub use gamesp_display::PixelFormat;

/// Pack 8-bit-per-channel RGB into an RGB565 word.
pub const fn color565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// The buffer handed to [`FrameBuffer::new`] was too small for the
/// requested geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMismatch {
    pub required: usize,
    pub provided: usize,
}

impl core::fmt::Display for SizeMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "framebuffer needs {} bytes, got {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for SizeMismatch {}

/// Line endpoints are clamped into this band around the surface before
/// walking. Wide enough that no supported panel geometry is affected,
/// small enough that `dx`/`dy` and the walk length stay tame.
pub const COORD_LIMIT: i32 = 4096;

fn clamp_coord(v: i32) -> i32 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// Drawing surface over a caller-owned byte buffer.
///
/// Generic over the storage so games can use a static array, a heap
/// vector or a borrowed slice without the buffer living in this crate.
pub struct FrameBuffer<B> {
    buf: B,
    width: u16,
    height: u16,
    stride: u16,
    format: PixelFormat,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Wrap `buf` as a `width` x `height` surface.
    ///
    /// For monochrome, `height` must be a multiple of 8 and the buffer
    /// `width * height / 8` bytes; for RGB565 it must be
    /// `width * height * 2` bytes.
    pub fn new(buf: B, width: u16, height: u16, format: PixelFormat) -> Result<Self, SizeMismatch> {
        Self::with_stride(buf, width, height, width, format)
    }

    /// Like [`FrameBuffer::new`] with explicit row stride in pixels, for
    /// buffers with per-row padding. `stride` must be at least `width`;
    /// the padding pixels are never read or written by the primitives.
    pub fn with_stride(
        buf: B,
        width: u16,
        height: u16,
        stride: u16,
        format: PixelFormat,
    ) -> Result<Self, SizeMismatch> {
        debug_assert!(stride >= width, "stride shorter than a row");
        debug_assert!(
            format != PixelFormat::PackedMonochrome || height % 8 == 0,
            "monochrome height must be page aligned"
        );
        let required = format.buffer_size(stride, height);
        let provided = buf.as_ref().len();
        if provided < required {
            return Err(SizeMismatch { required, provided });
        }
        Ok(Self {
            buf,
            width,
            height,
            stride,
            format,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The raw bytes, in the display transport's flush order.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        self.buf.as_mut()
    }

    /// Set one pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u16) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let stride = self.stride as usize;
        match self.format {
            PixelFormat::PackedMonochrome => {
                let index = (y >> 3) * stride + x;
                let mask = 1u8 << (y & 7);
                let byte = &mut self.buf.as_mut()[index];
                if color != 0 {
                    *byte |= mask;
                } else {
                    *byte &= !mask;
                }
            }
            PixelFormat::Rgb565 => {
                let index = (x + y * stride) * 2;
                let bytes = color.to_be_bytes();
                self.buf.as_mut()[index] = bytes[0];
                self.buf.as_mut()[index + 1] = bytes[1];
            }
        }
    }

    /// Read one pixel back, `None` when out of bounds. Monochrome pixels
    /// read as 0 or 1.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u16> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let stride = self.stride as usize;
        match self.format {
            PixelFormat::PackedMonochrome => {
                let index = (y >> 3) * stride + x;
                Some(((self.buf.as_ref()[index] >> (y & 7)) & 1) as u16)
            }
            PixelFormat::Rgb565 => {
                let index = (x + y * stride) * 2;
                let buf = self.buf.as_ref();
                Some(u16::from_be_bytes([buf[index], buf[index + 1]]))
            }
        }
    }

    /// Fill the whole surface with `color`. Stride padding, if any, is
    /// left untouched.
    pub fn fill(&mut self, color: u16) {
        if self.stride != self.width {
            self.fill_rect(0, 0, self.width as i32, self.height as i32, color);
            return;
        }
        let len = self.format.buffer_size(self.stride, self.height);
        match self.format {
            PixelFormat::PackedMonochrome => {
                let fill = if color != 0 { 0xFF } else { 0x00 };
                self.buf.as_mut()[..len].fill(fill);
            }
            PixelFormat::Rgb565 => {
                let bytes = color.to_be_bytes();
                for px in self.buf.as_mut()[..len].chunks_exact_mut(2) {
                    px[0] = bytes[0];
                    px[1] = bytes[1];
                }
            }
        }
    }

    /// Fill a `w` x `h` rectangle whose top-left corner is `(x, y)`.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        if w < 1 || h < 1 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        // The corner sums can exceed i32 for far-off-surface arguments,
        // so the clip happens in i64.
        let x_end = (x as i64 + w as i64).min(self.width as i64);
        let y_end = (y as i64 + h as i64).min(self.height as i64);
        if x_end <= 0 || y_end <= 0 {
            return;
        }
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        for yy in y0..y_end {
            for xx in x0..x_end {
                self.set_pixel(xx as i32, yy as i32, color);
            }
        }
    }

    /// Horizontal line of length `w` starting at `(x, y)`.
    pub fn hline(&mut self, x: i32, y: i32, w: i32, color: u16) {
        self.fill_rect(x, y, w, 1, color);
    }

    /// Vertical line of length `h` starting at `(x, y)`.
    pub fn vline(&mut self, x: i32, y: i32, h: i32, color: u16) {
        self.fill_rect(x, y, 1, h, color);
    }

    /// One-pixel rectangle outline.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        if w < 1 || h < 1 {
            return;
        }
        // A far edge past i32 is off the surface anyway; saturating it
        // keeps the strip call a no-op instead of wrapping.
        let right = (x as i64 + w as i64 - 1).min(i32::MAX as i64) as i32;
        let bottom = (y as i64 + h as i64 - 1).min(i32::MAX as i64) as i32;
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, bottom, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(right, y, 1, h, color);
    }

    /// Endpoint-inclusive line segment.
    ///
    /// Endpoints are canonicalized before the Bresenham walk so the same
    /// pixels come out regardless of which end is given first. Endpoints
    /// far off the surface are pulled into [`COORD_LIMIT`]'s band first,
    /// which keeps the walk bounded and the error terms inside i32;
    /// on-surface geometry is unaffected.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        let (x0, y0) = (clamp_coord(x0), clamp_coord(y0));
        let (x1, y1) = (clamp_coord(x1), clamp_coord(y1));
        let ((x0, y0), (x1, y1)) = if (x0, y0) <= (x1, y1) {
            ((x0, y0), (x1, y1))
        } else {
            ((x1, y1), (x0, y0))
        };

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        if dx >= dy {
            let mut err = dx / 2;
            let mut y = y0;
            let mut x = x0;
            loop {
                self.set_pixel(x, y, color);
                if x == x1 {
                    break;
                }
                err -= dy;
                if err < 0 {
                    y += sy;
                    err += dx;
                }
                x += sx;
            }
        } else {
            let mut err = dy / 2;
            let mut x = x0;
            let mut y = y0;
            loop {
                self.set_pixel(x, y, color);
                if y == y1 {
                    break;
                }
                err -= dx;
                if err < 0 {
                    x += sx;
                    err += dy;
                }
                y += sy;
            }
        }
    }
}
