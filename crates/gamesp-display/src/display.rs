//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::*;
use crate::config::{Config, PixelFormat};
use crate::error::Error;
use crate::interface::DisplayInterface;

/// How long the ILI9341 needs between sleep-out and display-on.
const SLPOUT_DELAY_MS: u32 = 120;

/// Driver for the panel controller.
///
/// Construct once at startup, call [`Display::init`], then [`Display::flush`]
/// every frame. The driver is never reinitialized mid-run; a power cycle
/// goes through [`Display::power_off`] / [`Display::power_on`].
pub struct Display<I>
where
    I: DisplayInterface,
{
    interface: I,
    config: Config,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    pub fn new(interface: I, config: Config) -> Self {
        Self { interface, config }
    }

    /// Perform hardware reset and run the controller bring-up sequence,
    /// leaving the panel on and blanked.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.interface.reset(delay);
        match self.config.format {
            PixelFormat::PackedMonochrome => self.init_mono()?,
            PixelFormat::Rgb565 => self.init_color(delay)?,
        }
        self.clear()
    }

    /// SSD1306 bring-up. Parameters travel as command bytes, one write
    /// each, exactly as the controller expects.
    fn init_mono(&mut self) -> Result<(), Error<I>> {
        let rows = self.config.dimensions.rows;
        let com_pin_cfg: u8 = if rows == 32 { 0x02 } else { 0x12 };
        let precharge: u8 = if self.config.external_vcc { 0x22 } else { 0xF1 };
        let charge_pump: u8 = if self.config.external_vcc { 0x10 } else { 0x14 };

        for cmd in [
            SET_DISP, // off while configuring
            // address setting
            SET_MEM_ADDR,
            0x00, // horizontal
            // resolution and layout
            SET_DISP_START_LINE,
            SET_SEG_REMAP | 0x01, // column 127 mapped to SEG0
            SET_MUX_RATIO,
            (rows - 1) as u8,
            SET_COM_OUT_DIR | 0x08, // scan from COM[N] to COM0
            SET_DISP_OFFSET,
            0x00,
            SET_COM_PIN_CFG,
            com_pin_cfg,
            // timing and driving scheme
            SET_DISP_CLK_DIV,
            0x80,
            SET_PRECHARGE,
            precharge,
            SET_VCOM_DESEL,
            0x30, // 0.83*Vcc
            // display
            SET_CONTRAST,
            self.config.contrast,
            SET_ENTIRE_ON, // output follows RAM contents
            SET_NORM_INV,  // not inverted
            // charge pump
            SET_CHARGE_PUMP,
            charge_pump,
            SET_DISP | 0x01, // on
        ] {
            self.send_command(cmd)?;
        }
        Ok(())
    }

    /// ILI9341 bring-up: configuration table, then sleep-out and on.
    fn init_color<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        for (cmd, data) in ILI_INIT {
            self.send_command(*cmd)?;
            self.send_data(data)?;
        }
        self.send_command(ILI_SLPOUT)?;
        delay.delay_ms(SLPOUT_DELAY_MS);
        self.send_command(ILI_DISPON)?;
        Ok(())
    }

    /// Stream a full frame to the panel.
    ///
    /// Sets an address window covering the whole panel and sends `buffer`
    /// as one data phase, so the controller never shows a torn frame. The
    /// buffer layout must match the configured [`PixelFormat`]; size is
    /// checked before any byte goes out, so a short buffer transfers
    /// nothing.
    pub fn flush(&mut self, buffer: &[u8]) -> Result<(), Error<I>> {
        let required = self.config.buffer_size();
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.len(),
            });
        }
        self.set_full_window()?;
        self.send_data(&buffer[..required])
    }

    /// Blank the panel by streaming zeroes through the normal flush path.
    pub fn clear(&mut self) -> Result<(), Error<I>> {
        const ZEROES: [u8; 64] = [0; 64];
        let mut remaining = self.config.buffer_size();
        self.set_full_window()?;
        while remaining > 0 {
            let n = remaining.min(ZEROES.len());
            self.send_data(&ZEROES[..n])?;
            remaining -= n;
        }
        Ok(())
    }

    fn set_full_window(&mut self) -> Result<(), Error<I>> {
        let dims = self.config.dimensions;
        match self.config.format {
            PixelFormat::PackedMonochrome => {
                let x0 = self.config.column_offset;
                let x1 = x0 + (dims.cols - 1) as u8;
                for cmd in [
                    SET_COL_ADDR,
                    x0,
                    x1,
                    SET_PAGE_ADDR,
                    0,
                    (dims.pages() - 1) as u8,
                ] {
                    self.send_command(cmd)?;
                }
            }
            PixelFormat::Rgb565 => {
                let x1 = dims.cols - 1;
                let y1 = dims.rows - 1;
                self.send_command(ILI_CASET)?;
                self.send_data(&[0, 0, (x1 >> 8) as u8, (x1 & 0xFF) as u8])?;
                self.send_command(ILI_PASET)?;
                self.send_data(&[0, 0, (y1 >> 8) as u8, (y1 & 0xFF) as u8])?;
                self.send_command(ILI_RAMWR)?;
            }
        }
        Ok(())
    }

    /// Turn the panel off without losing controller state.
    pub fn power_off(&mut self) -> Result<(), Error<I>> {
        match self.config.format {
            PixelFormat::PackedMonochrome => self.send_command(SET_DISP),
            PixelFormat::Rgb565 => self.send_command(ILI_DISPOFF),
        }
    }

    /// Turn the panel back on.
    pub fn power_on(&mut self) -> Result<(), Error<I>> {
        match self.config.format {
            PixelFormat::PackedMonochrome => self.send_command(SET_DISP | 0x01),
            PixelFormat::Rgb565 => self.send_command(ILI_DISPON),
        }
    }

    /// Set panel contrast. The TFT controller has no contrast command, so
    /// this is a no-op there.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<I>> {
        match self.config.format {
            PixelFormat::PackedMonochrome => {
                self.send_command(SET_CONTRAST)?;
                self.send_command(contrast)
            }
            PixelFormat::Rgb565 => {
                log::debug!("set_contrast ignored on RGB565 panel");
                Ok(())
            }
        }
    }

    /// Invert the panel output.
    pub fn invert(&mut self, invert: bool) -> Result<(), Error<I>> {
        match self.config.format {
            PixelFormat::PackedMonochrome => self.send_command(SET_NORM_INV | u8::from(invert)),
            PixelFormat::Rgb565 => {
                self.send_command(if invert { ILI_INVON } else { ILI_INVOFF })
            }
        }
    }

    /// Access the underlying configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn send_command(&mut self, cmd: u8) -> Result<(), Error<I>> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Error<I>> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}
