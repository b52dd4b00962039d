//! Panel transport driver for the gamesp handheld boards.
//!
//! One [`Display`] type drives both panel families the boards ship with:
//! the SSD1306 monochrome OLED (page-addressed, 8 vertically packed pixels
//! per byte) and the ILI9341 RGB565 TFT. The controller family is selected
//! by [`PixelFormat`] in the [`Config`], and the physical bus by the
//! [`DisplayInterface`] implementation handed to the driver: 4-wire SPI
//! with a dedicated data/command line, or I2C with a leading control byte.
//!
//! The driver owns no pixel memory. Callers render into their own buffer
//! (see the `gamesp` runtime's framebuffer) and hand it to
//! [`Display::flush`], which sets a full-panel address window and streams
//! every byte in one data phase.

#![cfg_attr(not(test), no_std)]

mod command;
mod config;
mod display;
mod error;
mod interface;

pub use config::{Builder, Config, Dimensions, PixelFormat};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use interface::{DisplayInterface, I2cInterface, InterfaceError, SpiInterface};
