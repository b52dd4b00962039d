//! Hardware interface abstraction
//!
//! The panel protocol has two phases: "command" bytes that program the
//! controller and "data" bytes that land in display RAM. How the phase is
//! signalled depends on the bus: 4-wire SPI uses a dedicated D/C line,
//! I2C prefixes each write with a control byte. [`DisplayInterface`]
//! abstracts exactly that pair of operations plus the reset line, so
//! [`Display`](crate::Display) works unchanged over either bus, or over a
//! recording fake in tests.

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, Operation};
use embedded_hal::spi::SpiDevice;

/// Control byte announcing a single command byte (Co=1, D/C#=0).
const I2C_CMD: u8 = 0x80;
/// Control byte announcing a data run (Co=0, D/C#=1).
const I2C_DATA: u8 = 0x40;

/// Byte-oriented command/data transport to the display controller.
pub trait DisplayInterface {
    /// Error type for interface operations.
    type Error: Debug;

    /// Send one command byte.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send a run of data bytes.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Pulse the reset line, honoring the controller's timing. Interfaces
    /// without a reset line do nothing.
    fn reset<D: DelayNs>(&mut self, delay: &mut D);
}

/// Errors that can occur at the interface level.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// Bus communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Bus(e) => write!(f, "Bus error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// 4-wire SPI interface: MOSI + SCK via [`SpiDevice`] (which owns chip
/// select), plus D/C and reset GPIOs.
pub struct SpiInterface<SPI, DC, RST> {
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        // Settle high, hold low 10ms, release. The controller needs the
        // delays before it accepts commands again.
        let _ = self.rst.set_high();
        delay.delay_ms(1);
        let _ = self.rst.set_low();
        delay.delay_ms(10);
        let _ = self.rst.set_high();
    }
}

/// Two-wire I2C interface. The phase is carried in-band: every write
/// starts with a control byte, 0x80 for a command, 0x40 for data.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Default SSD1306 I2C address.
    pub const DEFAULT_ADDR: u8 = 0x3C;

    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }
}

impl<I2C> DisplayInterface for I2cInterface<I2C>
where
    I2C: I2c,
    I2C::Error: Debug,
{
    type Error = I2C::Error;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.addr, &[I2C_CMD, command])
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        // Consecutive writes in one transaction share a single bus write,
        // so the control byte prefixes the whole run without copying the
        // buffer.
        self.i2c.transaction(
            self.addr,
            &mut [Operation::Write(&[I2C_DATA]), Operation::Write(data)],
        )
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
        // I2C modules tie reset to the supply rail.
    }
}
