//! Register transports.
//!
//! [`RegisterTransport`] is the only capability the rest of the driver needs: write bytes to a
//! register, read bytes from a register. [`Spi`] and [`I2c`] implement it on top of the blocking
//! `embedded-hal` traits. Any other transport (a Linux spidev wrapper, a bus pirate, a test fake)
//! can implement the two required methods and reuse the typed [`read`](RegisterTransport::read)
//! and [`write`](RegisterTransport::write).

use embedded_hal::i2c::SevenBitAddress;

use crate::error::Bme280Error;
use crate::register::{Readable, Writable, MAX_REG_BYTES};
use crate::Bme280Result;

/// SPI control byte bit 7: set for reads, cleared for writes.
const SPI_READ_FLAG: u8 = 0b1000_0000;

/// First byte of an SPI write transaction to `register`.
pub const fn write_control_byte(register: u8) -> u8 {
    register & !SPI_READ_FLAG
}

/// First byte of an SPI read transaction from `register`.
pub const fn read_control_byte(register: u8) -> u8 {
    register | SPI_READ_FLAG
}

/// Wire bytes of a single-register SPI write.
pub const fn encode_write(register: u8, value: u8) -> [u8; 2] {
    [write_control_byte(register), value]
}

pub trait RegisterTransport {
    type Error;

    /// Writes `data` starting at `register`.
    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Reads `data.len()` bytes starting at `register`.
    ///
    /// Returns how many payload bytes were actually received. Transports may cap a single read at
    /// [`MAX_REG_BYTES`] and report the shorter count.
    fn read_register(&mut self, register: u8, data: &mut [u8]) -> Result<usize, Self::Error>;

    /// Reads and decodes a register using a typed marker from [`crate::register`].
    ///
    /// Fails with [`Bme280Error::ShortRead`] if the transport delivered fewer than `R::N` bytes.
    fn read<R: Readable>(&mut self) -> Bme280Result<R::Out, Self::Error> {
        let mut buf = [0u8; MAX_REG_BYTES];
        let received = self
            .read_register(R::ADDR, &mut buf[..R::N])
            .map_err(Bme280Error::Bus)?;

        if received < R::N {
            warn!("short read from {:#x}: {} of {} bytes", R::ADDR, received, R::N);
            return Err(Bme280Error::ShortRead {
                register: R::ADDR,
                expected: R::N,
                received,
            });
        }

        trace!("read {:#x}: {:?}", R::ADDR, &buf[..R::N]);
        Ok(R::decode(&buf[..R::N])?)
    }

    /// Encodes and writes a register using a typed marker from [`crate::register`].
    fn write<W: Writable>(&mut self, v: &W::In) -> Bme280Result<(), Self::Error> {
        let mut buf = [0u8; MAX_REG_BYTES];
        W::encode(v, &mut buf[..W::N]);

        trace!("write {:#x}: {:?}", W::ADDR, &buf[..W::N]);
        self.write_register(W::ADDR, &buf[..W::N])
            .map_err(Bme280Error::Bus)
    }
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: SevenBitAddress,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    pub(crate) fn new(i2c: I2cType, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Gives back the underlying I2C peripheral.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> RegisterTransport for I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    type Error = I2cType::Error;

    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        // Register address auto-increment is read-only, so every byte gets its own address
        for (offset, value) in data.iter().enumerate() {
            self.i2c.write(self.address, &[register.wrapping_add(offset as u8), *value])?;
        }

        Ok(())
    }

    fn read_register(&mut self, register: u8, data: &mut [u8]) -> Result<usize, Self::Error> {
        self.i2c.write_read(self.address, &[register], data)?;

        Ok(data.len())
    }
}

pub struct Spi<SpiType> {
    spi: SpiType,
}

impl<SpiType> Spi<SpiType>
where
    SpiType: embedded_hal::spi::SpiDevice,
{
    pub(crate) fn new(spi: SpiType) -> Self {
        Self { spi }
    }

    /// Gives back the underlying SPI device.
    pub fn release(self) -> SpiType {
        self.spi
    }
}

impl<SpiType> RegisterTransport for Spi<SpiType>
where
    SpiType: embedded_hal::spi::SpiDevice,
{
    type Error = SpiType::Error;

    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        for (offset, value) in data.iter().enumerate() {
            self.spi.write(&encode_write(register.wrapping_add(offset as u8), *value))?;
        }

        Ok(())
    }

    fn read_register(&mut self, register: u8, data: &mut [u8]) -> Result<usize, Self::Error> {
        // One full-duplex transfer: control byte followed by dummy bytes. The byte clocked in
        // while the control byte goes out carries no data.
        let mut frame = [0u8; MAX_REG_BYTES + 1];
        let len = data.len().min(MAX_REG_BYTES) + 1;
        frame[0] = read_control_byte(register);
        self.spi.transfer_in_place(&mut frame[..len])?;
        data[..len - 1].copy_from_slice(&frame[1..len]);

        Ok(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::ctrl_meas::{CtrlMeas, CtrlMeasFields, Oversampling, PowerMode};
    use crate::register::data::TemperatureData;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn write_frame_clears_bit_7() {
        assert_eq!([0x74, 0x27], encode_write(0xF4, 0x27));
        assert_eq!(0x72, write_control_byte(0xF2));
    }

    #[test]
    fn read_frame_sets_bit_7() {
        assert_eq!(0xFA, read_control_byte(0xFA));
        assert_eq!(0x88 | 0x80, read_control_byte(0x08));
    }

    #[test]
    fn spi_write_register() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x74, 0x27]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = Spi::new(SpiMock::new(&expectations));

        spi.write::<CtrlMeas>(&CtrlMeasFields {
            osrs_t: Oversampling::X1,
            osrs_p: Oversampling::X1,
            mode: PowerMode::Normal,
        }).unwrap();

        spi.release().done();
    }

    #[test]
    fn spi_read_discards_echo_byte() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(
                vec![0xFA, 0x00, 0x00, 0x00],
                vec![0xFF, 0x7E, 0xED, 0x00],
            ),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = Spi::new(SpiMock::new(&expectations));

        let raw = spi.read::<TemperatureData>().unwrap();
        assert_eq!(519888, raw);

        spi.release().done();
    }

    #[test]
    fn spi_read_longer_than_any_register_is_truncated() {
        let mut request = vec![0x00; MAX_REG_BYTES + 1];
        request[0] = 0x88;
        let mut response = vec![0xA5; MAX_REG_BYTES + 1];
        response[0] = 0xFF;
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(request, response),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = Spi::new(SpiMock::new(&expectations));

        let mut data = [0u8; MAX_REG_BYTES + 6];
        assert_eq!(MAX_REG_BYTES, spi.read_register(0x88, &mut data).unwrap());
        assert!(data[..MAX_REG_BYTES].iter().all(|b| *b == 0xA5));
        assert!(data[MAX_REG_BYTES..].iter().all(|b| *b == 0));

        spi.release().done();
    }

    #[test]
    fn i2c_read_and_write_register() {
        let expectations = [
            I2cTransaction::write(0x76, vec![0xF2, 0x01]),
            I2cTransaction::write_read(0x76, vec![0xFA], vec![0x7E, 0xED, 0x00]),
        ];
        let mut i2c = I2c::new(I2cMock::new(&expectations), 0x76);

        i2c.write_register(0xF2, &[0x01]).unwrap();
        assert_eq!(519888, i2c.read::<TemperatureData>().unwrap());

        i2c.release().done();
    }

    struct TruncatingBus;

    impl RegisterTransport for TruncatingBus {
        type Error = ();

        fn write_register(&mut self, _register: u8, _data: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn read_register(&mut self, _register: u8, data: &mut [u8]) -> Result<usize, Self::Error> {
            Ok(data.len() - 1)
        }
    }

    #[test]
    fn short_read_is_reported() {
        let result = TruncatingBus.read::<TemperatureData>();
        assert_eq!(
            Err(Bme280Error::ShortRead { register: 0xFA, expected: 3, received: 2 }),
            result
        );
    }
}
