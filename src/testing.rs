use crate::bus::RegisterTransport;
use crate::calibration::CalibrationData;
use crate::register::{Readable, MAX_REG_BYTES};
use embedded_hal::delay::DelayNs;
use heapless::{LinearMap, Vec};

/// Calibration block 0x88..0x9F holding the datasheet example coefficients.
pub const CALIBRATION_TP: [u8; 24] = [
    112, 107, 67, 103, 24, 252, 125, 142, 67, 214, 208, 11, 39, 11, 140, 0, 249, 255, 140, 60,
    248, 198, 112, 23,
];
pub const CALIBRATION_H1: u8 = 75;
/// Calibration block 0xE1..0xE7: H2 = 362, H3 = 0, H4 = 313, H5 = 50, H6 = 30.
pub const CALIBRATION_H: [u8; 7] = [0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E];

pub fn datasheet_calibration() -> CalibrationData {
    CalibrationData::decode(&CALIBRATION_TP, CALIBRATION_H1, &CALIBRATION_H)
}

#[derive(Debug, Clone)]
enum RegisterValue {
    Data { bytes: [u8; MAX_REG_BYTES], len: usize },
    BusError,
}

/// Canned responses for one register. Responses are handed out in order, the last one repeats.
#[derive(Debug, Default)]
struct Responses {
    values: Vec<RegisterValue, 4>,
    next: usize,
}

/// Register-level fake transport that records every transaction.
pub struct FakeBus<const N: usize> {
    regs: LinearMap<u8, Responses, N>,
    reads: Vec<u8, 64>,
    writes: Vec<(u8, u8), 64>,
}

pub struct FakeDelay {
    pub total_ns: u64,
}

impl FakeDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            regs: LinearMap::new(),
            reads: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Queues `data` as the next response for register `R`. May be shorter than `R::N` to
    /// simulate a short read.
    pub fn with_response<R: Readable>(&mut self, data: &[u8]) {
        let mut bytes = [0u8; MAX_REG_BYTES];
        bytes[..data.len()].copy_from_slice(data);
        self.push(R::ADDR, RegisterValue::Data { bytes, len: data.len() });
    }

    /// Queues a bus error as the next response for register `R`.
    pub fn with_bus_error<R: Readable>(&mut self) {
        self.push(R::ADDR, RegisterValue::BusError);
    }

    fn push(&mut self, addr: u8, value: RegisterValue) {
        if !self.regs.contains_key(&addr) {
            self.regs.insert(addr, Responses::default()).unwrap();
        }
        self.regs.get_mut(&addr).unwrap().values.push(value).unwrap();
    }

    /// Register addresses of every read, in order.
    pub fn reads(&self) -> &[u8] {
        &self.reads
    }

    /// `(register, value)` of every byte written, in order.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    /// Position of the first write to `register` in [`writes`](Self::writes).
    pub fn write_position(&self, register: u8) -> Option<usize> {
        self.writes.iter().position(|(reg, _)| *reg == register)
    }
}

impl<const N: usize> RegisterTransport for FakeBus<N> {
    type Error = ();

    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        for (offset, value) in data.iter().enumerate() {
            self.writes.push((register + offset as u8, *value)).unwrap();
        }

        Ok(())
    }

    fn read_register(&mut self, register: u8, data: &mut [u8]) -> Result<usize, Self::Error> {
        self.reads.push(register).unwrap();

        let Some(responses) = self.regs.get_mut(&register) else {
            panic!("No mocked value for register 0x{:x} and length {}", register, data.len())
        };

        let index = responses.next.min(responses.values.len() - 1);
        responses.next += 1;

        match &responses.values[index] {
            RegisterValue::Data { bytes, len } => {
                let received = (*len).min(data.len());
                data[..received].copy_from_slice(&bytes[..received]);
                Ok(received)
            }
            RegisterValue::BusError => Err(()),
        }
    }
}
