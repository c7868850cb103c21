use crate::error::Result;
use crate::reader::DhtReader;
use crate::{Reading, ERROR_VALUE};

/// A sensor together with the outcome of its latest read
#[derive(Clone, Debug)]
pub struct DhtSensor<R> {
    reader: R,
    last: Option<Reading>,
}

impl<R: DhtReader> DhtSensor<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, last: None }
    }

    pub fn begin(&mut self) -> Result<()> {
        self.reader.begin()
    }

    /// Refreshes the stored values, a failed read invalidates both
    pub fn read(&mut self) -> Result<Reading> {
        let result = self.reader.read();
        match result {
            Ok(reading) => self.last = Some(reading),
            Err(err) => {
                log::warn!("Sensor read failed: {}", err);
                self.last = None;
            }
        }
        result
    }

    /// Last temperature, or [`ERROR_VALUE`] when the last read failed
    pub fn temperature(&self) -> f32 {
        self.last.map_or(ERROR_VALUE, |reading| reading.temperature)
    }

    /// Last humidity, or [`ERROR_VALUE`] when the last read failed
    pub fn humidity(&self) -> f32 {
        self.last.map_or(ERROR_VALUE, |reading| reading.humidity)
    }

    pub fn reading(&self) -> Option<Reading> {
        self.last
    }

    pub fn is_valid(&self) -> bool {
        self.last.is_some()
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }
}
