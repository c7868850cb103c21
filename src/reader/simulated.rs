use crate::error::{DHTError, Result};
use crate::reader::DhtReader;
use crate::Reading;

/// Stand-in for a sensor on hosts without GPIO, answers with a fixed reading
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Simulator {
    reading: Reading,
    failing: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(Reading {
            temperature: 22.22,
            humidity: 33.33,
        })
    }
}

impl Simulator {
    pub fn new(reading: Reading) -> Self {
        Self {
            reading,
            failing: false,
        }
    }

    /// A simulator whose every read times out
    pub fn failing() -> Self {
        Self::default().with_failing(true)
    }

    pub fn set_reading(&mut self, reading: Reading) {
        self.reading = reading;
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn with_failing(mut self, failing: bool) -> Self {
        self.set_failing(failing);
        self
    }
}

impl DhtReader for Simulator {
    fn read(&mut self) -> Result<Reading> {
        if self.failing {
            return Err(DHTError::Timeout);
        }
        Ok(self.reading)
    }
}
