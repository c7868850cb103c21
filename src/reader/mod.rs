use crate::error::Result;
use crate::Reading;

mod simulated;
pub use simulated::Simulator;
mod single_wire;

pub trait DhtReader {
    /// Prepare the sensor for its first measurement
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    /// Read the sensor readings
    fn read(&mut self) -> Result<Reading>;
}
