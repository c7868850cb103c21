use crate::error::{DHTError, Result};
use crate::reader::DhtReader;
use crate::{Reading, DHT};
use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub(crate) fn read_frame<Pin, Delay>(sensor: &mut DHT<Pin, Delay>) -> Result<[u8; 5]>
where
    Pin: InputPin + OutputPin,
    Delay: DelayUs<u16> + DelayMs<u16>,
{
    // Wake up signal
    let start_signal = sensor.kind.start_signal_ms();
    sensor.pin_low()?;
    sensor.delay.delay_ms(start_signal);
    sensor.pin_high()?;

    // Released line, then the sensor's low/high response
    sensor.wait_while(true)?;
    sensor.wait_while(false)?;
    sensor.wait_while(true)?;

    let mut frame = [0; 5];
    for bit in 0..40 {
        // Every bit starts low, a high that outlasts it is a one
        let low = sensor.wait_while(false)?;
        let high = sensor.wait_while(true)?;

        let byte = &mut frame[bit / 8];
        *byte <<= 1;
        if high > low {
            *byte |= 1;
        }
    }

    Ok(frame)
}

impl<Pin, Delay> DhtReader for DHT<Pin, Delay>
where
    Pin: InputPin + OutputPin,
    Delay: DelayUs<u16> + DelayMs<u16>,
{
    /// Leaves the line released so the sensor idles high
    fn begin(&mut self) -> Result<()> {
        self.pin_high()
    }

    /// Wakes the sensor and decodes its answer, retrying until a frame passes validation
    fn read(&mut self) -> Result<Reading> {
        let mut last_error = DHTError::Timeout;

        for attempt in 0..self.max_retries.max(1) {
            if attempt > 0 {
                let retry_delay = self.retry_delay();
                self.delay.delay_ms(retry_delay);
            }

            match read_frame(self).and_then(|frame| self.process_data(frame)) {
                Ok(reading) => return Ok(reading),
                Err(err) => {
                    log::debug!("{:?} read attempt {} failed: {}", self.kind, attempt + 1, err);
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}
