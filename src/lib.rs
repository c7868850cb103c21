pub mod command;
pub mod error;
pub mod manager;
pub mod reader;
pub mod report;
pub mod sensor;
pub mod station;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::{InputPin, OutputPin};
use error::{DHTError, Result};

pub mod prelude {
    pub use super::{
        command::Command, manager::DhtSensorManager, reader::DhtReader, reader::Simulator,
        report::AutoReport, sensor::DhtSensor, station::Station, Reading, SensorType, DHT,
        ERROR_VALUE,
    };
}

/// Reserved value reported in place of a failed temperature or humidity reading
pub const ERROR_VALUE: f32 = -1500f32;

// Default number of polls a single line phase may last before giving up
const DEFAULT_TIMEOUT: u16 = 100;

const DEFAULT_MAX_RETRIES: u8 = 3;

/// A DHT sensor on a single open-drain data pin
#[derive(Copy, Clone, Debug)]
pub struct DHT<Pin, Delay> {
    pin: Pin,
    delay: Delay,
    kind: SensorType,
    max_retries: u8,
    retry_delay: Option<u16>,
    timeout: u16,
}

/// Represents the reading gotten from the sensor, in degrees Celsius and percent RH
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub temperature: f32,
    pub humidity: f32,
}

/// The supported members of the DHT family
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum SensorType {
    Dht11 = 11,
    /// Also sold as AM2301
    Dht21 = 21,
    /// Also sold as AM2302
    #[default]
    Dht22 = 22,
}

impl SensorType {
    /// How long the host holds the line low to wake the sensor up
    pub fn start_signal_ms(&self) -> u16 {
        match self {
            SensorType::Dht11 => 20,
            SensorType::Dht21 | SensorType::Dht22 => 1,
        }
    }

    /// The shortest interval between two measurements the sensor can deliver
    pub fn min_interval_ms(&self) -> u16 {
        match self {
            SensorType::Dht11 => 1000,
            SensorType::Dht21 | SensorType::Dht22 => 2000,
        }
    }
}

impl TryFrom<u8> for SensorType {
    type Error = DHTError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            11 => Ok(SensorType::Dht11),
            21 => Ok(SensorType::Dht21),
            22 => Ok(SensorType::Dht22),
            other => Err(DHTError::UnsupportedSensorType(other)),
        }
    }
}

fn verify_data(frame: [u8; 5]) -> Result<()> {
    let calculated = frame[..4]
        .iter()
        .fold(0u8, |sum, byte| sum.wrapping_add(*byte));

    if calculated != frame[4] {
        return Err(DHTError::InvalidChecksumError {
            bytes: [frame[0], frame[1], frame[2], frame[3]],
            expected_checksum: frame[4],
            calculated_checksum: calculated,
        });
    }

    Ok(())
}

/// Merges two bytes so the result is both, ex merge_bytes(0x20, 0x33) = 0x2033
fn merge_bytes(a: u8, b: u8) -> u16 {
    ((a as u16) << 8) | b as u16
}

fn decode_frame(kind: SensorType, frame: [u8; 5]) -> Result<Reading> {
    verify_data(frame)?;

    let (temperature, humidity) = match kind {
        SensorType::Dht11 => {
            // Integral and tenth bytes, sign lives in the top bit of the tenths
            let humidity = (frame[0] as f32 * 10f32 + frame[1] as f32) / 10f32;
            let magnitude = (frame[2] as f32 * 10f32 + (frame[3] & 0x0F) as f32) / 10f32;
            let temperature = if frame[3] & 0x80 != 0 {
                -magnitude
            } else {
                magnitude
            };
            (temperature, humidity)
        }
        SensorType::Dht21 | SensorType::Dht22 => {
            let humidity = merge_bytes(frame[0], frame[1]) as f32 / 10f32;
            let magnitude = merge_bytes(frame[2] & 0x7F, frame[3]) as f32 / 10f32;
            let temperature = if frame[2] & 0x80 != 0 {
                -magnitude
            } else {
                magnitude
            };
            (temperature, humidity)
        }
    };

    if humidity > 100f32 {
        return Err(DHTError::OutOfRangeError);
    }

    Ok(Reading {
        temperature,
        humidity,
    })
}

impl<Pin, Delay> DHT<Pin, Delay> {
    /// Create a new DHT22 sensor, use [`DHT::with_kind`] for the others
    pub fn new(pin: Pin, delay: Delay) -> Self {
        Self {
            pin,
            delay,
            kind: SensorType::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Change the sensor type, which changes the wake up signal and frame layout
    pub fn set_kind(&mut self, kind: SensorType) {
        self.kind = kind;
    }

    /// Change the sensor type, which changes the wake up signal and frame layout
    pub fn with_kind(mut self, kind: SensorType) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> SensorType {
        self.kind
    }

    /// Sets the max number of attempts to read a sensor before giving up
    pub fn set_max_retries(&mut self, max_retries: u8) {
        self.max_retries = max_retries
    }

    /// Sets the max number of attempts to read a sensor before giving up
    pub fn with_max_retries(mut self, max_retries: u8) -> Self {
        self.set_max_retries(max_retries);
        self
    }

    /// Sets the millisecond delay between each attempt
    pub fn set_retry_delay(&mut self, ms_delay: u16) {
        self.retry_delay = Some(ms_delay)
    }

    /// Sets the millisecond delay between each attempt
    pub fn with_retry_delay(mut self, ms_delay: u16) -> Self {
        self.set_retry_delay(ms_delay);
        self
    }

    /// Delay between attempts, the sensor's minimum interval unless overridden
    pub fn retry_delay(&self) -> u16 {
        self.retry_delay.unwrap_or_else(|| self.kind.min_interval_ms())
    }

    /// Sets how many polls a single level of the line may last
    pub fn set_timeout(&mut self, polls: u16) {
        self.timeout = polls
    }

    /// Sets how many polls a single level of the line may last
    pub fn with_timeout(mut self, polls: u16) -> Self {
        self.set_timeout(polls);
        self
    }

    /// Gives back the pin and delay
    pub fn destroy(self) -> (Pin, Delay) {
        (self.pin, self.delay)
    }

    fn process_data(&self, frame: [u8; 5]) -> Result<Reading> {
        decode_frame(self.kind, frame)
    }
}

impl<Pin, Delay> DHT<Pin, Delay>
where
    Pin: InputPin + OutputPin,
    Delay: DelayUs<u16> + DelayMs<u16>,
{
    fn pin_high(&mut self) -> Result<()> {
        match self.pin.set_high() {
            Ok(res) => Ok(res),
            Err(_) => Err(DHTError::PinError),
        }
    }

    fn pin_low(&mut self) -> Result<()> {
        match self.pin.set_low() {
            Ok(res) => Ok(res),
            Err(_) => Err(DHTError::PinError),
        }
    }

    fn is_high(&self) -> Result<bool> {
        match self.pin.is_high() {
            Ok(res) => Ok(res),
            Err(_) => Err(DHTError::PinError),
        }
    }

    /// Polls the line once per microsecond for as long as it stays at `high`,
    /// returning the number of polls it took to change
    fn wait_while(&mut self, high: bool) -> Result<u16> {
        let mut elapsed = 0;
        while self.is_high()? == high {
            if elapsed >= self.timeout {
                return Err(DHTError::Timeout);
            }
            elapsed += 1;
            self.delay.delay_us(1);
        }
        Ok(elapsed)
    }
}
