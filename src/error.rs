use thiserror::Error;

pub type Result<T> = core::result::Result<T, DHTError>;
#[derive(Error, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum DHTError {
    #[error("Data pin error")]
    PinError,
    #[error("Sensor did not respond in time")]
    Timeout,
    #[error("Frame bytes {bytes:#x?} expected {expected_checksum:#x} but got the checksum {calculated_checksum:#x}")]
    InvalidChecksumError {
        bytes: [u8; 4],
        expected_checksum: u8,
        calculated_checksum: u8,
    },
    #[error("Decoded humidity is out of range")]
    OutOfRangeError,
    #[error("Unsupported DHT sensor type {0}")]
    UnsupportedSensorType(u8),
    #[error("Sensor index {index} is out of range for {count} sensors")]
    SensorIndexError { index: usize, count: usize },
    #[error("Unrecognised command")]
    UnknownCommandError,
    #[error("Malformed auto report line")]
    MalformedReportError,
}
