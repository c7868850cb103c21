use crate::error::{DHTError, Result};
use crate::reader::DhtReader;
use crate::report::AutoReport;
use crate::sensor::DhtSensor;
use crate::ERROR_VALUE;
use core::fmt::{self, Write};

// Printed in place of a failed sensor
const MISSING_VALUE: &str = "--.--";
const NO_AVERAGE: &str = "Error in reading";

/// Owns an array of sensors and reports on them as a whole
#[derive(Clone, Debug)]
pub struct DhtSensorManager<R> {
    sensors: Vec<DhtSensor<R>>,
}

impl<R: DhtReader> FromIterator<R> for DhtSensorManager<R> {
    fn from_iter<I: IntoIterator<Item = R>>(readers: I) -> Self {
        Self::new(readers.into_iter().map(DhtSensor::new).collect())
    }
}

impl<R: DhtReader> DhtSensorManager<R> {
    pub fn new(sensors: Vec<DhtSensor<R>>) -> Self {
        Self { sensors }
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn sensor(&self, index: usize) -> Option<&DhtSensor<R>> {
        self.sensors.get(index)
    }

    pub fn sensor_mut(&mut self, index: usize) -> Option<&mut DhtSensor<R>> {
        self.sensors.get_mut(index)
    }

    pub fn sensors(&self) -> &[DhtSensor<R>] {
        &self.sensors
    }

    /// Runs every sensor's setup, stopping at the first one that fails
    pub fn begin_all(&mut self) -> Result<()> {
        for sensor in self.sensors.iter_mut() {
            sensor.begin()?;
        }
        Ok(())
    }

    /// Refreshes every sensor, failures are recorded as sentinel values
    pub fn read_all(&mut self) {
        for sensor in self.sensors.iter_mut() {
            let _ = sensor.read();
        }
    }

    /// Refreshes a single sensor. Only an index outside the array is an error,
    /// a failed read is recorded on the sensor like in [`Self::read_all`]
    pub fn read_sensor(&mut self, index: usize) -> Result<()> {
        let count = self.sensors.len();
        match self.sensors.get_mut(index) {
            Some(sensor) => {
                let _ = sensor.read();
                Ok(())
            }
            None => Err(DHTError::SensorIndexError { index, count }),
        }
    }

    fn mean<F: Fn(&DhtSensor<R>) -> f32>(&self, value: F) -> Option<f32> {
        let (sum, count) = self
            .sensors
            .iter()
            .map(value)
            .filter(|value| *value != ERROR_VALUE)
            .fold((0f32, 0usize), |(sum, count), value| (sum + value, count + 1));

        if count > 0 {
            Some(sum / count as f32)
        } else {
            None
        }
    }

    /// Mean temperature, or [`ERROR_VALUE`] when no sensor has a valid reading
    pub fn average_temperature(&self) -> f32 {
        self.mean(DhtSensor::temperature).unwrap_or(ERROR_VALUE)
    }

    /// Mean humidity, or [`ERROR_VALUE`] when no sensor has a valid reading
    pub fn average_humidity(&self) -> f32 {
        self.mean(DhtSensor::humidity).unwrap_or(ERROR_VALUE)
    }

    pub fn valid_reads(&self) -> usize {
        self.sensors.iter().filter(|sensor| sensor.is_valid()).count()
    }

    /// Means over the sensors whose last read succeeded, as sent in the auto report
    pub fn averages(&self) -> AutoReport {
        AutoReport {
            temperature: self.mean(DhtSensor::temperature),
            humidity: self.mean(DhtSensor::humidity),
            valid_reads: self.valid_reads(),
        }
    }

    /// Writes `Humidity: <each>%, AVG: <mean>%, ` without ending the line
    pub fn print_humidity_readings<W: Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str("Humidity: ")?;
        for sensor in &self.sensors {
            write_value(out, sensor.humidity())?;
            out.write_str("%, ")?;
        }
        out.write_str("AVG: ")?;
        match self.mean(DhtSensor::humidity) {
            Some(average) => write!(out, "{:.2}", average)?,
            None => out.write_str(NO_AVERAGE)?,
        }
        out.write_str("%, ")
    }

    /// Writes `\tTemperature: <each> *C, AVG: <mean> *C` and ends the line
    pub fn print_temperature_readings<W: Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str("\tTemperature: ")?;
        for sensor in &self.sensors {
            write_value(out, sensor.temperature())?;
            out.write_str(" *C, ")?;
        }
        out.write_str("AVG: ")?;
        match self.mean(DhtSensor::temperature) {
            Some(average) => write!(out, "{:.2}", average)?,
            None => out.write_str(NO_AVERAGE)?,
        }
        out.write_str(" *C\r\n")
    }

    /// Human readable line with every sensor and both means
    pub fn debug<W: Write>(&self, out: &mut W) -> fmt::Result {
        self.print_humidity_readings(out)?;
        self.print_temperature_readings(out)
    }

    /// Machine readable `A,<temperature>,<humidity>,<valid reads>` line
    pub fn send_auto<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}\r\n", self.averages())
    }
}

fn write_value<W: Write>(out: &mut W, value: f32) -> fmt::Result {
    if value == ERROR_VALUE {
        out.write_str(MISSING_VALUE)
    } else {
        write!(out, "{:.2}", value)
    }
}
