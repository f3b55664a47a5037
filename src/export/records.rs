use crate::catalog::Sensor;
use crate::series::Measurement;
use serde::Serialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A row type with a fixed column header.
///
/// The header is written explicitly so an empty table still carries it.
pub trait CsvRecord: Serialize {
    const HEADER: &'static [&'static str];
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SensorRecord<'a> {
    pub sensor_id: u32,
    pub sensor_name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub location: &'a str,
    pub install_date: String,
}

impl CsvRecord for SensorRecord<'_> {
    const HEADER: &'static [&'static str] =
        &["sensor_id", "sensor_name", "type", "location", "install_date"];
}

impl<'a> From<&'a Sensor> for SensorRecord<'a> {
    fn from(sensor: &'a Sensor) -> Self {
        SensorRecord {
            sensor_id: sensor.id,
            sensor_name: &sensor.name,
            kind: &sensor.kind,
            location: &sensor.location,
            install_date: sensor.install_date.format(DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MeasurementRecord<'a> {
    pub measurement_id: u64,
    pub sensor_id: u32,
    pub timestamp: String,
    pub value: String,
    pub unit: &'a str,
}

impl CsvRecord for MeasurementRecord<'_> {
    const HEADER: &'static [&'static str] =
        &["measurement_id", "sensor_id", "timestamp", "value", "unit"];
}

impl<'a> From<&'a Measurement> for MeasurementRecord<'a> {
    fn from(measurement: &'a Measurement) -> Self {
        MeasurementRecord {
            measurement_id: measurement.id,
            sensor_id: measurement.sensor_id,
            timestamp: measurement.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            value: format!("{:.2}", measurement.value),
            unit: measurement.unit,
        }
    }
}
