use super::CatalogError;

#[derive(Debug, Clone, PartialEq)]
pub struct SensorType {
    pub kind: &'static str,
    pub unit: &'static str,
    pub min_value: f64,
    pub max_value: f64,
}

pub static SENSOR_TYPES: [SensorType; 5] = [
    SensorType {
        kind: "temperature",
        unit: "°C",
        min_value: 15.0,
        max_value: 35.0,
    },
    SensorType {
        kind: "humidity",
        unit: "%",
        min_value: 20.0,
        max_value: 90.0,
    },
    SensorType {
        kind: "light",
        unit: "lux",
        min_value: 0.0,
        max_value: 1000.0,
    },
    SensorType {
        kind: "noise",
        unit: "dB",
        min_value: 30.0,
        max_value: 90.0,
    },
    SensorType {
        kind: "co2",
        unit: "ppm",
        min_value: 400.0,
        max_value: 2000.0,
    },
];

pub static LOCATIONS: [&str; 6] = [
    "Classroom A",
    "Classroom B",
    "Hallway",
    "Cafeteria",
    "Library",
    "Gymnasium",
];

pub fn lookup(kind: &str) -> Result<&'static SensorType, CatalogError> {
    SENSOR_TYPES
        .iter()
        .find(|sensor_type| sensor_type.kind == kind)
        .ok_or_else(|| CatalogError::UnknownSensorType(kind.to_string()))
}
