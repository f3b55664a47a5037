use crate::catalog::{sensor_types::lookup, LOCATIONS, SENSOR_COUNT};
use crate::export::{MEASUREMENTS_FILE, SAMPLE_FILE, SAMPLE_SIZE, SENSORS_FILE};
use crate::generator::DatasetGenerator;
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 31)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn read_table(path: &Path) -> (StringRecord, Vec<StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
    (header, rows)
}

fn run(folder: &Path, seed: u64) -> crate::DatasetSummary {
    DatasetGenerator::new(folder, now(), ChaCha8Rng::seed_from_u64(seed))
        .run()
        .unwrap()
}

#[test_log::test]
fn test_end_to_end_tables() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("datasets");
    let summary = run(&folder, 42);

    assert_eq!(summary.sensors, SENSOR_COUNT as usize);
    assert_eq!(summary.measurements, SENSOR_COUNT as usize * 352);
    assert_eq!(summary.sample, SAMPLE_SIZE.min(summary.measurements));

    let (header, sensors) = read_table(&folder.join(SENSORS_FILE));
    assert_eq!(
        header.iter().collect::<Vec<_>>(),
        vec!["sensor_id", "sensor_name", "type", "location", "install_date"]
    );
    assert_eq!(sensors.len(), summary.sensors);

    let mut kinds = HashMap::new();
    for row in &sensors {
        let id: u32 = row[0].parse().unwrap();
        assert!((1..=SENSOR_COUNT).contains(&id));
        assert!(lookup(&row[2]).is_ok());
        assert!(LOCATIONS.contains(&&row[3]));
        let installed = NaiveDate::parse_from_str(&row[4], "%Y-%m-%d").unwrap();
        assert!((30..=365).contains(&(now().date() - installed).num_days()));
        kinds.insert(id, row[2].to_string());
    }
    assert_eq!(kinds.len(), sensors.len());

    let (header, measurements) = read_table(&folder.join(MEASUREMENTS_FILE));
    assert_eq!(
        header.iter().collect::<Vec<_>>(),
        vec!["measurement_id", "sensor_id", "timestamp", "value", "unit"]
    );
    assert_eq!(measurements.len(), summary.measurements);

    for (index, row) in measurements.iter().enumerate() {
        let id: u64 = row[0].parse().unwrap();
        assert_eq!(id, index as u64 + 1);

        let sensor_id: u32 = row[1].parse().unwrap();
        let sensor_type = lookup(&kinds[&sensor_id]).unwrap();

        let timestamp = NaiveDateTime::parse_from_str(&row[2], "%Y-%m-%d %H:%M:%S").unwrap();
        assert!(timestamp < now());

        let value: f64 = row[3].parse().unwrap();
        assert!(value >= sensor_type.min_value && value <= sensor_type.max_value);
        assert_eq!(row[3].split('.').nth(1).map(str::len), Some(2));
        assert_eq!(&row[4], sensor_type.unit);
    }

    let (_, sample) = read_table(&folder.join(SAMPLE_FILE));
    assert_eq!(sample.len(), summary.sample);

    let by_id: HashMap<&str, &StringRecord> = measurements.iter().map(|r| (&r[0], r)).collect();
    let mut seen = HashSet::new();
    for row in &sample {
        assert!(seen.insert(row[0].to_string()), "duplicate id {}", &row[0]);
        assert_eq!(by_id.get(&row[0]), Some(&row));
    }
}

#[test_log::test]
fn test_same_seed_same_files() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    run(first.path(), 7);
    run(second.path(), 7);

    for file in [SENSORS_FILE, MEASUREMENTS_FILE, SAMPLE_FILE] {
        assert_eq!(
            fs::read(first.path().join(file)).unwrap(),
            fs::read(second.path().join(file)).unwrap(),
            "{} differs",
            file
        );
    }
}

#[test_log::test]
fn test_subsecond_now_is_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let now = now() + chrono::Duration::milliseconds(750);
    let generator = DatasetGenerator::new(dir.path(), now, ChaCha8Rng::seed_from_u64(1));
    assert_eq!(generator.now(), self::now());
}

#[test]
fn test_summary_report() {
    let summary = crate::DatasetSummary {
        sensors: 20,
        measurements: 7040,
        sample: 5000,
        output_folder: "datasets".into(),
    };
    assert_eq!(
        summary.to_string(),
        "Generated 20 sensors\n\
         Generated 7040 measurements\n\
         Generated a sample of 5000 measurements\n\
         Files saved to datasets folder"
    );
}

#[test]
fn test_generation_failure_on_blocked_folder() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("datasets");
    fs::write(&blocker, "not a folder").unwrap();

    let result = DatasetGenerator::new(&blocker, now(), ChaCha8Rng::seed_from_u64(1)).run();
    assert!(matches!(result, Err(crate::GeneratorError::Export(_))));
}

#[test]
fn test_generate_into_explicit_folder() {
    let dir = tempfile::tempdir().unwrap();
    let summary = crate::generate_iot_dataset(Some(dir.path())).unwrap();

    assert_eq!(summary.sensors, SENSOR_COUNT as usize);
    assert_eq!(summary.sample, SAMPLE_SIZE.min(summary.measurements));
    assert_eq!(summary.output_folder, dir.path());
    for file in [SENSORS_FILE, MEASUREMENTS_FILE, SAMPLE_FILE] {
        assert!(dir.path().join(file).is_file());
    }
}
