//! Unit tests for footprint series output

use bpost::decode::CutoffObservation;
use bpost::series::{write_series, SERIES_HEADER};
use bpost::ThresholdSeries;
use std::fs;
use tempfile::TempDir;

#[test]
fn series_file_is_sorted_csv() {
    let temp = TempDir::new().unwrap();
    let series = ThresholdSeries::new(
        0.0025,
        vec![
            CutoffObservation::new(0.04, 0.3),
            CutoffObservation::new(0.01, 0.1),
            CutoffObservation::new(0.03, 0.2),
        ],
    );
    let path = write_series(&series, temp.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "rFootvsTime_0.0025.csv");

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<&str> = reader.headers().unwrap().iter().collect();
    assert_eq!(header, SERIES_HEADER.to_vec());
    let times: Vec<f64> = reader
        .records()
        .map(|r| r.unwrap()[0].parse().unwrap())
        .collect();
    assert_eq!(times, vec![0.01, 0.03, 0.04]);
}

#[test]
fn rewriting_identical_series_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let observations = vec![
        CutoffObservation::new(0.2, 1.5e-3),
        CutoffObservation::new(0.1, 2.0),
    ];
    let path = write_series(&ThresholdSeries::new(0.05, observations.clone()), temp.path()).unwrap();
    let first = fs::read(&path).unwrap();

    let mut reversed = observations;
    reversed.reverse();
    write_series(&ThresholdSeries::new(0.05, reversed), temp.path()).unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
}
