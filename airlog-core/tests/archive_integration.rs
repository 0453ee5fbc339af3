//! End-to-end tests over on-disk archives

mod common;

use airlog_core::{aggregate, ArchiveError, Period, Quantity};
use chrono::Duration;
use common::{at, ArchiveBuilder, TestArchive};
use proptest::prelude::*;

#[test]
fn single_day_temperature_summary() {
    let archive = ArchiveBuilder::new()
        .rows(
            Quantity::Temperature,
            &[
                "2024-06-10 08:00:00,20.0",
                "2024-06-10 12:00:00,25.0",
                "2024-06-10 18:00:00,22.0",
            ],
        )
        .build();

    let readings = archive
        .query_range(at(2024, 6, 10, 0, 0, 0), at(2024, 6, 10, 23, 59, 59))
        .unwrap();
    assert_eq!(readings.len(), 3);

    let summary = aggregate(&readings).unwrap();
    let t = &summary[&Quantity::Temperature];
    assert_eq!(t.item_count, 3);
    assert_eq!(format!("{:.2}", t.mean), "22.33");
    assert_eq!(t.max.value(), 25.0);
    assert_eq!(t.max.timestamp(), at(2024, 6, 10, 12, 0, 0));
    assert_eq!(t.min.value(), 20.0);
    assert_eq!(t.min.timestamp(), at(2024, 6, 10, 8, 0, 0));
}

#[test]
fn quantity_without_file_is_absent_from_summary() {
    let archive = ArchiveBuilder::new()
        .rows(
            Quantity::Temperature,
            &["2024-06-10 08:00:00,20.0", "2024-06-10 09:00:00,21.0"],
        )
        .build();

    let readings = archive
        .query_range(at(2024, 6, 10, 0, 0, 0), at(2024, 6, 10, 23, 59, 59))
        .unwrap();
    let summary = aggregate(&readings).unwrap();

    assert!(summary.contains_key(&Quantity::Temperature));
    assert!(!summary.contains_key(&Quantity::Humidity));
    assert!(!summary.contains_key(&Quantity::Smoke));
}

#[test]
fn time_of_day_is_checked_on_boundary_days() {
    let archive = ArchiveBuilder::new()
        .rows(
            Quantity::Humidity,
            &[
                "2024-06-10 06:00:00,70.0",
                "2024-06-10 12:00:00,55.0",
                "2024-06-10 20:00:00,65.0",
            ],
        )
        .build();

    let readings = archive
        .query_range(at(2024, 6, 10, 10, 0, 0), at(2024, 6, 10, 14, 0, 0))
        .unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].value(), 55.0);
}

#[test]
fn results_follow_directory_order() {
    let archive = ArchiveBuilder::new()
        .day_rows(2024, 6, 11, Quantity::Temperature, &["2024-06-11 08:00:00,19.0"])
        .day_rows(2024, 6, 9, Quantity::Temperature, &["2024-06-09 08:00:00,17.0"])
        .day_rows(2024, 6, 10, Quantity::Humidity, &["2024-06-10 08:00:00,50.0"])
        .day_rows(2024, 6, 10, Quantity::Temperature, &["2024-06-10 08:00:00,18.0"])
        .day_rows(2023, 12, 31, Quantity::Temperature, &["2023-12-31 08:00:00,2.0"])
        .build();

    let readings = archive
        .query_range(at(2023, 1, 1, 0, 0, 0), at(2024, 12, 31, 0, 0, 0))
        .unwrap();
    let values: Vec<f64> = readings.iter().map(|r| r.value()).collect();
    // days ascending, temperature before humidity within a day
    assert_eq!(values, vec![2.0, 17.0, 18.0, 50.0, 19.0]);
}

#[test]
fn repeated_queries_are_identical() {
    let archive = ArchiveBuilder::new()
        .day_rows(2024, 6, 10, Quantity::Pressure, &["2024-06-10 08:00:00,1013.27", "2024-06-10 09:00:00,1012.9"])
        .day_rows(2024, 6, 11, Quantity::Pm10, &["2024-06-11 08:00:00,12.5"])
        .build();

    let (start, end) = (at(2024, 6, 1, 0, 0, 0), at(2024, 6, 30, 23, 59, 59));
    let first = archive.query_range(start, end).unwrap();
    let second = archive.query_range(start, end).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn values_are_rounded_when_read() {
    let archive = ArchiveBuilder::new()
        .rows(Quantity::Pm25, &["2024-06-10 08:00:00,7.456", "2024-06-10 09:00:00,7.444"])
        .build();

    let readings = archive
        .query_range(at(2024, 6, 10, 0, 0, 0), at(2024, 6, 10, 23, 59, 59))
        .unwrap();
    let values: Vec<f64> = readings.iter().map(|r| r.value()).collect();
    assert_eq!(values, vec![7.46, 7.44]);
}

#[test]
fn unreadable_existing_file_propagates() {
    let builder = ArchiveBuilder::new();
    // a directory where the CSV should be opens but cannot be read
    std::fs::create_dir_all(builder.day_dir(2024, 6, 10).join("temperature.csv")).unwrap();
    let archive = builder.build();

    let err = archive
        .query_range(at(2024, 6, 10, 0, 0, 0), at(2024, 6, 10, 23, 59, 59))
        .unwrap_err();
    match err {
        ArchiveError::Io { path, .. } => assert!(path.ends_with("2024/06/10/temperature.csv")),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn period_windows_query_relative_to_clock() {
    let archive = ArchiveBuilder::new()
        .clock(at(2024, 6, 12, 15, 0, 0))
        .day_rows(2024, 5, 31, Quantity::Temperature, &["2024-05-31 12:00:00,30.0"])
        .day_rows(2024, 6, 3, Quantity::Temperature, &["2024-06-03 12:00:00,24.0"])
        .day_rows(2024, 6, 10, Quantity::Temperature, &["2024-06-10 12:00:00,22.0"])
        .day_rows(
            2024,
            6,
            12,
            Quantity::Temperature,
            &["2024-06-12 09:00:00,21.0", "2024-06-12 16:00:00,26.0"],
        )
        .build();

    assert_eq!(archive.today().unwrap().len(), 1);
    assert_eq!(archive.this_week().unwrap().len(), 2);
    assert_eq!(archive.this_month().unwrap().len(), 3);
    assert_eq!(archive.period(Period::ThisMonth).unwrap(), archive.this_month().unwrap());
}

#[test]
fn latest_timestamp_on_empty_archive_is_now() {
    let now = at(2024, 6, 12, 15, 4, 5);
    let archive = ArchiveBuilder::new().clock(now).build();

    assert_eq!(archive.latest_reading_time().unwrap(), None);
    assert_eq!(archive.latest_timestamp().unwrap(), "12/06/2024 15:04:05");
}

#[test]
fn latest_timestamp_uses_newest_day() {
    let archive = ArchiveBuilder::new()
        .clock(at(2025, 1, 2, 0, 0, 0))
        .day_rows(2024, 12, 31, Quantity::Temperature, &["2024-12-31 23:00:00,1.0", "2024-12-31 23:30:00,0.5"])
        .day_rows(2024, 3, 1, Quantity::Temperature, &["2024-03-01 10:00:00,9.0"])
        .build();

    assert_eq!(archive.latest_timestamp().unwrap(), "31/12/2024 23:30:00");
}

#[test]
fn latest_timestamp_unreadable_file_is_an_error() {
    let builder = ArchiveBuilder::new().clock(at(2024, 6, 12, 0, 0, 0));
    std::fs::create_dir_all(builder.day_dir(2024, 6, 10).join("temperature.csv")).unwrap();
    let archive = builder.build();

    assert!(matches!(archive.latest_timestamp(), Err(ArchiveError::Io { .. })));
}

fn fixture() -> TestArchive {
    let mut builder = ArchiveBuilder::new();
    for day in 1..=5u32 {
        let rows: Vec<String> = (0..24)
            .step_by(3)
            .map(|h| format!("2024-06-{:02} {:02}:15:00,{}.5", day, h, 10 + h))
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        builder = builder.day_rows(2024, 6, day, Quantity::Temperature, &rows);
    }
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_reading_lies_inside_the_window(offset in 0i64..(6 * 24 * 60), span in 0i64..(3 * 24 * 60)) {
        let archive = fixture();
        let start = at(2024, 5, 31, 0, 0, 0) + Duration::minutes(offset);
        let end = start + Duration::minutes(span);

        let readings = archive.query_range(start, end).unwrap();
        for r in &readings {
            prop_assert!(start <= r.timestamp() && r.timestamp() <= end);
        }

        let expected = (1..=5u32)
            .flat_map(|d| (0..24).step_by(3).map(move |h| at(2024, 6, d, h, 15, 0)))
            .filter(|ts| start <= *ts && *ts <= end)
            .count();
        prop_assert_eq!(readings.len(), expected);
    }
}
