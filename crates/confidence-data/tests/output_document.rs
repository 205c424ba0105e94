//! 출력 문서 저장/읽기 테스트.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use confidence_core::{PricePoint, PriceSeries, Series};
use confidence_data::{OutputDocument, PublishedDocument, CONFIDENCE_COLUMN, PRICE_COLUMN};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("confidence-data-{}", uuid::Uuid::new_v4()))
}

#[test]
fn test_written_document_reads_back_within_precision() {
    let start = NaiveDate::from_ymd_opt(2023, 12, 30).unwrap();
    let prices = PriceSeries::new(
        (0..4).map(|i| PricePoint::new(start + Duration::days(i), 41_000.123_456 + i as f64)),
    );
    let metric = Series::new(
        prices.index().clone(),
        vec![None, Some(0.25), Some(0.333_333), Some(0.999_99)],
    )
    .unwrap();

    let dir = temp_dir();
    let path = dir.join("nested").join("latest.json");

    OutputDocument::new(&prices, 4)
        .with_column("PiCycle", &metric)
        .unwrap()
        .with_column(CONFIDENCE_COLUMN, &metric)
        .unwrap()
        .write(&path)
        .unwrap();

    let doc = PublishedDocument::read(&path).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    let price_rows = doc.column(PRICE_COLUMN).unwrap();
    assert_eq!(price_rows.len(), 4);
    for ((date, value), point) in price_rows.iter().zip(prices.iter()) {
        assert_eq!(*date, point.date);
        assert!((value.unwrap() - point.price).abs() <= 0.5e-4);
    }

    let metric_rows = doc.column("PiCycle").unwrap();
    for ((_, read), original) in metric_rows.iter().zip(metric.values()) {
        match (read, original) {
            (Some(r), Some(o)) => assert!((r - o).abs() <= 0.5e-4),
            (None, None) => {}
            other => panic!("missing value mismatch: {:?}", other),
        }
    }
    assert!(doc.contains(CONFIDENCE_COLUMN));
}
