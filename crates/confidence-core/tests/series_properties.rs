//! Series 불변식 속성 테스트

use chrono::{Duration, NaiveDate};
use confidence_core::{DateIndex, Series};
use proptest::prelude::*;

fn index(len: usize) -> DateIndex {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    DateIndex::new((0..len).map(|i| start + Duration::days(i as i64)).collect())
}

fn values() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of(-10.0f64..10.0), 0..64)
}

proptest! {
    #[test]
    fn clip_keeps_length_and_bounds(values in values()) {
        let len = values.len();
        let series = Series::new(index(len), values.clone()).unwrap().clip(0.0, 1.0);

        prop_assert_eq!(series.len(), len);
        for (clipped, original) in series.values().iter().zip(&values) {
            prop_assert_eq!(clipped.is_some(), original.is_some());
            if let Some(v) = clipped {
                prop_assert!((0.0..=1.0).contains(v));
            }
        }
    }

    #[test]
    fn forward_fill_only_fills_after_first_value(values in values()) {
        let len = values.len();
        let first_present = values.iter().position(|v| v.is_some());
        let filled = Series::new(index(len), values.clone()).unwrap().forward_fill();

        for (i, value) in filled.values().iter().enumerate() {
            match first_present {
                Some(first) if i >= first => prop_assert!(value.is_some()),
                _ => prop_assert!(value.is_none()),
            }
            if let Some(original) = values[i] {
                prop_assert_eq!(*value, Some(original));
            }
        }
    }
}
