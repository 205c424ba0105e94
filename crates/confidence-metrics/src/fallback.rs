//! 폴백 값 정렬.

use std::collections::HashMap;

use confidence_core::{DatedValue, DateIndex, MetricResult, Series};

/// 폴백 값을 날짜 인덱스에 left join 한 뒤 forward-fill 합니다.
///
/// 인덱스에 없는 날짜의 폴백 값은 버려지고, 같은 날짜가 여러 번 나오면
/// 마지막 값을 사용합니다. 첫 폴백 값 이전 날짜는 결측으로 남습니다.
pub fn fallback_series(index: &DateIndex, entries: &[DatedValue]) -> MetricResult {
    let by_date: HashMap<_, _> = entries.iter().map(|e| (e.date, e.value)).collect();

    Series::from_fn(index.clone(), |_, date| by_date.get(&date).copied()).forward_fill()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn index() -> DateIndex {
        DateIndex::new((1..=6).map(day).collect())
    }

    #[test]
    fn test_left_join_and_forward_fill() {
        let entries = vec![
            DatedValue::new(day(2), 0.3),
            DatedValue::new(day(4), 0.6),
            // 인덱스 밖의 날짜는 무시
            DatedValue::new(day(20), 0.9),
        ];

        let result = fallback_series(&index(), &entries);
        assert_eq!(
            result.values(),
            &[None, Some(0.3), Some(0.3), Some(0.6), Some(0.6), Some(0.6)]
        );
    }

    #[test]
    fn test_empty_entries_yield_all_missing() {
        let result = fallback_series(&index(), &[]);
        assert_eq!(result.len(), 6);
        assert_eq!(result.present_count(), 0);
    }

    #[test]
    fn test_duplicate_dates_last_wins() {
        let entries = vec![DatedValue::new(day(1), 0.1), DatedValue::new(day(1), 0.2)];
        let result = fallback_series(&index(), &entries);
        assert_eq!(result.get(0), Some(0.2));
        assert_eq!(result.last(), Some(0.2));
    }
}
