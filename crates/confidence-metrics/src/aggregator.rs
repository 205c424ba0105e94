//! 종합 신뢰도 집계.

use confidence_core::{ConfidenceSeries, Series};

use crate::table::MetricTable;

/// 날짜별로 결측이 아닌 지표 값의 산술 평균을 계산합니다.
///
/// 결측 값은 합과 분모 모두에서 제외됩니다 (0으로 취급하지 않음).
/// 모든 지표가 결측인 날짜는 결측입니다. 가중치, 클리핑, 반올림은
/// 적용하지 않습니다.
pub fn aggregate(table: &MetricTable) -> ConfidenceSeries {
    let columns = table.columns();

    Series::from_fn(table.index().clone(), |i, _| {
        let (sum, count) = columns
            .iter()
            .filter_map(|c| c.result.get(i))
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        (count > 0).then(|| sum / count as f64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use confidence_core::DateIndex;

    fn index(len: u32) -> DateIndex {
        DateIndex::new(
            (1..=len)
                .map(|d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_mean_excludes_missing() {
        let idx = index(2);
        let mut table = MetricTable::new(idx.clone());
        table
            .insert("A", "a", Series::new(idx.clone(), vec![Some(0.2), None]).unwrap())
            .unwrap();
        table
            .insert("B", "b", Series::new(idx.clone(), vec![Some(0.8), None]).unwrap())
            .unwrap();
        table
            .insert("C", "c", Series::new(idx, vec![None, None]).unwrap())
            .unwrap();

        let confidence = aggregate(&table);
        assert!((confidence.get(0).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(confidence.get(1), None);
    }

    #[test]
    fn test_single_present_value_is_not_diluted() {
        let idx = index(1);
        let mut table = MetricTable::new(idx.clone());
        table
            .insert("A", "a", Series::new(idx.clone(), vec![Some(0.9)]).unwrap())
            .unwrap();
        table
            .insert("B", "b", Series::new(idx, vec![None]).unwrap())
            .unwrap();

        assert_eq!(aggregate(&table).get(0), Some(0.9));
    }

    #[test]
    fn test_empty_table_is_all_missing() {
        let idx = index(3);
        let confidence = aggregate(&MetricTable::new(idx.clone()));
        assert!(confidence.is_aligned_with(&idx));
        assert_eq!(confidence.present_count(), 0);
    }
}
