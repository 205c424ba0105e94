//! 날짜 인덱스에 정렬된 값 시계열.
//!
//! 모든 지표 결과와 신뢰도 시계열은 가격 시계열의 날짜 인덱스를 그대로
//! 공유합니다 (같은 길이, 같은 순서). 값이 없는 날짜는 `None`으로 표현합니다.

use std::ops::Deref;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};

/// 공유 날짜 인덱스.
///
/// 복제 비용 없이 여러 시계열이 같은 인덱스를 참조합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateIndex(Arc<[NaiveDate]>);

impl DateIndex {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self(dates.into())
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.0
    }

    /// 같은 인덱스인지 확인합니다 (동일 할당이면 비교 생략).
    pub fn same_as(&self, other: &DateIndex) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Deref for DateIndex {
    type Target = [NaiveDate];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// 날짜 인덱스에 정렬된 값 시계열.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    index: DateIndex,
    values: Vec<Option<f64>>,
}

/// 한 지표가 한 번의 실행에서 생성한 결과.
pub type MetricResult = Series;

/// 날짜별 종합 신뢰도.
pub type ConfidenceSeries = Series;

impl Series {
    /// 인덱스와 값으로 시계열을 생성합니다.
    ///
    /// 길이가 다르면 [`CoreError::Misaligned`]를 반환합니다.
    /// 유한하지 않은 값(NaN, ±∞)은 결측으로 취급합니다.
    pub fn new(index: DateIndex, values: Vec<Option<f64>>) -> CoreResult<Self> {
        if index.len() != values.len() {
            return Err(CoreError::Misaligned {
                expected: index.len(),
                actual: values.len(),
            });
        }

        let values = values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();

        Ok(Self { index, values })
    }

    /// 인덱스의 각 날짜에 대해 값을 계산하여 시계열을 생성합니다.
    pub fn from_fn(index: DateIndex, mut f: impl FnMut(usize, NaiveDate) -> Option<f64>) -> Self {
        let values = index
            .iter()
            .enumerate()
            .map(|(i, date)| f(i, *date).filter(|x| x.is_finite()))
            .collect();
        Self { index, values }
    }

    /// 모든 날짜가 결측인 시계열.
    pub fn missing(index: DateIndex) -> Self {
        let values = vec![None; index.len()];
        Self { index, values }
    }

    pub fn index(&self) -> &DateIndex {
        &self.index
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied().flatten()
    }

    /// 마지막 날짜의 값 (결측일 수 있음).
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// 결측이 아닌 값의 개수.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// 주어진 인덱스와 정렬되어 있는지 확인합니다.
    pub fn is_aligned_with(&self, index: &DateIndex) -> bool {
        self.index.same_as(index)
    }

    /// 값을 `[lower, upper]` 범위로 자릅니다. 결측은 그대로 유지됩니다.
    pub fn clip(mut self, lower: f64, upper: f64) -> Self {
        for value in self.values.iter_mut().flatten() {
            *value = value.clamp(lower, upper);
        }
        self
    }

    /// 결측 날짜에 직전 값을 채웁니다.
    ///
    /// 첫 유효 값 이전의 날짜는 결측으로 남습니다 (역방향 채움 없음).
    pub fn forward_fill(mut self) -> Self {
        let mut last_seen = None;
        for value in self.values.iter_mut() {
            match value {
                Some(v) => last_seen = Some(*v),
                None => *value = last_seen,
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(len: u32) -> DateIndex {
        DateIndex::new(
            (1..=len)
                .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_new_rejects_misaligned_values() {
        let err = Series::new(index(3), vec![Some(0.1), None]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Misaligned {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_non_finite_values_become_missing() {
        let series =
            Series::new(index(3), vec![Some(f64::NAN), Some(f64::INFINITY), Some(0.4)]).unwrap();
        assert_eq!(series.values(), &[None, None, Some(0.4)]);
        assert_eq!(series.present_count(), 1);
    }

    #[test]
    fn test_clip_keeps_missing() {
        let series = Series::new(index(4), vec![Some(-0.5), None, Some(0.3), Some(1.7)])
            .unwrap()
            .clip(0.0, 1.0);
        assert_eq!(series.values(), &[Some(0.0), None, Some(0.3), Some(1.0)]);
    }

    #[test]
    fn test_forward_fill_never_backfills() {
        let series = Series::new(index(5), vec![None, None, Some(0.2), None, Some(0.6)])
            .unwrap()
            .forward_fill();
        assert_eq!(
            series.values(),
            &[None, None, Some(0.2), Some(0.2), Some(0.6)]
        );
    }

    #[test]
    fn test_alignment_check() {
        let idx = index(2);
        let series = Series::missing(idx.clone());
        assert!(series.is_aligned_with(&idx));
        assert!(series.is_aligned_with(&index(2)));
        assert!(!series.is_aligned_with(&index(3)));
        assert_eq!(series.last(), None);
    }
}
