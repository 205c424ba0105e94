//! 지표 레지스트리.
//!
//! 한 번의 실행에서 평가할 지표의 정적 목록입니다. 등록 순서가 곧 평가
//! 순서이자 출력 열 순서입니다.

use std::collections::HashSet;
use std::fmt;

use confidence_core::{CoreError, CoreResult};

use crate::metrics::{
    MayerMultipleMetric, PiCycleMetric, TrolololoMetric, TwoYearMovingAverageMetric,
};
use crate::traits::Metric;

/// 순서가 있는 지표 목록.
pub struct MetricRegistry {
    metrics: Vec<Box<dyn Metric>>,
}

impl MetricRegistry {
    /// 지표 목록으로 레지스트리를 생성합니다.
    ///
    /// 이름이 중복되면 [`CoreError::DuplicateMetric`]을 반환합니다.
    pub fn new(metrics: Vec<Box<dyn Metric>>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for metric in &metrics {
            if !seen.insert(metric.name().to_string()) {
                return Err(CoreError::DuplicateMetric(metric.name().to_string()));
            }
        }
        Ok(Self { metrics })
    }

    /// 기본 지표 구성.
    pub fn standard() -> CoreResult<Self> {
        Self::new(vec![
            Box::new(PiCycleMetric::default()),
            Box::new(TwoYearMovingAverageMetric),
            Box::new(TrolololoMetric::default()),
            Box::new(MayerMultipleMetric::default()),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Metric> {
        self.metrics.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&dyn Metric> {
        self.iter().find(|m| m.name() == name)
    }
}

impl fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("metrics", &self.names())
            .finish()
    }
}
