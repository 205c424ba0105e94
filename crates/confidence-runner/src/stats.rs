//! 실행 통계 구조체.

use std::time::Duration;

use confidence_metrics::ValueSource;
use serde::{Deserialize, Serialize};

/// 한 번의 파이프라인 실행 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// 가격 포인트 수
    pub price_points: usize,
    /// 평가한 지표 수
    pub metrics: usize,
    /// 직접 계산에 성공한 지표 수
    pub calculated: usize,
    /// 폴백 값을 사용한 지표 수
    pub fallback: usize,
    /// 최신 날짜 값이 결측인 지표 수
    pub missing_latest: usize,
    /// 차트 생성 여부
    pub chart_written: bool,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunSummary {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 지표 평가 결과를 기록합니다.
    pub fn record(&mut self, source: ValueSource, latest: Option<f64>) {
        self.metrics += 1;
        match source {
            ValueSource::Calculated => self.calculated += 1,
            ValueSource::Fallback => self.fallback += 1,
        }
        if latest.is_none() {
            self.missing_latest += 1;
        }
    }

    /// 직접 계산 비율 (%)
    pub fn calculated_rate(&self) -> f64 {
        if self.metrics == 0 {
            0.0
        } else {
            (self.calculated as f64 / self.metrics as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self) {
        tracing::info!(
            price_points = self.price_points,
            metrics = self.metrics,
            calculated = self.calculated,
            fallback = self.fallback,
            missing_latest = self.missing_latest,
            chart_written = self.chart_written,
            calculated_rate = format!("{:.1}%", self.calculated_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "Pipeline run completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_sources() {
        let mut summary = RunSummary::new();
        summary.record(ValueSource::Calculated, Some(0.4));
        summary.record(ValueSource::Fallback, None);
        summary.record(ValueSource::Calculated, Some(0.9));

        assert_eq!(summary.metrics, 3);
        assert_eq!(summary.calculated, 2);
        assert_eq!(summary.fallback, 1);
        assert_eq!(summary.missing_latest, 1);
        assert!((summary.calculated_rate() - 66.666).abs() < 0.01);
    }
}
