//! 시장 업데이트 페이로드.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 지표 하나의 최신 값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdown {
    /// 지표 이름 (조회 키)
    pub name: String,
    /// 사람이 읽는 설명
    pub description: String,
    /// 최신 정규화 값 (결측일 수 있음)
    pub value: Option<f64>,
}

/// 실행 성공 시 게시되는 시장 업데이트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketUpdate {
    /// 기준 날짜
    pub date: NaiveDate,
    /// 현재 가격
    pub price: f64,
    /// 종합 신뢰도
    pub confidence: Option<f64>,
    /// 지표별 값 (등록 순서)
    pub details: Vec<MetricBreakdown>,
    /// 차트 파일 경로 (생성된 경우)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_path: Option<PathBuf>,
}

impl MarketUpdate {
    /// 결측이 아닌 지표 값만 반환합니다.
    pub fn present_details(&self) -> impl Iterator<Item = (&MetricBreakdown, f64)> {
        self.details
            .iter()
            .filter_map(|d| d.value.map(|v| (d, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_details_skips_missing() {
        let update = MarketUpdate {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            price: 62_000.0,
            confidence: Some(0.55),
            details: vec![
                MetricBreakdown {
                    name: "PiCycle".to_string(),
                    description: "Pi Cycle Top Indicator".to_string(),
                    value: Some(0.4),
                },
                MetricBreakdown {
                    name: "2YMA".to_string(),
                    description: "2 Year Moving Average".to_string(),
                    value: None,
                },
            ],
            chart_path: None,
        };

        let present: Vec<_> = update.present_details().map(|(d, _)| d.name.as_str()).collect();
        assert_eq!(present, vec!["PiCycle"]);
    }
}
