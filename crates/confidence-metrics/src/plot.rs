//! 지표 차트 기술자(descriptor).
//!
//! 지표는 그림을 직접 그리지 않고 데이터와 레이블만 담은 기술자를
//! 반환합니다. 렌더링은 등록 순서대로 기술자 목록을 받아 별도 단계에서
//! 수행합니다.

use confidence_core::{DateIndex, MetricResult};
use serde::Serialize;

/// 차트 선 하나.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotLine {
    /// 범례 레이블
    pub label: String,
    /// 날짜 인덱스에 정렬된 값
    pub values: Vec<Option<f64>>,
}

impl PlotLine {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    /// 결측 없는 값으로 선을 생성합니다.
    pub fn dense(label: impl Into<String>, values: &[f64]) -> Self {
        Self::new(label, values.iter().copied().map(Some).collect())
    }
}

/// 차트 패널 (축 하나).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPanel {
    pub title: String,
    /// 로그 스케일 Y축 여부
    pub log_scale: bool,
    pub lines: Vec<PlotLine>,
}

impl PlotPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            log_scale: false,
            lines: Vec::new(),
        }
    }

    pub fn log_scale(mut self) -> Self {
        self.log_scale = true;
        self
    }

    pub fn with_line(mut self, line: PlotLine) -> Self {
        self.lines.push(line);
        self
    }
}

/// 지표 하나의 차트 기술자 (차트 그리드의 한 행).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotDescriptor {
    /// 지표 이름
    pub metric: String,
    /// 행 제목 (지표 설명)
    pub title: String,
    #[serde(skip)]
    pub index: DateIndex,
    pub panels: Vec<PlotPanel>,
}

impl PlotDescriptor {
    pub fn new(
        metric: impl Into<String>,
        title: impl Into<String>,
        index: DateIndex,
        panels: Vec<PlotPanel>,
    ) -> Self {
        Self {
            metric: metric.into(),
            title: title.into(),
            index,
            panels,
        }
    }

    /// 정규화 값 패널만 가진 기술자 (폴백 결과용).
    pub fn value_only(metric: &str, title: &str, result: &MetricResult) -> Self {
        let panel = PlotPanel::new(format!("{} (fallback)", title))
            .with_line(PlotLine::new("Value", result.values().to_vec()));
        Self::new(metric, title, result.index().clone(), vec![panel])
    }
}
