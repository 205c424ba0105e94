//! 지표 계산 오류.

use confidence_core::CoreError;
use thiserror::Error;

/// 지표 계산 오류.
///
/// `Metric::compute` 경계에서 모두 흡수되며 폴백으로 이어집니다.
#[derive(Debug, Error)]
pub enum MetricError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),

    /// 계산 중 패닉 발생
    #[error("계산 중 패닉 발생: {0}")]
    Panicked(String),

    /// 결과 시계열 구성 실패
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// 지표 계산 결과 타입.
pub type MetricCalcResult<T> = Result<T, MetricError>;
