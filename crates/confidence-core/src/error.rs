//! 파이프라인 공통 에러 타입.
//!
//! 이 모듈은 파이프라인 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 파이프라인 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 시계열 정렬 에러 (날짜 인덱스 불일치)
    #[error("시계열 정렬 에러: 인덱스 길이 {expected}, 값 길이 {actual}")]
    Misaligned { expected: usize, actual: usize },

    /// 지표 이름 중복
    #[error("중복된 지표 이름: {0}")]
    DuplicateMetric(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 파이프라인 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// 설정 문제로 인한 에러인지 확인합니다.
    ///
    /// 설정 에러는 재시도해도 해결되지 않습니다.
    pub fn is_config(&self) -> bool {
        matches!(self, CoreError::Config(_) | CoreError::DuplicateMetric(_))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
