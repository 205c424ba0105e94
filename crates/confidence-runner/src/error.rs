//! 에러 타입 정의.

use std::fmt;

use confidence_core::CoreError;
use confidence_data::DataError;

/// Runner 에러 타입
#[derive(Debug)]
pub enum RunnerError {
    /// 설정 에러
    Config(String),
    /// 핵심 모델 에러 (정렬 위반 등)
    Core(CoreError),
    /// 데이터 소스/출력 문서 에러
    Data(DataError),
    /// 차트 렌더링 에러
    Chart(String),
    /// 파일 입출력 에러
    Io(std::io::Error),
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Core(e) => write!(f, "Pipeline error: {}", e),
            Self::Data(e) => write!(f, "Data error: {}", e),
            Self::Chart(msg) => write!(f, "Chart error: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(e) => Some(e),
            Self::Data(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoreError> for RunnerError {
    fn from(err: CoreError) -> Self {
        if err.is_config() {
            Self::Config(err.to_string())
        } else {
            Self::Core(err)
        }
    }
}

impl From<DataError> for RunnerError {
    fn from(err: DataError) -> Self {
        Self::Data(err)
    }
}

impl From<std::io::Error> for RunnerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<std::fmt::Error> for RunnerError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Chart(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, RunnerError>;
