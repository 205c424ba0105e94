//! 데이터 모듈 오류 타입.

use confidence_core::CoreError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 타임아웃 오류
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 데이터 작업 결과 타입.
pub type DataResult<T> = Result<T, DataError>;

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<DataError> for CoreError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::FetchError(msg) | DataError::Timeout(msg) => CoreError::Network(msg),
            DataError::ParseError(msg) | DataError::InvalidData(msg) => CoreError::Data(msg),
            DataError::SerializationError(msg) => CoreError::Serialization(msg),
            DataError::Io(e) => CoreError::Io(e),
        }
    }
}
