//! # Confidence Core
//!
//! 피크 신뢰도(peak-confidence) 파이프라인의 핵심 도메인 모델과 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 가격 시계열과 날짜 인덱스에 정렬된 지표 시계열
//! - 외부 협력자 trait (가격 소스, 폴백 제공자, 알림)
//! - 시장 업데이트 페이로드
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
