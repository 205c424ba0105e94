//! 지표 공식에서 공유하는 수치 헬퍼.
//!
//! - **SMA**: 단순 이동평균
//! - 누적 구간(expanding) 최소/최대 정규화
//! - 고정 경계 로그 정규화

mod moving_average;
mod normalize;

pub use moving_average::sma;
pub use normalize::{normalize_between, normalize_expanding};
