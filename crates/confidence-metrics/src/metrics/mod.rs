//! 가격 기반 신뢰도 지표 구현.
//!
//! | 이름 | 설명 |
//! |---|---|
//! | `PiCycle` | 111일 이동평균과 350일 이동평균×2의 비율 |
//! | `2YMA` | 가격과 2년 이동평균의 로그 거리 |
//! | `Trolololo` | 로그 추세 채널 내 위치 |
//! | `MayerMultiple` | 가격 / 200일 이동평균 |

mod mayer_multiple;
mod pi_cycle;
mod trolololo;
mod two_year_ma;

pub use mayer_multiple::MayerMultipleMetric;
pub use pi_cycle::PiCycleMetric;
pub use trolololo::TrolololoMetric;
pub use two_year_ma::TwoYearMovingAverageMetric;

/// 양수일 때만 자연로그를 반환합니다.
pub(crate) fn ln_positive(value: f64) -> Option<f64> {
    (value > 0.0).then(|| value.ln())
}
