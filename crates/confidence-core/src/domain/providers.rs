//! 외부 협력자 추상화.
//!
//! 파이프라인은 가격 소스, 폴백 제공자, 알림 채널을 전역 싱글톤이 아닌
//! 명시적인 핸들로 주입받습니다. 각 구현체는 `main`에서 한 번 생성되어
//! 실행 컨텍스트로 전달됩니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MarketUpdate;
use crate::error::CoreResult;
use crate::types::PriceSeries;

// =============================================================================
// 가격 소스
// =============================================================================

/// 가격 시계열 제공자 trait.
///
/// 반환되는 시계열의 정렬/중복 제거는 구현체의 책임입니다.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// 전체 과거 가격 시계열을 조회합니다.
    ///
    /// # Errors
    ///
    /// 소스에 접근할 수 없으면 에러를 반환하며, 이는 실행 전체의 실패로
    /// 취급됩니다.
    async fn fetch_prices(&self) -> CoreResult<PriceSeries>;

    /// 소스 이름 (로그용).
    fn name(&self) -> &str;
}

// =============================================================================
// 폴백 제공자
// =============================================================================

/// 이전에 게시된 지표 값 한 개.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

impl DatedValue {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// 지표 계산 실패 시 사용할 과거 값 제공자 trait.
#[async_trait]
pub trait FallbackProvider: Send + Sync {
    /// 지표 이름에 해당하는 (날짜, 값) 목록을 조회합니다.
    ///
    /// 일부 날짜만 있거나 비어 있을 수 있습니다. 호출 측은 에러를
    /// 결측 값으로 흡수합니다.
    async fn fetch(&self, metric_name: &str) -> CoreResult<Vec<DatedValue>>;
}

// =============================================================================
// 알림
// =============================================================================

/// 단방향 알림 협력자 trait.
///
/// 모든 메서드는 best-effort입니다. 전송 실패는 구현체 내부에서 로그로만
/// 남기며 호출 측에 전파되지 않습니다.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 에러 메시지/트레이스를 전송합니다.
    async fn notify_error(&self, message: &str);

    /// 시장 업데이트를 전송합니다.
    async fn notify_market_update(&self, update: &MarketUpdate);
}
