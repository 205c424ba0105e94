//! Metric trait 정의.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use async_trait::async_trait;
use confidence_core::{metric_span, FallbackProvider, MetricResult, Notifier, PriceSeries, Series};
use tracing::{error, info, warn, Instrument};

use crate::error::{MetricCalcResult, MetricError};
use crate::fallback::fallback_series;
use crate::plot::{PlotDescriptor, PlotPanel};

/// 지표 공식의 계산 결과.
#[derive(Debug, Clone)]
pub struct Calculation {
    /// 날짜 인덱스에 정렬된 정규화 값
    pub values: Vec<Option<f64>>,
    /// 차트 패널 (원시 데이터 + 정규화 값)
    pub panels: Vec<PlotPanel>,
}

/// 값의 출처.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// 로컬 계산 성공
    Calculated,
    /// 계산 실패 후 폴백 제공자 값 사용
    Fallback,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Calculated => write!(f, "calculated"),
            ValueSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// 지표 평가 결과.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// [0, 1]로 클리핑된 결과
    pub result: MetricResult,
    pub plot: PlotDescriptor,
    pub source: ValueSource,
}

/// `compute`에 전달되는 협력자 핸들.
#[derive(Clone, Copy)]
pub struct MetricContext<'a> {
    pub fallback: &'a dyn FallbackProvider,
    pub notifier: &'a dyn Notifier,
}

impl<'a> MetricContext<'a> {
    pub fn new(fallback: &'a dyn FallbackProvider, notifier: &'a dyn Notifier) -> Self {
        Self { fallback, notifier }
    }
}

/// 신뢰도 지표 trait.
///
/// 구현체는 `name`, `description`, `calculate`만 제공하면 됩니다.
/// `compute`는 계산 실패를 흡수하고 폴백 값으로 대체하므로 잘 구성된
/// 입력에 대해 항상 전체 길이의 결과를 반환합니다.
#[async_trait]
pub trait Metric: Send + Sync {
    /// 유일하고 안정적인 이름 (조회 키/출력 열 이름).
    fn name(&self) -> &str;

    /// 사람이 읽는 설명.
    fn description(&self) -> &str;

    /// 지표 공식을 계산합니다.
    fn calculate(&self, prices: &PriceSeries) -> MetricCalcResult<Calculation>;

    /// 폴백 제공자의 값을 가격 날짜 인덱스에 정렬합니다.
    ///
    /// 제공자 오류는 결측 값으로 흡수됩니다.
    async fn fallback(&self, prices: &PriceSeries, provider: &dyn FallbackProvider) -> MetricResult {
        let entries = match provider.fetch(self.name()).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(metric = self.name(), error = %e, "Fallback provider unavailable");
                Vec::new()
            }
        };

        fallback_series(prices.index(), &entries)
    }

    /// 지표를 평가합니다. 에러를 반환하지 않습니다.
    ///
    /// 계산이 실패하면 에러 알림을 한 번 전송하고 폴백 값을 반환합니다.
    /// 결과는 출처와 관계없이 [0, 1]로 클리핑됩니다.
    async fn compute(&self, prices: &PriceSeries, ctx: &MetricContext<'_>) -> Evaluation {
        let name = self.name();
        let description = self.description();

        async move {
            let calculated = catch_unwind(AssertUnwindSafe(|| self.calculate(prices)))
                .unwrap_or_else(|payload| Err(MetricError::Panicked(panic_message(payload))))
                .and_then(|calc| {
                    let result = Series::new(prices.index().clone(), calc.values)?;
                    Ok((result, calc.panels))
                });

            match calculated {
                Ok((result, panels)) => {
                    let result = result.clip(0.0, 1.0);
                    info!(latest = ?result.last(), "Metric calculated");
                    Evaluation {
                        plot: PlotDescriptor::new(
                            name,
                            description,
                            prices.index().clone(),
                            panels,
                        ),
                        result,
                        source: ValueSource::Calculated,
                    }
                }
                Err(e) => {
                    error!(error = ?e, "Metric calculation failed");
                    ctx.notifier
                        .notify_error(&format!(
                            "Metric '{}' ({}) failed: {}",
                            name, description, e
                        ))
                        .await;

                    info!("Requesting fallback values");
                    let result = self.fallback(prices, ctx.fallback).await.clip(0.0, 1.0);
                    info!(
                        resolved = result.present_count(),
                        total = result.len(),
                        "Fallback values applied"
                    );

                    Evaluation {
                        plot: PlotDescriptor::value_only(name, description, &result),
                        result,
                        source: ValueSource::Fallback,
                    }
                }
            }
        }
        .instrument(metric_span!(name))
        .await
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
