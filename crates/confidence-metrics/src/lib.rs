//! # Confidence Metrics
//!
//! 지표 계산 계약과 종합 신뢰도 집계.
//!
//! - [`Metric`]: 지표의 이름/설명과 계산 로직. `compute`는 계산이 실패해도
//!   항상 날짜 인덱스 전체 길이의 결과를 돌려줍니다 (폴백 값 사용).
//! - [`MetricTable`]: 등록 순서를 유지하는 이름 → 결과 매핑
//! - [`aggregate`]: 날짜별 결측 제외 평균으로 신뢰도를 계산
//! - [`MetricRegistry`]: 실행에 사용할 지표의 정적 목록
//!
//! # 사용 예시
//!
//! ```ignore
//! let registry = MetricRegistry::standard()?;
//! let ctx = MetricContext::new(&fallback, &notifier);
//!
//! let mut table = MetricTable::new(prices.index().clone());
//! for metric in registry.iter() {
//!     let evaluation = metric.compute(&prices, &ctx).await;
//!     table.insert(metric.name(), metric.description(), evaluation.result)?;
//! }
//! let confidence = aggregate(&table);
//! ```

pub mod aggregator;
pub mod error;
pub mod fallback;
pub mod indicators;
pub mod metrics;
pub mod plot;
pub mod registry;
pub mod table;
pub mod traits;

pub use aggregator::aggregate;
pub use error::{MetricCalcResult, MetricError};
pub use fallback::fallback_series;
pub use plot::{PlotDescriptor, PlotLine, PlotPanel};
pub use registry::MetricRegistry;
pub use table::{MetricColumn, MetricTable};
pub use traits::{Calculation, Evaluation, Metric, MetricContext, ValueSource};
