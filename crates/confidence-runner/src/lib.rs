//! 피크 신뢰도 파이프라인 실행기.
//!
//! 이 crate는 한 번의 파이프라인 실행과 그 재시도를 담당합니다:
//! - [`RetryOrchestrator`]: 실패 시 알림 후 카운트다운 대기, 최대 시도 횟수까지 반복
//! - [`PipelineContext`]: 가격 조회 → 지표 평가 → 집계 → 문서 저장 → 차트 → 알림
//! - [`SvgChartRenderer`]: 지표별 차트 기술자를 SVG 그리드로 렌더링
//! - 콘솔 보고서와 실행 통계

pub mod chart;
pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use chart::{ChartRenderer, SvgChartRenderer};
pub use error::{Result, RunnerError};
pub use orchestrator::{
    CountdownSleeper, ExitStatus, OrchestratorState, RetryOrchestrator, RunOutcome, Sleeper,
};
pub use pipeline::{PipelineContext, RunReport};
pub use stats::RunSummary;
