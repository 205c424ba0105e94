//! 전체 파이프라인 재시도 오케스트레이터.
//!
//! 상태 전이:
//!
//! ```text
//! Idle → Running → Success
//!           ↓
//!        Failed → Retrying → Running   (attempt < max_attempts)
//!           ↓
//!        Exhausted                     (attempt == max_attempts)
//! ```
//!
//! 실패할 때마다 전체 에러 내용을 로그로 남기고 오류 알림을 한 번
//! 전송합니다. 마지막 시도 이후에는 대기하지 않습니다.

use std::fmt;
use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use confidence_core::{Notifier, RetryConfig};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use crate::error::{Result, RunnerError};

/// 오케스트레이터 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    Running,
    Success,
    Failed,
    Retrying,
    Exhausted,
}

impl OrchestratorState {
    /// 종료 상태 여부.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Exhausted)
    }
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Retrying => "retrying",
            Self::Exhausted => "exhausted",
        };
        write!(f, "{}", name)
    }
}

/// 프로세스 종료 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// 예산 안에서 실행 완료
    Success,
    /// 모든 시도 실패
    Exhausted,
}

impl ExitStatus {
    /// 프로세스 종료 코드 (성공 0, 소진 255).
    pub fn code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Exhausted => 255,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// 오케스트레이터 실행 결과.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub status: ExitStatus,
    /// 수행한 시도 횟수
    pub attempts: u32,
    /// 실패한 시도의 에러 내용 (순서대로)
    pub errors: Vec<String>,
    /// 거쳐 간 상태 목록
    pub history: Vec<OrchestratorState>,
}

/// 시도 사이의 대기 전략.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// 초 단위 진행 표시줄을 보여주며 대기합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountdownSleeper;

#[async_trait]
impl Sleeper for CountdownSleeper {
    async fn sleep(&self, duration: Duration) {
        let seconds = duration.as_secs();
        if seconds == 0 {
            tokio::time::sleep(duration).await;
            return;
        }

        let pb = ProgressBar::new(seconds);
        pb.set_style(
            ProgressStyle::with_template("{msg} [{bar:30.yellow}] {pos}/{len}s")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Retrying in");

        for _ in 0..seconds {
            tokio::time::sleep(Duration::from_secs(1)).await;
            pb.inc(1);
        }
        pb.finish_and_clear();
    }
}

/// 전체 파이프라인 재시도 오케스트레이터.
pub struct RetryOrchestrator {
    max_attempts: u32,
    sleep: Duration,
    notifier: Arc<dyn Notifier>,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryOrchestrator {
    /// 새 오케스트레이터를 생성합니다.
    ///
    /// `max_attempts`가 0이면 설정 에러입니다.
    pub fn new(max_attempts: u32, sleep: Duration, notifier: Arc<dyn Notifier>) -> Result<Self> {
        if max_attempts == 0 {
            return Err(RunnerError::Config(
                "max_attempts must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            max_attempts,
            sleep,
            notifier,
            sleeper: Arc::new(CountdownSleeper),
        })
    }

    /// 재시도 설정으로 생성합니다.
    pub fn from_config(config: &RetryConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::new(
            config.max_attempts,
            Duration::from_secs(config.sleep_seconds),
            notifier,
        )
    }

    /// 대기 전략을 교체합니다.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 작업을 성공하거나 시도 횟수가 소진될 때까지 실행합니다.
    ///
    /// `workload`는 시도 번호(1부터)를 받습니다. 작업이 반환한 에러는
    /// 종류와 관계없이 모두 재시도 대상입니다.
    pub async fn run<F, Fut>(&self, mut workload: F) -> RunOutcome
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let mut history = vec![OrchestratorState::Idle];
        let mut errors = Vec::new();
        let mut attempt = 1;

        loop {
            history.push(OrchestratorState::Running);
            info!(attempt, max_attempts = self.max_attempts, "Starting pipeline run");

            match workload(attempt).await {
                Ok(()) => {
                    history.push(OrchestratorState::Success);
                    info!(attempt, "Pipeline run succeeded");
                    return RunOutcome {
                        status: ExitStatus::Success,
                        attempts: attempt,
                        errors,
                        history,
                    };
                }
                Err(e) => {
                    history.push(OrchestratorState::Failed);
                    let detail = format!("{:?}", e);
                    error!(attempt, error = %detail, "An error has occurred");

                    self.notifier.notify_error(&detail).await;
                    errors.push(detail);
                }
            }

            if attempt >= self.max_attempts {
                history.push(OrchestratorState::Exhausted);
                warn!(
                    max_attempts = self.max_attempts,
                    "Max attempts limit has been reached"
                );
                return RunOutcome {
                    status: ExitStatus::Exhausted,
                    attempts: attempt,
                    errors,
                    history,
                };
            }

            history.push(OrchestratorState::Retrying);
            info!(
                seconds = self.sleep.as_secs(),
                next_attempt = attempt + 1,
                "Retrying after delay"
            );
            self.sleeper.sleep(self.sleep).await;
            debug!("Delay elapsed");
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confidence_core::MarketUpdate;

    struct NullNotifier;

    #[async_trait]
    impl Notifier for NullNotifier {
        async fn notify_error(&self, _message: &str) {}
        async fn notify_market_update(&self, _update: &MarketUpdate) {}
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let result = RetryOrchestrator::new(0, Duration::ZERO, Arc::new(NullNotifier));
        assert!(matches!(result, Err(RunnerError::Config(_))));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Exhausted.code(), 255);
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let orchestrator =
            RetryOrchestrator::new(1, Duration::ZERO, Arc::new(NullNotifier)).unwrap();
        let outcome = orchestrator.run(|_| async { Ok(()) }).await;

        assert_eq!(outcome.status, ExitStatus::Success);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(
            outcome.history,
            vec![
                OrchestratorState::Idle,
                OrchestratorState::Running,
                OrchestratorState::Success
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_sleeper_waits_full_duration() {
        let start = tokio::time::Instant::now();
        CountdownSleeper.sleep(Duration::from_secs(3)).await;
        assert!(start.elapsed() >= Duration::from_secs(3));
    }
}
