//! 재시도 오케스트레이터 통합 테스트.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use confidence_core::{MarketUpdate, Notifier};
use confidence_runner::{ExitStatus, OrchestratorState, RetryOrchestrator, Sleeper};

#[derive(Default)]
struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    async fn notify_market_update(&self, _update: &MarketUpdate) {}
}

#[derive(Default)]
struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

#[tokio::test]
async fn test_succeeds_on_third_attempt() {
    let notifier = Arc::new(RecordingNotifier::default());
    let sleeper = Arc::new(RecordingSleeper::default());
    let orchestrator = RetryOrchestrator::new(3, Duration::ZERO, notifier.clone())
        .unwrap()
        .with_sleeper(sleeper.clone());

    let calls = AtomicU32::new(0);
    let outcome = orchestrator
        .run(|attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(anyhow!("price source unreachable (attempt {})", attempt))
                } else {
                    Ok(())
                }
            }
        })
        .await;

    assert_eq!(outcome.status, ExitStatus::Success);
    assert_eq!(outcome.attempts, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(notifier.errors.lock().unwrap().len(), 2);
    assert_eq!(sleeper.sleeps.lock().unwrap().len(), 2);
    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.errors[0].contains("attempt 1"));
    assert_eq!(outcome.history.last(), Some(&OrchestratorState::Success));
}

#[tokio::test]
async fn test_exhausts_budget() {
    let notifier = Arc::new(RecordingNotifier::default());
    let sleeper = Arc::new(RecordingSleeper::default());
    let orchestrator = RetryOrchestrator::new(4, Duration::from_secs(10), notifier.clone())
        .unwrap()
        .with_sleeper(sleeper.clone());

    let outcome = orchestrator
        .run(|_| async { Err(anyhow!("output directory is read-only")) })
        .await;

    assert_eq!(outcome.status, ExitStatus::Exhausted);
    assert_eq!(outcome.status.code(), 255);
    assert_eq!(outcome.attempts, 4);
    assert_eq!(notifier.errors.lock().unwrap().len(), 4);

    // 마지막 시도 이후에는 대기하지 않음
    let sleeps = sleeper.sleeps.lock().unwrap();
    assert_eq!(sleeps.len(), 3);
    assert!(sleeps.iter().all(|d| *d == Duration::from_secs(10)));

    let retries = outcome
        .history
        .iter()
        .filter(|s| **s == OrchestratorState::Retrying)
        .count();
    assert_eq!(retries, 3);
    assert_eq!(outcome.history.last(), Some(&OrchestratorState::Exhausted));
}

#[tokio::test]
async fn test_error_detail_includes_context_chain() {
    let notifier = Arc::new(RecordingNotifier::default());
    let orchestrator = RetryOrchestrator::new(1, Duration::ZERO, notifier.clone())
        .unwrap()
        .with_sleeper(Arc::new(RecordingSleeper::default()));

    let outcome = orchestrator
        .run(|_| async {
            let root: anyhow::Result<()> = Err(anyhow!("connection refused"));
            anyhow::Context::context(root, "failed to fetch prices")
        })
        .await;

    assert_eq!(outcome.status, ExitStatus::Exhausted);
    let errors = notifier.errors.lock().unwrap();
    assert!(errors[0].contains("failed to fetch prices"));
    assert!(errors[0].contains("connection refused"));
}
