//! 여러 전송기를 관리하는 알림 관리자.

use std::time::Duration;

use async_trait::async_trait;
use confidence_core::{MarketUpdate, NotificationSettings, Notifier};
use tracing::{debug, error, info, warn};

use crate::email::{SendGridConfig, SendGridSender};
use crate::telegram::{TelegramConfig, TelegramSender};
use crate::types::{Notification, NotificationError, NotificationSender};

/// 여러 전송기를 관리하는 알림 관리자.
///
/// 각 전송기 호출은 타임아웃으로 제한되며, 실패는 로그로만 남기고
/// 호출 측에 전파하지 않습니다.
pub struct NotificationManager {
    senders: Vec<Box<dyn NotificationSender>>,
    timeout: Duration,
}

impl NotificationManager {
    /// 새 알림 관리자를 생성합니다.
    pub fn new(timeout: Duration) -> Self {
        Self {
            senders: Vec::new(),
            timeout,
        }
    }

    /// 환경 변수 자격증명으로 사용 가능한 채널을 모두 등록합니다.
    pub fn from_env(settings: &NotificationSettings) -> Self {
        let development = settings.is_development();
        let mut manager = Self::new(settings.dispatch_timeout());

        match TelegramConfig::from_env() {
            Some(config) => {
                manager.add_sender(TelegramSender::new(config.with_development(development)))
            }
            None => debug!("Telegram credentials not found, channel disabled"),
        }
        match SendGridConfig::from_env() {
            Some(config) => {
                manager.add_sender(SendGridSender::new(config.with_development(development)))
            }
            None => debug!("SendGrid credentials not found, channel disabled"),
        }

        info!(
            channels = manager.enabled_count(),
            development, "Notification channels configured"
        );
        manager
    }

    /// 알림 전송기를 추가합니다.
    pub fn add_sender<S: NotificationSender + 'static>(&mut self, sender: S) {
        self.senders.push(Box::new(sender));
    }

    /// 활성화된 전송기 수.
    pub fn enabled_count(&self) -> usize {
        self.senders.iter().filter(|s| s.is_enabled()).count()
    }

    /// 활성화된 모든 전송기를 통해 알림을 전송합니다.
    ///
    /// 전송에 성공한 채널 수를 반환합니다.
    pub async fn notify(&self, notification: &Notification) -> usize {
        let mut delivered = 0;

        for sender in self.senders.iter().filter(|s| s.is_enabled()) {
            let result = match tokio::time::timeout(self.timeout, sender.send(notification)).await
            {
                Ok(result) => result,
                Err(_) => Err(NotificationError::Timeout(self.timeout.as_secs())),
            };

            match result {
                Ok(()) => delivered += 1,
                Err(NotificationError::RateLimited(secs)) => {
                    warn!(channel = sender.name(), retry_after = secs, "Notification rate limited")
                }
                Err(e) => {
                    error!(channel = sender.name(), error = %e, "Failed to send notification")
                }
            }
        }

        debug!(
            id = %notification.id,
            delivered,
            "Notification dispatched"
        );
        delivered
    }
}

#[async_trait]
impl Notifier for NotificationManager {
    async fn notify_error(&self, message: &str) {
        self.notify(&Notification::error(message)).await;
    }

    async fn notify_market_update(&self, update: &MarketUpdate) {
        self.notify(&Notification::market_update(update.clone())).await;
    }
}
