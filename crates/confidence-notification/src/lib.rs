//! 시장 업데이트 및 오류 알림 서비스.
//!
//! 지원 채널:
//! - Telegram (sendMessage + 차트 sendDocument)
//! - SendGrid 이메일
//!
//! [`NotificationManager`]가 활성화된 모든 채널로 전송하며 파이프라인의
//! [`confidence_core::Notifier`] 역할을 합니다.

pub mod email;
pub mod format;
pub mod manager;
pub mod telegram;
pub mod types;

pub use email::{SendGridConfig, SendGridSender};
pub use manager::NotificationManager;
pub use telegram::{TelegramConfig, TelegramSender};
pub use types::*;
