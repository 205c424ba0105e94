//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API로 시장 업데이트 메시지와 차트 파일을 전송합니다.

use std::path::Path;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, warn};

use crate::format::{escape_html, MessageBody};
use crate::types::{
    Notification, NotificationError, NotificationEvent, NotificationResult, NotificationSender,
};

/// Telegram Bot API 기본 주소.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// 텔레그램 알림 전송 설정.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: SecretString,
    /// 메시지를 보낼 채팅 ID
    pub chat_id: String,
    /// 전송 활성화 여부
    pub enabled: bool,
    /// 개발 환경 표시 여부
    pub development: bool,
    /// API 기본 주소
    pub api_base: String,
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: SecretString::from(bot_token.into()),
            chat_id: chat_id.into(),
            enabled: true,
            development: false,
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    /// 개발 환경 표시를 설정합니다.
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// API 기본 주소를 설정합니다.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// 환경 변수에서 설정을 생성합니다.
    ///
    /// `TELEGRAM_BOT_TOKEN` (또는 `TELEGRAM_TOKEN`)과 `TELEGRAM_CHAT_ID`가
    /// 모두 있어야 합니다.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .or_else(|_| std::env::var("TELEGRAM_TOKEN"))
            .ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;
        let enabled = std::env::var("TELEGRAM_ENABLED")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        Some(Self {
            enabled,
            ..Self::new(bot_token, chat_id)
        })
    }
}

/// 텔레그램 알림 전송기.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// 환경 변수에서 전송기를 생성합니다.
    pub fn from_env() -> Option<Self> {
        TelegramConfig::from_env().map(Self::new)
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token.expose_secret(),
            method
        )
    }

    fn with_dev_prefix(&self, text: &str) -> String {
        if self.config.development {
            format!("<b>DEV</b>: {}", text)
        } else {
            text.to_string()
        }
    }

    /// 알림을 텔레그램 메시지로 포맷합니다.
    fn format_message(&self, notification: &Notification) -> String {
        let body = MessageBody::compose(notification);
        self.with_dev_prefix(&escape_html(&body.text))
    }

    async fn check_response(response: reqwest::Response) -> NotificationResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        // 요청 한도 제한 확인
        if status.as_u16() == 429 {
            warn!("Telegram rate limited");
            return Err(NotificationError::RateLimited(60));
        }

        error!(status = %status, body = %body, "Telegram API request failed");
        Err(NotificationError::SendFailed(format!(
            "HTTP {}: {}",
            status, body
        )))
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, text: &str) -> NotificationResult<()> {
        let params = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        debug!(chat_id = %self.config.chat_id, "Sending Telegram message");

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&params)
            .send()
            .await?;

        Self::check_response(response).await?;
        info!("Telegram message sent");
        Ok(())
    }

    /// 차트 파일을 문서로 전송합니다.
    async fn send_document(&self, path: &Path, caption: &str) -> NotificationResult<()> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "charts.svg".to_string());
        let mime = if file_name.ends_with(".svg") {
            "image/svg+xml"
        } else {
            "application/octet-stream"
        };

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new()
            .text("chat_id", self.config.chat_id.clone())
            .text("caption", self.with_dev_prefix(caption))
            .text("parse_mode", "HTML")
            .part("document", part);

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?;

        Self::check_response(response).await?;
        info!(path = %path.display(), "Telegram chart sent");
        Ok(())
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send(&self, notification: &Notification) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Telegram notifications are disabled, skipping");
            return Ok(());
        }

        let message = self.format_message(notification);
        self.send_message(&message).await?;

        if let NotificationEvent::MarketUpdate(update) = &notification.event {
            match &update.chart_path {
                Some(path) if path.exists() => {
                    self.send_document(path, "Market Metrics Chart").await?
                }
                Some(path) => error!(path = %path.display(), "Chart file not found"),
                None => debug!("No chart attached"),
            }
        }

        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
            && !self.config.bot_token.expose_secret().is_empty()
            && !self.config.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message() {
        let sender = TelegramSender::new(TelegramConfig::new("test_token", "123456"));
        let message = sender.format_message(&Notification::error("Metric 'PiCycle' failed: <NaN>"));

        assert!(message.starts_with("⚠️ Error in Market Analysis"));
        assert!(message.contains("&lt;NaN&gt;"));
    }

    #[test]
    fn test_development_prefix() {
        let sender = TelegramSender::new(
            TelegramConfig::new("test_token", "123456").with_development(true),
        );
        let message = sender.format_message(&Notification::error("boom"));
        assert!(message.starts_with("<b>DEV</b>: "));
    }

    #[test]
    fn test_disabled_without_credentials() {
        let sender = TelegramSender::new(TelegramConfig::new("", "123456"));
        assert!(!sender.is_enabled());
    }
}
