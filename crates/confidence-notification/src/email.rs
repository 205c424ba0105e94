//! SendGrid 이메일 알림 서비스.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, error, info};

use crate::format::MessageBody;
use crate::types::{Notification, NotificationError, NotificationResult, NotificationSender};

/// SendGrid API 기본 주소.
pub const SENDGRID_API_BASE: &str = "https://api.sendgrid.com";

/// SendGrid 전송 설정.
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: SecretString,
    pub from_email: String,
    pub to_email: String,
    /// 전송 활성화 여부
    pub enabled: bool,
    /// 개발 환경 표시 여부
    pub development: bool,
    /// API 기본 주소
    pub api_base: String,
}

impl SendGridConfig {
    pub fn new(
        api_key: impl Into<String>,
        from_email: impl Into<String>,
        to_email: impl Into<String>,
    ) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            from_email: from_email.into(),
            to_email: to_email.into(),
            enabled: true,
            development: false,
            api_base: SENDGRID_API_BASE.to_string(),
        }
    }

    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// 환경 변수에서 설정을 생성합니다.
    ///
    /// `SENDGRID_API_KEY`가 없으면 `None`입니다. 주소는
    /// `SENDGRID_FROM_EMAIL`/`SENDGRID_TO_EMAIL`에서 읽습니다.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("SENDGRID_API_KEY").ok()?;
        let from_email = std::env::var("SENDGRID_FROM_EMAIL")
            .unwrap_or_else(|_| "noreply@example.com".to_string());
        let to_email =
            std::env::var("SENDGRID_TO_EMAIL").unwrap_or_else(|_| "user@example.com".to_string());

        Some(Self::new(api_key, from_email, to_email))
    }
}

/// SendGrid v3 이메일 전송기.
pub struct SendGridSender {
    config: SendGridConfig,
    client: reqwest::Client,
}

impl SendGridSender {
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// 환경 변수에서 전송기를 생성합니다.
    pub fn from_env() -> Option<Self> {
        SendGridConfig::from_env().map(Self::new)
    }

    /// 메일 요청 본문을 생성합니다.
    fn build_payload(&self, notification: &Notification) -> serde_json::Value {
        let mut body = MessageBody::compose(notification);

        if self.config.development {
            body.subject = format!("[DEV] {}", body.subject);
            body.html = format!(
                "<div style=\"color: #EA3943; margin-bottom: 15px;\">[DEVELOPMENT ENVIRONMENT]</div>{}",
                body.html
            );
            body.text = format!("[DEVELOPMENT ENVIRONMENT]\n\n{}", body.text);
        }

        json!({
            "personalizations": [{
                "to": [{ "email": self.config.to_email }]
            }],
            "from": {
                "email": self.config.from_email,
                "name": self.config.from_email,
            },
            "subject": body.subject,
            "content": [
                { "type": "text/plain", "value": body.text },
                { "type": "text/html", "value": body.html },
            ],
        })
    }
}

#[async_trait]
impl NotificationSender for SendGridSender {
    async fn send(&self, notification: &Notification) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Email notifications are disabled, skipping");
            return Ok(());
        }

        let url = format!(
            "{}/v3/mail/send",
            self.config.api_base.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.build_payload(notification))
            .send()
            .await?;

        let status = response.status();
        if matches!(status.as_u16(), 200 | 201 | 202) {
            info!(to = %self.config.to_email, "Email notification sent");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Failed to send email");
            Err(NotificationError::SendFailed(format!(
                "HTTP {}: {}",
                status, body
            )))
        }
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
            && !self.config.api_key.expose_secret().is_empty()
            && !self.config.to_email.is_empty()
    }

    fn name(&self) -> &str {
        "email"
    }
}
