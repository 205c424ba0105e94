//! 설정 관리.
//!
//! 기본값 → (선택) TOML 파일 → 환경 변수(`CONFIDENCE__섹션__키`) 순서로
//! 덮어씁니다. `.env` 파일이 있으면 먼저 로드합니다.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 기본 가격 소스 (일봉 시장 차트).
pub const DEFAULT_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/coins/bitcoin/market_chart?vs_currency=usd&days=max&interval=daily";

/// 기본 폴백 소스 (게시된 지표 값 문서).
pub const DEFAULT_FALLBACK_URL: &str = "https://colintalkscrypto.com/cbbi/data/latest.json";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 외부 데이터 소스 설정
    #[serde(default)]
    pub sources: SourceConfig,
    /// 출력 문서/차트 설정
    #[serde(default)]
    pub output: OutputConfig,
    /// 재시도 설정
    #[serde(default)]
    pub retry: RetryConfig,
    /// 알림 설정
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 외부 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// 가격 시계열 URL
    pub price_url: String,
    /// 폴백 지표 값 URL
    pub fallback_url: String,
    /// HTTP 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            price_url: DEFAULT_PRICE_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    /// HTTP 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// 출력 디렉토리 (빈 문자열이면 현재 디렉토리)
    pub dir: String,
    /// JSON 문서 파일명
    pub json_file: String,
    /// 차트 파일명
    pub charts_file: String,
    /// 차트 생성 생략 여부
    pub skip_charts: bool,
    /// 저장 시 반올림할 소수 자릿수
    pub decimal_places: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            json_file: "latest.json".to_string(),
            charts_file: "charts.svg".to_string(),
            skip_charts: false,
            decimal_places: 4,
        }
    }
}

impl OutputConfig {
    /// 출력 디렉토리 경로.
    pub fn output_dir(&self) -> PathBuf {
        if self.dir.trim().is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.dir)
        }
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir().join(&self.json_file)
    }

    /// 차트 경로 (차트 생략 시 None).
    pub fn charts_path(&self) -> Option<PathBuf> {
        (!self.skip_charts).then(|| self.output_dir().join(&self.charts_file))
    }
}

/// 재시도 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// 최대 시도 횟수 (> 0)
    pub max_attempts: u32,
    /// 실패 후 다음 시도까지 대기 시간 (초)
    pub sleep_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            sleep_seconds: 10,
        }
    }
}

/// 알림 설정.
///
/// 채널 자격증명은 각 채널이 환경 변수에서 직접 읽습니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationSettings {
    /// 채널별 전송 타임아웃 (초)
    pub dispatch_timeout_secs: u64,
    /// 실행 호스트 이름 (개발 환경 표시용)
    pub host: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            dispatch_timeout_secs: 15,
            host: "localhost".to_string(),
        }
    }
}

impl NotificationSettings {
    /// 채널별 전송 타임아웃을 Duration으로 반환
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    /// 개발 환경 호스트인지 확인합니다.
    pub fn is_development(&self) -> bool {
        self.host.contains("localhost") || self.host.contains("pagekite")
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        dotenvy::dotenv().ok();

        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let mut config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix("CONFIDENCE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Ok(host) = std::env::var("HOST") {
            config.notifications.host = host;
        }

        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 유효성을 검사합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.retry.max_attempts == 0 {
            return Err(CoreError::Config(
                "retry.max_attempts는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.output.decimal_places > 15 {
            return Err(CoreError::Config(format!(
                "output.decimal_places가 너무 큽니다: {}",
                self.output.decimal_places
            )));
        }
        if self.output.json_file.trim().is_empty() {
            return Err(CoreError::Config(
                "output.json_file이 비어 있습니다".to_string(),
            ));
        }
        Ok(())
    }
}
