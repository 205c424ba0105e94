//! 피크 신뢰도 계산 CLI.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use confidence_core::{init_logging, AppConfig, LogConfig, Notifier};
use confidence_data::{HttpFallbackProvider, HttpPriceSource};
use confidence_metrics::MetricRegistry;
use confidence_notification::NotificationManager;
use confidence_runner::{
    ChartRenderer, ExitStatus, PipelineContext, RetryOrchestrator, SvgChartRenderer,
};

#[derive(Parser)]
#[command(name = "confidence")]
#[command(about = "Calculates the peak-confidence indicator with all of its metrics", long_about = None)]
#[command(version)]
struct Cli {
    /// 결과 JSON 파일명
    #[arg(long)]
    json_file: Option<String>,

    /// 차트 파일명
    #[arg(long)]
    charts_file: Option<String>,

    /// 출력 디렉토리 (없으면 생성)
    #[arg(long)]
    output_dir: Option<String>,

    /// 최대 시도 횟수
    #[arg(long)]
    max_attempts: Option<u32>,

    /// 실패 후 재시도까지 대기 시간 (초)
    #[arg(long)]
    sleep_seconds: Option<u64>,

    /// 차트 생성 생략
    #[arg(long)]
    skip_charts: bool,

    /// 설정 파일 경로 (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// CLI 값으로 설정을 덮어씁니다.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(json_file) = &self.json_file {
            config.output.json_file = json_file.clone();
        }
        if let Some(charts_file) = &self.charts_file {
            config.output.charts_file = charts_file.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(max_attempts) = self.max_attempts {
            config.retry.max_attempts = max_attempts;
        }
        if let Some(sleep_seconds) = self.sleep_seconds {
            config.retry.sleep_seconds = sleep_seconds;
        }
        if self.skip_charts {
            config.output.skip_charts = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut config);

    if let Err(e) = init_logging(LogConfig::from_settings(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = ?e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> anyhow::Result<ExitCode> {
    config.validate()?;
    tracing::info!(
        output_dir = %config.output.output_dir().display(),
        max_attempts = config.retry.max_attempts,
        sleep_seconds = config.retry.sleep_seconds,
        skip_charts = config.output.skip_charts,
        "Peak confidence calculator started"
    );

    std::fs::create_dir_all(config.output.output_dir())?;

    let timeout = config.sources.request_timeout();
    let notifier: Arc<dyn Notifier> =
        Arc::new(NotificationManager::from_env(&config.notifications));
    let chart_renderer = (!config.output.skip_charts)
        .then(|| Arc::new(SvgChartRenderer::default()) as Arc<dyn ChartRenderer>);

    let context = PipelineContext {
        price_source: Arc::new(HttpPriceSource::new(&config.sources.price_url, timeout)?),
        fallback: Arc::new(HttpFallbackProvider::new(
            &config.sources.fallback_url,
            timeout,
        )?),
        notifier: Arc::clone(&notifier),
        registry: Arc::new(MetricRegistry::standard()?),
        chart_renderer,
        output: config.output.clone(),
        print_report: true,
    };

    let orchestrator = RetryOrchestrator::from_config(&config.retry, notifier)?;
    let context = &context;
    let outcome = orchestrator
        .run(|_attempt| async move { context.run().await.map(|_| ()) })
        .await;

    if outcome.status == ExitStatus::Exhausted {
        println!(
            "Max attempts limit has been reached ({}).\nBetter luck next time!",
            orchestrator.max_attempts()
        );
    }

    Ok(outcome.status.into())
}
