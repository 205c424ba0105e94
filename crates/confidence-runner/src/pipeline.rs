//! 한 번의 파이프라인 실행.
//!
//! 가격 조회 → 지표 평가(등록 순서) → 집계 → 문서 저장 → 차트 → 알림 →
//! 콘솔 보고서. 지표 실패는 `Metric::compute` 안에서 흡수되고, 그 외의
//! 실패는 에러로 반환되어 오케스트레이터가 재시도합니다.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use confidence_core::{
    FallbackProvider, MarketUpdate, MetricBreakdown, Notifier, OutputConfig, PriceSource,
};
use confidence_data::{OutputDocument, CONFIDENCE_COLUMN};
use confidence_metrics::{
    aggregate, MetricContext, MetricRegistry, MetricTable, PlotDescriptor,
};
use tracing::{error, info, warn};

use crate::chart::ChartRenderer;
use crate::report::print_report;
use crate::stats::RunSummary;

/// 실행 컨텍스트.
///
/// 모든 협력자는 `main`에서 한 번 생성되어 전달됩니다.
pub struct PipelineContext {
    pub price_source: Arc<dyn PriceSource>,
    pub fallback: Arc<dyn FallbackProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub registry: Arc<MetricRegistry>,
    /// 차트 렌더러 (없으면 차트 생략)
    pub chart_renderer: Option<Arc<dyn ChartRenderer>>,
    pub output: OutputConfig,
    /// 콘솔 보고서 출력 여부
    pub print_report: bool,
}

/// 성공한 실행의 결과.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub update: MarketUpdate,
    pub json_path: PathBuf,
    pub summary: RunSummary,
}

impl PipelineContext {
    /// 파이프라인을 한 번 실행합니다.
    pub async fn run(&self) -> anyhow::Result<RunReport> {
        let started = Instant::now();
        let mut summary = RunSummary::new();

        let prices = self
            .price_source
            .fetch_prices()
            .await
            .with_context(|| format!("failed to fetch prices from {}", self.price_source.name()))?;
        let Some(latest) = prices.last() else {
            bail!("price source returned an empty series");
        };
        if !prices.is_well_formed() {
            bail!("price series is not strictly ascending by date");
        }
        summary.price_points = prices.len();
        info!(
            date = %latest.date,
            price = latest.price,
            points = prices.len(),
            "Current price"
        );

        let ctx = MetricContext::new(self.fallback.as_ref(), self.notifier.as_ref());
        let mut table = MetricTable::new(prices.index().clone());
        let mut plots = Vec::with_capacity(self.registry.len());

        for metric in self.registry.iter() {
            let evaluation = metric.compute(&prices, &ctx).await;
            summary.record(evaluation.source, evaluation.result.last());
            table
                .insert(metric.name(), metric.description(), evaluation.result)
                .with_context(|| format!("metric '{}' produced an unusable result", metric.name()))?;
            plots.push(evaluation.plot);
        }

        let confidence = aggregate(&table);

        let mut document = OutputDocument::new(&prices, self.output.decimal_places);
        for column in table.columns() {
            document = document.with_column(column.name.clone(), &column.result)?;
        }
        let document = document.with_column(CONFIDENCE_COLUMN, &confidence)?;

        let json_path = self.output.json_path();
        document
            .write(&json_path)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
        info!(path = %json_path.display(), rows = document.len(), "Output document saved");

        let chart_path = self.render_chart(&plots);
        summary.chart_written = chart_path.is_some();

        let update = MarketUpdate {
            date: latest.date,
            price: latest.price,
            confidence: confidence.last(),
            details: table
                .columns()
                .iter()
                .map(|c| MetricBreakdown {
                    name: c.name.clone(),
                    description: c.description.clone(),
                    value: c.result.last(),
                })
                .collect(),
            chart_path,
        };
        if update.confidence.is_none() {
            warn!("No metric has a value for the latest date");
        }

        self.notifier.notify_market_update(&update).await;

        if self.print_report {
            print_report(&update);
        }

        summary.elapsed = started.elapsed();
        summary.log_summary();

        Ok(RunReport {
            update,
            json_path,
            summary,
        })
    }

    /// 차트를 생성합니다. 실패는 로그만 남기고 `None`을 반환합니다.
    fn render_chart(&self, plots: &[PlotDescriptor]) -> Option<PathBuf> {
        let renderer = self.chart_renderer.as_ref()?;
        let path = self.output.charts_path()?;

        info!("Generating charts");
        match renderer.render(plots, &path) {
            Ok(()) => Some(path),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Error saving chart");
                None
            }
        }
    }
}
