//! HTTP 가격 소스.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use confidence_core::{CoreResult, PricePoint, PriceSeries, PriceSource};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{DataError, DataResult};

/// 시장 차트 응답.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// `[밀리초 timestamp, 가격]` 쌍 목록
    prices: Vec<(f64, f64)>,
}

/// 시장 차트 JSON을 가격 시계열로 변환합니다.
///
/// UTC 날짜당 한 개의 포인트만 남기며 (같은 날짜는 마지막 값 우선)
/// 날짜 오름차순으로 정렬합니다. 유한하지 않거나 양수가 아닌 가격은
/// 버립니다.
pub fn parse_market_chart(body: &str) -> DataResult<PriceSeries> {
    let response: MarketChartResponse = serde_json::from_str(body)
        .map_err(|e| DataError::ParseError(format!("unexpected market chart layout: {}", e)))?;

    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (timestamp_ms, price) in response.prices {
        if !price.is_finite() || price <= 0.0 {
            debug!(timestamp_ms, price, "Skipping invalid price point");
            continue;
        }
        let date = DateTime::from_timestamp_millis(timestamp_ms as i64)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| DataError::ParseError(format!("invalid timestamp: {}", timestamp_ms)))?;
        by_date.insert(date, price);
    }

    if by_date.is_empty() {
        return Err(DataError::InvalidData("price history is empty".to_string()));
    }

    Ok(PriceSeries::new(
        by_date
            .into_iter()
            .map(|(date, price)| PricePoint::new(date, price)),
    ))
}

/// HTTP로 일봉 가격을 조회하는 소스.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPriceSource {
    /// 새 가격 소스를 생성합니다.
    pub fn new(url: impl Into<String>, timeout: Duration) -> DataResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("confidence/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::FetchError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn fetch(&self) -> DataResult<PriceSeries> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::FetchError(format!(
                "price source returned HTTP {}",
                status
            )));
        }

        let body = response.text().await?;
        let series = parse_market_chart(&body)?;

        if let Some(last) = series.last() {
            info!(
                points = series.len(),
                last_date = %last.date,
                last_price = last.price,
                "Price history fetched"
            );
        }
        Ok(series)
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_prices(&self) -> CoreResult<PriceSeries> {
        Ok(self.fetch().await?)
    }

    fn name(&self) -> &str {
        "http-market-chart"
    }
}
