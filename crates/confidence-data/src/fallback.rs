//! HTTP 폴백 제공자.

use std::time::Duration;

use async_trait::async_trait;
use confidence_core::{CoreResult, DatedValue, FallbackProvider};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::document::PublishedDocument;
use crate::error::{DataError, DataResult};

/// 게시된 지표 문서에서 폴백 값을 조회합니다.
///
/// 문서는 처음 성공한 다운로드를 프로세스 동안 캐시합니다. 실패한
/// 다운로드는 캐시하지 않으므로 다음 조회에서 다시 시도합니다.
#[derive(Debug)]
pub struct HttpFallbackProvider {
    client: reqwest::Client,
    url: String,
    document: OnceCell<PublishedDocument>,
}

impl HttpFallbackProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> DataResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("confidence/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::FetchError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            document: OnceCell::new(),
        })
    }

    async fn download(&self) -> DataResult<PublishedDocument> {
        info!(url = %self.url, "Downloading published metric values");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::FetchError(format!(
                "fallback source returned HTTP {}",
                status
            )));
        }

        let body = response.text().await?;
        let document = PublishedDocument::parse(&body)?;
        info!(columns = document.len(), "Published metric values cached");
        Ok(document)
    }

    async fn document(&self) -> DataResult<&PublishedDocument> {
        self.document.get_or_try_init(|| self.download()).await
    }
}

#[async_trait]
impl FallbackProvider for HttpFallbackProvider {
    async fn fetch(&self, metric_name: &str) -> CoreResult<Vec<DatedValue>> {
        let document = self.document().await?;

        match document.dated_values(metric_name) {
            Some(values) => Ok(values),
            None => {
                warn!(metric = metric_name, "Metric not present in published document");
                Ok(Vec::new())
            }
        }
    }
}
