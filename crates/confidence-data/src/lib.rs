//! # Confidence Data
//!
//! 파이프라인의 외부 데이터 경계.
//!
//! - [`HttpPriceSource`]: 일봉 시장 차트 JSON에서 가격 시계열 조회
//! - [`HttpFallbackProvider`]: 게시된 지표 문서에서 폴백 값 조회 (프로세스당 한 번 다운로드)
//! - [`OutputDocument`]: 날짜별 가격/지표/신뢰도 JSON 문서 작성
//! - [`PublishedDocument`]: 같은 형식의 문서 읽기

pub mod document;
pub mod error;
pub mod fallback;
pub mod price;

pub use document::{OutputDocument, PublishedDocument, CONFIDENCE_COLUMN, PRICE_COLUMN};
pub use error::{DataError, DataResult};
pub use fallback::HttpFallbackProvider;
pub use price::{parse_market_chart, HttpPriceSource};
