//! 날짜별 결과 JSON 문서.
//!
//! 열 단위 객체 형식을 사용합니다.
//!
//! ```json
//! {
//!   "Price": { "1704067200": 42280.2345, ... },
//!   "PiCycle": { "1704067200": 0.4123, ... },
//!   "Confidence": { "1704067200": null, ... }
//! }
//! ```
//!
//! 날짜 키는 UTC 자정의 epoch 초, 결측 값은 `null`입니다. 게시된 폴백
//! 문서도 같은 형식이므로 [`PublishedDocument`]가 둘 다 읽습니다.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime};
use confidence_core::{DateIndex, DatedValue, PriceSeries, Series};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{DataError, DataResult};

/// 가격 열 이름.
pub const PRICE_COLUMN: &str = "Price";

/// 종합 신뢰도 열 이름.
pub const CONFIDENCE_COLUMN: &str = "Confidence";

/// 날짜를 UTC 자정 epoch 초로 변환합니다.
pub fn date_to_epoch(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::default()).and_utc().timestamp()
}

/// epoch 초를 UTC 날짜로 변환합니다.
pub fn epoch_to_date(secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}

// =============================================================================
// 작성
// =============================================================================

/// 한 번의 실행 결과 문서.
///
/// 열 순서는 추가 순서를 유지합니다 (가격, 지표들, 신뢰도).
#[derive(Debug, Clone)]
pub struct OutputDocument {
    index: DateIndex,
    columns: Vec<(String, Vec<Option<f64>>)>,
    decimal_places: u32,
}

impl OutputDocument {
    /// 가격 열로 시작하는 문서를 생성합니다.
    pub fn new(prices: &PriceSeries, decimal_places: u32) -> Self {
        let price_column = prices.prices().iter().copied().map(Some).collect();
        Self {
            index: prices.index().clone(),
            columns: vec![(PRICE_COLUMN.to_string(), price_column)],
            decimal_places,
        }
    }

    /// 값 열을 추가합니다.
    ///
    /// 시계열이 문서의 날짜 인덱스와 다르면 에러를 반환합니다.
    pub fn with_column(mut self, name: impl Into<String>, series: &Series) -> DataResult<Self> {
        let name = name.into();
        if !series.is_aligned_with(&self.index) {
            return Err(DataError::InvalidData(format!(
                "column '{}' is not aligned with the price index ({} vs {} rows)",
                name,
                series.len(),
                self.index.len()
            )));
        }
        if self.columns.iter().any(|(existing, _)| *existing == name) {
            return Err(DataError::InvalidData(format!("duplicate column '{}'", name)));
        }

        self.columns.push((name, series.values().to_vec()));
        Ok(self)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// JSON 문자열로 직렬화합니다 (2칸 들여쓰기).
    pub fn to_json(&self) -> DataResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 파일로 저장합니다. 상위 디렉토리가 없으면 생성합니다.
    pub fn write(&self, path: &Path) -> DataResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

struct ColumnView<'a> {
    index: &'a DateIndex,
    values: &'a [Option<f64>],
    decimal_places: u32,
}

impl Serialize for ColumnView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (date, value) in self.index.iter().zip(self.values) {
            let value = value
                .filter(|v| v.is_finite())
                .map(|v| round_to(v, self.decimal_places));
            map.serialize_entry(&date_to_epoch(*date).to_string(), &value)?;
        }
        map.end()
    }
}

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, values) in &self.columns {
            map.serialize_entry(
                name,
                &ColumnView {
                    index: &self.index,
                    values,
                    decimal_places: self.decimal_places,
                },
            )?;
        }
        map.end()
    }
}

// =============================================================================
// 읽기
// =============================================================================

/// 열 단위 문서의 파싱 결과.
#[derive(Debug, Clone, Default)]
pub struct PublishedDocument {
    columns: HashMap<String, Vec<(NaiveDate, Option<f64>)>>,
}

impl PublishedDocument {
    /// JSON 문자열을 파싱합니다.
    pub fn parse(body: &str) -> DataResult<Self> {
        let raw: HashMap<String, HashMap<String, Option<f64>>> = serde_json::from_str(body)
            .map_err(|e| DataError::ParseError(format!("unexpected document layout: {}", e)))?;

        let mut columns = HashMap::with_capacity(raw.len());
        for (name, entries) in raw {
            let mut rows = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let date = key
                    .parse::<i64>()
                    .ok()
                    .and_then(epoch_to_date)
                    .ok_or_else(|| {
                        DataError::ParseError(format!("invalid timestamp '{}' in '{}'", key, name))
                    })?;
                rows.push((date, value));
            }
            rows.sort_by_key(|(date, _)| *date);
            columns.insert(name, rows);
        }

        Ok(Self { columns })
    }

    /// 파일에서 읽습니다.
    pub fn read(path: &Path) -> DataResult<Self> {
        let body = fs::read_to_string(path)?;
        Self::parse(&body)
    }

    /// 열의 (날짜, 값) 목록. 날짜 오름차순입니다.
    pub fn column(&self, name: &str) -> Option<&[(NaiveDate, Option<f64>)]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// 열의 결측이 아닌 값들.
    pub fn dated_values(&self, name: &str) -> Option<Vec<DatedValue>> {
        self.column(name).map(|rows| {
            rows.iter()
                .filter_map(|(date, value)| value.map(|v| DatedValue::new(*date, v)))
                .collect()
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
