//! 가격 시계열 타입.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DateIndex;

/// 하루치 가격.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 날짜 (UTC 기준)
    pub date: NaiveDate,
    /// 종가
    pub price: f64,
}

impl PricePoint {
    /// 새 가격 포인트를 생성합니다.
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// 날짜 오름차순 가격 시계열.
///
/// 한 번의 실행 동안 변경되지 않는 입력입니다. 정렬/중복 여부는
/// 가격 소스의 책임이며 여기서는 검증하지 않습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    index: DateIndex,
    prices: Vec<f64>,
}

impl PriceSeries {
    /// 가격 포인트들로 시계열을 생성합니다.
    pub fn new(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let (dates, prices): (Vec<_>, Vec<_>) =
            points.into_iter().map(|p| (p.date, p.price)).unzip();
        Self {
            index: DateIndex::new(dates),
            prices,
        }
    }

    /// 공유 날짜 인덱스.
    pub fn index(&self) -> &DateIndex {
        &self.index
    }

    pub fn dates(&self) -> &[NaiveDate] {
        self.index.as_slice()
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// 가장 최근 가격 포인트.
    pub fn last(&self) -> Option<PricePoint> {
        let date = *self.index.as_slice().last()?;
        let price = *self.prices.last()?;
        Some(PricePoint { date, price })
    }

    /// 날짜가 엄격하게 오름차순인지 (중복 없음) 확인합니다.
    pub fn is_well_formed(&self) -> bool {
        self.index.as_slice().windows(2).all(|w| w[0] < w[1])
    }

    pub fn iter(&self) -> impl Iterator<Item = PricePoint> + '_ {
        self.index
            .as_slice()
            .iter()
            .zip(&self.prices)
            .map(|(date, price)| PricePoint::new(*date, *price))
    }
}
