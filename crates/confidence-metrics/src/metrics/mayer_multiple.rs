//! Mayer Multiple 지표.

use confidence_core::PriceSeries;

use super::ln_positive;
use crate::error::MetricCalcResult;
use crate::indicators::{normalize_between, sma};
use crate::plot::{PlotLine, PlotPanel};
use crate::traits::{Calculation, Metric};

/// 가격 / 200일 이동평균을 로그 스케일 고정 경계로 정규화합니다.
#[derive(Debug, Clone)]
pub struct MayerMultipleMetric {
    period: usize,
    low: f64,
    high: f64,
}

impl Default for MayerMultipleMetric {
    fn default() -> Self {
        Self {
            period: 200,
            low: 0.6,
            high: 2.4,
        }
    }
}

impl Metric for MayerMultipleMetric {
    fn name(&self) -> &str {
        "MayerMultiple"
    }

    fn description(&self) -> &str {
        "Mayer Multiple"
    }

    fn calculate(&self, prices: &PriceSeries) -> MetricCalcResult<Calculation> {
        let average = sma(prices.prices(), self.period)?;
        let (low, high) = (self.low.ln(), self.high.ln());

        let multiple: Vec<_> = prices
            .prices()
            .iter()
            .zip(&average)
            .map(|(price, avg)| avg.filter(|a| *a > 0.0).map(|a| price / a))
            .collect();
        let values: Vec<_> = multiple
            .iter()
            .map(|m| normalize_between(ln_positive((*m)?)?, low, high))
            .collect();

        let panels = vec![
            PlotPanel::new("Mayer Multiple").with_line(PlotLine::new("Price / 200DMA", multiple)),
            PlotPanel::new("Value").with_line(PlotLine::new("MayerMultiple", values.clone())),
        ];

        Ok(Calculation { values, panels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use confidence_core::PricePoint;

    #[test]
    fn test_flat_price_sits_inside_band() {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let prices =
            PriceSeries::new((0..250).map(|i| PricePoint::new(start + Duration::days(i), 50.0)));

        let calc = MayerMultipleMetric::default().calculate(&prices).unwrap();
        // multiple = 1.0 → ln(1/0.6) / ln(2.4/0.6) = 0.368...
        let expected = (1.0f64 / 0.6).ln() / 4.0f64.ln();
        assert!((calc.values[249].unwrap() - expected).abs() < 1e-9);
        assert_eq!(calc.values[198], None);
    }
}
