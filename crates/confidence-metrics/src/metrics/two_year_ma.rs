//! 2년 이동평균 지표.

use confidence_core::PriceSeries;

use super::ln_positive;
use crate::error::MetricCalcResult;
use crate::indicators::{normalize_expanding, sma};
use crate::plot::{PlotLine, PlotPanel};
use crate::traits::{Calculation, Metric};

const TWO_YEARS_DAYS: usize = 730;

/// 가격이 2년 이동평균에서 로그 기준으로 얼마나 떨어져 있는지 측정합니다.
#[derive(Debug, Clone, Default)]
pub struct TwoYearMovingAverageMetric;

impl Metric for TwoYearMovingAverageMetric {
    fn name(&self) -> &str {
        "2YMA"
    }

    fn description(&self) -> &str {
        "2 Year Moving Average"
    }

    fn calculate(&self, prices: &PriceSeries) -> MetricCalcResult<Calculation> {
        let average = sma(prices.prices(), TWO_YEARS_DAYS)?;

        let log_distance: Vec<_> = prices
            .prices()
            .iter()
            .zip(&average)
            .map(|(price, avg)| {
                let avg = (*avg)?;
                Some(ln_positive(*price)? - ln_positive(avg)?)
            })
            .collect();
        let values = normalize_expanding(&log_distance);

        let multiplied: Vec<_> = average.iter().map(|v| v.map(|v| v * 5.0)).collect();
        let panels = vec![
            PlotPanel::new("Price")
                .log_scale()
                .with_line(PlotLine::dense("Price", prices.prices()))
                .with_line(PlotLine::new("2YMA", average))
                .with_line(PlotLine::new("2YMA x5", multiplied)),
            PlotPanel::new("Value").with_line(PlotLine::new("2YMA", values.clone())),
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
    fn test_rising_price_reaches_top_of_range() {
        let start = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap();
        let prices = PriceSeries::new((0..800).map(|i| {
            let x = i as f64;
            PricePoint::new(start + Duration::days(i), 100.0 * (1e-5 * x * x).exp())
        }));

        let calc = TwoYearMovingAverageMetric.calculate(&prices).unwrap();
        assert_eq!(calc.values.len(), 800);
        assert_eq!(calc.values[728], None);
        // 가속 상승에서는 거리가 계속 커지므로 최신 값이 최대
        assert_eq!(calc.values[799], Some(1.0));
    }
}
