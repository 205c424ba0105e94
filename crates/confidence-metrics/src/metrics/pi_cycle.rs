//! Pi Cycle Top 지표.

use confidence_core::PriceSeries;

use super::ln_positive;
use crate::error::MetricCalcResult;
use crate::indicators::{normalize_expanding, sma};
use crate::plot::{PlotLine, PlotPanel};
use crate::traits::{Calculation, Metric};

/// 111일 이동평균이 350일 이동평균의 두 배에 얼마나 근접했는지 측정합니다.
#[derive(Debug, Clone)]
pub struct PiCycleMetric {
    fast_period: usize,
    slow_period: usize,
}

impl Default for PiCycleMetric {
    fn default() -> Self {
        Self {
            fast_period: 111,
            slow_period: 350,
        }
    }
}

impl Metric for PiCycleMetric {
    fn name(&self) -> &str {
        "PiCycle"
    }

    fn description(&self) -> &str {
        "Pi Cycle Top Indicator"
    }

    fn calculate(&self, prices: &PriceSeries) -> MetricCalcResult<Calculation> {
        let fast = sma(prices.prices(), self.fast_period)?;
        let slow = sma(prices.prices(), self.slow_period)?;
        let slow_doubled: Vec<_> = slow.iter().map(|v| v.map(|v| v * 2.0)).collect();

        let log_ratio: Vec<_> = fast
            .iter()
            .zip(&slow_doubled)
            .map(|(f, s)| match (f, s) {
                (Some(f), Some(s)) => ln_positive(f / s),
                _ => None,
            })
            .collect();
        let values = normalize_expanding(&log_ratio);

        let panels = vec![
            PlotPanel::new("Price")
                .log_scale()
                .with_line(PlotLine::dense("Price", prices.prices()))
                .with_line(PlotLine::new("111DMA", fast))
                .with_line(PlotLine::new("350DMA x2", slow_doubled)),
            PlotPanel::new("Value").with_line(PlotLine::new("PiCycle", values.clone())),
        ];

        Ok(Calculation { values, panels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricError;
    use chrono::{Duration, NaiveDate};
    use confidence_core::PricePoint;

    fn series(len: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        PriceSeries::new(
            (0..len).map(|i| PricePoint::new(start + Duration::days(i as i64), 100.0 + i as f64)),
        )
    }

    #[test]
    fn test_requires_slow_period() {
        let err = PiCycleMetric::default().calculate(&series(200)).unwrap_err();
        assert!(matches!(err, MetricError::InsufficientData { required: 350, .. }));
    }

    #[test]
    fn test_values_aligned_and_bounded() {
        let prices = series(500);
        let calc = PiCycleMetric::default().calculate(&prices).unwrap();

        assert_eq!(calc.values.len(), prices.len());
        assert!(calc.values[..349].iter().all(Option::is_none));
        assert!(calc
            .values
            .iter()
            .flatten()
            .all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(calc.panels.len(), 2);
    }
}
