//! 로그 추세 채널(Trolololo) 지표.

use chrono::NaiveDate;
use confidence_core::PriceSeries;

use crate::error::{MetricCalcResult, MetricError};
use crate::indicators::normalize_between;
use crate::plot::{PlotLine, PlotPanel};
use crate::traits::{Calculation, Metric};

/// 가격이 장기 로그 추세 채널의 하단(0)과 상단(1) 사이 어디에 있는지 측정합니다.
#[derive(Debug, Clone)]
pub struct TrolololoMetric {
    origin: NaiveDate,
}

impl Default for TrolololoMetric {
    fn default() -> Self {
        Self {
            origin: NaiveDate::from_ymd_opt(2012, 1, 1).unwrap_or_default(),
        }
    }
}

impl TrolololoMetric {
    fn top_price(days: f64) -> Option<f64> {
        let shifted = days + 1400.0;
        (shifted > 0.0).then(|| 10f64.powf(2.900 * shifted.ln() - 19.463))
    }

    fn bottom_price(days: f64) -> Option<f64> {
        let shifted = days + 1200.0;
        (shifted > 0.0).then(|| 10f64.powf(2.788 * shifted.ln() - 19.463))
    }
}

impl Metric for TrolololoMetric {
    fn name(&self) -> &str {
        "Trolololo"
    }

    fn description(&self) -> &str {
        "Bitcoin Trolololo Trend Line"
    }

    fn calculate(&self, prices: &PriceSeries) -> MetricCalcResult<Calculation> {
        if prices.is_empty() {
            return Err(MetricError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let mut top = Vec::with_capacity(prices.len());
        let mut bottom = Vec::with_capacity(prices.len());
        let mut values = Vec::with_capacity(prices.len());

        for point in prices.iter() {
            let days = (point.date - self.origin).num_days() as f64;
            let (t, b) = (Self::top_price(days), Self::bottom_price(days));
            top.push(t);
            bottom.push(b);

            let value = match (t, b) {
                (Some(t), Some(b)) if point.price > 0.0 && b > 0.0 => {
                    normalize_between(point.price.log10(), b.log10(), t.log10())
                }
                _ => None,
            };
            values.push(value);
        }

        let panels = vec![
            PlotPanel::new("Price")
                .log_scale()
                .with_line(PlotLine::dense("Price", prices.prices()))
                .with_line(PlotLine::new("Top", top))
                .with_line(PlotLine::new("Bottom", bottom)),
            PlotPanel::new("Value").with_line(PlotLine::new("Trolololo", values.clone())),
        ];

        Ok(Calculation { values, panels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confidence_core::PricePoint;

    #[test]
    fn test_channel_bounds() {
        let metric = TrolololoMetric::default();
        let date = NaiveDate::from_ymd_opt(2021, 11, 10).unwrap();
        let days = (date - metric.origin).num_days() as f64;
        let top = TrolololoMetric::top_price(days).unwrap();
        let bottom = TrolololoMetric::bottom_price(days).unwrap();
        assert!(top > bottom);

        let prices = PriceSeries::new(vec![
            PricePoint::new(date, bottom),
            PricePoint::new(date.succ_opt().unwrap(), top * 10.0),
        ]);
        let calc = metric.calculate(&prices).unwrap();
        assert!(calc.values[0].unwrap().abs() < 1e-9);
        // 클리핑은 compute에서 수행
        assert!(calc.values[1].unwrap() > 1.0);
    }

    #[test]
    fn test_empty_series_fails() {
        let prices = PriceSeries::new(Vec::new());
        assert!(TrolololoMetric::default().calculate(&prices).is_err());
    }
}
