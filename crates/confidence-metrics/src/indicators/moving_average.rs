//! 이동평균.

use crate::error::{MetricCalcResult, MetricError};

/// 단순 이동평균 (SMA) 계산.
///
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// # 반환
/// 각 시점의 SMA 값 (처음 period-1개는 None)
pub fn sma(prices: &[f64], period: usize) -> MetricCalcResult<Vec<Option<f64>>> {
    if period == 0 {
        return Err(MetricError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }

    if prices.len() < period {
        return Err(MetricError::InsufficientData {
            required: period,
            provided: prices.len(),
        });
    }

    let mut result = Vec::with_capacity(prices.len());
    let mut window_sum = 0.0;

    for (i, price) in prices.iter().enumerate() {
        window_sum += price;
        if i >= period {
            window_sum -= prices[i - period];
        }

        if i + 1 < period {
            result.push(None);
        } else {
            result.push(Some(window_sum / period as f64));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_values() {
        let result = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!((result[2].unwrap() - 2.0).abs() < 1e-12);
        assert!((result[3].unwrap() - 3.0).abs() < 1e-12);
        assert!((result[4].unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let err = sma(&[1.0, 2.0], 3).unwrap_err();
        assert!(matches!(
            err,
            MetricError::InsufficientData {
                required: 3,
                provided: 2
            }
        ));
    }

    #[test]
    fn test_sma_zero_period() {
        assert!(matches!(
            sma(&[1.0], 0).unwrap_err(),
            MetricError::InvalidParameter(_)
        ));
    }
}
