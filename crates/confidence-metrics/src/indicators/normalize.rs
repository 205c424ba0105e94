//! [0, 1] 정규화.

/// 각 시점까지의 최소/최대 값을 기준으로 정규화합니다.
///
/// 최소와 최대가 같은 (정보가 없는) 시점은 결측입니다.
pub fn normalize_expanding(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;

    values
        .iter()
        .map(|value| {
            let v = value.filter(|v| v.is_finite())?;
            low = low.min(v);
            high = high.max(v);

            let range = high - low;
            (range > 0.0).then(|| (v - low) / range)
        })
        .collect()
}

/// 고정 경계 사이에서 정규화합니다 (클리핑 없음).
pub fn normalize_between(value: f64, low: f64, high: f64) -> Option<f64> {
    let range = high - low;
    (range.abs() > f64::EPSILON && value.is_finite()).then(|| (value - low) / range)
}
