//! Windowed exponential moving average.
//!
//! alpha = 2/(window+1). The sample `k` bars behind `index` carries weight
//! (1-alpha)^k, for k in 0..=window. Near the start of the series the sum
//! stops at index 0 and is normalized by the weights actually used, so the
//! value at index 0 is the sample itself.

/// Smoothing factor for a window.
pub fn alpha(window: usize) -> f64 {
    2.0 / (window as f64 + 1.0)
}

/// EMA of `series` at `index` over at most `window + 1` samples.
///
/// `index` must be a valid position in `series`.
pub fn ema(series: &[f64], index: usize, window: usize) -> f64 {
    let decay = 1.0 - alpha(window);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for back in 0..=window.min(index) {
        let weight = decay.powi(back as i32);
        numerator += series[index - back] * weight;
        denominator += weight;
    }

    numerator / denominator
}
