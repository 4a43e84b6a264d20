//! Quantiles over numeric samples, using linear interpolation between order
//! statistics (the position of quantile `q` is `q * (len - 1)`).

/// Quantile of an already sorted sample. `None` for an empty sample.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    let t = pos - lo as f64;

    // Interpolate from the nearer endpoint so the result stays inside [a, b].
    let value = if t < 0.5 {
        a + (b - a) * t
    } else {
        b - (b - a) * (1.0 - t)
    };
    Some(value)
}
