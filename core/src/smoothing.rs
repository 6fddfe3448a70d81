use ordered_float::OrderedFloat;

/// Antall samples for en varighet: avrundet til nærmeste heltall, minst 1.
pub fn window_samples(duration_secs: f64, interval_secs: f64) -> usize {
    let n = (duration_secs / interval_secs).round();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        1
    }
}

/// Bakoverskuende glidende snitt (vinduet slutter i `i`).
///
/// `None` for de første `window - 1` posisjonene og for hvert vindu som
/// inneholder minst én `None` (dropout smitter hele vinduet).
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if window == 0 || n < window {
        return out;
    }

    let mut sum = 0.0f64;
    let mut nulls = 0usize;
    for i in 0..n {
        match values[i] {
            Some(v) => sum += v,
            None => nulls += 1,
        }
        if i >= window {
            match values[i - window] {
                Some(v) => sum -= v,
                None => nulls -= 1,
            }
        }
        // nullstill akkumulert avrundingsfeil når vinduet er tomt for gyldige verdier
        if nulls == window {
            sum = 0.0;
        }
        if i + 1 >= window && nulls == 0 {
            out[i] = Some(sum / window as f64);
        }
    }
    out
}

/// Glidende median med samme kant- og null-regel som [`rolling_mean`].
pub fn rolling_median(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if window == 0 || n < window {
        return out;
    }

    for i in (window - 1)..n {
        let win: Option<Vec<OrderedFloat<f64>>> = values[i + 1 - window..=i]
            .iter()
            .map(|v| v.map(OrderedFloat))
            .collect();
        out[i] = win.and_then(median);
    }
    out
}

/// Median; partall antall gir snittet av de to midterste.
pub fn median(mut xs: Vec<OrderedFloat<f64>>) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    xs.sort_unstable();
    let n = xs.len();
    if n % 2 == 1 {
        Some(xs[n / 2].0)
    } else {
        Some((xs[n / 2 - 1].0 + xs[n / 2].0) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(xs: &[f64]) -> Vec<Option<f64>> {
        xs.iter().copied().map(Some).collect()
    }

    #[test]
    fn window_rounds_and_clamps() {
        assert_eq!(window_samples(30.0, 1.0), 30);
        assert_eq!(window_samples(5.0, 2.0), 3); // 2.5 -> 3
        assert_eq!(window_samples(1.0, 4.0), 1);
        assert_eq!(window_samples(1200.0, 0.5), 2400);
    }

    #[test]
    fn rolling_mean_edges() {
        let out = rolling_mean(&dense(&[1.0, 2.0, 3.0, 4.0]), 2);
        assert_eq!(out, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
    }

    #[test]
    fn rolling_mean_window_longer_than_series() {
        let out = rolling_mean(&dense(&[1.0, 2.0]), 3);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn rolling_mean_null_poisons_window() {
        let vals = vec![Some(10.0), None, Some(30.0), Some(40.0), Some(50.0)];
        let out = rolling_mean(&vals, 2);
        assert_eq!(out, vec![None, None, None, Some(35.0), Some(45.0)]);
    }

    #[test]
    fn rolling_median_resists_spike() {
        let vals = dense(&[1.0, 1.0, 50.0, 1.0, 2.0]);
        let out = rolling_median(&vals, 3);
        assert_eq!(out, vec![None, None, Some(1.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn median_even_count() {
        let xs = vec![OrderedFloat(4.0), OrderedFloat(1.0), OrderedFloat(3.0), OrderedFloat(2.0)];
        assert_eq!(median(xs), Some(2.5));
    }
}
