use crate::core::config::BreakpointMethod;


/// Linear-interpolated percentile, `q` in `[0, 100]`. Empty input yields 0.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub fn interquartile_range(values: &[f64]) -> f64 {
    percentile(values, 75.0) - percentile(values, 25.0)
}


pub fn breakpoint_threshold(distances: &[f64], method: BreakpointMethod, amount: f64) -> f64 {
    match method {
        BreakpointMethod::Percentile => percentile(distances, amount),
        BreakpointMethod::StandardDeviation => mean(distances) + amount * std_dev(distances),
        BreakpointMethod::Interquartile => {
            mean(distances) + amount * interquartile_range(distances)
        }
    }
}
