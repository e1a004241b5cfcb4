use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

pub fn mean(vec: &[f64]) -> f64 {
    vec.iter().mean()
}

/// The trailing `n` elements of a slice (the whole slice when it is shorter).
pub fn tail(vec: &[f64], n: usize) -> &[f64] {
    &vec[vec.len().saturating_sub(n)..]
}

/// Round `value` to the nearest multiple of `step`.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
