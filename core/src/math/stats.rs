pub struct StatsHelper;

impl StatsHelper {
    /// Left-to-right sum; an empty series totals `0.0`.
    pub fn total(values: &[f64]) -> f64 {
        values.iter().fold(0.0, |acc, &v| acc + v)
    }

    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        Self::total(values) / values.len() as f64
    }

    /// Largest value, or `None` for an empty series.
    pub fn peak(values: &[f64]) -> Option<f64> {
        values.iter().copied().reduce(f64::max)
    }
}
