/// Summary statistics of a set of measured values.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator); `None` for fewer than two samples.
    pub stdev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Computes summary statistics from the given samples, `None` if there are none.
    pub fn new(samples: &[f64]) -> Option<Self> {
        let mean = mean(samples)?;
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Some(Self {
            count: samples.len(),
            mean,
            stdev: sample_stdev(samples),
            min,
            max,
        })
    }
}

/// Computes a [`SummaryStats`] from a slice of samples.
pub fn summary_stats(samples: &[f64]) -> Option<SummaryStats> {
    SummaryStats::new(samples)
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Sample standard deviation, `None` for fewer than two samples.
pub fn sample_stdev(samples: &[f64]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let m = mean(samples)?;
    let ss: f64 = samples.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (samples.len() - 1) as f64).sqrt())
}
