use std::time::{Duration, Instant};

/// Run a function and measure its execution time.
pub fn time_fn<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Run `f` `warmup` times unmeasured, then `iterations` times measured.
///
/// # Arguments
///
/// * `warmup` - Calls made before timing starts, discarded
/// * `iterations` - Timed calls that feed the statistics
/// * `f` - Function to benchmark
///
/// # Returns
///
/// A tuple of (result of the last timed call, timing statistics). The result
/// is `None` when `iterations` is zero.
pub fn benchmark_with_warmup<F, R>(
    warmup: usize,
    iterations: usize,
    mut f: F,
) -> (Option<R>, BenchmarkStats)
where
    F: FnMut() -> R,
{
    for _ in 0..warmup {
        let _ = f();
    }

    let mut last = None;
    let mut times = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let (result, elapsed) = time_fn(&mut f);
        times.push(elapsed.as_secs_f64() * 1e6);
        last = Some(result);
    }
    (last, BenchmarkStats::from_times(times))
}

/// Timing summary in microseconds.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkStats {
    pub mean_us: f64,
    pub std_dev_us: f64,
    pub min_us: f64,
    pub max_us: f64,
    pub median_us: f64,
    pub p95_us: f64,
}

impl BenchmarkStats {
    pub fn from_times(mut times: Vec<f64>) -> Self {
        if times.is_empty() {
            return Self::default();
        }
        times.sort_by(f64::total_cmp);

        let n = times.len();
        let mean = times.iter().sum::<f64>() / n as f64;
        let variance = times.iter().map(|&t| (t - mean).powi(2)).sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (times[n / 2 - 1] + times[n / 2]) / 2.0
        } else {
            times[n / 2]
        };
        let p95 = times[((n as f64 * 0.95) as usize).min(n - 1)];

        Self {
            mean_us: mean,
            std_dev_us: variance.sqrt(),
            min_us: times[0],
            max_us: times[n - 1],
            median_us: median,
            p95_us: p95,
        }
    }
}
