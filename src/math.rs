use statrs::distribution::{ContinuousCDF, StudentsT};

/// Rounds to a fixed number of decimal places, half away from zero
///
/// Used for every rounded value the pipeline reports so percentages, summary
/// statistics, and test statistics share one convention.
pub fn round_to(x: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (x * scale).round() / scale
}

pub fn arithmetic_mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

/// Unbiased sample variance (n - 1 denominator); requires at least 2 values
pub fn sample_variance(x: &[f64]) -> f64 {
    let mean = arithmetic_mean(x);
    let sum_sq = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    sum_sq / (x.len() - 1) as f64
}

pub fn sample_std(x: &[f64]) -> f64 {
    sample_variance(x).sqrt()
}

/// Welch's two-sample t-test (unequal variances)
///
/// Returns the t statistic and the two-tailed p-value, with degrees of
/// freedom from the Welch-Satterthwaite equation. Both groups must hold at
/// least 2 values; callers enforce this. When both groups have zero variance
/// the statistic and p-value degenerate to non-finite values, mirroring the
/// reference implementation.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> (f64, f64) {
    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (ma, mb) = (arithmetic_mean(a), arithmetic_mean(b));
    let (sa, sb) = (sample_variance(a) / na, sample_variance(b) / nb);

    let t = (ma - mb) / (sa + sb).sqrt();
    let df = (sa + sb).powi(2) / (sa.powi(2) / (na - 1.0) + sb.powi(2) / (nb - 1.0));

    let p = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    };
    (t, p)
}
