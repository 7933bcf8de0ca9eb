use statrs::statistics::Statistics;

/// Variances below this are treated as zero.
const ZERO_VARIANCE: f64 = 1e-12;

/// Shared statistics utilities for race analytics.
pub struct Stats;

impl Stats {
    /// Population mean and population standard deviation.
    ///
    /// Returns `None` for an empty sample.
    pub fn population_mean_std(values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }

        let mean = values.iter().mean();
        let std_dev = values.iter().population_std_dev();

        if std_dev.is_nan() {
            return None;
        }
        // Identical samples must report exactly zero spread
        let std_dev = if std_dev * std_dev < ZERO_VARIANCE {
            0.0
        } else {
            std_dev
        };

        Some((mean, std_dev))
    }

    /// Pearson correlation coefficient.
    ///
    /// Undefined (`None`) for mismatched lengths, fewer than two points, or when
    /// either series has zero variance.
    pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }

        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;

        for (xi, yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        if var_x / n < ZERO_VARIANCE || var_y / n < ZERO_VARIANCE {
            return None;
        }

        let r = cov / (var_x.sqrt() * var_y.sqrt());
        Some(r.clamp(-1.0, 1.0))
    }

    /// Ordinary-least-squares slope of `ys` against their index `0, 1, 2, ...`.
    ///
    /// Fewer than two points have no trend; the slope is 0.
    pub fn index_slope(ys: &[f64]) -> f64 {
        let n = ys.len();
        if n < 2 {
            return 0.0;
        }

        let n_f = n as f64;
        let mean_x = (n_f - 1.0) / 2.0;
        let mean_y = ys.iter().sum::<f64>() / n_f;

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for (i, y) in ys.iter().enumerate() {
            let dx = i as f64 - mean_x;
            sxy += dx * (y - mean_y);
            sxx += dx * dx;
        }

        if sxx > 0.0 { sxy / sxx } else { 0.0 }
    }
}
