use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Number of future points produced by a forecast
pub const FORECAST_HORIZON: usize = 5;

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    /// Fit on mean-centred data.
    ///
    /// When the x spread is zero the regression is singular; the fit then
    /// falls back to a flat line through the mean of y.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(AppError::ComputationError(format!(
                "Found input variables with inconsistent numbers of samples: [{}, {}]",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(AppError::ComputationError(
                "Cannot fit a trend on zero samples".to_string(),
            ));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(AppError::ComputationError(
                "Input contains infinity or a value too large".to_string(),
            ));
        }

        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let (sxx, sxy) = x.iter().zip(y).fold((0.0, 0.0), |(sxx, sxy), (xi, yi)| {
            let dx = xi - mean_x;
            (sxx + dx * dx, sxy + dx * (yi - mean_y))
        });

        // Equal x, or spread too small to square without underflow
        let model = if sxx == 0.0 || x.iter().all(|v| *v == x[0]) {
            Self {
                slope: 0.0,
                intercept: mean_y,
            }
        } else {
            let slope = sxy / sxx;
            Self {
                slope,
                intercept: mean_y - slope * mean_x,
            }
        };

        if !model.slope.is_finite() || !model.intercept.is_finite() {
            return Err(AppError::ComputationError(
                "Regression produced a non-finite coefficient".to_string(),
            ));
        }

        Ok(model)
    }

    pub fn predict_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Evaluate the line at `last_x + 1 ..= last_x + steps`.
    pub fn extrapolate(&self, last_x: f64, steps: usize) -> Vec<f64> {
        (1..=steps)
            .map(|step| self.predict_at(last_x + step as f64))
            .collect()
    }
}

/// Forecast response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predictions: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{} != {}", a, e);
        }
    }

    #[test]
    fn test_fit_exact_line() {
        let model = TrendModel::fit(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-12);
        assert!(model.intercept.abs() < 1e-12);
        assert_close(&model.extrapolate(3.0, FORECAST_HORIZON), &[8.0, 10.0, 12.0, 14.0, 16.0]);
    }

    #[test]
    fn test_fit_noisy_points() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.1, 1.4, 2.1, 2.4];
        let model = TrendModel::fit(&x, &y).unwrap();
        assert!((model.slope - 0.46).abs() < 1e-9);
        assert!((model.intercept - 1.06).abs() < 1e-9);
    }

    #[test]
    fn test_constant_x_falls_back_to_flat_line() {
        let model = TrendModel::fit(&[0.1, 0.1, 0.1], &[1.0, 2.0, 6.0]).unwrap();
        assert_eq!(model.slope, 0.0);
        assert!((model.intercept - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_underflowing_x_spread_is_flat() {
        let model = TrendModel::fit(&[0.0, 1e-200], &[1.0, 3.0]).unwrap();
        assert_eq!(model.slope, 0.0);
        assert!((model.intercept - 2.0).abs() < 1e-12);
        assert!(model.extrapolate(1e-200, 5).iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_single_point_is_flat() {
        let model = TrendModel::fit(&[4.0], &[7.0]).unwrap();
        assert_close(&model.extrapolate(4.0, 2), &[7.0, 7.0]);
    }

    #[test]
    fn test_length_mismatch_is_computation_error() {
        let err = TrendModel::fit(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, AppError::ComputationError(_)));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let err = TrendModel::fit(&[1.0, f64::INFINITY], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, AppError::ComputationError(_)));
    }
}
