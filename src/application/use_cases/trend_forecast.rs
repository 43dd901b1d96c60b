// ============================================================
// TREND FORECAST USE CASE
// ============================================================
// Validate paired sequences, fit a line, extrapolate five steps

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::forecast::{Forecast, TrendModel, FORECAST_HORIZON};

/// Prediction request body.
///
/// Elements stay untyped until coercion so a bad element is reported by
/// position instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastRequest {
    #[serde(default)]
    pub x_values: Option<Vec<Value>>,
    #[serde(default)]
    pub y_values: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Copy)]
pub struct TrendForecastUseCase {
    horizon: usize,
}

impl Default for TrendForecastUseCase {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendForecastUseCase {
    pub fn new() -> Self {
        Self {
            horizon: FORECAST_HORIZON,
        }
    }

    pub fn execute(&self, request: &ForecastRequest) -> Result<Forecast> {
        let (x_raw, y_raw) = match (&request.x_values, &request.y_values) {
            (Some(x), Some(y)) if !x.is_empty() && !y.is_empty() => (x, y),
            _ => {
                return Err(AppError::MissingInput(
                    "Missing data for prediction".to_string(),
                ))
            }
        };

        let x = coerce_sequence("x_values", x_raw)?;
        let y = coerce_sequence("y_values", y_raw)?;

        let model = TrendModel::fit(&x, &y).map_err(|e| e.context("Prediction error"))?;
        debug!(
            slope = model.slope,
            intercept = model.intercept,
            samples = x.len(),
            "Fitted trend"
        );

        // Input order, not the largest x
        let last_x = x[x.len() - 1];

        Ok(Forecast {
            predictions: model.extrapolate(last_x, self.horizon),
        })
    }
}

fn coerce_sequence(name: &str, values: &[Value]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            coerce_number(value).ok_or_else(|| {
                AppError::ValidationError(format!(
                    "{}[{}] is not a number: {}",
                    name, index, value
                ))
            })
        })
        .collect()
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ForecastRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_linear_forecast() {
        let forecast = TrendForecastUseCase::new()
            .execute(&request(json!({"x_values": [1, 2, 3], "y_values": [2, 4, 6]})))
            .unwrap();

        let expected = [8.0, 10.0, 12.0, 14.0, 16.0];
        assert_eq!(forecast.predictions.len(), 5);
        for (p, e) in forecast.predictions.iter().zip(expected) {
            assert!((p - e).abs() < 1e-9);
        }
    }

    #[test]
    fn test_last_x_follows_input_order() {
        let forecast = TrendForecastUseCase::new()
            .execute(&request(json!({"x_values": [3, 1, 2], "y_values": [3, 1, 2]})))
            .unwrap();

        // y = x, extrapolated from the final element (2), not the max (3)
        assert!((forecast.predictions[0] - 3.0).abs() < 1e-9);
        assert!((forecast.predictions[4] - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let forecast = TrendForecastUseCase::new()
            .execute(&request(json!({"x_values": ["1", "2"], "y_values": [1.5, "2.5"]})))
            .unwrap();
        assert!((forecast.predictions[0] - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_or_empty_sequences() {
        let use_case = TrendForecastUseCase::new();
        for body in [
            json!({}),
            json!({"x_values": [1, 2]}),
            json!({"x_values": [], "y_values": [1]}),
            json!({"x_values": null, "y_values": [1]}),
        ] {
            let err = use_case.execute(&request(body)).unwrap_err();
            assert_eq!(
                err,
                AppError::MissingInput("Missing data for prediction".to_string())
            );
        }
    }

    #[test]
    fn test_non_numeric_element_is_validation_error() {
        let err = TrendForecastUseCase::new()
            .execute(&request(json!({"x_values": [1, "two"], "y_values": [1, 2]})))
            .unwrap_err();

        match err {
            AppError::ValidationError(msg) => assert!(msg.starts_with("x_values[1]")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_null_element_is_validation_error() {
        let err = TrendForecastUseCase::new()
            .execute(&request(json!({"x_values": [1, 2], "y_values": [1, null]})))
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_length_mismatch_is_prediction_error() {
        let err = TrendForecastUseCase::new()
            .execute(&request(json!({"x_values": [1, 2, 3], "y_values": [1, 2]})))
            .unwrap_err();

        match err {
            AppError::ComputationError(msg) => assert!(msg.starts_with("Prediction error: ")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_x_gives_flat_forecast() {
        let forecast = TrendForecastUseCase::new()
            .execute(&request(json!({"x_values": [5, 5, 5], "y_values": [1, 2, 3]})))
            .unwrap();
        assert!(forecast.predictions.iter().all(|p| (p - 2.0).abs() < 1e-9));
    }
}
