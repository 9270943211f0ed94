//! Cash-flow risk scoring
//!
//! The trained scorer maps three billing features (unpaid ratio, average
//! bill value, bill count) to a risk probability in [0, 1]. Its weights
//! and the fitted normalizer are loaded once at startup from two JSON
//! artifacts and shared read-only afterwards; `score()` never mutates,
//! so one loaded model serves any number of concurrent requests.
//!
//! When the normalizer artifact is absent the scorer falls back to a
//! fixed-range normalization. That path is degraded accuracy, not an
//! error: it preserves the ordering of scores on in-range features but
//! scales `avg_bill_value` and `bills_count` differently from the fitted
//! transform.

pub mod model;
pub mod scaler;

use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};

pub use model::{Activation, Layer, Mlp, INPUT_WIDTH};
pub use scaler::MinMaxScaler;

/// Fallback divisor for `avg_bill_value` when no fitted scaler is present
const AVG_BILL_FALLBACK_SCALE: f64 = 5000.0;

/// Fallback divisor for `bills_count` when no fitted scaler is present
const BILLS_COUNT_FALLBACK_SCALE: f64 = 1000.0;

/// The three inputs the scorer consumes
///
/// The rest of the feature vector is builder-internal and never reaches
/// the model. Well-formedness (non-negative values, ratio in [0, 1]) is
/// the caller's responsibility; the feature builder guarantees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    pub unpaid_ratio: f64,
    pub avg_bill_value: f64,
    pub bills_count: f64,
}

/// A cash-flow risk scorer
///
/// Implementations must be pure: the same inputs always produce the same
/// probability, with no side effects. Tests substitute stub scorers
/// through this trait.
pub trait RiskScorer: Send + Sync {
    /// Predict the cash-flow risk probability, in [0, 1]
    fn score(&self, inputs: &RiskInputs) -> f64;
}

/// The trained scorer: a dense network plus an optional fitted normalizer
pub struct RiskModel {
    network: Mlp,
    scaler: Option<MinMaxScaler>,
}

impl RiskModel {
    /// Load the scorer artifacts
    ///
    /// A missing or corrupt model artifact is a fatal startup error. A
    /// missing scaler artifact is not: the scorer silently degrades to
    /// fixed-range normalization (one warning is logged so the
    /// degradation is observable).
    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(model_path).map_err(|e| {
            Error::Model(format!(
                "cannot read model artifact {}: {}",
                model_path.display(),
                e
            ))
        })?;
        let network: Mlp = serde_json::from_str(&raw)
            .map_err(|e| Error::Model(format!("invalid model artifact: {}", e)))?;

        let scaler = if scaler_path.exists() {
            let raw = std::fs::read_to_string(scaler_path)?;
            let scaler: MinMaxScaler = serde_json::from_str(&raw)
                .map_err(|e| Error::Model(format!("invalid scaler artifact: {}", e)))?;
            Some(scaler)
        } else {
            warn!(
                path = %scaler_path.display(),
                "Scaler artifact not found; using fixed-range normalization"
            );
            None
        };

        info!(
            model = %model_path.display(),
            fitted_scaler = scaler.is_some(),
            "Risk model loaded"
        );

        Ok(Self { network, scaler })
    }

    /// Build a scorer from already-deserialized parts (tests, embedding)
    pub fn from_parts(network: Mlp, scaler: Option<MinMaxScaler>) -> Self {
        Self { network, scaler }
    }

    /// Whether the fitted normalizer is in use (false = fallback path)
    pub fn has_fitted_scaler(&self) -> bool {
        self.scaler.is_some()
    }

    fn normalize(&self, inputs: &RiskInputs) -> [f64; INPUT_WIDTH] {
        let raw = [inputs.unpaid_ratio, inputs.avg_bill_value, inputs.bills_count];
        match &self.scaler {
            Some(scaler) => scaler.transform(&raw),
            None => [
                inputs.unpaid_ratio,
                (inputs.avg_bill_value / AVG_BILL_FALLBACK_SCALE).min(1.0),
                (inputs.bills_count / BILLS_COUNT_FALLBACK_SCALE).min(1.0),
            ],
        }
    }
}

impl RiskScorer for RiskModel {
    fn score(&self, inputs: &RiskInputs) -> f64 {
        self.network.forward(&self.normalize(inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn network() -> Mlp {
        // score = sigmoid(4u - a - c - 1) over normalized inputs
        serde_json::from_value(serde_json::json!({
            "layers": [
                { "weights": [[4.0, -1.0, -1.0]], "bias": [-1.0], "activation": "sigmoid" }
            ]
        }))
        .unwrap()
    }

    fn scaler() -> MinMaxScaler {
        serde_json::from_value(serde_json::json!({
            "data_min": [0.0, 500.0, 10.0],
            "data_max": [1.0, 20000.0, 5000.0]
        }))
        .unwrap()
    }

    #[test]
    fn test_score_in_unit_interval_on_both_paths() {
        let fitted = RiskModel::from_parts(network(), Some(scaler()));
        let fallback = RiskModel::from_parts(network(), None);

        for inputs in [
            RiskInputs { unpaid_ratio: 0.0, avg_bill_value: 0.0, bills_count: 0.0 },
            RiskInputs { unpaid_ratio: 1.0, avg_bill_value: 50000.0, bills_count: 9999.0 },
            RiskInputs { unpaid_ratio: 0.5, avg_bill_value: 800.0, bills_count: 10.0 },
        ] {
            for model in [&fitted, &fallback] {
                let score = model.score(&inputs);
                assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
            }
        }
    }

    #[test]
    fn test_fallback_clamps_large_features() {
        let model = RiskModel::from_parts(network(), None);
        let normalized = model.normalize(&RiskInputs {
            unpaid_ratio: 0.2,
            avg_bill_value: 50000.0,
            bills_count: 25000.0,
        });
        assert_eq!(normalized, [0.2, 1.0, 1.0]);
    }

    #[test]
    fn test_both_paths_rank_unpaid_exposure_the_same() {
        let fitted = RiskModel::from_parts(network(), Some(scaler()));
        let fallback = RiskModel::from_parts(network(), None);

        let low = RiskInputs { unpaid_ratio: 0.05, avg_bill_value: 2000.0, bills_count: 100.0 };
        let high = RiskInputs { unpaid_ratio: 0.8, avg_bill_value: 2000.0, bills_count: 100.0 };

        assert!(fitted.score(&high) > fitted.score(&low));
        assert!(fallback.score(&high) > fallback.score(&low));
    }

    #[test]
    fn test_load_missing_model_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("risk_model.json");
        let scaler_path = dir.path().join("scaler.json");

        let result = RiskModel::load(&missing, &scaler_path);
        assert!(matches!(result, Err(Error::Model(_))));
    }

    #[test]
    fn test_load_corrupt_model_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("risk_model.json");
        std::fs::File::create(&model_path)
            .unwrap()
            .write_all(b"not json")
            .unwrap();

        let result = RiskModel::load(&model_path, &dir.path().join("scaler.json"));
        assert!(matches!(result, Err(Error::Model(_))));
    }

    #[test]
    fn test_load_without_scaler_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("risk_model.json");
        std::fs::write(
            &model_path,
            serde_json::json!({
                "layers": [
                    { "weights": [[1.0, 0.0, 0.0]], "bias": [0.0], "activation": "sigmoid" }
                ]
            })
            .to_string(),
        )
        .unwrap();

        let model = RiskModel::load(&model_path, &dir.path().join("scaler.json")).unwrap();
        assert!(!model.has_fitted_scaler());
        assert!((model.score(&RiskInputs {
            unpaid_ratio: 0.0,
            avg_bill_value: 0.0,
            bills_count: 0.0,
        }) - 0.5)
            .abs()
            < 1e-12);
    }

    #[test]
    fn test_load_with_scaler() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("risk_model.json");
        let scaler_path = dir.path().join("scaler.json");
        std::fs::write(
            &model_path,
            serde_json::json!({
                "layers": [
                    { "weights": [[1.0, 0.0, 0.0]], "bias": [0.0], "activation": "sigmoid" }
                ]
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(
            &scaler_path,
            serde_json::json!({
                "data_min": [0.0, 500.0, 10.0],
                "data_max": [1.0, 20000.0, 5000.0]
            })
            .to_string(),
        )
        .unwrap();

        let model = RiskModel::load(&model_path, &scaler_path).unwrap();
        assert!(model.has_fitted_scaler());
    }
}
