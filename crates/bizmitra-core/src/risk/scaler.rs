//! Fitted min-max normalizer
//!
//! The training job exports the scaler fitted on the training set as a
//! small JSON artifact (per-feature minima and maxima). Inference applies
//! `(x - min) / (max - min)` per feature, matching the training-time
//! transform. Outputs are intentionally not clamped: inputs outside the
//! fitted range scale past [0, 1] exactly as they would have in training.

use serde::Deserialize;

use super::model::INPUT_WIDTH;
use crate::error::{Error, Result};

/// Min-max scaling parameters fitted during training
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ScalerParams")]
pub struct MinMaxScaler {
    data_min: [f64; INPUT_WIDTH],
    data_max: [f64; INPUT_WIDTH],
}

#[derive(Debug, Deserialize)]
struct ScalerParams {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
}

impl TryFrom<ScalerParams> for MinMaxScaler {
    type Error = Error;

    fn try_from(params: ScalerParams) -> Result<Self> {
        let data_min: [f64; INPUT_WIDTH] = params.data_min.try_into().map_err(|v: Vec<f64>| {
            Error::Model(format!("scaler data_min has {} entries, expected {}", v.len(), INPUT_WIDTH))
        })?;
        let data_max: [f64; INPUT_WIDTH] = params.data_max.try_into().map_err(|v: Vec<f64>| {
            Error::Model(format!("scaler data_max has {} entries, expected {}", v.len(), INPUT_WIDTH))
        })?;

        Ok(Self { data_min, data_max })
    }
}

impl MinMaxScaler {
    /// Apply the fitted transform to one input vector
    pub fn transform(&self, input: &[f64; INPUT_WIDTH]) -> [f64; INPUT_WIDTH] {
        let mut out = [0.0; INPUT_WIDTH];
        for i in 0..INPUT_WIDTH {
            let range = self.data_max[i] - self.data_min[i];
            // A constant training feature carries no signal; map it to 0
            out[i] = if range == 0.0 {
                0.0
            } else {
                (input[i] - self.data_min[i]) / range
            };
        }
        out
    }
}
