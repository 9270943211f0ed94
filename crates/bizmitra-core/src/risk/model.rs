//! Dense feed-forward network for risk inference
//!
//! The trained model ships as a JSON artifact: an ordered list of dense
//! layers, each holding a weight matrix (one row per output unit), a bias
//! vector, and an activation. Training happens offline; this module only
//! runs the forward pass.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Number of inputs the scorer consumes (unpaid_ratio, avg_bill_value,
/// bills_count)
pub const INPUT_WIDTH: usize = 3;

/// Activation function applied to a layer's outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
}

impl Activation {
    fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Relu => x.max(0.0),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }
}

/// One dense layer: `out[j] = activation(dot(weights[j], in) + bias[j])`
#[derive(Debug, Clone, Deserialize)]
pub struct Layer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

impl Layer {
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                let z: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + b;
                self.activation.apply(z)
            })
            .collect()
    }
}

/// A validated multi-layer perceptron
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "MlpParams")]
pub struct Mlp {
    layers: Vec<Layer>,
}

/// Raw artifact shape, validated on conversion into [`Mlp`]
#[derive(Debug, Deserialize)]
struct MlpParams {
    layers: Vec<Layer>,
}

impl TryFrom<MlpParams> for Mlp {
    type Error = Error;

    fn try_from(params: MlpParams) -> Result<Self> {
        let layers = params.layers;

        if layers.is_empty() {
            return Err(Error::Model("artifact has no layers".to_string()));
        }

        let mut width = INPUT_WIDTH;
        for (i, layer) in layers.iter().enumerate() {
            if layer.weights.is_empty() {
                return Err(Error::Model(format!("layer {} has no units", i)));
            }
            if layer.weights.len() != layer.bias.len() {
                return Err(Error::Model(format!(
                    "layer {}: {} weight rows but {} biases",
                    i,
                    layer.weights.len(),
                    layer.bias.len()
                )));
            }
            for (j, row) in layer.weights.iter().enumerate() {
                if row.len() != width {
                    return Err(Error::Model(format!(
                        "layer {} unit {}: expected {} inputs, got {}",
                        i,
                        j,
                        width,
                        row.len()
                    )));
                }
            }
            width = layer.weights.len();
        }

        // The output contract is a single probability; requiring a lone
        // sigmoid unit guarantees the [0, 1] range without clamping.
        let last = layers.last().expect("checked non-empty");
        if last.weights.len() != 1 {
            return Err(Error::Model(format!(
                "final layer must have one output unit, got {}",
                last.weights.len()
            )));
        }
        if last.activation != Activation::Sigmoid {
            return Err(Error::Model(
                "final layer activation must be sigmoid".to_string(),
            ));
        }

        Ok(Mlp { layers })
    }
}

impl Mlp {
    /// Run the forward pass over a normalized input vector
    pub fn forward(&self, input: &[f64; INPUT_WIDTH]) -> f64 {
        let mut values = input.to_vec();
        for layer in &self.layers {
            values = layer.forward(&values);
        }
        values[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single sigmoid unit: score = sigmoid(w · x + b)
    fn single_layer(weights: [f64; 3], bias: f64) -> Mlp {
        serde_json::from_value(serde_json::json!({
            "layers": [
                { "weights": [weights], "bias": [bias], "activation": "sigmoid" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_forward_single_sigmoid() {
        let mlp = single_layer([1.0, 0.0, 0.0], 0.0);
        assert!((mlp.forward(&[0.0, 0.0, 0.0]) - 0.5).abs() < 1e-12);

        let high = mlp.forward(&[4.0, 0.0, 0.0]);
        assert!(high > 0.98);
    }

    #[test]
    fn test_forward_with_hidden_relu() {
        // relu pair carries the signed input through the hidden layer
        let mlp: Mlp = serde_json::from_value(serde_json::json!({
            "layers": [
                {
                    "weights": [[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]],
                    "bias": [0.0, 0.0],
                    "activation": "relu"
                },
                { "weights": [[2.0, -2.0]], "bias": [-1.0], "activation": "sigmoid" }
            ]
        }))
        .unwrap();

        // score = sigmoid(2x - 1)
        assert!((mlp.forward(&[0.5, 0.0, 0.0]) - 0.5).abs() < 1e-12);
        assert!(mlp.forward(&[1.0, 0.0, 0.0]) > 0.7);
        assert!(mlp.forward(&[0.0, 0.0, 0.0]) < 0.3);
    }

    #[test]
    fn test_output_always_in_unit_interval() {
        let mlp = single_layer([100.0, -50.0, 25.0], 10.0);
        for input in [
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [1000.0, -1000.0, 0.0],
            [-5.0, 3.0, 99.0],
        ] {
            let score = mlp.forward(&input);
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_rejects_empty_artifact() {
        let result: std::result::Result<Mlp, _> =
            serde_json::from_value(serde_json::json!({ "layers": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_width_mismatch() {
        let result: std::result::Result<Mlp, _> = serde_json::from_value(serde_json::json!({
            "layers": [
                { "weights": [[1.0, 2.0]], "bias": [0.0], "activation": "sigmoid" }
            ]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_sigmoid_output() {
        let result: std::result::Result<Mlp, _> = serde_json::from_value(serde_json::json!({
            "layers": [
                { "weights": [[1.0, 0.0, 0.0]], "bias": [0.0], "activation": "relu" }
            ]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_multi_output() {
        let result: std::result::Result<Mlp, _> = serde_json::from_value(serde_json::json!({
            "layers": [
                {
                    "weights": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                    "bias": [0.0, 0.0],
                    "activation": "sigmoid"
                }
            ]
        }));
        assert!(result.is_err());
    }
}
