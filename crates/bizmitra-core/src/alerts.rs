//! Alert engine: threshold-only monitoring, no model dependency
//!
//! A business with no billing activity gets a single neutral alert and
//! nothing else. Otherwise at most one unpaid-exposure alert fires (the
//! ladder is mutually exclusive), a declining sales trend adds a warning,
//! and a clean run falls through to an all-clear.

use serde::{Deserialize, Serialize};

use crate::features::{FeatureVector, SalesTrend};
use crate::models::Level;

/// Thresholds governing the unpaid-exposure ladder
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Unpaid ratio above which exposure is flagged as risk
    pub high_unpaid_ratio: f64,
    /// Unpaid ratio above which exposure is flagged as a warning
    pub moderate_unpaid_ratio: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            high_unpaid_ratio: 0.4,
            moderate_unpaid_ratio: 0.2,
        }
    }
}

/// A narrated, severity-tagged observation derived from fixed thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: Level,
    pub title: String,
    pub message: String,
}

impl Alert {
    fn new(level: Level, title: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Generates the alert list for one feature vector
#[derive(Debug, Clone, Default)]
pub struct AlertEngine {
    config: AlertConfig,
}

impl AlertEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AlertConfig) -> Self {
        Self { config }
    }

    /// Produce the alert list; never empty
    pub fn generate(&self, features: &FeatureVector) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if features.bills_count == 0 {
            alerts.push(Alert::new(
                Level::Neutral,
                "No billing activity",
                "Create bills to activate business monitoring.",
            ));
            return alerts;
        }

        let unpaid_ratio = features.unpaid_ratio;
        if unpaid_ratio == 0.0 {
            alerts.push(Alert::new(
                Level::Success,
                "No unpaid exposure",
                "All bills are paid. No alerts detected.",
            ));
        } else if unpaid_ratio > self.config.high_unpaid_ratio {
            alerts.push(Alert::new(
                Level::Risk,
                "High unpaid exposure",
                format!("{}% bills unpaid.", (unpaid_ratio * 100.0) as i64),
            ));
        } else if unpaid_ratio > self.config.moderate_unpaid_ratio {
            alerts.push(Alert::new(
                Level::Warning,
                "Moderate unpaid exposure",
                format!("{}% bills unpaid.", (unpaid_ratio * 100.0) as i64),
            ));
        }

        if features.sales_trend == SalesTrend::Downward {
            alerts.push(Alert::new(
                Level::Warning,
                "Sales declining",
                "Recent sales are lower than earlier billing activity.",
            ));
        }

        if alerts.is_empty() {
            alerts.push(Alert::new(
                Level::Success,
                "Business operating normally",
                "No critical conditions detected at this time.",
            ));
        }

        alerts
    }
}
