//! Insight engine: features + risk score → narrated observations
//!
//! The dashboard leads with the ML risk forecast on every request; the
//! remaining insights are threshold checks that only appear when their
//! condition is real. Ordering is significant - the returned list is the
//! presentation order.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::FeatureVector;
use crate::models::Level;

/// Thresholds governing insight generation
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Risk score above which the forecast is flagged as risk
    pub risk_threshold: f64,
    /// Unpaid ratio above which the exposure insight appears
    pub unpaid_ratio_warning: f64,
    /// Average bill value below which the order-value insight appears
    pub low_order_value: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            risk_threshold: 0.6,
            unpaid_ratio_warning: 0.3,
            low_order_value: 1000.0,
        }
    }
}

/// A narrated, severity-tagged observation with a recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub level: Level,
    pub title: String,
    pub message: String,
    pub recommendation: String,
    /// Numeric context echoed from the feature vector
    pub data: serde_json::Value,
}

/// Generates the ordered insight list for one feature vector
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightConfig,
}

impl InsightEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InsightConfig) -> Self {
        Self { config }
    }

    /// Produce the insight list, most important first
    ///
    /// The forecast is always the first element; the two threshold
    /// insights are independent and appended in a fixed order. The risk
    /// score is read from the vector - the scorer is not re-invoked here.
    pub fn generate(&self, features: &FeatureVector) -> Vec<Insight> {
        let mut insights = Vec::new();

        let risk_score = features.risk_score;
        let at_risk = risk_score > self.config.risk_threshold;
        insights.push(Insight {
            level: if at_risk { Level::Risk } else { Level::Success },
            title: "ML Cash-Flow Risk Forecast".to_string(),
            message: format!(
                "Predicted cash-flow risk is {}%.",
                (risk_score * 100.0) as i64
            ),
            recommendation: if at_risk {
                "Reduce unpaid exposure immediately.".to_string()
            } else {
                "Risk levels are stable.".to_string()
            },
            data: serde_json::json!({ "risk_score": risk_score }),
        });

        if features.unpaid_ratio > self.config.unpaid_ratio_warning {
            insights.push(Insight {
                level: Level::Warning,
                title: "Unpaid Exposure Pattern".to_string(),
                message: format!(
                    "{}% of bills are unpaid.",
                    (features.unpaid_ratio * 100.0) as i64
                ),
                recommendation: "Enable reminders or advance payments.".to_string(),
                data: serde_json::json!({ "unpaid_ratio": features.unpaid_ratio }),
            });
        }

        if features.avg_bill_value < self.config.low_order_value {
            insights.push(Insight {
                level: Level::Warning,
                title: "Low Order Value".to_string(),
                message: format!(
                    "Average bill value is ₹{}.",
                    features.avg_bill_value as i64
                ),
                recommendation: "Bundle products or upsell.".to_string(),
                data: serde_json::json!({ "avg_bill_value": features.avg_bill_value }),
            });
        }

        insights
    }
}

/// Threshold above which a bill counts as high-value in quick insights
const HIGH_VALUE_BILL: f64 = 5000.0;

/// One-line dashboard observations derived straight from the billing store
///
/// The lightweight sibling of the insight engine: no feature vector, no
/// model, just counts.
pub fn quick_insights(db: &crate::db::Database, business_id: i64) -> Result<Vec<String>> {
    let overview = db.get_sales_overview(business_id)?;

    if overview.bill_count == 0 {
        return Ok(vec!["No sales data available yet".to_string()]);
    }

    let mut insights = Vec::new();

    if overview.unpaid as f64 > overview.bill_count as f64 * 0.3 {
        insights.push("High number of unpaid bills".to_string());
    }

    let big_bills = db.count_high_value_bills(business_id, HIGH_VALUE_BILL)?;
    if big_bills > 0 {
        insights.push(format!("{} high-value bills above ₹5,000", big_bills));
    }

    if insights.is_empty() {
        insights.push("Sales look healthy".to_string());
    }

    Ok(insights)
}
