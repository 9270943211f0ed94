//! Feature building: billing history → scorer-ready feature vector
//!
//! One vector is built fresh per request from the business's non-deleted
//! bills and never persisted. The risk scorer is injected at construction
//! so callers (and tests) decide which scorer backs the `risk_score`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::{BillFilter, Database};
use crate::error::Result;
use crate::models::PaymentStatus;
use crate::risk::{RiskInputs, RiskScorer};

/// Coarse sales direction: newest bill amount vs oldest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesTrend {
    Upward,
    Downward,
    Stable,
}

impl SalesTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upward => "upward",
            Self::Downward => "downward",
            Self::Stable => "stable",
        }
    }
}

impl std::str::FromStr for SalesTrend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upward" => Ok(Self::Upward),
            "downward" => Ok(Self::Downward),
            "stable" => Ok(Self::Stable),
            _ => Err(format!("Unknown sales trend: {}", s)),
        }
    }
}

impl std::fmt::Display for SalesTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed-shape feature vector consumed by the analytics engines
///
/// Immutable once built; `risk_score` is attached during construction and
/// never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Total non-deleted bills for the business
    pub bills_count: i64,
    /// UNPAID bills / all bills, in [0, 1]; 0 with no bills
    pub unpaid_ratio: f64,
    /// Sum of `total_amount` over PAID bills
    pub total_sales: f64,
    /// Mean `total_amount` over PAID bills; 0 with no PAID bills
    pub avg_bill_value: f64,
    /// Newest vs oldest bill amount; Stable below two bills
    pub sales_trend: SalesTrend,
    /// Model-predicted cash-flow risk probability, in [0, 1]
    pub risk_score: f64,
}

impl FeatureVector {
    /// The three inputs forwarded to the risk scorer
    pub fn risk_inputs(&self) -> RiskInputs {
        RiskInputs {
            unpaid_ratio: self.unpaid_ratio,
            avg_bill_value: self.avg_bill_value,
            bills_count: self.bills_count as f64,
        }
    }
}

/// Builds feature vectors from the billing store
pub struct FeatureBuilder<'a> {
    db: &'a Database,
    scorer: &'a dyn RiskScorer,
}

impl<'a> FeatureBuilder<'a> {
    /// Create a builder over the billing store with an injected scorer
    pub fn new(db: &'a Database, scorer: &'a dyn RiskScorer) -> Self {
        Self { db, scorer }
    }

    /// Build the feature vector for one business
    ///
    /// An unknown business simply has no bills and yields the zero-valued
    /// vector; downstream engines short-circuit on `bills_count == 0`.
    pub fn build(&self, business_id: i64) -> Result<FeatureVector> {
        let bills = self.db.list_bills(business_id, &BillFilter::new())?;

        let bills_count = bills.len() as i64;
        let unpaid = bills
            .iter()
            .filter(|b| b.payment_status == PaymentStatus::Unpaid)
            .count() as i64;

        let mut total_sales = 0.0;
        let mut paid_count = 0i64;
        for bill in bills.iter().filter(|b| b.payment_status == PaymentStatus::Paid) {
            total_sales += bill.total_amount;
            paid_count += 1;
        }
        let avg_bill_value = if paid_count > 0 {
            total_sales / paid_count as f64
        } else {
            0.0
        };

        let unpaid_ratio = if bills_count > 0 {
            unpaid as f64 / bills_count as f64
        } else {
            0.0
        };

        // Trend needs two points; bills arrive oldest-first
        let sales_trend = if bills_count >= 2 {
            let oldest = bills.first().expect("bills_count >= 2").total_amount;
            let latest = bills.last().expect("bills_count >= 2").total_amount;
            if latest > oldest {
                SalesTrend::Upward
            } else if latest < oldest {
                SalesTrend::Downward
            } else {
                SalesTrend::Stable
            }
        } else {
            SalesTrend::Stable
        };

        let mut features = FeatureVector {
            bills_count,
            unpaid_ratio,
            total_sales,
            avg_bill_value,
            sales_trend,
            risk_score: 0.0,
        };
        features.risk_score = self.scorer.score(&features.risk_inputs());

        debug!(
            business_id,
            bills_count,
            unpaid_ratio,
            risk_score = features.risk_score,
            "Features built"
        );

        Ok(features)
    }
}
