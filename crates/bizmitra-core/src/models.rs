//! Domain models for BizMitra

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business (tenant) owning a set of billing records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Payment status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    PayLater,
}

impl PaymentStatus {
    /// Stored representation, matching the billing application's values
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "PAID",
            Self::Unpaid => "UNPAID",
            Self::PayLater => "PAY_LATER",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PAID" => Ok(Self::Paid),
            "UNPAID" => Ok(Self::Unpaid),
            "PAY_LATER" | "PAYLATER" => Ok(Self::PayLater),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One billed transaction, owned by the billing application.
///
/// The analytics core only ever reads these; `is_deleted` rows are
/// filtered out of every analytics query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRecord {
    pub id: i64,
    pub business_id: i64,
    pub bill_number: String,
    pub customer_name: Option<String>,
    pub subtotal: f64,
    pub discount: f64,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// A bill to be inserted into the billing store (seeder and tests only;
/// the analytics core never writes bills)
#[derive(Debug, Clone)]
pub struct NewBill {
    pub customer_name: Option<String>,
    pub subtotal: f64,
    pub discount: f64,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Severity level attached to insights and alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
    Risk,
    Neutral,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Risk => "risk",
            Self::Neutral => "neutral",
        }
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "risk" => Ok(Self::Risk),
            "neutral" => Ok(Self::Neutral),
            _ => Err(format!("Unknown level: {}", s)),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate sales numbers for one business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOverview {
    pub total_sales: f64,
    pub bill_count: i64,
    pub paid: i64,
    pub unpaid: i64,
}

/// Sales total for one reporting period (a day or a month)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSales {
    /// Period label: `YYYY-MM-DD` for daily, `YYYY-MM` for monthly
    pub label: String,
    pub total: f64,
}
