//! BizMitra Core Library
//!
//! Shared functionality for the BizMitra billing analytics companion:
//! - Billing store access (businesses, bills, sales reports)
//! - Feature builder aggregating billing history into a feature vector
//! - Pretrained MLP risk scorer with fitted or fallback normalization
//! - Insight and alert engines narrating features into observations
//! - Guided chat responder for feature-templated answers

pub mod alerts;
pub mod chat;
pub mod db;
pub mod error;
pub mod features;
pub mod insights;
pub mod models;
pub mod risk;

pub use alerts::{Alert, AlertConfig, AlertEngine};
pub use chat::GuidedChat;
pub use db::{BillFilter, Database};
pub use error::{Error, Result};
pub use features::{FeatureBuilder, FeatureVector, SalesTrend};
pub use insights::{quick_insights, Insight, InsightConfig, InsightEngine};
pub use models::{
    BillingRecord, Business, Level, NewBill, PaymentStatus, PeriodSales, SalesOverview,
};
pub use risk::{MinMaxScaler, Mlp, RiskInputs, RiskModel, RiskScorer};
