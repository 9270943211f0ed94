//! Bill filter builder for constructing dynamic SQL queries
//!
//! The billing application exposes its records as a filterable collection;
//! this builder produces the WHERE clause and parameters for that view so
//! the listing and counting queries share one piece of logic.

use chrono::NaiveDate;

use crate::models::PaymentStatus;

/// Builder for constructing bill query filters
///
/// Deleted bills are excluded unless `include_deleted` is set; results are
/// always scoped to one business.
#[derive(Debug, Clone, Default)]
pub struct BillFilter {
    pub status: Option<PaymentStatus>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub include_deleted: bool,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including the "WHERE" keyword and business scoping
    pub where_clause: String,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl BillFilter {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one payment status
    pub fn status(mut self, status: Option<PaymentStatus>) -> Self {
        self.status = status;
        self
    }

    /// Restrict to bills created within a date range (inclusive)
    pub fn date_range(mut self, range: Option<(NaiveDate, NaiveDate)>) -> Self {
        self.date_range = range;
        self
    }

    /// Include soft-deleted bills (the analytics core never does)
    pub fn include_deleted(mut self, value: bool) -> Self {
        self.include_deleted = value;
        self
    }

    /// Build the filter components for the given business
    pub fn build(&self, business_id: i64) -> FilterResult {
        let mut conditions = vec!["business_id = ?1".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(business_id)];

        if !self.include_deleted {
            conditions.push("is_deleted = 0".to_string());
        }

        if let Some(status) = self.status {
            params.push(Box::new(status.as_str()));
            conditions.push(format!("payment_status = ?{}", params.len()));
        }

        if let Some((from, to)) = self.date_range {
            params.push(Box::new(from.to_string()));
            params.push(Box::new(to.to_string()));
            conditions.push(format!(
                "date(created_at) BETWEEN ?{} AND ?{}",
                params.len() - 1,
                params.len()
            ));
        }

        FilterResult {
            where_clause: format!("WHERE {}", conditions.join(" AND ")),
            params,
        }
    }
}
