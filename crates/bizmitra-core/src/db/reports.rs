//! Sales overview and period groupings
//!
//! Backing queries for the dashboard reports. Note the overview counts
//! "unpaid" as everything that is not PAID (PAY_LATER included), which is
//! how the dashboard has always presented it; the feature builder's
//! `unpaid_ratio` counts strictly UNPAID bills.

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::{PeriodSales, SalesOverview};

impl Database {
    /// Aggregate sales numbers for one business (all non-deleted bills)
    pub fn get_sales_overview(&self, business_id: i64) -> Result<SalesOverview> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT COALESCE(SUM(total_amount), 0),
                    COUNT(*),
                    COALESCE(SUM(payment_status = 'PAID'), 0),
                    COALESCE(SUM(payment_status != 'PAID'), 0)
             FROM bills
             WHERE business_id = ?1 AND is_deleted = 0",
            params![business_id],
            |row| {
                Ok(SalesOverview {
                    total_sales: row.get(0)?,
                    bill_count: row.get(1)?,
                    paid: row.get(2)?,
                    unpaid: row.get(3)?,
                })
            },
        )
        .map_err(Into::into)
    }

    /// Sales totals grouped by calendar day, oldest first
    pub fn get_sales_by_day(&self, business_id: i64) -> Result<Vec<PeriodSales>> {
        self.sales_by_period(business_id, "date(created_at)")
    }

    /// Sales totals grouped by calendar month, oldest first
    pub fn get_sales_by_month(&self, business_id: i64) -> Result<Vec<PeriodSales>> {
        self.sales_by_period(business_id, "strftime('%Y-%m', created_at)")
    }

    fn sales_by_period(&self, business_id: i64, label_expr: &str) -> Result<Vec<PeriodSales>> {
        let conn = self.conn()?;

        let sql = format!(
            "SELECT {label} AS label, SUM(total_amount) AS total
             FROM bills
             WHERE business_id = ?1 AND is_deleted = 0
             GROUP BY label
             ORDER BY label",
            label = label_expr
        );

        let mut stmt = conn.prepare(&sql)?;
        let periods = stmt
            .query_map(params![business_id], |row| {
                Ok(PeriodSales {
                    label: row.get(0)?,
                    total: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(periods)
    }

    /// Count non-deleted bills at or above a total-amount threshold
    pub fn count_high_value_bills(&self, business_id: i64, threshold: f64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM bills
             WHERE business_id = ?1 AND is_deleted = 0 AND total_amount >= ?2",
            params![business_id, threshold],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBill, PaymentStatus};

    fn bill(total: f64, status: PaymentStatus, ts: &str) -> NewBill {
        NewBill {
            customer_name: None,
            subtotal: total,
            discount: 0.0,
            payment_status: status,
            created_at: chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
                .expect("valid test timestamp")
                .and_utc(),
        }
    }

    fn seeded_db() -> (Database, i64) {
        let db = Database::in_memory().unwrap();
        let biz = db.create_business("Test").unwrap();

        db.insert_bill(biz, &bill(1000.0, PaymentStatus::Paid, "2026-01-10 09:00:00"))
            .unwrap();
        db.insert_bill(biz, &bill(2000.0, PaymentStatus::Paid, "2026-01-10 15:00:00"))
            .unwrap();
        db.insert_bill(biz, &bill(500.0, PaymentStatus::Unpaid, "2026-02-01 09:00:00"))
            .unwrap();
        db.insert_bill(biz, &bill(7500.0, PaymentStatus::PayLater, "2026-02-20 09:00:00"))
            .unwrap();

        (db, biz)
    }

    #[test]
    fn test_sales_overview() {
        let (db, biz) = seeded_db();
        let overview = db.get_sales_overview(biz).unwrap();

        assert_eq!(overview.bill_count, 4);
        assert_eq!(overview.paid, 2);
        // PAY_LATER counts as unpaid in the dashboard overview
        assert_eq!(overview.unpaid, 2);
        assert!((overview.total_sales - 11000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_period_groupings_sum_to_overview() {
        let (db, biz) = seeded_db();
        let overview = db.get_sales_overview(biz).unwrap();

        let daily = db.get_sales_by_day(biz).unwrap();
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].label, "2026-01-10");
        assert!((daily[0].total - 3000.0).abs() < f64::EPSILON);

        let monthly = db.get_sales_by_month(biz).unwrap();
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].label, "2026-01");

        let daily_sum: f64 = daily.iter().map(|p| p.total).sum();
        let monthly_sum: f64 = monthly.iter().map(|p| p.total).sum();
        assert!((daily_sum - overview.total_sales).abs() < f64::EPSILON);
        assert!((monthly_sum - overview.total_sales).abs() < f64::EPSILON);
    }

    #[test]
    fn test_high_value_count() {
        let (db, biz) = seeded_db();
        assert_eq!(db.count_high_value_bills(biz, 5000.0).unwrap(), 1);
        assert_eq!(db.count_high_value_bills(biz, 100000.0).unwrap(), 0);
    }

    #[test]
    fn test_empty_business_overview() {
        let db = Database::in_memory().unwrap();
        let biz = db.create_business("Empty").unwrap();

        let overview = db.get_sales_overview(biz).unwrap();
        assert_eq!(overview.bill_count, 0);
        assert_eq!(overview.total_sales, 0.0);
    }
}
