//! Bill insertion and filtered listing
//!
//! Bill numbers follow the billing application's scheme:
//! `BS/<year>/<sequence:06>` with the sequence counted per business and
//! year. `total_amount` is always recomputed as `subtotal - discount`,
//! floored at zero.

use chrono::Datelike;
use rusqlite::params;
use tracing::debug;

use super::{format_datetime, parse_datetime, BillFilter, Database};
use crate::error::{Error, Result};
use crate::models::{BillingRecord, NewBill};

impl Database {
    /// Insert a bill for a business, returning its id
    ///
    /// Seeder/test write path; in production the billing application owns
    /// this table.
    pub fn insert_bill(&self, business_id: i64, bill: &NewBill) -> Result<i64> {
        let conn = self.conn()?;

        let year = bill.created_at.year();
        let seq: i64 = conn.query_row(
            "SELECT COUNT(*) FROM bills
             WHERE business_id = ?1 AND strftime('%Y', created_at) = ?2",
            params![business_id, year.to_string()],
            |row| row.get(0),
        )?;
        let bill_number = format!("BS/{}/{:06}", year, seq + 1);

        // Total safety: a discount can never push the total below zero
        let total_amount = (bill.subtotal - bill.discount).max(0.0);

        conn.execute(
            "INSERT INTO bills
                (business_id, bill_number, customer_name, subtotal, discount,
                 total_amount, payment_status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                business_id,
                bill_number,
                bill.customer_name,
                bill.subtotal,
                bill.discount,
                total_amount,
                bill.payment_status.as_str(),
                format_datetime(&bill.created_at),
            ],
        )?;

        debug!(business_id, bill_number, "Bill inserted");
        Ok(conn.last_insert_rowid())
    }

    /// List a business's bills, oldest first
    ///
    /// Ordering is `created_at, id` so trend computation is deterministic
    /// even when timestamps collide.
    pub fn list_bills(&self, business_id: i64, filter: &BillFilter) -> Result<Vec<BillingRecord>> {
        let conn = self.conn()?;
        let built = filter.build(business_id);

        let sql = format!(
            "SELECT id, business_id, bill_number, customer_name, subtotal, discount,
                    total_amount, payment_status, created_at, is_deleted
             FROM bills {} ORDER BY created_at, id",
            built.where_clause
        );
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            built.params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let bills = stmt
            .query_map(param_refs.as_slice(), |row| {
                let status: String = row.get(7)?;
                Ok(BillingRecord {
                    id: row.get(0)?,
                    business_id: row.get(1)?,
                    bill_number: row.get(2)?,
                    customer_name: row.get(3)?,
                    subtotal: row.get(4)?,
                    discount: row.get(5)?,
                    total_amount: row.get(6)?,
                    payment_status: status.parse().unwrap_or(crate::models::PaymentStatus::Paid),
                    created_at: parse_datetime(&row.get::<_, String>(8)?),
                    is_deleted: row.get(9)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(bills)
    }

    /// Count a business's non-deleted bills
    pub fn count_bills(&self, business_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM bills WHERE business_id = ?1 AND is_deleted = 0",
            params![business_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Soft-delete a bill so it disappears from every analytics query
    pub fn soft_delete_bill(&self, bill_id: i64) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE bills SET is_deleted = 1 WHERE id = ?1",
            params![bill_id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Bill {}", bill_id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;

    fn bill(subtotal: f64, discount: f64, status: PaymentStatus, ts: &str) -> NewBill {
        NewBill {
            customer_name: Some("Walk-in".to_string()),
            subtotal,
            discount,
            payment_status: status,
            created_at: chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
                .expect("valid test timestamp")
                .and_utc(),
        }
    }

    #[test]
    fn test_bill_numbers_sequence_per_year() {
        let db = Database::in_memory().unwrap();
        let biz = db.create_business("Test").unwrap();

        db.insert_bill(biz, &bill(100.0, 0.0, PaymentStatus::Paid, "2025-12-30 10:00:00"))
            .unwrap();
        db.insert_bill(biz, &bill(200.0, 0.0, PaymentStatus::Paid, "2026-01-02 10:00:00"))
            .unwrap();
        db.insert_bill(biz, &bill(300.0, 0.0, PaymentStatus::Paid, "2026-01-03 10:00:00"))
            .unwrap();

        let bills = db.list_bills(biz, &BillFilter::new()).unwrap();
        assert_eq!(bills[0].bill_number, "BS/2025/000001");
        assert_eq!(bills[1].bill_number, "BS/2026/000001");
        assert_eq!(bills[2].bill_number, "BS/2026/000002");
    }

    #[test]
    fn test_total_amount_floor() {
        let db = Database::in_memory().unwrap();
        let biz = db.create_business("Test").unwrap();

        db.insert_bill(biz, &bill(100.0, 250.0, PaymentStatus::Paid, "2026-01-01 09:00:00"))
            .unwrap();

        let bills = db.list_bills(biz, &BillFilter::new()).unwrap();
        assert_eq!(bills[0].total_amount, 0.0);
    }

    #[test]
    fn test_soft_delete_hides_bill() {
        let db = Database::in_memory().unwrap();
        let biz = db.create_business("Test").unwrap();

        let id = db
            .insert_bill(biz, &bill(500.0, 0.0, PaymentStatus::Unpaid, "2026-02-01 09:00:00"))
            .unwrap();
        db.soft_delete_bill(id).unwrap();

        assert!(db.list_bills(biz, &BillFilter::new()).unwrap().is_empty());
        assert_eq!(
            db.list_bills(biz, &BillFilter::new().include_deleted(true))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(db.count_bills(biz).unwrap(), 0);
    }

    #[test]
    fn test_soft_delete_unknown_bill() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(db.soft_delete_bill(42), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_status_filter() {
        let db = Database::in_memory().unwrap();
        let biz = db.create_business("Test").unwrap();

        db.insert_bill(biz, &bill(100.0, 0.0, PaymentStatus::Paid, "2026-01-01 09:00:00"))
            .unwrap();
        db.insert_bill(biz, &bill(200.0, 0.0, PaymentStatus::Unpaid, "2026-01-02 09:00:00"))
            .unwrap();

        let unpaid = db
            .list_bills(biz, &BillFilter::new().status(Some(PaymentStatus::Unpaid)))
            .unwrap();
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].total_amount, 200.0);
    }
}
