//! Sales report commands

use anyhow::{bail, Result};

use bizmitra_core::{Database, PeriodSales};

use super::resolve_business;

pub fn cmd_report(db: &Database, business_id: i64, period: &str) -> Result<()> {
    let business = resolve_business(db, business_id)?;

    match period {
        "overview" => report_overview(db, business_id, &business.name),
        "daily" => {
            let periods = db.get_sales_by_day(business_id)?;
            report_periods(&business.name, "Daily sales", &periods)
        }
        "monthly" => {
            let periods = db.get_sales_by_month(business_id)?;
            report_periods(&business.name, "Monthly sales", &periods)
        }
        other => bail!("Unknown report period '{}' (use overview, daily, or monthly)", other),
    }
}

fn report_overview(db: &Database, business_id: i64, name: &str) -> Result<()> {
    let overview = db.get_sales_overview(business_id)?;

    println!();
    println!("📈 Sales Overview — {}", name);
    println!("   ─────────────────────────────────────────");
    println!("   Total sales:  ₹{:.2}", overview.total_sales);
    println!("   Bills:        {}", overview.bill_count);
    println!("   Paid:         {}", overview.paid);
    println!("   Unpaid:       {}", overview.unpaid);
    println!();

    Ok(())
}

fn report_periods(name: &str, heading: &str, periods: &[PeriodSales]) -> Result<()> {
    println!();
    println!("📈 {} — {}", heading, name);
    println!("   ─────────────────────────────────────────");

    if periods.is_empty() {
        println!("   No billing activity yet.");
        println!();
        return Ok(());
    }

    for period in periods {
        println!("   {:<10} ₹{:>12.2}", period.label, period.total);
    }

    let total: f64 = periods.iter().map(|p| p.total).sum();
    println!("   ─────────────────────────────────────────");
    println!("   {:<10} ₹{:>12.2}", "Total", total);
    println!();

    Ok(())
}
