//! Demo billing data seeder
//!
//! Scatters bills across a trailing window with a realistic payment-status
//! mix (70% PAID, 20% UNPAID, 10% PAY_LATER). Amounts come from a small
//! item catalog so totals look like real shop bills. The RNG is a seeded
//! Pcg64Mcg, so the same seed always produces the same dataset.

use std::path::Path;

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

use bizmitra_core::{Database, NewBill, PaymentStatus};

use super::open_db;

/// (item, minimum quantity, maximum unit price)
const ITEM_CATALOG: &[(&str, i64, i64)] = &[
    ("Rice Bag", 50, 1200),
    ("Cooking Oil", 1, 900),
    ("Milk Packet", 1, 60),
    ("Sugar", 1, 45),
    ("Notebook", 1, 80),
    ("Pen", 1, 20),
    ("Mobile Charger", 1, 650),
    ("Headphones", 1, 1200),
    ("Tablet Strip", 1, 140),
    ("Soap", 1, 35),
];

const CUSTOMERS: &[Option<&str>] = &[
    Some("Walk-in"),
    Some("Regular Customer"),
    Some("Wholesale Buyer"),
    None,
];

const DISCOUNTS: &[f64] = &[0.0, 0.0, 0.0, 50.0, 100.0, 200.0];

fn random_status(rng: &mut Pcg64Mcg) -> PaymentStatus {
    match rng.gen_range(0..10) {
        0..=6 => PaymentStatus::Paid,
        7..=8 => PaymentStatus::Unpaid,
        _ => PaymentStatus::PayLater,
    }
}

fn random_bill(rng: &mut Pcg64Mcg, window_secs: i64, now: chrono::DateTime<Utc>) -> NewBill {
    let created_at = now - Duration::seconds(rng.gen_range(0..window_secs));

    let num_items = rng.gen_range(1..=5);
    let mut subtotal = 0.0;
    for (_, min_qty, max_price) in ITEM_CATALOG.choose_multiple(rng, num_items) {
        let qty: i64 = rng.gen_range(1..=3);
        let floor = min_qty * 10;
        let price = rng.gen_range(floor..=(*max_price).max(floor));
        subtotal += (qty * price) as f64;
    }

    NewBill {
        customer_name: CUSTOMERS
            .choose(rng)
            .copied()
            .flatten()
            .map(str::to_string),
        subtotal,
        discount: *DISCOUNTS.choose(rng).unwrap_or(&0.0),
        payment_status: random_status(rng),
        created_at,
    }
}

pub fn cmd_seed(
    db_path: &Path,
    business_name: Option<&str>,
    bills: usize,
    months: i64,
    seed: u64,
) -> Result<()> {
    let db = open_db(db_path)?;
    let mut rng = Pcg64Mcg::seed_from_u64(seed);

    // Pick the target businesses: one by name (created on demand), or
    // every existing business, or a fresh demo tenant when there are none
    let businesses = match business_name {
        Some(name) => {
            let existing = db
                .list_businesses()?
                .into_iter()
                .find(|b| b.name == name);
            let id = match existing {
                Some(b) => b.id,
                None => db.create_business(name)?,
            };
            vec![(id, name.to_string())]
        }
        None => {
            let mut all: Vec<(i64, String)> = db
                .list_businesses()?
                .into_iter()
                .map(|b| (b.id, b.name))
                .collect();
            if all.is_empty() {
                let id = db.create_business("Demo Traders")?;
                all.push((id, "Demo Traders".to_string()));
            }
            all
        }
    };

    let now = Utc::now();
    let window_secs = Duration::days(months * 30).num_seconds().max(1);

    for (id, name) in &businesses {
        println!("🚀 Seeding data for {}", name);
        for _ in 0..bills {
            db.insert_bill(*id, &random_bill(&mut rng, window_secs, now))?;
        }
        println!("   {} bills created for {}", bills, name);
    }

    println!("🎉 Seeded {} businesses", businesses.len());
    Ok(())
}
