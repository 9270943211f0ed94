//! Status and business listing commands

use std::path::Path;

use anyhow::Result;

use bizmitra_core::Database;

use super::open_db;

pub fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 BizMitra Status");
    println!("   ─────────────────────────────────────────");

    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        let db = open_db(db_path)?;
        let businesses = db.list_businesses()?;
        println!();
        println!("   Businesses: {}", businesses.len());
        for business in &businesses {
            let count = db.count_bills(business.id)?;
            println!("     [{}] {} — {} bills", business.id, business.name, count);
        }
    } else {
        println!("   Size: (database not initialized)");
        println!();
        println!("   Run 'bizmitra init' to create it.");
    }

    println!();
    Ok(())
}

pub fn cmd_businesses_list(db: &Database) -> Result<()> {
    let businesses = db.list_businesses()?;

    if businesses.is_empty() {
        println!("No businesses found. Create one with:");
        println!("  bizmitra businesses add --name \"My Shop\"");
        return Ok(());
    }

    println!();
    println!("🏪 Businesses");
    println!("   ─────────────────────────────");

    for business in businesses {
        println!("   [{}] {}", business.id, business.name);
    }
    println!();

    Ok(())
}

pub fn cmd_businesses_add(db: &Database, name: &str) -> Result<()> {
    let id = db.create_business(name)?;
    println!("✅ Created business [{}] {}", id, name);
    Ok(())
}
