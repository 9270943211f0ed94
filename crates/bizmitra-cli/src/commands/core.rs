//! Shared command utilities and init

use std::path::Path;

use anyhow::{bail, Context, Result};

use bizmitra_core::{Business, Database, RiskModel};

/// Open the billing database
pub fn open_db(db_path: &Path) -> Result<Database> {
    Database::new(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to open billing database at {}", db_path.display()))
}

/// Load the risk scorer artifacts
///
/// A missing model file is fatal; a missing scaler only degrades the
/// normalization (the core logs the downgrade).
pub fn load_scorer(model_path: &Path, scaler_path: &Path) -> Result<RiskModel> {
    RiskModel::load(model_path, scaler_path)
        .with_context(|| format!("Failed to load risk model from {}", model_path.display()))
}

/// Resolve a business id or fail with a hint
pub fn resolve_business(db: &Database, id: i64) -> Result<Business> {
    match db.get_business(id)? {
        Some(business) => Ok(business),
        None => bail!(
            "Business {} not found. Run 'bizmitra businesses' to list businesses.",
            id
        ),
    }
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    let db = open_db(db_path)?;

    println!("✅ Billing database ready at {}", db.path());
    println!();
    println!("Next steps:");
    println!("  bizmitra businesses add --name \"My Shop\"");
    println!("  bizmitra seed --business \"My Shop\"");
    println!("  bizmitra insights --business 1");

    Ok(())
}
